//! System identity: user, host model, OS, kernel, uptime, locale

use crate::context::Context;
use crate::data::Value;
use crate::error::{EzfetchError, Result};
use crate::host::Host;
use crate::utils::file::read_key_value;
use crate::utils::parsing::format_uptime;

/// Vendor filler that DMI tables carry instead of a real name
const DMI_PLACEHOLDERS: &[&str] = &[
    "to be filled by o.e.m.",
    "system product name",
    "system version",
    "default string",
    "not applicable",
    "not specified",
    "none",
    "o.e.m.",
    "type1productconfigid",
];

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn hostname(host: &Host) -> Option<String> {
    ["/proc/sys/kernel/hostname", "/etc/hostname"]
        .iter()
        .find_map(|path| host.read_first_line(path).ok().and_then(non_empty))
}

/// `user@hostname`
pub fn user(ctx: &Context) -> Result<Value> {
    let user = ctx
        .host
        .first_env(&["USER", "LOGNAME"])
        .ok_or_else(|| EzfetchError::detection("no user in environment"))?;
    Ok(match hostname(&ctx.host) {
        Some(hostname) => Value::text(format!("{}@{}", user, hostname)),
        None => Value::text(user),
    })
}

fn is_placeholder(s: &str) -> bool {
    DMI_PLACEHOLDERS.contains(&s.to_lowercase().as_str())
}

/// Machine model from DMI, or the devicetree on boards without it
pub fn host_model(ctx: &Context) -> Result<Value> {
    let host = &ctx.host;
    if let Ok(name) = host.read_first_line("/sys/devices/virtual/dmi/id/product_name") {
        let version = host
            .read_first_line("/sys/devices/virtual/dmi/id/product_version")
            .unwrap_or_default();
        let parts: Vec<&str> = [name.as_str(), version.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty() && !is_placeholder(part))
            .collect();
        return Ok(if parts.is_empty() {
            Value::Unknown
        } else {
            Value::text(parts.join(" "))
        });
    }

    let model = host.read_to_string("/sys/firmware/devicetree/base/model")?;
    let model = model.trim_end_matches('\0').trim();
    Ok(if model.is_empty() {
        Value::Unknown
    } else {
        Value::text(model)
    })
}

/// Distribution name plus architecture, e.g. "Arch Linux x86_64"
pub fn os(ctx: &Context) -> Result<Value> {
    let release = ctx
        .host
        .read_to_string("/etc/os-release")
        .or_else(|_| ctx.host.read_to_string("/usr/lib/os-release"))?;

    let name = read_key_value(&release, "PRETTY_NAME")
        .filter(|s| !s.is_empty())
        .or_else(|| read_key_value(&release, "NAME").filter(|s| !s.is_empty()));
    Ok(match name {
        Some(name) => Value::text(format!("{} {}", name, std::env::consts::ARCH)),
        None => Value::Unknown,
    })
}

pub fn kernel(ctx: &Context) -> Result<Value> {
    if let Some(release) = ctx
        .host
        .read_first_line("/proc/sys/kernel/osrelease")
        .ok()
        .and_then(non_empty)
    {
        return Ok(Value::text(release));
    }
    let release = ctx.host.run("uname", &["-r"])?;
    Ok(non_empty(release).map_or(Value::Unknown, Value::Text))
}

pub fn uptime(ctx: &Context) -> Result<Value> {
    let line = ctx.host.read_first_line("/proc/uptime")?;
    let seconds: f64 = line
        .split_whitespace()
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| EzfetchError::Parse(format!("bad /proc/uptime: {:?}", line)))?;
    Ok(Value::text(format_uptime(seconds as u64)))
}

pub fn locale(ctx: &Context) -> Result<Value> {
    ctx.host
        .first_env(&["LC_ALL", "LC_CTYPE", "LANG"])
        .map(Value::Text)
        .ok_or_else(|| EzfetchError::detection("no locale variables set"))
}
