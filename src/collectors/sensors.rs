//! Sensors and power supply (battery)

use crate::context::Context;
use crate::data::Value;
use crate::error::{EzfetchError, Result};

const POWER_SUPPLY: &str = "/sys/class/power_supply";

/// Charge and status of every `BAT*` supply, e.g. "85% (Charging)"
pub fn battery(ctx: &Context) -> Result<Value> {
    let host = &ctx.host;
    let batteries: Vec<String> = host
        .read_dir_names(POWER_SUPPLY)?
        .iter()
        .filter(|name| name.starts_with("BAT"))
        .filter_map(|name| {
            let base = format!("{}/{}", POWER_SUPPLY, name);
            let capacity = host.read_first_line(&format!("{}/capacity", base)).ok()?;
            let status = host.read_first_line(&format!("{}/status", base)).unwrap_or_default();
            Some(match status.as_str() {
                "" | "Unknown" => format!("{}%", capacity),
                status => format!("{}% ({})", capacity, status),
            })
        })
        .collect();

    if batteries.is_empty() {
        return Err(EzfetchError::detection("no battery found"));
    }
    Ok(Value::text(batteries.join(", ")))
}
