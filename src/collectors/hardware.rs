//! Hardware information (CPU, GPU, memory, swap, disk)

use crate::context::Context;
use crate::data::Value;
use crate::error::{EzfetchError, Result};
use crate::host::Host;
use crate::utils::parsing::{clean_gpu_name, extract_after_colon, format_usage, meminfo_kb};
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

const GPU_CLASSES: &[&str] = &["VGA compatible controller", "3D controller", "Display controller"];

const PCI_VENDORS: &[(&str, &str)] = &[
    ("0x10de", "NVIDIA"),
    ("0x1002", "AMD"),
    ("0x8086", "Intel"),
    ("0x1af4", "Virtio"),
    ("0x15ad", "VMware"),
    ("0x1234", "QEMU"),
];

/// Model name and logical core count, e.g. "AMD Ryzen 7 5800X 8-Core Processor (16)"
pub fn cpu(ctx: &Context) -> Result<Value> {
    let cpuinfo = ctx.host.read_to_string("/proc/cpuinfo")?;

    let model = cpuinfo
        .lines()
        .find(|line| line.starts_with("model name") || line.starts_with("Model") || line.starts_with("Hardware"))
        .and_then(extract_after_colon);
    let Some(model) = model else {
        return Ok(Value::Unknown);
    };

    let model = model
        .replace("(R)", "")
        .replace("(TM)", "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let cores = cpuinfo.lines().filter(|line| line.starts_with("processor")).count();
    Ok(Value::text(if cores > 0 {
        format!("{} ({})", model, cores)
    } else {
        model
    }))
}

/// Display controllers from `lspci`, falling back to DRM vendor ids
pub fn gpu(ctx: &Context) -> Result<Value> {
    let gpus = match ctx.host.run("lspci", &[]) {
        Ok(output) => lspci_gpus(&output),
        Err(_) => Vec::new(),
    };
    let gpus = if gpus.is_empty() { drm_gpus(&ctx.host) } else { gpus };

    if gpus.is_empty() {
        return Err(EzfetchError::detection("no GPU found"));
    }
    Ok(Value::text(gpus.join(", ")))
}

fn lspci_gpus(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| GPU_CLASSES.iter().any(|class| line.contains(class)))
        .filter_map(|line| {
            // "00:02.0 VGA compatible controller: Intel Corporation UHD Graphics 620 (rev 07)"
            let (_, description) = line.split_once("controller: ")?;
            Some(clean_gpu_name(description.trim()))
        })
        .filter(|name| !name.is_empty())
        .collect()
}

fn drm_gpus(host: &Host) -> Vec<String> {
    let Ok(entries) = host.read_dir_names("/sys/class/drm") else {
        return Vec::new();
    };
    entries
        .iter()
        .filter(|name| name.starts_with("card") && !name.contains('-'))
        .filter_map(|card| {
            let base = format!("/sys/class/drm/{}/device", card);
            let vendor = host.read_first_line(&format!("{}/vendor", base)).ok()?;
            let device = host.read_first_line(&format!("{}/device", base)).unwrap_or_default();
            let vendor_name = PCI_VENDORS
                .iter()
                .find(|(id, _)| vendor.eq_ignore_ascii_case(id))
                .map(|(_, name)| *name)
                .unwrap_or("Unknown vendor");
            Some(if device.is_empty() {
                format!("{} GPU", vendor_name)
            } else {
                format!("{} GPU ({})", vendor_name, device)
            })
        })
        .collect()
}

fn meminfo(host: &Host) -> Result<String> {
    host.read_to_string("/proc/meminfo")
}

pub fn memory(ctx: &Context) -> Result<Value> {
    let meminfo = meminfo(&ctx.host)?;
    let total = meminfo_kb(&meminfo, "MemTotal")
        .ok_or_else(|| EzfetchError::Parse("MemTotal missing from /proc/meminfo".to_string()))?;
    let available = meminfo_kb(&meminfo, "MemAvailable").unwrap_or_else(|| {
        ["MemFree", "Buffers", "Cached"]
            .iter()
            .filter_map(|key| meminfo_kb(&meminfo, key))
            .sum()
    });
    let used = total.saturating_sub(available);
    Ok(Value::text(format_usage(used * 1024, total * 1024)))
}

pub fn swap(ctx: &Context) -> Result<Value> {
    let meminfo = meminfo(&ctx.host)?;
    let total = meminfo_kb(&meminfo, "SwapTotal").unwrap_or(0);
    if total == 0 {
        return Err(EzfetchError::detection("no swap configured"));
    }
    let free = meminfo_kb(&meminfo, "SwapFree").unwrap_or(0);
    Ok(Value::text(format_usage(total.saturating_sub(free) * 1024, total * 1024)))
}

/// Usage of the filesystem holding the host root
pub fn disk(ctx: &Context) -> Result<Value> {
    if let Some((used, total)) = statvfs_usage(ctx.host.root()) {
        return Ok(Value::text(format_usage(used, total)));
    }

    let output = ctx.host.run("df", &["-h", "/"])?;
    output
        .lines()
        .skip(1)
        .find_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            (parts.len() >= 5).then(|| Value::text(format!("{} / {} ({})", parts[2], parts[1], parts[4])))
        })
        .ok_or_else(|| EzfetchError::Parse("unexpected df output".to_string()))
}

/// (used, total) bytes
fn statvfs_usage(path: &Path) -> Option<(u64, u64)> {
    let path = CString::new(path.as_os_str().as_bytes()).ok()?;
    // SAFETY: `path` is a valid NUL-terminated string and `stat` is plain old data
    let stat = unsafe {
        let mut stat: libc::statvfs = std::mem::zeroed();
        if libc::statvfs(path.as_ptr(), &mut stat) != 0 {
            return None;
        }
        stat
    };

    let frsize = stat.f_frsize as u64;
    let total = (stat.f_blocks as u64).saturating_mul(frsize);
    let available = (stat.f_bavail as u64).saturating_mul(frsize);
    (total > 0).then(|| (total.saturating_sub(available), total))
}
