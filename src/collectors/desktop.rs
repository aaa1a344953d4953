//! Session details: shell, resolution, desktop environment, window manager, terminal

use crate::context::Context;
use crate::data::Value;
use crate::error::{EzfetchError, Result};
use crate::host::Host;
use crate::utils::parsing::capitalize_first_letter;
use std::path::Path;

/// Process names of window managers and compositors, with display names
const WINDOW_MANAGERS: &[(&str, &str)] = &[
    ("awesome", "Awesome"),
    ("bspwm", "bspwm"),
    ("cinnamon", "Muffin"),
    ("dwm", "dwm"),
    ("enlightenment", "Enlightenment"),
    ("fluxbox", "Fluxbox"),
    ("gnome-shell", "Mutter"),
    ("herbstluftwm", "herbstluftwm"),
    ("hyprland", "Hyprland"),
    ("i3", "i3"),
    ("icewm", "IceWM"),
    ("kwin_wayland", "KWin"),
    ("kwin_x11", "KWin"),
    ("labwc", "labwc"),
    ("marco", "Marco"),
    ("mutter", "Mutter"),
    ("niri", "niri"),
    ("openbox", "Openbox"),
    ("qtile", "Qtile"),
    ("river", "river"),
    ("sway", "Sway"),
    ("weston", "Weston"),
    ("wayfire", "Wayfire"),
    ("xfwm4", "Xfwm4"),
    ("xmonad", "xmonad"),
];

/// Env var with "set but empty" reported as `Unknown`
fn env_value(host: &Host, keys: &[&str]) -> Result<Value> {
    if let Some(value) = host.first_env(keys) {
        return Ok(Value::Text(value.trim().to_string()));
    }
    if keys.iter().any(|key| host.env_var(key).is_some()) {
        return Ok(Value::Unknown);
    }
    Err(EzfetchError::detection(format!("{} not set", keys.join("/"))))
}

/// Basename of `$SHELL`
pub fn shell(ctx: &Context) -> Result<Value> {
    Ok(match env_value(&ctx.host, &["SHELL"])? {
        Value::Text(path) => {
            let name = Path::new(&path)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or(path);
            Value::Text(name)
        }
        other => other,
    })
}

/// Current mode of every connected display, from DRM then `xrandr`
pub fn resolution(ctx: &Context) -> Result<Value> {
    let modes = drm_modes(&ctx.host);
    if !modes.is_empty() {
        return Ok(Value::text(modes.join(", ")));
    }

    if !ctx.host.command_exists("xrandr") {
        return Err(EzfetchError::detection("no DRM modes and no xrandr"));
    }
    let output = ctx.host.run("xrandr", &["--current"])?;
    let modes = xrandr_modes(&output);
    if modes.is_empty() {
        return Err(EzfetchError::detection("no active xrandr modes"));
    }
    Ok(Value::text(modes.join(", ")))
}

fn drm_modes(host: &Host) -> Vec<String> {
    let Ok(connectors) = host.read_dir_names("/sys/class/drm") else {
        return Vec::new();
    };
    connectors
        .iter()
        .filter(|name| name.starts_with("card") && name.contains('-'))
        .filter_map(|name| {
            let base = format!("/sys/class/drm/{}", name);
            let status = host.read_first_line(&format!("{}/status", base)).ok()?;
            if status != "connected" {
                return None;
            }
            let mode = host.read_first_line(&format!("{}/modes", base)).ok()?;
            (!mode.is_empty()).then_some(mode)
        })
        .collect()
}

/// Modes flagged current (`*`) in `xrandr --current` output
fn xrandr_modes(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.starts_with(' ') && line.contains('*'))
        .filter_map(|line| line.split_whitespace().next().map(str::to_string))
        .collect()
}

pub fn desktop_environment(ctx: &Context) -> Result<Value> {
    Ok(match env_value(&ctx.host, &["XDG_CURRENT_DESKTOP", "DESKTOP_SESSION"])? {
        // "ubuntu:GNOME" lists the session first and the desktop last
        Value::Text(de) => Value::text(capitalize_first_letter(de.rsplit(':').next().unwrap_or(&de))),
        other => other,
    })
}

/// First known window manager found among running processes
pub fn window_manager(ctx: &Context) -> Result<Value> {
    let host = &ctx.host;
    let pids = host.read_dir_names("/proc")?;

    pids.iter()
        .filter(|name| name.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|pid| host.read_first_line(&format!("/proc/{}/comm", pid)).ok())
        .find_map(|comm| {
            let comm = comm.to_lowercase();
            WINDOW_MANAGERS
                .iter()
                .find(|(process, _)| comm == *process)
                .map(|(_, name)| Value::text(*name))
        })
        .ok_or_else(|| EzfetchError::detection("no known window manager running"))
}

/// `$TERM_PROGRAM` with its version, falling back to `$TERM`
pub fn terminal(ctx: &Context) -> Result<Value> {
    let host = &ctx.host;
    if let Some(program) = host.first_env(&["TERM_PROGRAM"]) {
        return Ok(Value::text(match host.first_env(&["TERM_PROGRAM_VERSION"]) {
            Some(version) => format!("{} {}", program, version),
            None => program,
        }));
    }
    Ok(match env_value(host, &["TERM"])? {
        Value::Text(term) => Value::text(term.strip_prefix("xterm-").unwrap_or(&term)),
        other => other,
    })
}
