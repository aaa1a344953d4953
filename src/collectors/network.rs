//! Local network address

use crate::context::Context;
use crate::data::Value;
use crate::error::{EzfetchError, Result};

/// First global IPv4 address with its interface, e.g. "192.168.1.23 (wlan0)"
pub fn local_ip(ctx: &Context) -> Result<Value> {
    let host = &ctx.host;
    if let Ok(output) = host.run("ip", &["-4", "-o", "addr", "show", "scope", "global"]) {
        if let Some((iface, addr)) = parse_ip_addr(&output) {
            return Ok(Value::text(format!("{} ({})", addr, iface)));
        }
    }

    let output = host.run("hostname", &["-I"])?;
    output
        .split_whitespace()
        .next()
        .map(Value::text)
        .ok_or_else(|| EzfetchError::detection("no global address"))
}

/// `(interface, address)` from `ip -o addr` output
fn parse_ip_addr(output: &str) -> Option<(String, String)> {
    output.lines().find_map(|line| {
        // "2: wlan0    inet 192.168.1.23/24 brd 192.168.1.255 scope global dynamic wlan0"
        let mut fields = line.split_whitespace();
        let iface = fields.nth(1)?;
        let mut fields = fields.skip_while(|field| *field != "inet");
        fields.next()?;
        let addr = fields.next()?.split('/').next()?;
        Some((iface.to_string(), addr.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ip_one_line_output() {
        let output = "2: enp5s0    inet 10.0.0.7/24 brd 10.0.0.255 scope global dynamic noprefixroute enp5s0\\       valid_lft 85000sec preferred_lft 85000sec\n\
                      3: wlan0    inet 192.168.1.23/24 brd 192.168.1.255 scope global wlan0\n";
        assert_eq!(parse_ip_addr(output), Some(("enp5s0".to_string(), "10.0.0.7".to_string())));
        assert_eq!(parse_ip_addr(""), None);
        assert_eq!(parse_ip_addr("1: lo    inet6 ::1/128 scope host\n"), None);
    }

    #[test]
    fn no_tools_means_error() {
        assert!(local_ip(&Context::sandboxed("/nonexistent")).is_err());
    }
}
