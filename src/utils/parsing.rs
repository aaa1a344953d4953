//! String parsing and formatting utilities

/// Suffix appended to values cut by [`truncate`]
pub const TRUNCATE_SUFFIX: &str = "...";

/// Extract value after a colon and space
pub fn extract_after_colon(line: &str) -> Option<String> {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Read a `Key:   1234 kB` entry from /proc/meminfo
pub fn meminfo_kb(meminfo: &str, key: &str) -> Option<u64> {
    meminfo.lines().find_map(|line| {
        let (k, rest) = line.split_once(':')?;
        if k != key {
            return None;
        }
        rest.split_whitespace().next()?.parse().ok()
    })
}

/// Format uptime from seconds, e.g. "2 days, 3 hours, 15 mins"
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;

    let plural = |n: u64| if n == 1 { "" } else { "s" };
    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(format!("{} day{}", days, plural(days)));
    }
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, plural(hours)));
    }
    if minutes > 0 || parts.is_empty() {
        parts.push(format!("{} min{}", minutes, plural(minutes)));
    }
    parts.join(", ")
}

/// Format a byte count with binary units, e.g. "1.23 GiB"
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// "used / total (pct%)" with binary units
pub fn format_usage(used: u64, total: u64) -> String {
    let percent = if total > 0 {
        (used as f64 / total as f64 * 100.0).round() as u64
    } else {
        0
    };
    format!("{} / {} ({}%)", format_size(used), format_size(total), percent)
}

/// Cut `text` to at most `max_length` characters, ending in `suffix` when cut.
/// If `max_length` cannot even hold the suffix, the suffix itself is cut.
pub fn truncate(text: &str, max_length: usize, suffix: &str) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let suffix_len = suffix.chars().count();
    if max_length < suffix_len {
        return suffix.chars().take(max_length).collect();
    }
    let mut out: String = text.chars().take(max_length - suffix_len).collect();
    out.push_str(suffix);
    out
}

pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Clean and simplify GPU names
pub fn clean_gpu_name(raw_name: &str) -> String {
    let cleaned = raw_name
        .split(" (rev ")
        .next()
        .unwrap_or(raw_name)
        .replace("Advanced Micro Devices, Inc.", "AMD")
        .replace("NVIDIA Corporation", "NVIDIA")
        .replace("Intel Corporation", "Intel")
        .replace("[AMD/ATI]", "")
        .replace("Corporation", "");

    // Prefer the marketing name in the last bracket pair, e.g. "GA104 [GeForce RTX 3070]"
    let vendor = cleaned.split_whitespace().next().unwrap_or_default().to_string();
    if let (Some(start), Some(end)) = (cleaned.rfind('['), cleaned.rfind(']')) {
        if start < end {
            let model = cleaned[start + 1..end].trim();
            if !model.is_empty() && !model.contains('/') {
                return if model.starts_with(&vendor) {
                    model.to_string()
                } else {
                    format!("{} {}", vendor, model)
                };
            }
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_formatting() {
        assert_eq!(format_uptime(0), "0 mins");
        assert_eq!(format_uptime(60), "1 min");
        assert_eq!(format_uptime(3600), "1 hour");
        assert_eq!(format_uptime(2 * 86_400 + 3 * 3600 + 15 * 60), "2 days, 3 hours, 15 mins");
        assert_eq!(format_uptime(86_400 + 59), "1 day");
    }

    #[test]
    fn size_formatting() {
        assert_eq!(format_size(512), "512.00 B");
        assert_eq!(format_size(1536), "1.50 KiB");
        assert_eq!(format_size(8 * 1024 * 1024 * 1024), "8.00 GiB");
        assert_eq!(format_usage(1024, 4096), "1.00 KiB / 4.00 KiB (25%)");
        assert_eq!(format_usage(0, 0), "0.00 B / 0.00 B (0%)");
    }

    #[test]
    fn truncate_keeps_short_values() {
        assert_eq!(truncate("Linux", 10, TRUNCATE_SUFFIX), "Linux");
        assert_eq!(truncate("exactly10!", 10, TRUNCATE_SUFFIX), "exactly10!");
    }

    #[test]
    fn truncate_cuts_long_values_to_limit() {
        let long = "AMD Ryzen 9 7950X 16-Core Processor (32)";
        for n in 3..long.len() {
            let cut = truncate(long, n, TRUNCATE_SUFFIX);
            assert!(cut.chars().count() <= n);
            assert!(cut.ends_with(TRUNCATE_SUFFIX));
        }
        assert_eq!(truncate("abcdefghij", 6, TRUNCATE_SUFFIX), "abc...");
    }

    #[test]
    fn truncate_never_exceeds_tiny_limits() {
        assert_eq!(truncate("abcdef", 2, TRUNCATE_SUFFIX), "..");
        assert_eq!(truncate("abcdef", 0, TRUNCATE_SUFFIX), "");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("żółćżółć", 5, TRUNCATE_SUFFIX), "żó...");
    }

    #[test]
    fn meminfo_lookup() {
        let meminfo = "MemTotal:       16303428 kB\nMemFree:         1234 kB\nMemAvailable:   8000000 kB\n";
        assert_eq!(meminfo_kb(meminfo, "MemTotal"), Some(16_303_428));
        assert_eq!(meminfo_kb(meminfo, "MemAvailable"), Some(8_000_000));
        assert_eq!(meminfo_kb(meminfo, "Mem"), None);
    }

    #[test]
    fn gpu_names_are_simplified() {
        assert_eq!(
            clean_gpu_name("NVIDIA Corporation GA104 [GeForce RTX 3070] (rev a1)"),
            "NVIDIA GeForce RTX 3070"
        );
        assert_eq!(
            clean_gpu_name("Intel Corporation UHD Graphics 620 (rev 07)"),
            "Intel UHD Graphics 620"
        );
        assert_eq!(
            clean_gpu_name("Advanced Micro Devices, Inc. [AMD/ATI] Navi 21 [Radeon RX 6800]"),
            "AMD Radeon RX 6800"
        );
    }

    #[test]
    fn capitalization() {
        assert_eq!(capitalize_first_letter("hyprland"), "Hyprland");
        assert_eq!(capitalize_first_letter(""), "");
        assert_eq!(capitalize_first_letter("éclair"), "Éclair");
    }
}
