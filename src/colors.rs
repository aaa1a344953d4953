//! Color resolution and display themes

use crate::config::Config;
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

pub const RESET: &str = "\x1b[0m";

/// Named colors and styles. Keys are lowercase with `_` separators.
const NAMED_COLORS: &[(&str, &str)] = &[
    // Standard 8 colors (30-37)
    ("black", "\x1b[30m"),
    ("red", "\x1b[31m"),
    ("green", "\x1b[32m"),
    ("yellow", "\x1b[33m"),
    ("blue", "\x1b[34m"),
    ("magenta", "\x1b[35m"),
    ("cyan", "\x1b[36m"),
    ("white", "\x1b[37m"),
    // Bright colors (90-97)
    ("bright_black", "\x1b[90m"),
    ("bright_red", "\x1b[91m"),
    ("bright_green", "\x1b[92m"),
    ("bright_yellow", "\x1b[93m"),
    ("bright_blue", "\x1b[94m"),
    ("bright_magenta", "\x1b[95m"),
    ("bright_cyan", "\x1b[96m"),
    ("bright_white", "\x1b[97m"),
    // Styles
    ("bold", "\x1b[1m"),
    ("dim", "\x1b[2m"),
    ("italic", "\x1b[3m"),
    ("underline", "\x1b[4m"),
    // Backgrounds (40-47)
    ("bg_black", "\x1b[40m"),
    ("bg_red", "\x1b[41m"),
    ("bg_green", "\x1b[42m"),
    ("bg_yellow", "\x1b[43m"),
    ("bg_blue", "\x1b[44m"),
    ("bg_magenta", "\x1b[45m"),
    ("bg_cyan", "\x1b[46m"),
    ("bg_white", "\x1b[47m"),
    // Aliases
    ("gray", "\x1b[90m"),
    ("grey", "\x1b[90m"),
    ("orange", "\x1b[91m"),
    ("purple", "\x1b[35m"),
    ("violet", "\x1b[95m"),
    ("reset", RESET),
    ("default", RESET),
];

/// Escape sequence for a named color, if the name is known
pub fn named_color(name: &str) -> Option<&'static str> {
    let key = name.trim().to_lowercase().replace(|c: char| c == ' ' || c == '-', "_");
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == key)
        .map(|(_, code)| *code)
}

/// 24-bit foreground color
pub fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

/// `#RRGGBB` or `RRGGBB`
pub fn parse_hex(token: &str) -> Option<(u8, u8, u8)> {
    let token = token.trim();
    let hex = token.strip_prefix('#').unwrap_or(token);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// `rgb(r, g, b)` or `r,g,b`
pub fn parse_rgb(token: &str) -> Option<(u8, u8, u8)> {
    let token = token.trim();
    let inner = token
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(token);
    let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>());
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) => Some((r, g, b)),
        _ => None,
    }
}

/// Turn a color token into an escape sequence.
///
/// Accepts a ready-made escape sequence, a color name, a hex color or an RGB
/// triple. Anything else resolves to "" (no styling).
pub fn resolve_color(token: &str) -> String {
    if token.starts_with('\x1b') {
        return token.to_string();
    }
    if let Some(code) = named_color(token) {
        return code.to_string();
    }
    if let Some((r, g, b)) = parse_hex(token).or_else(|| parse_rgb(token)) {
        return rgb(r, g, b);
    }
    String::new()
}

pub fn colorize(text: &str, color: &str, reset: bool) -> String {
    let code = resolve_color(color);
    if code.is_empty() {
        return text.to_string();
    }
    if reset {
        format!("{}{}{}", code, text, RESET)
    } else {
        format!("{}{}", code, text)
    }
}

/// Remove SGR escape sequences
pub fn strip_color(text: &str) -> String {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    let ansi = ANSI.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid SGR pattern"));
    ansi.replace_all(text, "").into_owned()
}

/// What a color is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Label,
    Value,
    Logo,
    Separator,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Label, Role::Value, Role::Logo, Role::Separator];

    pub fn name(self) -> &'static str {
        match self {
            Role::Label => "label",
            Role::Value => "value",
            Role::Logo => "logo",
            Role::Separator => "separator",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

struct ThemeDef {
    name: &'static str,
    /// label, value, logo, separator
    colors: [&'static str; 4],
}

const THEMES: &[ThemeDef] = &[
    ThemeDef { name: "default", colors: ["bright_green", "bright_cyan", "cyan", "white"] },
    ThemeDef { name: "nord", colors: ["#88C0D0", "#ECEFF4", "#5E81AC", "#D8DEE9"] },
    ThemeDef { name: "dracula", colors: ["#FF79C6", "#F8F8F2", "#BD93F9", "#6272A4"] },
    ThemeDef { name: "gruvbox", colors: ["#B8BB26", "#EBDBB2", "#83A598", "#A89984"] },
    ThemeDef { name: "monokai", colors: ["#A6E22E", "#F8F8F2", "#66D9EF", "#75715E"] },
    ThemeDef { name: "solarized", colors: ["#859900", "#93A1A1", "#268BD2", "#586E75"] },
];

/// Role → color token mapping used for one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    name: &'static str,
    colors: [String; 4],
}

impl Default for Theme {
    fn default() -> Self {
        Self::named("default")
    }
}

impl Theme {
    /// Look up a theme by name; unknown names get the default theme
    pub fn named(name: &str) -> Self {
        let def = THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
            .unwrap_or(&THEMES[0]);
        Theme {
            name: def.name,
            colors: def.colors.map(str::to_string),
        }
    }

    pub fn list() -> Vec<&'static str> {
        THEMES.iter().map(|t| t.name).collect()
    }

    /// Theme from `theme.name` (or `name_override`) plus any `theme.<role>_color` overrides
    pub fn from_config(config: &Config, name_override: Option<&str>) -> Self {
        let name = name_override
            .map(str::to_string)
            .or_else(|| config.get_str(&["theme", "name"]))
            .unwrap_or_else(|| "default".to_string());
        let mut theme = Self::named(&name);

        for role in Role::ALL {
            let key = format!("{}_color", role.name());
            if let Some(token) = config.get_str(&["theme", key.as_str()]) {
                if resolve_color(&token).is_empty() {
                    warn!(role = role.name(), token = %token, "unknown color in theme override, ignoring");
                } else {
                    theme = theme.with_color(role, &token);
                }
            }
        }
        theme
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn with_color(mut self, role: Role, token: &str) -> Self {
        self.colors[role.index()] = token.to_string();
        self
    }

    /// The color token for `role`
    pub fn get(&self, role: Role) -> &str {
        &self.colors[role.index()]
    }

    pub fn paint(&self, text: &str, role: Role) -> String {
        colorize(text, self.get(role), true)
    }
}
