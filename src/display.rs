//! Two-column layout: logo on the left, fields on the right

use crate::colors::{Role, Theme};
use crate::config::Config;
use unicode_width::UnicodeWidthStr;

pub const FIELD_SEPARATOR: &str = " : ";
pub const GUTTER: &str = "  ";
pub const DEFAULT_LOGO_PADDING: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_logo: bool,
    pub use_colors: bool,
    /// Minimum width of the logo column
    pub logo_padding: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            show_logo: true,
            use_colors: true,
            logo_padding: DEFAULT_LOGO_PADDING,
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        RenderOptions {
            show_logo: config.get_or(&["display", "show_logo"], defaults.show_logo),
            use_colors: config.get_or(&["display", "show_colors"], defaults.use_colors),
            logo_padding: config.get_or(&["display", "logo_padding"], defaults.logo_padding),
        }
    }
}

fn pad_to(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(fill))
}

/// `label : value` lines with labels aligned on display width
pub fn field_lines(pairs: &[(String, String)], theme: &Theme, use_colors: bool) -> Vec<String> {
    let label_width = pairs
        .iter()
        .map(|(label, _)| UnicodeWidthStr::width(label.as_str()))
        .max()
        .unwrap_or(0);

    pairs
        .iter()
        .map(|(label, value)| {
            let label = pad_to(label, label_width);
            if use_colors {
                format!(
                    "{}{}{}",
                    theme.paint(&label, Role::Label),
                    theme.paint(FIELD_SEPARATOR, Role::Separator),
                    theme.paint(value, Role::Value)
                )
            } else {
                format!("{}{}{}", label, FIELD_SEPARATOR, value)
            }
        })
        .collect()
}

/// Rows of one render: logo cells zipped with field cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    rows: Vec<(Option<String>, Option<String>)>,
}

impl RenderPlan {
    /// `logo` is `None` when the logo is suppressed; the output is then the field lines alone
    pub fn build(logo: Option<&[String]>, fields: Vec<String>, theme: &Theme, options: &RenderOptions) -> Self {
        let Some(logo) = logo.filter(|_| options.show_logo) else {
            return RenderPlan {
                rows: fields.into_iter().map(|field| (None, Some(field))).collect(),
            };
        };

        let column_width = logo
            .iter()
            .map(|line| UnicodeWidthStr::width(line.as_str()))
            .max()
            .unwrap_or(0)
            .max(options.logo_padding);

        let row_count = logo.len().max(fields.len());
        let mut fields = fields.into_iter();
        let rows = (0..row_count)
            .map(|i| {
                let cell = pad_to(logo.get(i).map(String::as_str).unwrap_or(""), column_width);
                let cell = if options.use_colors {
                    theme.paint(&cell, Role::Logo)
                } else {
                    cell
                };
                (Some(cell), fields.next())
            })
            .collect();
        RenderPlan { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|(logo, field)| match logo {
                Some(logo) => format!("{}{}{}", logo, GUTTER, field.as_deref().unwrap_or("")),
                None => field.clone().unwrap_or_default(),
            })
            .collect()
    }
}

/// Render pairs beside a logo into printable lines
pub fn render(pairs: &[(String, String)], logo: Option<&[String]>, theme: &Theme, options: &RenderOptions) -> Vec<String> {
    let fields = field_lines(pairs, theme, options.use_colors);
    RenderPlan::build(logo, fields, theme, options).lines()
}
