//! Turning a record into the (label, value) pairs that get displayed

use crate::config::Config;
use crate::data::{Fact, Record, Value};
use crate::utils::parsing::{truncate, TRUNCATE_SUFFIX};

pub const DEFAULT_TRUNCATE_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Labels to keep; empty or containing `*` keeps everything
    pub enabled_fields: Vec<String>,
    pub hide_unavailable: bool,
    pub hide_unknown: bool,
    pub truncate_length: usize,
    pub truncate_suffix: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            enabled_fields: Vec::new(),
            hide_unavailable: true,
            hide_unknown: false,
            truncate_length: DEFAULT_TRUNCATE_LENGTH,
            truncate_suffix: TRUNCATE_SUFFIX.to_string(),
        }
    }
}

impl FilterConfig {
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        let truncate_length = config
            .get_or(&["display", "truncate_length"], DEFAULT_TRUNCATE_LENGTH)
            .max(defaults.truncate_suffix.chars().count());

        FilterConfig {
            enabled_fields: config.get_or(&["fields", "enabled"], Vec::new()),
            hide_unavailable: config.get_or(&["fields", "hide_unavailable"], defaults.hide_unavailable),
            hide_unknown: config.get_or(&["fields", "hide_unknown"], defaults.hide_unknown),
            truncate_length,
            ..defaults
        }
    }

    pub fn is_enabled(&self, label: &str) -> bool {
        self.enabled_fields.is_empty()
            || self
                .enabled_fields
                .iter()
                .any(|field| field == "*" || field.eq_ignore_ascii_case(label))
    }

    fn keeps(&self, fact: &Fact) -> bool {
        if !self.is_enabled(&fact.label) {
            return false;
        }
        match fact.value {
            Value::Unavailable => !self.hide_unavailable,
            Value::Unknown => !self.hide_unknown,
            Value::Text(_) => true,
        }
    }
}

/// Enable-list and sentinel filtering, preserving input order
pub fn filter_facts<'a, I>(facts: I, config: &FilterConfig) -> Vec<Fact>
where
    I: IntoIterator<Item = &'a Fact>,
{
    facts
        .into_iter()
        .filter(|fact| config.keeps(fact))
        .cloned()
        .collect()
}

/// Display text for already-filtered facts: "" becomes "Unknown", long values are cut
pub fn format_facts(facts: Vec<Fact>, config: &FilterConfig) -> Vec<(String, String)> {
    facts
        .into_iter()
        .map(|fact| {
            let text = match fact.value {
                Value::Text(s) if s.is_empty() => Value::Unknown.to_string(),
                other => String::from(other),
            };
            let text = truncate(&text, config.truncate_length, &config.truncate_suffix);
            (fact.label.into_owned(), text)
        })
        .collect()
}

pub fn filter_and_format(record: &Record, config: &FilterConfig) -> Vec<(String, String)> {
    format_facts(filter_facts(record, config), config)
}
