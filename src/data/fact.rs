//! A single labeled piece of host information

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

pub const UNAVAILABLE: &str = "Unavailable";
pub const UNKNOWN: &str = "Unknown";

/// What a probe found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Value {
    Text(String),
    /// Something was there but it carried no usable value
    Unknown,
    /// The probe ran and found nothing
    Unavailable,
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Classify a stored or caller-supplied string
    pub fn parse(s: &str) -> Self {
        match s {
            UNAVAILABLE | "N/A" => Value::Unavailable,
            UNKNOWN => Value::Unknown,
            other => Value::Text(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Value::Text(s) => s,
            Value::Unknown => UNKNOWN,
            Value::Unavailable => UNAVAILABLE,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::parse(&s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::parse(s)
    }
}

impl From<Value> for String {
    fn from(value: Value) -> Self {
        match value {
            Value::Text(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub label: Cow<'static, str>,
    pub value: Value,
}

impl Fact {
    pub fn new(label: impl Into<Cow<'static, str>>, value: Value) -> Self {
        Fact {
            label: label.into(),
            value,
        }
    }

    pub fn unavailable(label: impl Into<Cow<'static, str>>) -> Self {
        Self::new(label, Value::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_strings_are_recognised() {
        assert_eq!(Value::parse("Unavailable"), Value::Unavailable);
        assert_eq!(Value::parse("N/A"), Value::Unavailable);
        assert_eq!(Value::parse("Unknown"), Value::Unknown);
        assert_eq!(Value::parse(""), Value::text(""));
        assert_eq!(Value::parse("unknown"), Value::text("unknown"));
    }

    #[test]
    fn serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&Value::text("Linux")).unwrap(), "\"Linux\"");
        assert_eq!(serde_json::to_string(&Value::Unavailable).unwrap(), "\"Unavailable\"");
        let back: Value = serde_json::from_str("\"Unknown\"").unwrap();
        assert_eq!(back, Value::Unknown);
    }
}
