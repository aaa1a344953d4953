//! The ordered set of facts from one collection pass

use super::fact::{Fact, Value};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Cow;

/// Facts in probe catalog order. Built once, then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    facts: Vec<Fact>,
}

impl Record {
    pub fn new(facts: Vec<Fact>) -> Self {
        Record { facts }
    }

    /// Build from `(label, raw string)` pairs; sentinel strings are classified
    pub fn from_pairs<L, V, I>(pairs: I) -> Self
    where
        L: Into<Cow<'static, str>>,
        V: AsRef<str>,
        I: IntoIterator<Item = (L, V)>,
    {
        Record {
            facts: pairs
                .into_iter()
                .map(|(label, value)| Fact::new(label, Value::parse(value.as_ref())))
                .collect(),
        }
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.facts
            .iter()
            .find(|fact| fact.label == label)
            .map(|fact| &fact.value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.facts.iter().map(|fact| fact.label.as_ref())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fact> {
        self.facts.iter()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Fact;
    type IntoIter = std::slice::Iter<'a, Fact>;

    fn into_iter(self) -> Self::IntoIter {
        self.facts.iter()
    }
}

/// A flat string-keyed object, keys in catalog order
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.facts.len()))?;
        for fact in &self.facts {
            map.serialize_entry(fact.label.as_ref(), fact.value.as_str())?;
        }
        map.end()
    }
}
