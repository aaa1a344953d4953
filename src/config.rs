//! Layered configuration: built-in defaults with an optional user document
//! merged over them table by table.

use crate::error::{EzfetchError, Result};
use dirs::config_dir;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};
use tracing::{debug, error, warn};

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone)]
pub struct Config {
    values: Table,
    source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// The built-in defaults alone
    pub fn defaults() -> Self {
        let values = toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|err| {
            error!(%err, "built-in config is malformed");
            Table::new()
        });
        Config { values, source: None }
    }

    pub fn from_table(values: Table) -> Self {
        Config { values, source: None }
    }

    /// Defaults merged with the user's document.
    ///
    /// An explicit `path` that cannot be read or parsed is reported and
    /// ignored; a missing file at the default location is ignored quietly.
    pub fn load(path: Option<&str>) -> Self {
        let mut config = Self::defaults();

        let (path, explicit) = match path {
            Some(p) => (PathBuf::from(shellexpand::tilde(p).as_ref()), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return config,
            },
        };

        if !explicit && !path.exists() {
            debug!(path = %path.display(), "no user config");
            return config;
        }

        match read_document(&path) {
            Ok(user) => {
                config.merge(user);
                config.source = Some(path);
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "could not load config file, using defaults");
            }
        }
        config
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn merge(&mut self, overrides: Table) {
        deep_merge(&mut self.values, overrides);
    }

    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.values.get(*first)?, |value, key| value.as_table()?.get(*key))
    }

    /// Typed lookup; a missing key or a value of the wrong shape yields `default`
    pub fn get_or<T: DeserializeOwned>(&self, path: &[&str], default: T) -> T {
        self.get(path)
            .and_then(|value| value.clone().try_into().ok())
            .unwrap_or(default)
    }

    /// A string setting, treating "" as unset
    pub fn get_str(&self, path: &[&str]) -> Option<String> {
        self.get(path)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Set a value, creating intermediate tables as needed
    pub fn set(&mut self, path: &[&str], value: impl Into<Value>) {
        set_in(&mut self.values, path, value.into());
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(&self.values).map_err(|e| EzfetchError::Config(e.to_string()))
    }
}

/// `~/.config/ezfetch/config.toml` on Linux
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("ezfetch/config.toml"))
}

/// Read a TOML document, or JSON when the file name ends in `.json`
pub fn read_document(path: &Path) -> Result<Table> {
    let content = fs::read_to_string(path)?;

    if path.extension().and_then(|e| e.to_str()) == Some("json") {
        let json: serde_json::Value = serde_json::from_str(&content)?;
        return match Value::try_from(json) {
            Ok(Value::Table(table)) => Ok(table),
            Ok(_) => Err(EzfetchError::Config("top level must be an object".to_string())),
            Err(e) => Err(EzfetchError::Config(e.to_string())),
        };
    }

    Ok(toml::from_str(&content)?)
}

/// Merge `overrides` into `base`: tables merge key by key, anything else is replaced
pub fn deep_merge(base: &mut Table, overrides: Table) {
    for (key, value) in overrides {
        match value {
            Value::Table(override_table) => match base.get_mut(&key) {
                Some(Value::Table(base_table)) => deep_merge(base_table, override_table),
                _ => {
                    base.insert(key, Value::Table(override_table));
                }
            },
            other => {
                base.insert(key, other);
            }
        }
    }
}

fn set_in(table: &mut Table, path: &[&str], value: Value) {
    match path {
        [] => {}
        [last] => {
            table.insert(last.to_string(), value);
        }
        [first, rest @ ..] => {
            let entry = table
                .entry(first.to_string())
                .or_insert(Value::Table(Table::new()));
            if !entry.is_table() {
                *entry = Value::Table(Table::new());
            }
            if let Value::Table(inner) = entry {
                set_in(inner, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> Table {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn builtin_defaults_parse() {
        let config = Config::defaults();
        assert_eq!(config.get_or(&["display", "truncate_length"], 0_i64), 50);
        assert_eq!(config.get_or(&["display", "logo_padding"], 0_i64), 30);
        assert!(config.get_or(&["fields", "hide_unavailable"], false));
        assert!(!config.get_or(&["fields", "hide_unknown"], true));
        let enabled: Vec<String> = config.get_or(&["fields", "enabled"], Vec::new());
        assert_eq!(enabled.len(), 19);
    }

    #[test]
    fn deep_merge_merges_tables_and_replaces_leaves() {
        let mut base = table("[a]\nx = 1\ny = 2\n");
        deep_merge(&mut base, table("[a]\nx = 9\n"));
        assert_eq!(base, table("[a]\nx = 9\ny = 2\n"));
    }

    #[test]
    fn deep_merge_replaces_non_table_with_table_and_back() {
        let mut base = table("a = 1\n[b]\nc = 2\n");
        deep_merge(&mut base, table("b = [1, 2]\n[a]\nz = true\n"));
        assert_eq!(base, table("b = [1, 2]\n[a]\nz = true\n"));
    }

    #[test]
    fn get_and_set_paths() {
        let mut config = Config::from_table(Table::new());
        assert!(config.get(&["display", "show_logo"]).is_none());
        assert!(config.get_or(&["display", "show_logo"], true));

        config.set(&["display", "show_logo"], false);
        assert_eq!(config.get(&["display", "show_logo"]), Some(&Value::Boolean(false)));

        config.set(&["display", "show_logo", "nested"], 3_i64);
        assert_eq!(config.get_or(&["display", "show_logo", "nested"], 0_i64), 3);
    }

    #[test]
    fn wrong_type_falls_back_to_default() {
        let config = Config::from_table(table("[display]\ntruncate_length = \"long\"\n"));
        assert_eq!(config.get_or(&["display", "truncate_length"], 50_i64), 50);
        assert_eq!(config.get_str(&["display", "truncate_length"]).as_deref(), Some("long"));
    }

    #[test]
    fn load_merges_user_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display]\nlogo_padding = 12\n[fields]\nenabled = [\"OS\"]\n").unwrap();

        let config = Config::load(path.to_str());
        assert_eq!(config.get_or(&["display", "logo_padding"], 0_i64), 12);
        assert_eq!(config.get_or(&["display", "truncate_length"], 0_i64), 50);
        assert_eq!(config.get_or(&["fields", "enabled"], Vec::<String>::new()), vec!["OS"]);
        assert_eq!(config.source(), Some(path.as_path()));
    }

    #[test]
    fn load_merges_user_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"fields": {"hide_unknown": true}}"#).unwrap();

        let config = Config::load(path.to_str());
        assert!(config.get_or(&["fields", "hide_unknown"], false));
        assert!(config.get_or(&["fields", "hide_unavailable"], false));
    }

    #[test]
    fn malformed_user_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display\nshow_logo = ").unwrap();

        let config = Config::load(path.to_str());
        assert!(config.source().is_none());
        assert_eq!(config.get_or(&["display", "logo_padding"], 0_i64), 30);
    }

    #[test]
    fn missing_explicit_config_falls_back_to_defaults() {
        let config = Config::load(Some("/nonexistent/ezfetch.toml"));
        assert!(config.source().is_none());
        assert!(config.get_or(&["display", "show_logo"], false));
    }

    #[test]
    fn round_trips_through_toml_text() {
        let config = Config::defaults();
        let text = config.to_toml_string().unwrap();
        let reparsed = Config::from_table(toml::from_str(&text).unwrap());
        assert_eq!(reparsed.get_or(&["performance", "cache_duration"], 0_i64), 300);
    }
}
