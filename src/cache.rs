//! File-backed memo for slow probes.
//!
//! One JSON document per key, `{"timestamp": <unix secs>, "value": ...}`.
//! Every I/O or decode problem is treated as a cache miss.

use crate::config::Config;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
pub struct Cache {
    /// `None` disables the cache: every lookup misses, nothing is written
    dir: Option<PathBuf>,
    ttl: Duration,
}

#[derive(Serialize, Deserialize)]
struct Entry<T> {
    timestamp: f64,
    value: T,
}

impl Cache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Cache {
            dir: Some(dir.into()),
            ttl,
        }
    }

    pub fn disabled() -> Self {
        Cache { dir: None, ttl: DEFAULT_TTL }
    }

    /// `~/.cache/ezfetch`, honouring `performance.cache_enabled` and `performance.cache_duration`
    pub fn from_config(config: &Config) -> Self {
        if !config.get_or(&["performance", "cache_enabled"], true) {
            return Self::disabled();
        }
        let ttl = Duration::from_secs(config.get_or(&["performance", "cache_duration"], DEFAULT_TTL.as_secs()));
        match dirs::cache_dir() {
            Some(dir) => Self::new(dir.join("ezfetch"), ttl),
            None => Self::disabled(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    fn entry_path(&self, key: &str) -> Option<PathBuf> {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.as_ref().map(|dir| dir.join(format!("{}.json", name)))
    }

    /// The stored value, if present and younger than the TTL
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.entry_path(key)?;
        let data = fs::read(&path).ok()?;
        let entry: Entry<T> = match serde_json::from_slice(&data) {
            Ok(entry) => entry,
            Err(err) => {
                debug!(key, %err, "discarding unreadable cache entry");
                return None;
            }
        };

        let age = unix_now() - entry.timestamp;
        if (0.0..self.ttl.as_secs_f64()).contains(&age) {
            Some(entry.value)
        } else {
            debug!(key, age, "cache entry expired");
            None
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let (Some(dir), Some(path)) = (self.dir.as_ref(), self.entry_path(key)) else {
            return;
        };
        if let Err(err) = write_entry(dir, &path, value) {
            debug!(key, %err, "could not write cache entry");
        }
    }

    /// Remove one key, or every entry when `key` is `None`
    pub fn clear(&self, key: Option<&str>) {
        let Some(dir) = self.dir.as_ref() else {
            return;
        };
        match key {
            Some(key) => {
                if let Some(path) = self.entry_path(key) {
                    let _ = fs::remove_file(path);
                }
            }
            None => {
                let Ok(entries) = fs::read_dir(dir) else {
                    return;
                };
                for entry in entries.filter_map(|e| e.ok()) {
                    let path = entry.path();
                    if path.extension().and_then(|e| e.to_str()) == Some("json") {
                        let _ = fs::remove_file(path);
                    }
                }
            }
        }
    }
}

/// Return the cached value for `key`, or compute, store and return it.
/// Failed computations are returned as-is and never stored.
pub fn with_cache<T, F>(cache: &Cache, key: &str, compute: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Result<T>,
{
    if let Some(hit) = cache.get(key) {
        return Ok(hit);
    }
    let value = compute()?;
    cache.set(key, &value);
    Ok(value)
}

fn write_entry<T: Serialize>(dir: &Path, path: &Path, value: &T) -> Result<()> {
    fs::create_dir_all(dir)?;
    let data = serde_json::to_vec(&Entry {
        timestamp: unix_now(),
        value,
    })?;
    fs::write(path, data)?;
    Ok(())
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
