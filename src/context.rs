//! Everything a collection pass needs, passed explicitly

use crate::cache::Cache;
use crate::config::Config;
use crate::host::{Host, DEFAULT_COMMAND_TIMEOUT};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Context {
    pub host: Host,
    pub cache: Cache,
    pub config: Config,
}

impl Context {
    pub fn new(host: Host, cache: Cache, config: Config) -> Self {
        Context { host, cache, config }
    }

    /// The running machine, with cache and command budget taken from `config`
    pub fn from_config(config: Config) -> Self {
        let timeout = config.get_or(&["performance", "command_timeout"], DEFAULT_COMMAND_TIMEOUT.as_secs());
        Context {
            host: Host::system().with_command_timeout(Duration::from_secs(timeout)),
            cache: Cache::from_config(&config),
            config,
        }
    }

    /// An isolated host under `root`: empty environment, no cache, default config
    pub fn sandboxed(root: impl Into<PathBuf>) -> Self {
        Context {
            host: Host::sandboxed(root),
            cache: Cache::disabled(),
            config: Config::defaults(),
        }
    }

    pub fn with_host(mut self, host: Host) -> Self {
        self.host = host;
        self
    }

    pub fn with_cache(mut self, cache: Cache) -> Self {
        self.cache = cache;
        self
    }
}
