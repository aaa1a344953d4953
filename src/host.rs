//! Access to the machine being described.
//!
//! Probes never touch `std::fs`, `std::env` or `std::process` directly; they
//! go through a [`Host`], which knows the filesystem root to read under, the
//! environment to consult and how long an external command may run. The
//! real machine is `Host::system()`; tests build a `Host::sandboxed` one over
//! a temporary directory.

use crate::error::{EzfetchError, Result};
use crate::utils::{command, file};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default time budget for a single external command
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Host {
    root: PathBuf,
    /// `None` means the process environment
    env: Option<HashMap<String, String>>,
    command_timeout: Duration,
}

impl Default for Host {
    fn default() -> Self {
        Self::system()
    }
}

impl Host {
    /// The machine we are running on
    pub fn system() -> Self {
        Host {
            root: PathBuf::from("/"),
            env: None,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// A host rooted at `root` with an empty environment (and so no `PATH`)
    pub fn sandboxed(root: impl Into<PathBuf>) -> Self {
        Host {
            root: root.into(),
            env: Some(HashMap::new()),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an absolute host path like `/proc/uptime` under our root
    pub fn path(&self, abs: &str) -> PathBuf {
        self.root.join(abs.trim_start_matches('/'))
    }

    pub fn read_to_string(&self, abs: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.path(abs))?)
    }

    pub fn read_first_line(&self, abs: &str) -> Result<String> {
        file::read_first_line(self.path(abs))
    }

    pub fn exists(&self, abs: &str) -> bool {
        self.path(abs).exists()
    }

    /// Entry names of a directory, sorted for stable output
    pub fn read_dir_names(&self, abs: &str) -> Result<Vec<String>> {
        let mut names: Vec<String> = std::fs::read_dir(self.path(abs))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn count_dirs(&self, abs: &str) -> Result<usize> {
        file::count_dirs(self.path(abs))
    }

    /// Raw environment lookup; a variable set to "" is still `Some("")`
    pub fn env_var(&self, key: &str) -> Option<String> {
        match &self.env {
            Some(vars) => vars.get(key).cloned(),
            None => env::var(key).ok(),
        }
    }

    /// First of `keys` that is set to a non-empty value
    pub fn first_env(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.env_var(key))
            .find(|value| !value.trim().is_empty())
    }

    pub fn which(&self, program: &str) -> Option<PathBuf> {
        let path_var = self.env_var("PATH").unwrap_or_default();
        command::find_in_path(program, &path_var)
    }

    pub fn command_exists(&self, program: &str) -> bool {
        self.which(program).is_some()
    }

    /// Run a read-only utility within the command time budget
    pub fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let resolved = self
            .which(program)
            .ok_or_else(|| EzfetchError::detection(format!("Command '{}' not found", program)))?;
        command::run_command(&resolved, args, self.env.as_ref(), self.command_timeout)
    }
}
