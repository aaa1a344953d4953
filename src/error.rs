//! Centralized error handling for ezfetch

use std::io;
use thiserror::Error;

/// Custom error type for ezfetch operations
#[derive(Debug, Error)]
pub enum EzfetchError {
    /// I/O errors (file reading, command execution)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Parsing errors (invalid data format)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// System detection errors
    #[error("Detection error: {0}")]
    Detection(String),

    /// An external command ran past its time budget and was killed
    #[error("Command '{program}' timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EzfetchError {
    pub fn detection(msg: impl Into<String>) -> Self {
        EzfetchError::Detection(msg.into())
    }
}

/// Type alias for Results in ezfetch
pub type Result<T> = std::result::Result<T, EzfetchError>;
