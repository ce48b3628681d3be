//! Error types for focusflow-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the focusflow-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Session history file exists but cannot be understood
    #[error("session history at {path:?} is corrupt: {message}")]
    CorruptHistory { path: PathBuf, message: String },

    /// Hosts file could not be read or rewritten
    #[error("website blocker error: {0}")]
    Blocker(String),

    /// Unknown session status string
    #[error("invalid session status: {0}")]
    InvalidStatus(String),
}

/// Result type alias for focusflow-core
pub type Result<T> = std::result::Result<T, Error>;
