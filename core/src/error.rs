//! Error types for the portmonitor-core library.

use thiserror::Error;

/// Result type alias for port monitor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while enumerating sockets or persisting mappings.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to execute a system command.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// Failed to parse command output.
    #[error("Failed to parse output: {0}")]
    ParseError(String),

    /// A port key that is not a decimal number in 0-65535.
    #[error("Invalid port: {0:?}")]
    InvalidPort(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Platform not supported.
    #[error("Platform not supported: {0}")]
    UnsupportedPlatform(String),
}
