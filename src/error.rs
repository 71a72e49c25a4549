//! Error types for DishaIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal error types
///
/// Everything here terminates the daemon. Per-line recoverable failures
/// (framing, parsing, validation) live in small enums next to the code
/// that produces them and never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be written back
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Unknown source kind in configuration
    #[error("Unknown source kind: {0}")]
    UnknownSource(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
