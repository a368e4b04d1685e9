//! Error handling for WMO header operations.
//!
//! Provides error types for header validation, the assign-once header slot,
//! bulletin scanning and configuration failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WmoError {
    #[error("Invalid WMO abbreviated header: '{header}'")]
    InvalidHeader { header: String },

    #[error("Header already set to '{current}'")]
    AlreadySet { current: String },

    #[error("Field '{field}' is read-only; only the whole header can be assigned")]
    ReadOnlyField { field: String },

    #[error("Unknown header field: '{name}'")]
    UnknownField { name: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl WmoError {
    /// Create an invalid header error carrying the rejected text
    pub fn invalid_header(header: impl Into<String>) -> Self {
        Self::InvalidHeader {
            header: header.into(),
        }
    }

    /// Create an I/O error with the offending path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WmoError>;
