//! Error types for pagewright.
//!
//! Library crates use [`PagewrightError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::fmt;
use std::path::PathBuf;

/// Which side of a marker pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRole {
    Start,
    End,
}

impl fmt::Display for MarkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Top-level error type for all pagewright operations.
#[derive(Debug, thiserror::Error)]
pub enum PagewrightError {
    /// A search marker was not present the requested number of times.
    ///
    /// For [`MarkerRole::End`] the occurrence counts from just after the
    /// matched start marker, not from the start of the content.
    #[error("{role} marker '{marker}' (occurrence {occurrence}) not found")]
    MarkerNotFound {
        role: MarkerRole,
        marker: String,
        occurrence: usize,
    },

    /// A search marker was configured as the empty string.
    #[error("{role} marker must not be empty")]
    EmptyMarker { role: MarkerRole },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Malformed input handed to a formatter (JSON payloads and the like).
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PagewrightError>;

impl PagewrightError {
    /// Create a marker-not-found error.
    pub fn marker_not_found(role: MarkerRole, marker: &str, occurrence: usize) -> Self {
        Self::MarkerNotFound {
            role,
            marker: marker.to_string(),
            occurrence,
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
