//! Error types for the dnix-core library.
//!
//! Extraction itself never fails; these cover loading configuration and
//! compiling layout profiles.

use thiserror::Error;

/// Main error type for the dnix library.
#[derive(Error, Debug)]
pub enum DnixError {
    /// Layout profile could not be compiled.
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while compiling a layout profile into matchers.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A keyword list contains an empty or whitespace-only entry.
    #[error("blank keyword in {list}")]
    BlankKeyword { list: &'static str },

    /// A label pattern fragment is not a valid regular expression.
    #[error("invalid label pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for the dnix library.
pub type Result<T> = std::result::Result<T, DnixError>;
