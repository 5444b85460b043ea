//! Error types for the pdflayout library.

use std::io;
use thiserror::Error;

/// Result type alias for pdflayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while analyzing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed primitive dump or configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An option has an invalid value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configured regular expression does not compile.
    #[error("Invalid pattern for {name}: {source}")]
    InvalidPattern {
        /// Name of the configuration entry
        name: String,
        /// Compilation error
        #[source]
        source: regex::Error,
    },

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),
}

impl Error {
    /// Build an [`Error::InvalidConfig`] for an option whose value must be a
    /// finite, non-negative number.
    pub(crate) fn non_negative(name: &str, value: f32) -> Self {
        Error::InvalidConfig(format!(
            "{} must be a finite non-negative number, got {}",
            name, value
        ))
    }
}

/// Check that a tuning value is finite and non-negative.
pub(crate) fn check_non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::non_negative(name, value))
    }
}
