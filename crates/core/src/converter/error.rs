//! Error types for the converter module.

use thiserror::Error;

/// Errors that can occur while interpreting converter entries.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// A converter list was expected but something else was supplied.
    #[error("Expected a sequence of converters, got {kind}")]
    NotASequence { kind: &'static str },

    /// A list element is neither a bare id nor a record with a `converter` key.
    #[error("Malformed converter entry at index {index}: {reason}")]
    MalformedEntry { index: usize, reason: String },

    /// Options of a known converter could not be read as its typed view.
    #[error("Invalid options for converter '{id}': {reason}")]
    InvalidOptions { id: String, reason: String },
}

impl ConverterError {
    /// Creates a new malformed entry error.
    pub fn malformed_entry(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            index,
            reason: reason.into(),
        }
    }

    /// Creates a new invalid options error.
    pub fn invalid_options(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOptions {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
