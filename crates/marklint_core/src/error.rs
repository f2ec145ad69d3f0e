//! Linter error types.

use thiserror::Error;

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum LinterError {
    /// Global configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Per-file settings source could not be read or parsed.
    #[error("Settings error: {0}")]
    Settings(String),

    /// File error.
    #[error("File error: {0}")]
    File(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(#[from] marklint_parser::ParseError),

    /// Two rules were registered under the same id, name or alias.
    #[error("Duplicate rule registration: {0}")]
    DuplicateRule(String),

    /// The analysis was cancelled before it completed.
    #[error("Analysis cancelled")]
    Cancelled,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a settings error.
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Returns true if this error is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
