//! Parse error types.

use markdown::message::{Message, Place};
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source could not be turned into a block tree.
    #[error("Markdown syntax error: {message}")]
    Syntax {
        /// Error message.
        message: String,
        /// 1-based line the parser stopped at, if known.
        line: Option<usize>,
    },
}

impl ParseError {
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
            line: None,
        }
    }

    /// Returns the 1-based line of the error, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } => *line,
        }
    }
}

impl From<Message> for ParseError {
    fn from(message: Message) -> Self {
        let line = message.place.as_deref().map(|place| match place {
            Place::Position(position) => position.start.line,
            Place::Point(point) => point.line,
        });
        Self::Syntax {
            message: message.reason,
            line,
        }
    }
}
