//! Span and position types for source locations.

use serde::{Deserialize, Serialize};

/// A line/column position in source text.
///
/// Both fields are 0-indexed; `column` is a byte offset from the start of
/// the line.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Line number (0-indexed).
    pub line: usize,
    /// Byte column within the line (0-indexed).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A byte range in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u32,
    /// End byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Creates a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns the length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if this span contains the given offset.
    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Returns the offset of the last byte covered by the span.
    ///
    /// For an empty span this is `start`.
    #[inline]
    pub const fn last_offset(&self) -> u32 {
        if self.end > self.start {
            self.end - 1
        } else {
            self.start
        }
    }
}
