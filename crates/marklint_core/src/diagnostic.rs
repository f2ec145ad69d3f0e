//! Severity and violation types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity level for violations.
///
/// Variants are declared in ascending order so ordinal comparisons are
/// meaningful: `None < Silent < Suggestion < Warning < Error`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Not reported at all. A rule resolved to this severity is not run.
    None,
    /// Reported to hosts but normally hidden.
    Silent,
    /// Informational hint.
    Suggestion,
    /// Should be reviewed.
    #[default]
    Warning,
    /// Must be fixed.
    Error,
}

impl Severity {
    /// Parses a severity keyword, case-insensitively.
    ///
    /// Accepts `error`, `warning`, `suggestion` (also `info`, `hint`),
    /// `silent` (also `refactoring`) and `none`.
    pub fn parse_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "suggestion" | "info" | "hint" => Some(Self::Suggestion),
            "silent" | "refactoring" => Some(Self::Silent),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Returns the canonical lower-case keyword.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Silent => "silent",
            Self::Suggestion => "suggestion",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// Canonical id of the rule that produced this violation (e.g. `MD001`).
    pub rule_id: String,

    /// Line number (0-indexed).
    pub line: usize,

    /// Start byte column within the line (inclusive).
    pub column_start: usize,

    /// End byte column within the line (exclusive).
    pub column_end: usize,

    /// Human readable message.
    pub message: String,

    /// Severity, taken from the rule's resolved configuration.
    #[serde(default)]
    pub severity: Severity,

    /// Optional replacement text hint for hosts offering quick fixes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_hint: Option<String>,
}

impl Violation {
    /// Creates a new violation with the default severity.
    pub fn new(
        rule_id: impl Into<String>,
        line: usize,
        column_start: usize,
        column_end: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            line,
            column_start,
            column_end,
            message: message.into(),
            severity: Severity::default(),
            fix_hint: None,
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets a fix hint.
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }
}
