//! Lint result types.

use std::path::PathBuf;

use serde::Serialize;

use crate::diagnostic::{Severity, Violation};

/// Result of linting a single file.
#[derive(Debug, Clone, Serialize)]
pub struct LintResult {
    /// Path to the linted file.
    pub path: PathBuf,

    /// Violations found, in report order.
    pub violations: Vec<Violation>,
}

impl LintResult {
    pub fn new(path: impl Into<PathBuf>, violations: Vec<Violation>) -> Self {
        Self {
            path: path.into(),
            violations,
        }
    }

    /// Returns true if any violation is an error.
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Returns the highest severity reported, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        self.violations.iter().map(|v| v.severity).max()
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_summary() {
        let clean = LintResult::new("a.md", Vec::new());
        assert!(clean.is_clean());
        assert!(!clean.has_errors());
        assert_eq!(clean.max_severity(), None);

        let result = LintResult::new(
            "b.md",
            vec![
                Violation::new("MD009", 0, 3, 4, "Trailing spaces"),
                Violation::new("MD001", 2, 0, 5, "Heading").with_severity(Severity::Error),
            ],
        );
        assert!(result.has_errors());
        assert_eq!(result.max_severity(), Some(Severity::Error));
    }
}
