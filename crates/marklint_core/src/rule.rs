//! The contract every check implements.

use crate::cancel::CancellationToken;
use crate::catalog::RuleDescriptor;
use crate::config::RuleConfiguration;
use crate::diagnostic::Violation;
use crate::document::Document;

/// Lazily produced violations of one check.
pub type Violations<'a> = Box<dyn Iterator<Item = Violation> + 'a>;

/// A single style or structure check.
///
/// Implementations must be pure: they read the shared [`Document`] and never
/// mutate it, may be called concurrently with other checks on the same
/// document, and must return a fresh iterator on every call so the result can
/// be re-evaluated.
pub trait Rule: Send + Sync {
    /// Static metadata for this check.
    fn descriptor(&self) -> &RuleDescriptor;

    /// Analyzes a document under the resolved configuration.
    fn check<'a>(&'a self, ctx: RuleContext<'a>) -> Violations<'a>;
}

/// Everything a check gets to see for one run.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The shared document model.
    pub document: &'a Document,
    /// The effective configuration for this check.
    pub config: &'a RuleConfiguration,
    /// The check's own descriptor.
    pub descriptor: &'a RuleDescriptor,
    cancel: &'a CancellationToken,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        document: &'a Document,
        config: &'a RuleConfiguration,
        descriptor: &'a RuleDescriptor,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            document,
            config,
            descriptor,
            cancel,
        }
    }

    /// Creates a violation attributed to this check.
    ///
    /// Severity is stamped later from the resolved configuration.
    pub fn violation(
        &self,
        line: usize,
        column_start: usize,
        column_end: usize,
        message: impl Into<String>,
    ) -> Violation {
        Violation::new(self.descriptor.id, line, column_start, column_end, message)
    }

    /// Returns true once the run has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
