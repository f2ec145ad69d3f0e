//! # marklint_core
//!
//! Analysis engine for marklint.
//!
//! This crate provides:
//! - The [`Document`] model built from raw text and the parser's block tree
//! - The [`RuleCatalog`] of built-in checks and the [`Rule`] contract
//! - Layered rule configuration with a TTL settings cache
//! - Inline suppression directives (`<!-- markdownlint-disable ... -->`)
//! - The [`Linter`] that runs checks in parallel and orders their findings
//!
//! ## Example
//!
//! ```rust
//! use marklint_core::{CancellationToken, Linter};
//!
//! let linter = Linter::with_defaults();
//! let violations = linter
//!     .lint_text("# Title\n\n### Skipped\n", None, &CancellationToken::new())
//!     .unwrap();
//!
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].rule_id, "MD001");
//! ```

mod analysis;
mod cancel;
mod catalog;
pub mod config;
mod diagnostic;
pub mod document;
mod error;
mod linter;
mod result;
mod rule;
pub mod rules;
mod suppression;

pub use analysis::{Analysis, DocumentCache};
pub use cancel::{AnalysisScheduler, CancellationToken};
pub use catalog::{RuleCatalog, RuleDescriptor, normalize_rule_key};
pub use config::{ConfigurationResolver, LinterConfig, RuleConfiguration};
pub use diagnostic::{Severity, Violation};
pub use document::{Document, HeadingInfo, HeadingStyle, LineFilter, LineInfo};
pub use error::LinterError;
pub use linter::{LintFilesResult, Linter};
pub use result::LintResult;
pub use rule::{Rule, RuleContext, Violations};
pub use suppression::SuppressionMap;
