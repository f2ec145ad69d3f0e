//! Core linter engine.

use std::any::Any;
use std::cmp::Ordering;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, error, warn};

use crate::analysis::{Analysis, DocumentCache};
use crate::cancel::CancellationToken;
use crate::catalog::RuleCatalog;
use crate::config::{ConfigurationResolver, EditorConfigSource, LinterConfig, RuleConfiguration};
use crate::diagnostic::Violation;
use crate::document::Document;
use crate::error::LinterError;
use crate::result::LintResult;
use crate::rule::{Rule, RuleContext};
use crate::suppression::SuppressionMap;

/// Successful lint results and the files that failed, with their errors.
pub type LintFilesResult = (Vec<LintResult>, Vec<(PathBuf, LinterError)>);

/// The core linter engine.
///
/// Orchestrates configuration resolution, parallel check execution,
/// suppression filtering and ordering.
pub struct Linter {
    catalog: Arc<RuleCatalog>,
    resolver: ConfigurationResolver,
    documents: DocumentCache,
}

impl Linter {
    pub fn new(catalog: Arc<RuleCatalog>, resolver: ConfigurationResolver) -> Self {
        Self {
            catalog,
            resolver,
            documents: DocumentCache::new(),
        }
    }

    /// Built-in checks, `.editorconfig` settings and default global options.
    pub fn with_defaults() -> Self {
        Self::new(RuleCatalog::builtin(), ConfigurationResolver::with_defaults())
    }

    /// Built-in checks and `.editorconfig` settings under the given global options.
    pub fn with_config(config: LinterConfig) -> Self {
        let resolver =
            ConfigurationResolver::new(Arc::new(EditorConfigSource::new()), Arc::new(config));
        Self::new(RuleCatalog::builtin(), resolver)
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn resolver(&self) -> &ConfigurationResolver {
        &self.resolver
    }

    /// Runs every active check against a prepared document.
    ///
    /// Returns the suppression-filtered violations sorted by position, or
    /// [`LinterError::Cancelled`] if `cancel` fired before the run completed.
    pub fn analyze(
        &self,
        document: &Document,
        suppressions: &SuppressionMap,
        path: Option<&Path>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Violation>, LinterError> {
        if cancel.is_cancelled() {
            return Err(LinterError::Cancelled);
        }

        let rules = self.catalog.rules();
        let active: Vec<(&dyn Rule, RuleConfiguration)> = rules
            .iter()
            .zip(self.resolver.resolve_all(self.catalog.descriptors(), path))
            .map(|(rule, (_, config))| (rule.as_ref(), config))
            .filter(|(_, config)| config.is_active())
            .collect();

        let per_rule: Vec<Vec<Violation>> = active
            .par_iter()
            .map(|(rule, config)| {
                let found = run_rule(*rule, config, document, cancel);
                if !suppressions.has_any_suppressions() {
                    return found;
                }
                let descriptor = rule.descriptor();
                found
                    .into_iter()
                    .filter(|v| !suppressions.is_rule_suppressed(v.line, descriptor))
                    .collect()
            })
            .collect();

        if cancel.is_cancelled() {
            debug!("Analysis cancelled after {} checks", active.len());
            return Err(LinterError::Cancelled);
        }

        let mut violations: Vec<Violation> = per_rule.into_iter().flatten().collect();
        violations.sort_by(compare_violations);

        debug!(
            "Ran {} of {} checks, {} violations",
            active.len(),
            rules.len(),
            violations.len()
        );
        Ok(violations)
    }

    /// Lints text, reusing the cached document model while `path`'s content is unchanged.
    pub fn lint_text(
        &self,
        text: &str,
        path: Option<&Path>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Violation>, LinterError> {
        let analysis = match path {
            Some(path) => {
                let key = path.to_string_lossy();
                self.documents.get_or_build(&key, text, &self.catalog)
            }
            None => Arc::new(Analysis::new(text, &self.catalog)),
        };
        self.analyze(&analysis.document, &analysis.suppressions, path, cancel)
    }

    /// Lints a single file from disk.
    ///
    /// One-shot runs bypass the document cache, so batch linting holds no
    /// analysis past the file it belongs to.
    pub fn lint_file(&self, path: &Path) -> Result<LintResult, LinterError> {
        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::file(format!("{}: {}", path.display(), e)))?;
        let analysis = Analysis::new(&content, &self.catalog);
        let violations = self.analyze(
            &analysis.document,
            &analysis.suppressions,
            Some(path),
            &CancellationToken::new(),
        )?;
        Ok(LintResult::new(path, violations))
    }

    /// Lints files in parallel.
    ///
    /// A file that cannot be linted is reported alongside the successes
    /// instead of aborting the batch.
    pub fn lint_files(&self, paths: &[PathBuf]) -> LintFilesResult {
        let results: Vec<Result<LintResult, (PathBuf, LinterError)>> = paths
            .par_iter()
            .map(|path| self.lint_file(path).map_err(|e| (path.clone(), e)))
            .collect();

        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(lint_result) => successes.push(lint_result),
                Err((path, error)) => {
                    warn!("Failed to lint {}: {}", path.display(), error);
                    failures.push((path, error));
                }
            }
        }

        (successes, failures)
    }

    /// Drops all cached per-file settings.
    pub fn invalidate_settings(&self) {
        self.resolver.invalidate();
    }

    /// Reacts to a file change notification from the host.
    pub fn on_file_changed(&self, path: &Path) {
        if !self.resolver.on_file_changed(path) {
            self.documents.remove(&path.to_string_lossy());
        }
    }

    /// Forgets the cached document model for `path`.
    pub fn close_document(&self, path: &Path) {
        self.documents.remove(&path.to_string_lossy());
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Runs one check, containing any panic it raises.
///
/// Stops consuming the check's iterator as soon as `cancel` fires.
fn run_rule(
    rule: &dyn Rule,
    config: &RuleConfiguration,
    document: &Document,
    cancel: &CancellationToken,
) -> Vec<Violation> {
    let descriptor = rule.descriptor();
    let ctx = RuleContext::new(document, config, descriptor, cancel);

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut found = Vec::new();
        for violation in rule.check(ctx) {
            if cancel.is_cancelled() {
                break;
            }
            found.push(violation.with_severity(config.severity));
        }
        found
    }));

    match outcome {
        Ok(found) => found,
        Err(payload) => {
            error!(
                "Check {} failed and was skipped: {}",
                descriptor.id,
                panic_message(payload.as_ref())
            );
            Vec::new()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

/// Orders by position, then by rule id so ties are stable across runs.
fn compare_violations(a: &Violation, b: &Violation) -> Ordering {
    a.line
        .cmp(&b.line)
        .then(a.column_start.cmp(&b.column_start))
        .then_with(|| a.rule_id.cmp(&b.rule_id))
        .then(a.column_end.cmp(&b.column_end))
        .then_with(|| a.message.cmp(&b.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InMemoryOptions, StaticSettings};
    use crate::diagnostic::Severity;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn linter(settings: StaticSettings) -> Linter {
        let resolver =
            ConfigurationResolver::new(Arc::new(settings), Arc::new(InMemoryOptions::new()));
        Linter::new(RuleCatalog::builtin(), resolver)
    }

    fn lint(linter: &Linter, text: &str) -> Vec<Violation> {
        linter
            .lint_text(text, Some(Path::new("doc.md")), &CancellationToken::new())
            .unwrap()
    }

    #[test]
    fn test_violations_are_sorted() {
        let text = "#Title \n\n\n### Deep\tx\n";
        let violations = lint(&linter(StaticSettings::new()), text);
        let keys: Vec<(usize, usize, &str)> = violations
            .iter()
            .map(|v| (v.line, v.column_start, v.rule_id.as_str()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert!(!violations.is_empty());
    }

    #[test]
    fn test_severity_is_stamped_from_config() {
        let l = linter(StaticSettings::new().with("md_no-hard-tabs", "error"));
        let violations = lint(&l, "a\tb\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "MD010");
        assert_eq!(violations[0].severity, Severity::Error);
    }

    #[test]
    fn test_disabled_and_none_rules_do_not_run() {
        let l = linter(
            StaticSettings::new()
                .with("md_md010", "false")
                .with("md_md047", "none:none"),
        );
        assert!(lint(&l, "a\tb").is_empty());
    }

    #[test]
    fn test_pre_cancelled_run() {
        let token = CancellationToken::new();
        token.cancel();
        let err = Linter::with_defaults()
            .lint_text("a\tb\n", None, &token)
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_lint_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "# Title\n\n### Skipped\n").unwrap();

        let result = linter(StaticSettings::new()).lint_file(file.path()).unwrap();
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].rule_id, "MD001");
        assert_eq!(result.path, file.path());
    }

    #[test]
    fn test_lint_files_reports_failures() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "fine\n").unwrap();
        let missing = PathBuf::from("/definitely/not/here.md");

        let (ok, failed) =
            linter(StaticSettings::new()).lint_files(&[file.path().to_path_buf(), missing.clone()]);
        assert_eq!(ok.len(), 1);
        assert!(ok[0].is_clean());
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, missing);
        assert!(matches!(failed[0].1, LinterError::File(_)));
    }

    #[test]
    fn test_file_runs_leave_document_cache_empty() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "# Title\n\n### Skipped\n").unwrap();
        let l = linter(StaticSettings::new());

        let (ok, _) = l.lint_files(&[file.path().to_path_buf()]);
        assert_eq!(ok[0].violations.len(), 1);
        assert!(l.documents.is_empty());

        lint(&l, "a\tb\n");
        assert_eq!(l.documents.len(), 1);
    }

    #[test]
    fn test_compare_violations_tiebreak() {
        let a = Violation::new("MD009", 1, 0, 3, "x");
        let b = Violation::new("MD010", 1, 0, 1, "x");
        assert_eq!(compare_violations(&a, &b), Ordering::Less);
        assert_eq!(compare_violations(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(7);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
