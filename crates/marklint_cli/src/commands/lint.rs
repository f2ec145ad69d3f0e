//! Lint command implementation

use std::path::PathBuf;

use marklint_core::{Linter, LinterConfig};
use miette::{IntoDiagnostic, Result};
use tracing::info;

use crate::cli::{Cli, OutputFormat};
use crate::output::output_results;

/// Lints `files` and prints the report.
///
/// Returns true when any violation has error severity or a file could not be linted.
pub fn run_lint(cli: &Cli, files: &[PathBuf], format: OutputFormat) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => {
            info!("Using config: {}", path.display());
            LinterConfig::from_file(path).into_diagnostic()?
        }
        None => find_config()?,
    };

    let linter = Linter::with_config(config);
    let (mut results, failures) = linter.lint_files(files);
    results.sort_by(|a, b| a.path.cmp(&b.path));

    if !failures.is_empty() {
        eprintln!("\n{} file(s) failed to lint:", failures.len());
        for (path, error) in &failures {
            eprintln!("  {}: {}", path.display(), error);
        }
    }

    let has_errors = output_results(&results, format)?;

    Ok(has_errors || !failures.is_empty())
}

fn find_config() -> Result<LinterConfig> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    LinterConfig::load_default(&cwd).into_diagnostic()
}
