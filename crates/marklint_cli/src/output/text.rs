//! Text output formatter

use marklint_core::LintResult;

/// Lines and columns are printed 1-based.
pub fn output_text(results: &[LintResult]) {
    for result in results {
        if result.is_clean() {
            continue;
        }

        println!("\n{}:", result.path.display());
        for v in &result.violations {
            println!(
                "  {}:{} {} [{}]: {}",
                v.line + 1,
                v.column_start + 1,
                v.severity,
                v.rule_id,
                v.message
            );
        }
    }

    let total_files = results.len();
    let total_issues: usize = results.iter().map(|r| r.violations.len()).sum();

    println!();
    println!("Checked {} files, found {} issues", total_files, total_issues);
}
