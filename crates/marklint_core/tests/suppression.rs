//! Suppression directives observed through the linter.

use marklint_core::{CancellationToken, Document, Linter, RuleCatalog, SuppressionMap, Violation};

fn lint(text: &str) -> Vec<Violation> {
    Linter::with_defaults()
        .lint_text(text, None, &CancellationToken::new())
        .unwrap()
}

fn tab_lines(text: &str) -> Vec<usize> {
    lint(text)
        .into_iter()
        .filter(|v| v.rule_id == "MD010")
        .map(|v| v.line)
        .collect()
}

#[test]
fn capture_restore_round_trip() {
    let text = "\
<!-- markdownlint-disable MD010 -->
a\tb
<!-- markdownlint-capture -->
<!-- markdownlint-enable MD010 -->
c\td
<!-- markdownlint-restore -->
e\tf
<!-- markdownlint-enable -->
g\th
";
    assert_eq!(tab_lines(text), vec![4, 8]);
}

#[test]
fn restore_without_capture_resets_to_default() {
    let text = "\
<!-- markdownlint-disable -->
a\tb
<!-- markdownlint-restore -->
c\td
";
    assert_eq!(tab_lines(text), vec![3]);
}

#[test]
fn next_line_and_same_line_directives() {
    let text = "\
<!-- markdownlint-disable-next-line no-hard-tabs -->
a\tb
c\td
e\tf <!-- markdownlint-disable-line MD010 -->
";
    assert_eq!(tab_lines(text), vec![2]);
}

#[test]
fn file_level_rules_apply_before_the_directive() {
    let text = "\
a\tb
# Title

### Skipped
<!-- markdownlint-disable-file no-hard-tabs -->
";
    let violations = lint(text);
    assert!(violations.iter().all(|v| v.rule_id != "MD010"));
    assert!(violations.iter().any(|v| v.rule_id == "MD001"));
}

#[test]
fn bare_disable_file_wins_over_everything() {
    let text = "\
<!-- markdownlint-enable -->
a\tb
<!-- markdownlint-configure-file MD001 -->
# Title
### Skipped
<!-- markdownlint-disable-file -->
";
    assert!(lint(text).is_empty());
}

#[test]
fn suppression_map_from_document() {
    let document = Document::new("x\n<!-- markdownlint-disable MD013 -->\ny\n");
    let map = SuppressionMap::from_document(&document, &RuleCatalog::builtin());

    assert!(map.has_any_suppressions());
    assert!(!map.is_suppressed(0, "line-length"));
    assert!(map.is_suppressed(2, "line-length"));
    assert!(map.is_suppressed(2, "MD013"));
    assert!(!map.all_suppressed(2));
}
