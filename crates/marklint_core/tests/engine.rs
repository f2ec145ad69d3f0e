//! End-to-end behaviour of the analysis engine.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use marklint_core::config::{InMemoryOptions, StaticSettings};
use marklint_core::{
    Analysis, CancellationToken, ConfigurationResolver, Document, Linter, LinterError, Rule,
    RuleCatalog, RuleContext, RuleDescriptor, Severity, Violation, Violations, rules,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn linter() -> Linter {
    linter_with(StaticSettings::new(), InMemoryOptions::new())
}

fn linter_with(settings: StaticSettings, options: InMemoryOptions) -> Linter {
    let resolver = ConfigurationResolver::new(Arc::new(settings), Arc::new(options));
    Linter::new(RuleCatalog::builtin(), resolver)
}

fn lint(linter: &Linter, text: &str) -> Vec<Violation> {
    linter
        .lint_text(text, Some(Path::new("doc.md")), &CancellationToken::new())
        .unwrap()
}

fn rule_lines(violations: &[Violation], rule_id: &str) -> Vec<usize> {
    violations
        .iter()
        .filter(|v| v.rule_id == rule_id)
        .map(|v| v.line)
        .collect()
}

#[test]
fn heading_increment_respects_disable_enable_pair() {
    let suppressed = "# Title\n\n<!-- markdownlint-disable MD001 -->\n### Skipped Level\n<!-- markdownlint-enable -->\n";
    assert_eq!(rule_lines(&lint(&linter(), suppressed), "MD001"), Vec::<usize>::new());

    let plain = "# Title\n\n### Skipped Level\n";
    assert_eq!(rule_lines(&lint(&linter(), plain), "MD001"), vec![2]);
}

#[test]
fn hard_tab_suppressed_only_inside_region() {
    let text = "\tLine with tab\n<!-- markdownlint-disable MD010 -->\n\tLine with tab\n<!-- markdownlint-enable -->\n";
    let violations = lint(&linter(), text);
    assert_eq!(rule_lines(&violations, "MD010"), vec![0]);
}

#[test]
fn bare_disable_file_suppresses_everything() {
    let text = "# Title\n\n### Skipped\n\ttab   \n\n\n<!-- markdownlint-enable -->\n<!-- markdownlint-disable-file -->";
    assert!(lint(&linter(), text).is_empty());
}

#[test]
fn documents_without_directives_keep_all_findings() {
    let text = "# Title\n\n### Skipped\n\ttab\n";
    let analysis = Analysis::new(text, &RuleCatalog::builtin());
    assert!(!analysis.suppressions.has_any_suppressions());

    let violations = lint(&linter(), text);
    assert_eq!(rule_lines(&violations, "MD001"), vec![2]);
    assert_eq!(rule_lines(&violations, "MD010"), vec![3]);
}

#[test]
fn per_file_setting_overrides_global_option() {
    let text = "a\tb\n";

    let global_off = linter_with(StaticSettings::new(), InMemoryOptions::new().with("MD010", false));
    assert!(lint(&global_off, text).is_empty());

    let file_on = linter_with(
        StaticSettings::new().with("md_no-hard-tabs", "error"),
        InMemoryOptions::new().with("MD010", false),
    );
    let violations = lint(&file_on, text);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].severity, Severity::Error);
}

#[test]
fn compiled_defaults_apply_without_settings() {
    let long = format!("{} word\n", "x".repeat(90));
    assert!(rule_lines(&lint(&linter(), &long), "MD013").is_empty());

    let enabled = linter_with(StaticSettings::new(), InMemoryOptions::new().with("line-length", true));
    let violations = lint(&enabled, &long);
    assert_eq!(rule_lines(&violations, "MD013"), vec![0]);
    assert_eq!(violations[0].severity, Severity::Warning);
}

#[test]
fn rule_parameters_flow_from_settings() {
    let settings = StaticSettings::new()
        .with("md_line-length", "true")
        .with("md_line-length.line_length", "20");
    let violations = lint(
        &linter_with(settings, InMemoryOptions::new()),
        "a short line\nthis one is certainly longer than twenty\n",
    );
    assert_eq!(rule_lines(&violations, "MD013"), vec![1]);
}

#[rstest]
#[case("# Title\n\n### Deep\n\ttab  \n\n\n\n#Missing\nend")]
#[case("---\ntitle: x\n---\n\n## Start\n\n```\n\tcode\n```\n\nSetext\n---\n")]
#[case("")]
fn analysis_is_deterministic(#[case] text: &str) {
    let l = linter();
    let first = lint(&l, text);
    l.close_document(Path::new("doc.md"));
    let second = lint(&l, text);
    assert_eq!(first, second);

    let concurrent: Vec<Vec<Violation>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| lint(&linter(), text)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for run in concurrent {
        assert_eq!(run, first);
    }
}

#[test]
fn violations_are_sorted_by_position() {
    let violations = lint(&linter(), "#Title  \n\n\n### Deep\tx\nend");
    let positions: Vec<(usize, usize)> = violations.iter().map(|v| (v.line, v.column_start)).collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn offsets_round_trip() {
    let text = "# Title\r\n\r\nText with\ttab\n\n- item\n  continued\n";
    let document = Document::new(text);
    for offset in 0..=text.len() {
        let position = document.offset_to_position(offset);
        assert_eq!(document.position_to_offset(position), offset);
    }
}

const PANICKY: RuleDescriptor = RuleDescriptor {
    id: "MD900",
    name: "always-panics",
    aliases: &[],
    description: "Panics while checking",
    default_severity: Severity::Error,
    default_enabled: true,
    documentation: "",
};

struct Panicky;

impl Rule for Panicky {
    fn descriptor(&self) -> &RuleDescriptor {
        &PANICKY
    }

    fn check<'a>(&'a self, ctx: RuleContext<'a>) -> Violations<'a> {
        Box::new((0..ctx.document.line_count()).map(|line| {
            if line == 1 {
                panic!("check exploded");
            }
            Violation::new("MD900", line, 0, 0, "never kept")
        }))
    }
}

const CANCELLING: RuleDescriptor = RuleDescriptor {
    id: "MD901",
    name: "cancels-midway",
    aliases: &[],
    description: "Cancels the run after a few findings",
    default_severity: Severity::Warning,
    default_enabled: true,
    documentation: "",
};

struct CancelsMidway {
    token: CancellationToken,
    produced: AtomicUsize,
}

impl Rule for CancelsMidway {
    fn descriptor(&self) -> &RuleDescriptor {
        &CANCELLING
    }

    fn check<'a>(&'a self, ctx: RuleContext<'a>) -> Violations<'a> {
        Box::new((0..).map_while(move |line| {
            if ctx.is_cancelled() {
                return None;
            }
            if self.produced.fetch_add(1, Ordering::SeqCst) == 3 {
                self.token.cancel();
            }
            Some(ctx.violation(line, 0, 0, "finding"))
        }))
    }
}

fn catalog_with(extra: Vec<Arc<dyn Rule>>) -> Arc<RuleCatalog> {
    let mut all = rules::builtin_rules();
    all.extend(extra);
    Arc::new(RuleCatalog::new(all).unwrap())
}

#[test]
fn panicking_check_is_isolated() {
    let resolver = ConfigurationResolver::new(
        Arc::new(StaticSettings::new()),
        Arc::new(InMemoryOptions::new()),
    );
    let l = Linter::new(catalog_with(vec![Arc::new(Panicky)]), resolver);

    let violations = lint(&l, "# Title\n\n### Skipped\n");
    assert_eq!(rule_lines(&violations, "MD001"), vec![2]);
    assert!(rule_lines(&violations, "MD900").is_empty());
}

#[test]
fn cancellation_returns_no_partial_results() {
    let token = CancellationToken::new();
    let rule = CancelsMidway {
        token: token.clone(),
        produced: AtomicUsize::new(0),
    };
    let resolver = ConfigurationResolver::new(
        Arc::new(StaticSettings::new()),
        Arc::new(InMemoryOptions::new()),
    );
    let l = Linter::new(catalog_with(vec![Arc::new(rule)]), resolver);

    let result = l.lint_text("# Title\n\n### Skipped\n", None, &token);
    assert!(matches!(result, Err(LinterError::Cancelled)));
}

#[test]
fn duplicate_registration_fails_fast() {
    let err = RuleCatalog::new(vec![
        Arc::new(rules::HeadingIncrement),
        Arc::new(rules::HeadingIncrement),
    ])
    .unwrap_err();
    assert!(matches!(err, LinterError::DuplicateRule(_)));
}

#[test]
fn settings_invalidation_reloads_source() {
    struct Flip(AtomicUsize);

    impl marklint_core::config::SettingsSource for Flip {
        fn load(
            &self,
            _path: &Path,
        ) -> Result<std::collections::HashMap<String, String>, LinterError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            let value = if n == 0 { "true" } else { "false" };
            Ok([("md_md010".to_string(), value.to_string())].into())
        }
    }

    let resolver = ConfigurationResolver::new(
        Arc::new(Flip(AtomicUsize::new(0))),
        Arc::new(InMemoryOptions::new()),
    );
    let l = Linter::new(RuleCatalog::builtin(), resolver);

    assert_eq!(rule_lines(&lint(&l, "a\tb\n"), "MD010"), vec![0]);
    assert_eq!(rule_lines(&lint(&l, "a\tb\n"), "MD010"), vec![0]);

    l.invalidate_settings();
    assert!(rule_lines(&lint(&l, "a\tb\n"), "MD010").is_empty());
}
