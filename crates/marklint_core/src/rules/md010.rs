//! MD010: hard tabs.

use crate::catalog::RuleDescriptor;
use crate::diagnostic::Severity;
use crate::document::LineFilter;
use crate::rule::{Rule, RuleContext, Violations};

const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: "MD010",
    name: "no-hard-tabs",
    aliases: &[],
    description: "Hard tabs",
    default_severity: Severity::Warning,
    default_enabled: true,
    documentation: "https://github.com/DavidAnson/markdownlint/blob/main/doc/md010.md",
};

const DEFAULT_SPACES_PER_TAB: usize = 4;

pub struct NoHardTabs;

impl Rule for NoHardTabs {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn check<'a>(&'a self, ctx: RuleContext<'a>) -> Violations<'a> {
        let config = ctx.config;
        let filter = LineFilter {
            skip_code_blocks: config.parameter_flag("code_blocks") == Some(false),
            skip_front_matter: true,
        };
        let spaces_per_tab = config
            .parameter_as::<usize>("spaces_per_tab")
            .or(config.indent_size)
            .unwrap_or(DEFAULT_SPACES_PER_TAB);

        Box::new(ctx.document.lines(filter).filter_map(move |(line, text)| {
            let start = text.find('\t')?;
            let run = text[start..].bytes().take_while(|&b| b == b'\t').count();
            Some(
                ctx.violation(
                    line,
                    start,
                    start + run,
                    format!("{} [Column: {}]", DESCRIPTOR.description, start + 1),
                )
                .with_fix_hint(" ".repeat(spaces_per_tab * run)),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfiguration;
    use crate::rules::test_support::{lines, run, run_with};

    #[test]
    fn test_one_violation_per_line() {
        let violations = run(&NoHardTabs, "a\tb\tc\nclean\n\t\tindented\n");
        assert_eq!(lines(&violations), vec![0, 2]);
        assert_eq!(violations[0].column_start, 1);
        assert_eq!(violations[0].column_end, 2);
        assert_eq!(violations[1].column_end, 2);
        assert_eq!(violations[1].fix_hint.as_deref(), Some("        "));
    }

    #[test]
    fn test_code_blocks_included_by_default() {
        let text = "```\n\tcode\n```\n";
        assert_eq!(lines(&run(&NoHardTabs, text)), vec![1]);

        let mut config = RuleConfiguration::from_descriptor(&DESCRIPTOR);
        config
            .parameters
            .insert("code_blocks".to_string(), "false".to_string());
        assert!(run_with(&NoHardTabs, text, &config).is_empty());
    }

    #[test]
    fn test_front_matter_skipped() {
        assert!(run(&NoHardTabs, "---\nkey:\tvalue\n---\ntext\n").is_empty());
    }

    #[test]
    fn test_fix_hint_uses_indent_size() {
        let mut config = RuleConfiguration::from_descriptor(&DESCRIPTOR);
        config.indent_size = Some(2);
        let violations = run_with(&NoHardTabs, "x\ty\n", &config);
        assert_eq!(violations[0].fix_hint.as_deref(), Some("  "));

        config
            .parameters
            .insert("spaces_per_tab".to_string(), "3".to_string());
        let violations = run_with(&NoHardTabs, "x\ty\n", &config);
        assert_eq!(violations[0].fix_hint.as_deref(), Some("   "));
    }
}
