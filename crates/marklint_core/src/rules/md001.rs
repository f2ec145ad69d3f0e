//! MD001: heading levels increment by one at a time.

use crate::catalog::RuleDescriptor;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleContext, Violations};

const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: "MD001",
    name: "heading-increment",
    aliases: &["header-increment"],
    description: "Heading levels should only increment by one level at a time",
    default_severity: Severity::Warning,
    default_enabled: true,
    documentation: "https://github.com/DavidAnson/markdownlint/blob/main/doc/md001.md",
};

pub struct HeadingIncrement;

impl Rule for HeadingIncrement {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn check<'a>(&'a self, ctx: RuleContext<'a>) -> Violations<'a> {
        let headings = ctx.document.headings();
        Box::new(headings.windows(2).filter_map(move |pair| {
            let (previous, heading) = (&pair[0], &pair[1]);
            (heading.level > previous.level + 1).then(|| {
                let width = ctx.document.line_text(heading.line).len();
                ctx.violation(
                    heading.line,
                    0,
                    width,
                    format!(
                        "{} [Expected: h{}; Actual: h{}]",
                        DESCRIPTOR.description,
                        previous.level + 1,
                        heading.level
                    ),
                )
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{lines, run};

    #[test]
    fn test_skipped_level() {
        let violations = run(&HeadingIncrement, "# Title\n\n### Skipped Level\n");
        assert_eq!(lines(&violations), vec![2]);
        assert_eq!(violations[0].rule_id, "MD001");
        assert_eq!(violations[0].column_end, "### Skipped Level".len());
        assert!(violations[0].message.contains("Expected: h2; Actual: h3"));
    }

    #[test]
    fn test_sequential_and_decreasing_levels() {
        let text = "# A\n\n## B\n\n### C\n\n# D\n\n## E\n";
        assert!(run(&HeadingIncrement, text).is_empty());
    }

    #[test]
    fn test_first_heading_is_not_checked() {
        assert!(run(&HeadingIncrement, "### Start deep\n\n#### Next\n").is_empty());
    }

    #[test]
    fn test_setext_headings_count() {
        let text = "Title\n=====\n\n#### Deep\n";
        assert_eq!(lines(&run(&HeadingIncrement, text)), vec![3]);
    }

    #[test]
    fn test_heading_in_code_block_ignored() {
        let text = "# A\n\n```\n### not a heading\n```\n";
        assert!(run(&HeadingIncrement, text).is_empty());
    }
}
