//! MD003: consistent heading style.

use crate::catalog::RuleDescriptor;
use crate::diagnostic::Severity;
use crate::document::{HeadingInfo, HeadingStyle};
use crate::rule::{Rule, RuleContext, Violations};

const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: "MD003",
    name: "heading-style",
    aliases: &["header-style"],
    description: "Heading style",
    default_severity: Severity::Warning,
    default_enabled: true,
    documentation: "https://github.com/DavidAnson/markdownlint/blob/main/doc/md003.md",
};

/// Accepted values for the rule setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expected {
    Consistent,
    Style(HeadingStyle),
    /// Setext for levels 1-2, the given ATX style below.
    SetextWith(HeadingStyle),
}

impl Expected {
    fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("atx") => Self::Style(HeadingStyle::Atx),
            Some("atx_closed") => Self::Style(HeadingStyle::AtxClosed),
            Some("setext") => Self::Style(HeadingStyle::Setext),
            Some("setext_with_atx") => Self::SetextWith(HeadingStyle::Atx),
            Some("setext_with_atx_closed") => Self::SetextWith(HeadingStyle::AtxClosed),
            _ => Self::Consistent,
        }
    }
}

fn style_name(style: HeadingStyle) -> &'static str {
    match style {
        HeadingStyle::Atx => "atx",
        HeadingStyle::AtxClosed => "atx_closed",
        HeadingStyle::Setext => "setext",
    }
}

pub struct HeadingStyleRule;

impl HeadingStyleRule {
    fn expected_for(expected: Expected, first: Option<&HeadingInfo>, heading: &HeadingInfo) -> HeadingStyle {
        match expected {
            Expected::Style(style) => style,
            Expected::Consistent => first.map_or(heading.style, |h| h.style),
            // Setext can only express levels 1 and 2.
            Expected::SetextWith(atx) if heading.level > 2 => atx,
            Expected::SetextWith(_) => HeadingStyle::Setext,
        }
    }
}

impl Rule for HeadingStyleRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn check<'a>(&'a self, ctx: RuleContext<'a>) -> Violations<'a> {
        let expected = Expected::parse(ctx.config.value.as_deref());
        let headings = ctx.document.headings();
        let first = headings.first();

        Box::new(headings.iter().filter_map(move |heading| {
            let mut want = Self::expected_for(expected, first, heading);
            if want == HeadingStyle::Setext && heading.level > 2 {
                // A consistent setext document may still use ATX for deep levels.
                want = heading.style;
            }
            (heading.style != want).then(|| {
                let width = ctx.document.line_text(heading.line).len();
                ctx.violation(
                    heading.line,
                    0,
                    width,
                    format!(
                        "{} [Expected: {}; Actual: {}]",
                        DESCRIPTOR.description,
                        style_name(want),
                        style_name(heading.style)
                    ),
                )
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfiguration;
    use crate::rules::test_support::{lines, run, run_with};
    use rstest::rstest;

    fn with_value(value: &str) -> RuleConfiguration {
        let mut config = RuleConfiguration::from_descriptor(&DESCRIPTOR);
        config.value = Some(value.to_string());
        config
    }

    const MIXED: &str = "# Atx\n\nSetext\n------\n\n## Closed ##\n";

    #[test]
    fn test_consistent_uses_first_heading() {
        let violations = run(&HeadingStyleRule, MIXED);
        assert_eq!(lines(&violations), vec![2, 5]);
        assert!(violations[0].message.contains("Expected: atx; Actual: setext"));
    }

    #[test]
    fn test_headings_in_containers_keep_their_style() {
        let violations = run(&HeadingStyleRule, "# A\n\n> ## B\n\n- ### C\n");
        assert!(violations.is_empty());
    }

    #[rstest]
    #[case("atx", vec![2, 5])]
    #[case("atx_closed", vec![0, 2])]
    #[case("setext", vec![0, 5])]
    #[case("ATX", vec![2, 5])]
    fn test_explicit_style(#[case] value: &str, #[case] expected: Vec<usize>) {
        let violations = run_with(&HeadingStyleRule, MIXED, &with_value(value));
        assert_eq!(lines(&violations), expected);
    }

    #[test]
    fn test_setext_with_atx() {
        let text = "Title\n=====\n\n### Deep\n\n## Shallow atx\n";
        let violations = run_with(&HeadingStyleRule, text, &with_value("setext_with_atx"));
        assert_eq!(lines(&violations), vec![5]);
    }

    #[test]
    fn test_deep_headings_allowed_in_setext_document() {
        let text = "Title\n=====\n\n### Deep\n";
        assert!(run(&HeadingStyleRule, text).is_empty());
    }

    #[test]
    fn test_unknown_value_means_consistent() {
        let violations = run_with(&HeadingStyleRule, MIXED, &with_value("fancy"));
        assert_eq!(lines(&violations), vec![2, 5]);
    }
}
