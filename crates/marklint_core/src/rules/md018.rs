//! MD018: missing space after hash on ATX heading.

use crate::catalog::RuleDescriptor;
use crate::diagnostic::Severity;
use crate::document::LineFilter;
use crate::rule::{Rule, RuleContext, Violations};

const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: "MD018",
    name: "no-missing-space-atx",
    aliases: &[],
    description: "No space after hash on atx style heading",
    default_severity: Severity::Warning,
    default_enabled: true,
    documentation: "https://github.com/DavidAnson/markdownlint/blob/main/doc/md018.md",
};

pub struct NoMissingSpaceAtx;

impl NoMissingSpaceAtx {
    /// Returns the byte range of the hashes if the line looks like `#Heading`.
    fn missing_space(text: &str) -> Option<(usize, usize)> {
        let indent = text.len() - text.trim_start_matches(' ').len();
        if indent > 3 {
            return None;
        }
        let rest = &text[indent..];
        let hashes = rest.bytes().take_while(|&b| b == b'#').count();
        if hashes == 0 || hashes > 6 {
            return None;
        }
        let next = rest[hashes..].chars().next()?;
        if next.is_whitespace() || next == '!' {
            return None;
        }
        Some((indent, indent + hashes))
    }
}

impl Rule for NoMissingSpaceAtx {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn check<'a>(&'a self, ctx: RuleContext<'a>) -> Violations<'a> {
        let document = ctx.document;
        Box::new(
            document
                .lines(LineFilter::CONTENT)
                .filter(move |&(line, _)| !document.is_html_block_line(line))
                .filter_map(move |(line, text)| {
                    let (start, end) = Self::missing_space(text)?;
                    Some(
                        ctx.violation(line, start, end, DESCRIPTOR.description)
                            .with_fix_hint(format!("{} ", &text[start..end])),
                    )
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{lines, run};
    use rstest::rstest;

    #[rstest]
    #[case("#Heading", Some((0, 1)))]
    #[case("###Heading", Some((0, 3)))]
    #[case("   ##Indented", Some((3, 5)))]
    #[case("# Heading", None)]
    #[case("#", None)]
    #[case("#######Seven", None)]
    #[case("    #Code", None)]
    #[case("#!/bin/sh", None)]
    #[case("Text #tag", None)]
    fn test_missing_space(#[case] text: &str, #[case] expected: Option<(usize, usize)>) {
        assert_eq!(NoMissingSpaceAtx::missing_space(text), expected);
    }

    #[test]
    fn test_check() {
        let violations = run(&NoMissingSpaceAtx, "#Title\n\n## Fine\n\n```\n#comment\n```\n");
        assert_eq!(lines(&violations), vec![0]);
        assert_eq!(violations[0].fix_hint.as_deref(), Some("# "));
    }
}
