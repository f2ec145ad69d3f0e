//! MD009: trailing spaces.

use crate::catalog::RuleDescriptor;
use crate::diagnostic::Severity;
use crate::document::LineFilter;
use crate::rule::{Rule, RuleContext, Violations};

const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: "MD009",
    name: "no-trailing-spaces",
    aliases: &[],
    description: "Trailing spaces",
    default_severity: Severity::Warning,
    default_enabled: true,
    documentation: "https://github.com/DavidAnson/markdownlint/blob/main/doc/md009.md",
};

const DEFAULT_BR_SPACES: usize = 2;

pub struct NoTrailingSpaces;

impl Rule for NoTrailingSpaces {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn check<'a>(&'a self, ctx: RuleContext<'a>) -> Violations<'a> {
        let br_spaces = ctx
            .config
            .parameter_as::<usize>("br_spaces")
            .unwrap_or(DEFAULT_BR_SPACES);
        let document = ctx.document;

        Box::new(
            document
                .lines(LineFilter::CONTENT)
                .filter_map(move |(line, text)| {
                    let content_len = text.trim_end_matches(' ').len();
                    let trailing = text.len() - content_len;
                    if trailing == 0 {
                        return None;
                    }
                    // Exactly `br_spaces` after content is a hard line break.
                    let is_break = br_spaces >= 2
                        && trailing == br_spaces
                        && content_len > 0
                        && !document.is_blank_line(line + 1);
                    if is_break {
                        return None;
                    }
                    let expected = if br_spaces >= 2 {
                        format!("0 or {}", br_spaces)
                    } else {
                        "0".to_string()
                    };
                    Some(
                        ctx.violation(
                            line,
                            content_len,
                            text.len(),
                            format!(
                                "{} [Expected: {}; Actual: {}]",
                                DESCRIPTOR.description, expected, trailing
                            ),
                        )
                        .with_fix_hint(""),
                    )
                }),
        )
    }
}
