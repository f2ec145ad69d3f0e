//! MD013: line length.

use crate::catalog::RuleDescriptor;
use crate::diagnostic::Severity;
use crate::document::LineFilter;
use crate::rule::{Rule, RuleContext, Violations};

const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: "MD013",
    name: "line-length",
    aliases: &[],
    description: "Line length",
    default_severity: Severity::Warning,
    default_enabled: false,
    documentation: "https://github.com/DavidAnson/markdownlint/blob/main/doc/md013.md",
};

const DEFAULT_LINE_LENGTH: usize = 80;

pub struct LineLength;

impl Rule for LineLength {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn check<'a>(&'a self, ctx: RuleContext<'a>) -> Violations<'a> {
        let limit = ctx
            .config
            .parameter_as::<usize>("line_length")
            .unwrap_or(DEFAULT_LINE_LENGTH);

        Box::new(
            ctx.document
                .lines(LineFilter::CONTENT)
                .filter_map(move |(line, text)| {
                    let length = text.chars().count();
                    if length <= limit {
                        return None;
                    }
                    let (overflow_start, _) = text.char_indices().nth(limit)?;
                    // Long words or URLs that cannot wrap are tolerated.
                    if !text[overflow_start..].contains(char::is_whitespace) {
                        return None;
                    }
                    Some(ctx.violation(
                        line,
                        overflow_start,
                        text.len(),
                        format!(
                            "{} [Expected: {}; Actual: {}]",
                            DESCRIPTOR.description, limit, length
                        ),
                    ))
                }),
        )
    }
}
