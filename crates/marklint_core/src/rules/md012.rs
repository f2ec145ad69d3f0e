//! MD012: multiple consecutive blank lines.

use crate::catalog::RuleDescriptor;
use crate::diagnostic::Severity;
use crate::document::LineFilter;
use crate::rule::{Rule, RuleContext, Violations};

const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: "MD012",
    name: "no-multiple-blanks",
    aliases: &[],
    description: "Multiple consecutive blank lines",
    default_severity: Severity::Warning,
    default_enabled: true,
    documentation: "https://github.com/DavidAnson/markdownlint/blob/main/doc/md012.md",
};

pub struct NoMultipleBlanks;

impl Rule for NoMultipleBlanks {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn check<'a>(&'a self, ctx: RuleContext<'a>) -> Violations<'a> {
        let maximum = ctx.config.parameter_as::<usize>("maximum").unwrap_or(1);
        let document = ctx.document;

        Box::new(
            document
                .lines(LineFilter::ALL)
                .scan(0usize, move |run, (line, text)| {
                    let skipped =
                        document.is_code_block_line(line) || document.is_front_matter_line(line);
                    *run = if !skipped && text.trim().is_empty() {
                        *run + 1
                    } else {
                        0
                    };
                    Some((line, *run))
                })
                .filter(move |&(_, run)| run > maximum)
                .map(move |(line, run)| {
                    ctx.violation(
                        line,
                        0,
                        document.line_text(line).len(),
                        format!(
                            "{} [Expected: {}; Actual: {}]",
                            DESCRIPTOR.description, maximum, run
                        ),
                    )
                    .with_fix_hint("")
                }),
        )
    }
}
