//! MD047: files end with a single newline.

use std::iter;

use crate::catalog::RuleDescriptor;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleContext, Violations};

const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: "MD047",
    name: "single-trailing-newline",
    aliases: &[],
    description: "Files should end with a single newline character",
    default_severity: Severity::Warning,
    default_enabled: true,
    documentation: "https://github.com/DavidAnson/markdownlint/blob/main/doc/md047.md",
};

pub struct SingleTrailingNewline;

impl Rule for SingleTrailingNewline {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn check<'a>(&'a self, ctx: RuleContext<'a>) -> Violations<'a> {
        let document = ctx.document;
        if document.text().is_empty() || document.trailing_newline_count() > 0 {
            return Box::new(iter::empty());
        }

        let line = document.line_count() - 1;
        let end = document.line_text(line).len();
        Box::new(iter::once(
            ctx.violation(line, end, end, DESCRIPTOR.description)
                .with_fix_hint("\n"),
        ))
    }
}
