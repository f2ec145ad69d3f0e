//! Built-in checks.
//!
//! Every check is registered explicitly in [`builtin_rules`]; the order there
//! is the catalog order.

mod md001;
mod md003;
mod md009;
mod md010;
mod md012;
mod md013;
mod md018;
mod md047;

use std::sync::Arc;

use crate::rule::Rule;

pub use md001::HeadingIncrement;
pub use md003::HeadingStyleRule;
pub use md009::NoTrailingSpaces;
pub use md010::NoHardTabs;
pub use md012::NoMultipleBlanks;
pub use md013::LineLength;
pub use md018::NoMissingSpaceAtx;
pub use md047::SingleTrailingNewline;

/// Returns one instance of every built-in check, ordered by id.
pub fn builtin_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(HeadingIncrement),
        Arc::new(HeadingStyleRule),
        Arc::new(NoTrailingSpaces),
        Arc::new(NoHardTabs),
        Arc::new(NoMultipleBlanks),
        Arc::new(LineLength),
        Arc::new(NoMissingSpaceAtx),
        Arc::new(SingleTrailingNewline),
    ]
}
