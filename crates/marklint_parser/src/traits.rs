//! Parser trait definition.

use marklint_ast::{AstArena, TxtNode};

use crate::ParseError;

/// Trait for parsing source text into a block tree.
///
/// Implementations must produce spans that index into the exact `source`
/// they were given; the document model derives line ranges from them.
pub trait Parser: Send + Sync {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles, without the leading dot.
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a tree allocated in `arena`.
    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<TxtNode<'a>, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
