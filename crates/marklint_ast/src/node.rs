//! TxtNode definition.

use crate::{NodeType, Span};

/// A node in the block tree.
///
/// Allocated in an [`AstArena`](crate::AstArena); the `'a` lifetime ties
/// children and string data to that arena.
///
/// # Example
///
/// ```rust
/// use marklint_ast::{AstArena, TxtNode, NodeType, Span};
///
/// let arena = AstArena::new();
///
/// let text_node = arena.alloc(TxtNode::new_text(
///     NodeType::Text,
///     Span::new(0, 5),
///     "Hello",
/// ));
///
/// let children = arena.alloc_slice_copy(&[*text_node]);
/// let paragraph = TxtNode::new_parent(
///     NodeType::Paragraph,
///     Span::new(0, 5),
///     children,
/// );
/// assert!(paragraph.has_children());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TxtNode<'a> {
    /// The type of this node.
    pub node_type: NodeType,

    /// Byte span in the source text.
    pub span: Span,

    /// Child nodes (for parent nodes).
    pub children: &'a [TxtNode<'a>],

    /// Text value (for text-like nodes such as code blocks and HTML).
    pub value: Option<&'a str>,

    /// Additional node-specific data.
    pub data: NodeData,
}

/// Per-type node data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeData {
    #[default]
    None,
    /// Heading depth, 1 to 6.
    Heading(u8),
}

impl<'a> TxtNode<'a> {
    /// Creates a new parent node with children.
    #[inline]
    pub const fn new_parent(node_type: NodeType, span: Span, children: &'a [TxtNode<'a>]) -> Self {
        Self {
            node_type,
            span,
            children,
            value: None,
            data: NodeData::None,
        }
    }

    /// Creates a new text node with a value.
    #[inline]
    pub const fn new_text(node_type: NodeType, span: Span, value: &'a str) -> Self {
        Self {
            node_type,
            span,
            children: &[],
            value: Some(value),
            data: NodeData::None,
        }
    }

    /// Creates a new leaf node (no children, no value).
    #[inline]
    pub const fn new_leaf(node_type: NodeType, span: Span) -> Self {
        Self {
            node_type,
            span,
            children: &[],
            value: None,
            data: NodeData::None,
        }
    }

    /// Returns true if this node has children.
    #[inline]
    pub const fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the heading depth, if this is a heading.
    #[inline]
    pub const fn depth(&self) -> Option<u8> {
        match self.data {
            NodeData::Heading(depth) => Some(depth),
            _ => None,
        }
    }
}

impl NodeData {
    /// Creates node data for a heading.
    #[inline]
    pub const fn heading(depth: u8) -> Self {
        Self::Heading(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AstArena;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(NodeData::heading(2), Some(2))]
    #[case(NodeData::None, None)]
    fn test_depth(#[case] data: NodeData, #[case] expected: Option<u8>) {
        let mut node = TxtNode::new_leaf(NodeType::Heading, Span::new(0, 7));
        node.data = data;
        assert_eq!(node.depth(), expected);
    }

    #[test]
    fn test_text_node() {
        let node = TxtNode::new_text(NodeType::CodeBlock, Span::new(0, 20), "fn main() {}");
        assert_eq!(node.value, Some("fn main() {}"));
        assert_eq!(node.data, NodeData::None);
        assert!(!node.has_children());
    }

    #[test]
    fn test_parent_node() {
        let arena = AstArena::new();
        let text = arena.alloc(TxtNode::new_text(NodeType::Text, Span::new(0, 2), "hi"));
        let children = arena.alloc_slice_copy(&[*text]);
        let para = TxtNode::new_parent(NodeType::Paragraph, Span::new(0, 2), children);
        assert!(para.has_children());
        assert_eq!(para.children[0].value, Some("hi"));
    }
}
