//! Walk functions for tree traversal.

use std::ops::ControlFlow;

use crate::{NodeType, TxtNode};

use super::visit::{VisitResult, Visitor};

/// Walks a node by dispatching to the appropriate type-specific visitor method.
///
/// Calls `enter_node`, the `visit_*` method for the node type, then
/// `exit_node`. A `Break` from any of them stops the walk.
pub fn walk_node<'a, V>(visitor: &mut V, node: &TxtNode<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    visitor.enter_node(node)?;

    match node.node_type {
        NodeType::Heading => visitor.visit_heading(node),
        NodeType::CodeBlock => visitor.visit_code_block(node),
        NodeType::HtmlBlock => visitor.visit_html_block(node),
        NodeType::FrontMatter => visitor.visit_front_matter(node),
        _ => visitor.visit_other(node),
    }?;

    visitor.exit_node(node)
}

/// Walks all children of a node, stopping early on `Break`.
#[inline]
pub fn walk_children<'a, V>(visitor: &mut V, node: &TxtNode<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    for child in node.children {
        walk_node(visitor, child)?;
    }
    ControlFlow::Continue(())
}
