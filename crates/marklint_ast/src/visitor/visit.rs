//! Visitor trait for traversing block tree nodes.

use std::ops::ControlFlow;

use crate::TxtNode;

use super::walk::walk_children;

/// Result type for visitor methods to control traversal.
///
/// - `ControlFlow::Continue(())` - continue visiting
/// - `ControlFlow::Break(())` - stop traversal early
pub type VisitResult = ControlFlow<()>;

/// Visitor trait for traversing nodes without modification.
///
/// Every `visit_*` method defaults to walking the node's children, so an
/// implementation only overrides the node types it cares about.
pub trait Visitor<'a>: Sized {
    /// Called before visiting any node.
    #[inline]
    fn enter_node(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after visiting a node and all its children.
    #[inline]
    fn exit_node(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_heading(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_code_block(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_html_block(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_front_matter(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    /// Fallback for every node type without a dedicated method.
    fn visit_other(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }
}
