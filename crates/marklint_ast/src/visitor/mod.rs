//! Visitor pattern for block tree traversal.
//!
//! - [`Visitor`] - Read-only traversal trait
//! - [`walk_node`] - Dispatch function for type-specific visitors
//! - [`walk_children`] - Traverse all children of a node
//!
//! # Example
//!
//! ```rust
//! use marklint_ast::{TxtNode, NodeType, Span, AstArena};
//! use marklint_ast::visitor::{Visitor, VisitResult, walk_node};
//! use std::ops::ControlFlow;
//!
//! struct CodeCounter {
//!     count: usize,
//! }
//!
//! impl<'a> Visitor<'a> for CodeCounter {
//!     fn visit_code_block(&mut self, _node: &TxtNode<'a>) -> VisitResult {
//!         self.count += 1;
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let arena = AstArena::new();
//! let code = arena.alloc(TxtNode::new_text(NodeType::CodeBlock, Span::new(0, 9), "x"));
//! let children = arena.alloc_slice_copy(&[*code]);
//! let doc = TxtNode::new_parent(NodeType::Document, Span::new(0, 9), children);
//!
//! let mut counter = CodeCounter { count: 0 };
//! let _ = walk_node(&mut counter, &doc);
//! assert_eq!(counter.count, 1);
//! ```

mod visit;
mod walk;

pub use visit::{VisitResult, Visitor};
pub use walk::{walk_children, walk_node};
