//! # marklint_ast
//!
//! Block tree definitions for marklint.
//!
//! The tree is produced by a parser collaborator (see `marklint_parser`) and
//! consumed once by the document model builder in `marklint_core`. Nodes only
//! carry byte spans into the source text plus a small amount of per-type data;
//! everything line-oriented is derived later from the raw text.
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for arena allocation
//! - All nodes of one parse live in a single arena and are freed together
//! - Nodes are `Copy` and hold `&'a` references into the arena
//!
//! ## Example
//!
//! ```rust
//! use marklint_ast::{AstArena, TxtNode, NodeType, Span};
//!
//! let arena = AstArena::new();
//!
//! let node = arena.alloc(TxtNode::new_parent(
//!     NodeType::Document,
//!     Span::new(0, 100),
//!     &[],
//! ));
//! assert!(!node.has_children());
//! ```

mod arena;
mod node;
mod node_type;
mod span;
pub mod visitor;

pub use arena::AstArena;
pub use node::{NodeData, TxtNode};
pub use node_type::NodeType;
pub use span::{Position, Span};

pub use visitor::{VisitResult, Visitor};
