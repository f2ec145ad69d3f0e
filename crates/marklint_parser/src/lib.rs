//! # marklint_parser
//!
//! Parser abstraction layer for marklint.
//!
//! This crate provides:
//! - A `Parser` trait for plugging in a block tree producer
//! - A built-in Markdown parser using `markdown-rs` (GFM and front matter)
//!
//! The linter never implements CommonMark itself; it consumes the tree a
//! `Parser` hands back together with the raw text.
//!
//! ## Example
//!
//! ```rust
//! use marklint_parser::{MarkdownParser, Parser};
//! use marklint_ast::AstArena;
//!
//! let arena = AstArena::new();
//! let parser = MarkdownParser::new();
//! let ast = parser.parse(&arena, "# Hello\n\nThis is a paragraph.").unwrap();
//! assert_eq!(ast.children.len(), 2);
//! ```

mod error;
mod markdown;
mod traits;

pub use error::ParseError;
pub use markdown::MarkdownParser;
pub use traits::Parser;
