//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! Converts mdast into the arena-backed block tree. Raw HTML is split into
//! `HtmlBlock` and `InlineHtml` depending on whether it sits in a block
//! container or inside inline content.

use markdown::mdast::Node;
use markdown::{ParseOptions, to_mdast};
use marklint_ast::{AstArena, NodeData, NodeType, Span, TxtNode};

use crate::{ParseError, Parser};

/// Markdown parser implementation.
///
/// Supports CommonMark, GFM (tables, strikethrough, footnotes, autolinks)
/// and YAML/TOML front matter.
pub struct MarkdownParser;

impl MarkdownParser {
    /// Creates a new Markdown parser.
    pub fn new() -> Self {
        Self
    }

    fn default_options() -> ParseOptions {
        let mut options = ParseOptions::gfm();
        options.constructs.frontmatter = true;
        options
    }

    fn convert_node<'a>(&self, arena: &'a AstArena, node: &Node, inline: bool) -> TxtNode<'a> {
        match node {
            Node::Root(root) => self.parent(arena, node, &root.children, NodeType::Document),
            Node::Paragraph(para) => self.parent(arena, node, &para.children, NodeType::Paragraph),
            Node::Heading(heading) => {
                let mut out = self.parent(arena, node, &heading.children, NodeType::Heading);
                out.data = NodeData::heading(heading.depth);
                out
            }
            Node::Blockquote(quote) => {
                self.parent(arena, node, &quote.children, NodeType::BlockQuote)
            }
            Node::List(list) => self.parent(arena, node, &list.children, NodeType::List),
            Node::ListItem(item) => self.parent(arena, node, &item.children, NodeType::ListItem),
            Node::Code(code) => self.text(arena, node, &code.value, NodeType::CodeBlock),
            Node::Math(math) => self.text(arena, node, &math.value, NodeType::Math),
            Node::Html(html) => {
                let node_type = if inline {
                    NodeType::InlineHtml
                } else {
                    NodeType::HtmlBlock
                };
                self.text(arena, node, &html.value, node_type)
            }
            Node::Yaml(yaml) => self.text(arena, node, &yaml.value, NodeType::FrontMatter),
            Node::Toml(toml) => self.text(arena, node, &toml.value, NodeType::FrontMatter),
            Node::ThematicBreak(_) => self.leaf(node, NodeType::ThematicBreak),
            Node::Table(table) => self.parent(arena, node, &table.children, NodeType::Table),
            Node::TableRow(row) => self.parent(arena, node, &row.children, NodeType::TableRow),
            Node::TableCell(cell) => self.parent(arena, node, &cell.children, NodeType::TableCell),
            Node::Definition(_) => self.leaf(node, NodeType::Definition),
            Node::FootnoteDefinition(def) => {
                self.parent(arena, node, &def.children, NodeType::FootnoteDefinition)
            }

            Node::Text(text) => self.text(arena, node, &text.value, NodeType::Text),
            Node::Break(_) => self.leaf(node, NodeType::Break),
            Node::Emphasis(em) => self.parent(arena, node, &em.children, NodeType::Emphasis),
            Node::Strong(strong) => self.parent(arena, node, &strong.children, NodeType::Strong),
            Node::Delete(del) => self.parent(arena, node, &del.children, NodeType::Delete),
            Node::InlineCode(code) => self.text(arena, node, &code.value, NodeType::InlineCode),
            Node::Link(link) => self.parent(arena, node, &link.children, NodeType::Link),
            Node::Image(_) => self.leaf(node, NodeType::Image),
            Node::LinkReference(reference) => {
                self.parent(arena, node, &reference.children, NodeType::LinkReference)
            }
            Node::ImageReference(_) => self.leaf(node, NodeType::ImageReference),
            Node::FootnoteReference(_) => self.leaf(node, NodeType::FootnoteReference),

            // MDX and other extension nodes are opaque to the linter.
            _ if inline => self.leaf(node, NodeType::InlineHtml),
            _ => self.leaf(node, NodeType::HtmlBlock),
        }
    }

    fn parent<'a>(
        &self,
        arena: &'a AstArena,
        node: &Node,
        children: &[Node],
        node_type: NodeType,
    ) -> TxtNode<'a> {
        let inline = node_type.has_inline_children();
        let children = arena.alloc_slice_fill_iter(
            children
                .iter()
                .map(|child| self.convert_node(arena, child, inline)),
        );
        TxtNode::new_parent(node_type, Self::node_span(node), children)
    }

    fn text<'a>(
        &self,
        arena: &'a AstArena,
        node: &Node,
        value: &str,
        node_type: NodeType,
    ) -> TxtNode<'a> {
        TxtNode::new_text(node_type, Self::node_span(node), arena.alloc_str(value))
    }

    fn leaf<'a>(&self, node: &Node, node_type: NodeType) -> TxtNode<'a> {
        TxtNode::new_leaf(node_type, Self::node_span(node))
    }

    fn node_span(node: &Node) -> Span {
        match node.position() {
            Some(pos) => Span::new(pos.start.offset as u32, pos.end.offset as u32),
            None => Span::new(0, 0),
        }
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<TxtNode<'a>, ParseError> {
        let options = Self::default_options();
        let mdast = to_mdast(source, &options).map_err(ParseError::from)?;

        Ok(self.convert_node(arena, &mdast, false))
    }
}
