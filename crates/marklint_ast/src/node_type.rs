//! Node type definitions.

use serde::{Deserialize, Serialize};

/// Node types produced by the parser.
///
/// Block-level types are the ones the document model builder cares about;
/// inline types are kept so the tree stays a faithful picture of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub enum NodeType {
    /// Root document node.
    Document,

    // Block elements
    Paragraph,
    /// ATX or setext heading (H1-H6).
    Heading,
    BlockQuote,
    /// Ordered or unordered list.
    List,
    ListItem,
    /// Fenced or indented code block.
    CodeBlock,
    /// Raw HTML at block level (including HTML comments).
    HtmlBlock,
    ThematicBreak,
    /// YAML or TOML front matter.
    FrontMatter,
    Table,
    TableRow,
    TableCell,
    Definition,
    FootnoteDefinition,
    /// Display math block.
    Math,

    // Inline elements
    Text,
    Break,
    Emphasis,
    Strong,
    Delete,
    InlineCode,
    /// Raw HTML inside a paragraph or other inline container.
    InlineHtml,
    Link,
    Image,
    LinkReference,
    ImageReference,
    FootnoteReference,
}

impl NodeType {
    /// Returns true for block-level node types.
    pub const fn is_block(&self) -> bool {
        matches!(
            self,
            NodeType::Document
                | NodeType::Paragraph
                | NodeType::Heading
                | NodeType::BlockQuote
                | NodeType::List
                | NodeType::ListItem
                | NodeType::CodeBlock
                | NodeType::HtmlBlock
                | NodeType::ThematicBreak
                | NodeType::FrontMatter
                | NodeType::Table
                | NodeType::TableRow
                | NodeType::TableCell
                | NodeType::Definition
                | NodeType::FootnoteDefinition
                | NodeType::Math
        )
    }

    /// Returns true if children of this node are inline content.
    pub const fn has_inline_children(&self) -> bool {
        matches!(
            self,
            NodeType::Paragraph
                | NodeType::Heading
                | NodeType::TableCell
                | NodeType::Emphasis
                | NodeType::Strong
                | NodeType::Delete
                | NodeType::Link
                | NodeType::LinkReference
        )
    }
}
