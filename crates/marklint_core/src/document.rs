//! Document model for linting.
//!
//! A [`Document`] is built once per analysis from the raw text and the block
//! tree handed back by a [`Parser`]. Everything a rule needs to ask about
//! lines is precomputed here so rules never re-parse.

use std::collections::HashSet;
use std::ops::{ControlFlow, RangeInclusive};

use marklint_ast::visitor::{VisitResult, Visitor, walk_children, walk_node};
use marklint_ast::{AstArena, NodeType, Position, TxtNode};
use marklint_parser::{MarkdownParser, Parser};
use tracing::warn;

/// Pre-computed metadata for a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    /// Byte offset of line start (inclusive).
    pub start: usize,
    /// Byte offset of end of line content, excluding `\r` and `\n`.
    pub end: usize,
    /// Indentation level in spaces (tabs advance to the next multiple of 4).
    pub indent: usize,
    /// Byte length of leading whitespace.
    pub indent_bytes: usize,
    /// Whether this line contains only whitespace.
    pub is_blank: bool,
}

impl LineInfo {
    /// Creates a new LineInfo from a line's content (terminator already stripped).
    pub fn from_line(start: usize, line_text: &str) -> Self {
        let end = start + line_text.len();
        let is_blank = line_text.trim().is_empty();
        let (indent, indent_bytes) = if is_blank {
            (0, 0)
        } else {
            let leading_len = line_text.len() - line_text.trim_start().len();
            let visual = line_text[..leading_len].chars().fold(0usize, |acc, c| {
                if c == '\t' {
                    (acc + 4) / 4 * 4
                } else {
                    acc + 1
                }
            });
            (visual, leading_len)
        };

        Self {
            start,
            end,
            indent,
            indent_bytes,
            is_blank,
        }
    }
}

/// Heading syntax variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    /// `# Heading`
    Atx,
    /// `# Heading #`
    AtxClosed,
    /// `Heading` underlined with `===` or `---`
    Setext,
}

/// Information about a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingInfo {
    /// First line of the heading (0-indexed).
    pub line: usize,
    /// Heading level (1-6).
    pub level: u8,
    /// Syntax used to write the heading.
    pub style: HeadingStyle,
    /// Heading text content.
    pub text: String,
}

/// Which lines a [`Lines`] iterator yields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineFilter {
    /// Skip lines inside fenced or indented code blocks.
    pub skip_code_blocks: bool,
    /// Skip lines inside front matter.
    pub skip_front_matter: bool,
}

impl LineFilter {
    /// Yields every line.
    pub const ALL: Self = Self {
        skip_code_blocks: false,
        skip_front_matter: false,
    };

    /// Skips code blocks and front matter.
    pub const CONTENT: Self = Self {
        skip_code_blocks: true,
        skip_front_matter: true,
    };
}

/// Immutable, offset-indexed document model.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    lines: Vec<LineInfo>,
    code_block_lines: HashSet<usize>,
    html_block_lines: HashSet<usize>,
    front_matter: Option<RangeInclusive<usize>>,
    headings: Vec<HeadingInfo>,
}

impl Document {
    /// Builds a document using the built-in Markdown parser.
    ///
    /// Parser failures are logged and leave the tree-derived caches empty;
    /// the line index is always available.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_parser(text, &MarkdownParser::new())
    }

    /// Builds a document using the given parser collaborator.
    pub fn with_parser(text: impl Into<String>, parser: &dyn Parser) -> Self {
        let mut doc = Self::from_text(text.into());
        let arena = AstArena::with_capacity(doc.text.len() * 2);
        match parser.parse(&arena, &doc.text) {
            Ok(root) => doc.apply_tree(&root),
            Err(e) => warn!("Failed to parse document with '{}': {}", parser.name(), e),
        }
        doc
    }

    /// Builds a document from raw text and an already parsed block tree.
    ///
    /// The tree's spans must index into `text`.
    pub fn from_tree(text: impl Into<String>, root: &TxtNode<'_>) -> Self {
        let mut doc = Self::from_text(text.into());
        doc.apply_tree(root);
        doc
    }

    /// Builds the line index and front matter range; tree-derived sets stay empty.
    fn from_text(text: String) -> Self {
        let lines = Self::compute_lines(&text);
        let mut doc = Self {
            text,
            lines,
            code_block_lines: HashSet::new(),
            html_block_lines: HashSet::new(),
            front_matter: None,
            headings: Vec::new(),
        };
        doc.front_matter = doc.detect_front_matter();
        doc
    }

    /// Splits on `\n`, stripping one trailing `\r` per line.
    ///
    /// Always yields at least one line; text ending in a terminator yields a
    /// trailing empty line.
    fn compute_lines(text: &str) -> Vec<LineInfo> {
        let mut lines = Vec::new();
        let mut offset = 0usize;
        for raw in text.split('\n') {
            let content = raw.strip_suffix('\r').unwrap_or(raw);
            lines.push(LineInfo::from_line(offset, content));
            offset += raw.len() + 1;
        }
        lines
    }

    fn detect_front_matter(&self) -> Option<RangeInclusive<usize>> {
        if self.line_text(0) != "---" {
            return None;
        }
        (1..self.lines.len())
            .find(|&i| matches!(self.line_text(i), "---" | "..."))
            .map(|end| 0..=end)
    }

    fn apply_tree(&mut self, root: &TxtNode<'_>) {
        let mut collector = BlockCollector {
            doc: self,
            code: HashSet::new(),
            html: HashSet::new(),
            headings: Vec::new(),
        };
        let _ = walk_node(&mut collector, root);
        let BlockCollector {
            code,
            html,
            headings,
            ..
        } = collector;
        self.code_block_lines = code;
        self.html_block_lines = html;
        self.headings = headings;
    }

    /// Returns the raw source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the number of lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns line metadata, if the line exists.
    pub fn line_info(&self, line: usize) -> Option<&LineInfo> {
        self.lines.get(line)
    }

    /// Returns the text of a line without its terminator.
    ///
    /// Out-of-range lines yield an empty string.
    pub fn line_text(&self, line: usize) -> &str {
        match self.lines.get(line) {
            Some(info) => &self.text[info.start..info.end],
            None => "",
        }
    }

    /// Returns the byte offset at which each line starts.
    pub fn line_starts(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.iter().map(|info| info.start)
    }

    /// Converts a byte offset to the line containing it.
    ///
    /// Offsets past the end of the text resolve to the last line.
    pub fn offset_to_line(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        self.lines
            .partition_point(|info| info.start <= offset)
            .saturating_sub(1)
    }

    /// Converts a byte offset to a 0-indexed line/column position.
    ///
    /// Offsets past the end of the text are clamped to the end.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = self.offset_to_line(offset);
        Position::new(line, offset - self.lines[line].start)
    }

    /// Converts a line/column position back to a byte offset.
    ///
    /// Lines past the end are clamped to the last line and the result never
    /// exceeds the text length.
    pub fn position_to_offset(&self, position: Position) -> usize {
        let line = position.line.min(self.lines.len() - 1);
        (self.lines[line].start + position.column).min(self.text.len())
    }

    /// Returns true if the line is inside a fenced or indented code block.
    pub fn is_code_block_line(&self, line: usize) -> bool {
        self.code_block_lines.contains(&line)
    }

    /// Returns true if the line is inside a raw HTML block.
    pub fn is_html_block_line(&self, line: usize) -> bool {
        self.html_block_lines.contains(&line)
    }

    /// Returns true if the line is inside front matter, delimiters included.
    pub fn is_front_matter_line(&self, line: usize) -> bool {
        self.front_matter
            .as_ref()
            .is_some_and(|range| range.contains(&line))
    }

    /// Returns the inclusive front matter line range, if present.
    pub fn front_matter(&self) -> Option<RangeInclusive<usize>> {
        self.front_matter.clone()
    }

    /// Returns true if the line is empty or whitespace only.
    ///
    /// Out-of-range lines count as blank.
    pub fn is_blank_line(&self, line: usize) -> bool {
        self.lines.get(line).is_none_or(|info| info.is_blank)
    }

    /// Returns the first line that is not blank.
    pub fn first_non_blank_line(&self) -> Option<usize> {
        self.lines.iter().position(|info| !info.is_blank)
    }

    /// Counts the line terminators at the very end of the text.
    pub fn trailing_newline_count(&self) -> usize {
        let mut rest = self.text.as_str();
        let mut count = 0;
        while let Some(stripped) = rest.strip_suffix('\n') {
            rest = stripped.strip_suffix('\r').unwrap_or(stripped);
            count += 1;
        }
        count
    }

    /// Returns true if the text ends with exactly one line terminator.
    pub fn ends_with_single_newline(&self) -> bool {
        self.trailing_newline_count() == 1
    }

    /// Returns true if the text ends with two or more line terminators.
    pub fn ends_with_multiple_newlines(&self) -> bool {
        self.trailing_newline_count() > 1
    }

    /// Returns all headings in document order.
    pub fn headings(&self) -> &[HeadingInfo] {
        &self.headings
    }

    /// Returns a restartable iterator over `(line number, line text)` pairs.
    pub fn lines(&self, filter: LineFilter) -> Lines<'_> {
        Lines {
            doc: self,
            next: 0,
            filter,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::from_text(String::new())
    }
}

/// Iterator over document lines, see [`Document::lines`].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    doc: &'a Document,
    next: usize,
    filter: LineFilter,
}

impl<'a> Iterator for Lines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.doc.line_count() {
            let line = self.next;
            self.next += 1;
            if self.filter.skip_code_blocks && self.doc.is_code_block_line(line) {
                continue;
            }
            if self.filter.skip_front_matter && self.doc.is_front_matter_line(line) {
                continue;
            }
            return Some((line, self.doc.line_text(line)));
        }
        None
    }
}

/// Walks the block tree once, marking code/HTML block lines and headings.
struct BlockCollector<'d> {
    doc: &'d Document,
    code: HashSet<usize>,
    html: HashSet<usize>,
    headings: Vec<HeadingInfo>,
}

impl BlockCollector<'_> {
    fn line_span(&self, node: &TxtNode<'_>) -> RangeInclusive<usize> {
        let start = self.doc.offset_to_line(node.span.start as usize);
        let end = self.doc.offset_to_line(node.span.last_offset() as usize);
        start..=end.max(start)
    }

    /// Classifies a heading from the text at its own span start, so container
    /// markers such as `>` or `- ` before it are ignored.
    fn heading_style(
        &self,
        node: &TxtNode<'_>,
        first_line: usize,
        last_line: usize,
    ) -> HeadingStyle {
        let start = node.span.start as usize;
        let line_end = self
            .doc
            .line_info(first_line)
            .map_or(start, |info| info.end.max(start));
        let text = self.doc.text().get(start..line_end).unwrap_or("").trim_start();
        if !text.starts_with('#') || last_line > first_line {
            return HeadingStyle::Setext;
        }
        let trimmed = text.trim_end();
        let without_closing = trimmed.trim_end_matches('#');
        let has_closing = without_closing.len() < trimmed.len()
            && without_closing.ends_with([' ', '\t'])
            && !without_closing.trim_start_matches('#').trim().is_empty();
        if has_closing {
            HeadingStyle::AtxClosed
        } else {
            HeadingStyle::Atx
        }
    }

    fn extract_text(node: &TxtNode<'_>) -> String {
        let mut text = String::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            if let Some(v) = n.value {
                text.push_str(v);
            }
            stack.extend(n.children.iter().rev());
        }
        text
    }
}

impl<'a> Visitor<'a> for BlockCollector<'_> {
    fn visit_code_block(&mut self, node: &TxtNode<'a>) -> VisitResult {
        self.code.extend(self.line_span(node));
        ControlFlow::Continue(())
    }

    fn visit_html_block(&mut self, node: &TxtNode<'a>) -> VisitResult {
        self.html.extend(self.line_span(node));
        ControlFlow::Continue(())
    }

    fn visit_front_matter(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_heading(&mut self, node: &TxtNode<'a>) -> VisitResult {
        let span = self.line_span(node);
        let (first, last) = (*span.start(), *span.end());
        self.headings.push(HeadingInfo {
            line: first,
            level: node.depth().unwrap_or(1),
            style: self.heading_style(node, first, last),
            text: Self::extract_text(node),
        });
        walk_children(self, node)
    }

    fn visit_other(&mut self, node: &TxtNode<'a>) -> VisitResult {
        if node.node_type == NodeType::Document || node.node_type.is_block() {
            walk_children(self, node)
        } else {
            ControlFlow::Continue(())
        }
    }
}
