//! A small, closed syntax tree over pulldown-cmark's event stream.
//!
//! The extractor needs parent/child relationships (nested emphasis, code spans
//! inside table rows) and exact source spans, so the offset iterator is folded
//! into [`SyntaxNode`]s whose kinds are limited to what styling cares about.

use super::inline_delimiters;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading(u8),
    Emphasis,
    Strong,
    Strikethrough,
    Ins,
    Highlight,
    Code,
    Link,
    Image,
    BulletList,
    OrderedList,
    ListItem,
    TaskMarker,
    FencedCodeBlock,
    IndentedCodeBlock,
    Table,
    TableRow,
    TableCell,
    Other,
}

impl NodeKind {
    /// Blocks whose text runs are scanned for `++ins++` and `==highlight==`
    fn holds_inline_text(self) -> bool {
        matches!(
            self,
            NodeKind::Paragraph | NodeKind::Heading(_) | NodeKind::TableCell | NodeKind::ListItem
        )
    }

    fn is_code_block(self) -> bool {
        matches!(self, NodeKind::FencedCodeBlock | NodeKind::IndentedCodeBlock)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    /// Byte span in the source
    pub span: Range<usize>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, span: Range<usize>) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    /// Depth-first iteration over this node and all of its descendants
    pub fn descendants(&self) -> Box<dyn Iterator<Item = &SyntaxNode> + '_> {
        Box::new(std::iter::once(self).chain(self.children.iter().flat_map(|child| child.descendants())))
    }
}

/// An open node plus the text runs collected for it while its events stream by
struct Frame {
    node: SyntaxNode,
    text_runs: Vec<Range<usize>>,
}

impl Frame {
    fn new(kind: NodeKind, span: Range<usize>) -> Self {
        Self {
            node: SyntaxNode::new(kind, span),
            text_runs: Vec::new(),
        }
    }
}

pub fn parser_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn node_kind(tag: &Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading(heading_level(*level)),
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Strikethrough,
        Tag::Link { .. } => NodeKind::Link,
        Tag::Image { .. } => NodeKind::Image,
        Tag::List(Some(_)) => NodeKind::OrderedList,
        Tag::List(None) => NodeKind::BulletList,
        Tag::Item => NodeKind::ListItem,
        Tag::CodeBlock(CodeBlockKind::Fenced(_)) => NodeKind::FencedCodeBlock,
        Tag::CodeBlock(CodeBlockKind::Indented) => NodeKind::IndentedCodeBlock,
        Tag::Table(_) => NodeKind::Table,
        // The header row has no row tag of its own; its cells sit directly
        // under the head, so the head plays the row's part
        Tag::TableHead | Tag::TableRow => NodeKind::TableRow,
        Tag::TableCell => NodeKind::TableCell,
        _ => NodeKind::Other,
    }
}

/// Parse `text` into a tree rooted at a `Document` node spanning the whole input.
pub fn parse_tree(text: &str) -> SyntaxNode {
    let parser = Parser::new_ext(text, parser_options()).into_offset_iter();
    let mut stack = vec![Frame::new(NodeKind::Document, 0..text.len())];

    for (event, range) in parser {
        match event {
            Event::Start(tag) => stack.push(Frame::new(node_kind(&tag), range)),
            Event::End(_) => {
                // The document frame is never closed by an event
                if stack.len() > 1
                    && let Some(frame) = stack.pop()
                {
                    let node = close_frame(text, frame);
                    if let Some(parent) = stack.last_mut() {
                        parent.node.children.push(node);
                    }
                }
            }
            Event::Text(_) => {
                // Attribute the run to the nearest block that holds inline text,
                // unless a code block sits in between
                for frame in stack.iter_mut().rev() {
                    if frame.node.kind.is_code_block() {
                        break;
                    }
                    if frame.node.kind.holds_inline_text() {
                        frame.text_runs.push(range);
                        break;
                    }
                }
            }
            Event::Code(_) => push_leaf(&mut stack, NodeKind::Code, range),
            Event::TaskListMarker(_) => push_leaf(&mut stack, NodeKind::TaskMarker, range),
            _ => {}
        }
    }

    // Balanced streams leave only the document; fold anything left over just in case
    while stack.len() > 1 {
        if let Some(frame) = stack.pop() {
            let node = close_frame(text, frame);
            if let Some(parent) = stack.last_mut() {
                parent.node.children.push(node);
            }
        }
    }

    stack
        .pop()
        .map(|frame| close_frame(text, frame))
        .unwrap_or_else(|| SyntaxNode::new(NodeKind::Document, 0..text.len()))
}

fn push_leaf(stack: &mut [Frame], kind: NodeKind, range: Range<usize>) {
    if let Some(parent) = stack.last_mut() {
        parent.node.children.push(SyntaxNode::new(kind, range));
    }
}

fn close_frame(text: &str, frame: Frame) -> SyntaxNode {
    let Frame { mut node, text_runs } = frame;
    if node.kind.holds_inline_text() && !text_runs.is_empty() {
        let extra = inline_delimiters::scan(text, &text_runs);
        if !extra.is_empty() {
            node.children.extend(extra);
            node.children.sort_by_key(|child| child.span.start);
        }
    }
    node
}
