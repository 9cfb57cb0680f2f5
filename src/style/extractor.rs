//! Walks the syntax tree and sorts every styled construct into [`StyleRanges`].

use super::ranges::{HeaderRange, StyleRanges};
use super::tree::{NodeKind, SyntaxNode, parse_tree};
use crate::types::{OffsetEncoding, TextRange};
use crate::utils::code_regions::is_escaped;
use crate::utils::offsets::OffsetMap;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

/// Extract style ranges with UTF-16 offsets.
pub fn extract_style_ranges(text: &str) -> StyleRanges {
    extract_style_ranges_with(text, OffsetEncoding::Utf16)
}

/// Extract style ranges, reporting offsets in `encoding`.
///
/// Never fails: malformed Markdown yields fewer ranges, and a panic inside the
/// parser is logged and turned into the empty aggregate.
pub fn extract_style_ranges_with(text: &str, encoding: OffsetEncoding) -> StyleRanges {
    if text.is_empty() {
        return StyleRanges::empty();
    }

    let extracted = panic::catch_unwind(AssertUnwindSafe(|| StyleRangeExtractor::new(text).extract()));
    match extracted {
        Ok(ranges) => {
            log::debug!(
                "Extracted {} style ranges from {} bytes",
                ranges.all_ranges().count(),
                text.len()
            );
            ranges.map_offsets(&OffsetMap::new(text, encoding))
        }
        Err(_) => {
            log::warn!("Markdown parser panicked on {} bytes of input; no styling applied", text.len());
            StyleRanges::empty()
        }
    }
}

/// Single-use builder: one extractor per document, consumed by [`extract`](Self::extract).
struct StyleRangeExtractor<'a> {
    text: &'a str,
    ranges: StyleRanges,
}

impl<'a> StyleRangeExtractor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            ranges: StyleRanges::default(),
        }
    }

    fn extract(mut self) -> StyleRanges {
        let tree = parse_tree(self.text);
        self.visit(&tree, None);
        self.ranges.sort();
        self.ranges
    }

    /// Clamp a byte span to the text and turn it into a range
    fn range(&self, start: usize, end: usize) -> TextRange {
        TextRange::new(start.min(end), end).clamp(self.text.len())
    }

    fn visit(&mut self, node: &SyntaxNode, parent: Option<&SyntaxNode>) {
        if node.span.is_empty() && node.kind != NodeKind::Document {
            return;
        }

        let span = node.span.clone();
        match node.kind {
            NodeKind::Code => {
                let range = self.range(span.start, span.end);
                self.ranges.code.push(range);
            }
            NodeKind::Emphasis => {
                let range = self.range(span.start, span.end);
                if self.is_bold_italic(node, parent, NodeKind::Strong) {
                    self.ranges.bold_italic.push(range);
                } else {
                    self.ranges.italic.push(range);
                }
            }
            NodeKind::Strong => {
                let range = self.range(span.start, span.end);
                if self.is_bold_italic(node, parent, NodeKind::Emphasis) {
                    self.ranges.bold_italic.push(range);
                } else {
                    self.ranges.bold.push(range);
                }
            }
            NodeKind::Strikethrough => {
                let range = self.range(span.start, span.end);
                self.ranges.strikethrough.push(range);
            }
            NodeKind::Ins => {
                let range = self.range(span.start, span.end);
                self.ranges.underline.push(range);
            }
            NodeKind::Highlight => {
                let range = self.range(span.start, span.end);
                self.ranges.highlight.push(range);
            }
            NodeKind::Heading(level) => self.heading(span, level),
            NodeKind::ListItem => self.list_item(span, parent.map(|p| p.kind)),
            NodeKind::TaskMarker => self.task_marker(span),
            NodeKind::Link | NodeKind::Image => {
                let range = self.range(span.start, span.end);
                self.ranges.links.push(range);
            }
            NodeKind::TableRow => self.table_row(node),
            NodeKind::FencedCodeBlock => self.fenced_code_block(span),
            NodeKind::IndentedCodeBlock => {
                let range = self.range(span.start, span.end);
                self.ranges.code_block_content.push(range);
            }
            NodeKind::Document
            | NodeKind::Paragraph
            | NodeKind::BulletList
            | NodeKind::OrderedList
            | NodeKind::Table
            | NodeKind::TableCell
            | NodeKind::Other => {}
        }

        for child in &node.children {
            self.visit(child, Some(node));
        }
    }

    /// Emphasis and strong wrapping each other exactly, in either order:
    /// `***x***`, `**_x_**`, `_**x**_`
    fn is_bold_italic(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>, other: NodeKind) -> bool {
        parent.is_some_and(|p| p.kind == other && self.wraps(p, node))
            || node
                .children
                .iter()
                .any(|child| child.kind == other && self.wraps(node, child))
    }

    /// Whether nothing but emphasis delimiters lies between the edges of
    /// `outer` and `inner`
    fn wraps(&self, outer: &SyntaxNode, inner: &SyntaxNode) -> bool {
        let is_delimiter_run = |start: usize, end: usize| {
            start <= end
                && self
                    .text
                    .get(start..end)
                    .is_some_and(|run| run.bytes().all(|b| b == b'*' || b == b'_'))
        };
        is_delimiter_run(outer.span.start, inner.span.start) && is_delimiter_run(inner.span.end, outer.span.end)
    }

    fn heading(&mut self, span: Range<usize>, level: u8) {
        let bytes = self.text.as_bytes();
        let mut end = span.end.min(bytes.len());
        if end > span.start && bytes[end - 1] != b'\n' && bytes.get(end) == Some(&b'\n') {
            end += 1;
        }
        let marker_width = self.text.get(span.clone()).map(atx_marker_width).unwrap_or(0);
        let range = self.range(span.start, end);
        self.ranges.headers.push(HeaderRange {
            range,
            level,
            marker_width,
        });
    }

    fn list_item(&mut self, span: Range<usize>, parent: Option<NodeKind>) {
        let text = self.text;
        let item = &text[span.clone()];
        let indent = item.len() - item.trim_start_matches([' ', '\t']).len();
        let marker_start = span.start + indent;
        let rest = &item[indent..];

        match parent {
            Some(NodeKind::OrderedList) => {
                // Search the first line only; the delimiter is the first '.' or ')'
                let first_line = rest.split('\n').next().unwrap_or(rest);
                if let Some(delimiter) = first_line.find(['.', ')']) {
                    let range = self.range(marker_start, marker_start + delimiter + 1);
                    self.ranges.markers.push(range);
                }
            }
            _ => {
                if rest.starts_with(['-', '*', '+']) {
                    let range = self.range(marker_start, marker_start + 1);
                    self.ranges.markers.push(range);
                }
            }
        }
    }

    fn task_marker(&mut self, span: Range<usize>) {
        let Some(open) = self.text[span.clone()].find('[') else {
            return;
        };
        let start = span.start + open;
        // The box must be followed by whitespace on the same line
        let candidate = self.text.as_bytes().get(start..start + 4);
        if let Some([b'[', b'x' | b'X' | b' ', b']', b' ' | b'\t']) = candidate {
            let range = self.range(start, start + 3);
            self.ranges.markers.push(range);
        }
    }

    fn table_row(&mut self, node: &SyntaxNode) {
        let code_spans: Vec<Range<usize>> = node
            .descendants()
            .filter(|n| n.kind == NodeKind::Code)
            .map(|n| n.span.clone())
            .collect();

        let text = self.text;
        let span = node.span.clone();
        for (offset, byte) in text.as_bytes()[span.clone()].iter().enumerate() {
            let pos = span.start + offset;
            if *byte != b'|' || is_escaped(text, pos) || code_spans.iter().any(|code| code.contains(&pos)) {
                continue;
            }
            let range = self.range(pos, pos + 1);
            self.ranges.markers.push(range);
        }
    }

    fn fenced_code_block(&mut self, span: Range<usize>) {
        let text = self.text;
        let block = &text[span.clone()];
        let first_line_end = block.find('\n').unwrap_or(block.len());
        let first_line = &block[..first_line_end];

        let indent = first_line.len() - first_line.trim_start_matches(' ').len();
        let fence = &first_line[indent..];
        let Some(fence_char) = fence.chars().next().filter(|c| *c == '`' || *c == '~') else {
            return;
        };
        let fence_len = fence.bytes().take_while(|b| *b == fence_char as u8).count();

        // Lines of a block inside a blockquote repeat the quote markers
        let line_start = text[..span.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let quote_depth = text[line_start..span.start].matches('>').count();

        let open_start = span.start + indent;
        let open_end = open_start + fence_len;
        let opening = self.range(open_start, open_end);
        self.ranges.markers.push(opening);

        let info_raw = &fence[fence_len..];
        let info = info_raw.trim();
        if !info.is_empty() {
            let info_start = open_end + (info_raw.len() - info_raw.trim_start().len());
            let info_range = self.range(info_start, info_start + info.len());
            self.ranges.fenced_code_block_info.push(info_range);
        }

        // The closing fence, if any, is the last line of the block
        let body = block.strip_suffix('\n').unwrap_or(block);
        let body = body.strip_suffix('\r').unwrap_or(body);
        let last_line_start = body.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let closing = (last_line_start > first_line_end)
            .then(|| &body[last_line_start..])
            .and_then(|line| {
                let unquoted = strip_quote_markers(line, quote_depth);
                let trimmed = unquoted.trim();
                let is_fence = trimmed.len() >= fence_len && trimmed.chars().all(|c| c == fence_char);
                is_fence.then(|| {
                    let start = last_line_start + (line.len() - unquoted.trim_start().len());
                    (start, trimmed.len())
                })
            });

        let content_start = span.start + (first_line_end + 1).min(block.len());
        let content_end = match closing {
            Some(_) => span.start + last_line_start,
            None => span.end,
        };
        if content_start < content_end {
            let content = self.range(content_start, content_end);
            self.ranges.code_block_content.push(content);
        }

        if let Some((start, len)) = closing {
            let closing = self.range(span.start + start, span.start + start + len);
            self.ranges.markers.push(closing);
        }
    }
}

/// Width of an ATX heading's `#` run plus one following space; 0 for setext
/// headings, whose text carries no marker.
fn atx_marker_width(heading: &str) -> usize {
    if heading.trim_end_matches(['\n', '\r']).contains('\n') {
        return 0;
    }
    let indent = heading.len() - heading.trim_start_matches(' ').len();
    let rest = &heading.as_bytes()[indent..];
    let hashes = rest.iter().take_while(|b| **b == b'#').count();
    if hashes == 0 {
        return 0;
    }
    indent + hashes + usize::from(matches!(rest.get(hashes), Some(b' ' | b'\t')))
}

/// Strip up to `depth` blockquote markers (each with its leading spaces)
fn strip_quote_markers(line: &str, depth: usize) -> &str {
    let mut rest = line;
    for _ in 0..depth {
        match rest.trim_start_matches([' ', '\t']).strip_prefix('>') {
            Some(after) => rest = after,
            None => break,
        }
    }
    rest
}
