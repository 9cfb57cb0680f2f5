//! Flattening of [`StyleRanges`] into `(range, tag)` pairs for a decoration layer.

use super::ranges::{HeaderRange, StyleRanges};
use crate::types::TextRange;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleTag {
    CodeBlock,
    Header(u8),
    Link,
    Bold,
    Italic,
    BoldItalic,
    Strikethrough,
    Underline,
    Highlight,
    Code,
    FenceInfo,
    /// Delimiter characters at the edges of a styled range (`**`, `_`, `# `)
    Symbol,
    Marker,
}

impl StyleTag {
    /// Width of the delimiter on each side of a range with this tag. Headers
    /// carry their own width in [`HeaderRange::marker_width`].
    pub fn delimiter_width(self) -> Option<usize> {
        match self {
            StyleTag::Bold | StyleTag::Underline | StyleTag::Strikethrough | StyleTag::Highlight => Some(2),
            StyleTag::Italic | StyleTag::Code => Some(1),
            StyleTag::BoldItalic => Some(3),
            StyleTag::Header(_)
            | StyleTag::CodeBlock
            | StyleTag::Link
            | StyleTag::FenceInfo
            | StyleTag::Symbol
            | StyleTag::Marker => None,
        }
    }
}

/// Derive decorations from the extracted ranges.
///
/// Content ranges come first, then delimiter `Symbol` ranges, then markers, so
/// a caller applying them in order lets delimiters win over content styling.
/// A paired delimiter of width `N` is only split off when the range is at
/// least `2 * N` wide; headers only get the leading one, and setext headers
/// get none.
pub fn to_annotated_ranges(ranges: &StyleRanges) -> Vec<(TextRange, StyleTag)> {
    let mut content: Vec<(TextRange, StyleTag)> = Vec::new();
    let mut symbols: Vec<TextRange> = Vec::new();

    content.extend(ranges.code_block_content.iter().map(|r| (*r, StyleTag::CodeBlock)));
    for HeaderRange {
        range,
        level,
        marker_width,
    } in &ranges.headers
    {
        content.push((*range, StyleTag::Header(*level)));
        symbols.extend(symbol_ranges(*range, *marker_width, false));
    }
    content.extend(ranges.links.iter().map(|r| (*r, StyleTag::Link)));

    let paired = [
        (&ranges.bold, StyleTag::Bold),
        (&ranges.italic, StyleTag::Italic),
        (&ranges.bold_italic, StyleTag::BoldItalic),
        (&ranges.strikethrough, StyleTag::Strikethrough),
        (&ranges.underline, StyleTag::Underline),
        (&ranges.highlight, StyleTag::Highlight),
        (&ranges.code, StyleTag::Code),
    ];
    for (list, tag) in paired {
        let width = tag.delimiter_width().unwrap_or(0);
        for range in list {
            content.push((*range, tag));
            symbols.extend(symbol_ranges(*range, width, true));
        }
    }

    content.extend(ranges.fenced_code_block_info.iter().map(|r| (*r, StyleTag::FenceInfo)));

    let mut annotated = content;
    annotated.extend(symbols.into_iter().map(|range| (range, StyleTag::Symbol)));
    annotated.extend(ranges.markers.iter().map(|r| (*r, StyleTag::Marker)));
    annotated
}

fn symbol_ranges(range: TextRange, width: usize, trailing: bool) -> Vec<TextRange> {
    if width == 0 || range.len() < 2 * width {
        return Vec::new();
    }
    let leading = TextRange::new(range.start, range.start + width);
    if trailing {
        vec![leading, TextRange::new(range.end - width, range.end)]
    } else {
        vec![leading]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn r(start: usize, end: usize) -> TextRange {
        TextRange::new(start, end)
    }

    #[test]
    fn test_empty() {
        assert!(to_annotated_ranges(&StyleRanges::empty()).is_empty());
    }

    #[test]
    fn test_bold_symbols() {
        let ranges = StyleRanges {
            bold: vec![r(0, 8)],
            ..Default::default()
        };
        assert_eq!(
            to_annotated_ranges(&ranges),
            vec![
                (r(0, 8), StyleTag::Bold),
                (r(0, 2), StyleTag::Symbol),
                (r(6, 8), StyleTag::Symbol),
            ]
        );
    }

    #[test]
    fn test_too_narrow_for_symbols() {
        let ranges = StyleRanges {
            bold: vec![r(0, 3)],
            italic: vec![r(5, 6)],
            ..Default::default()
        };
        let annotated = to_annotated_ranges(&ranges);
        assert!(annotated.iter().all(|(_, tag)| *tag != StyleTag::Symbol));
    }

    #[test]
    fn test_header_leading_symbol_only() {
        let ranges = StyleRanges {
            headers: vec![HeaderRange {
                range: r(0, 9),
                level: 2,
                marker_width: 3,
            }],
            ..Default::default()
        };
        assert_eq!(
            to_annotated_ranges(&ranges),
            vec![(r(0, 9), StyleTag::Header(2)), (r(0, 3), StyleTag::Symbol)]
        );
    }

    #[test]
    fn test_setext_header_has_no_symbol() {
        let ranges = StyleRanges {
            headers: vec![HeaderRange {
                range: r(0, 12),
                level: 1,
                marker_width: 0,
            }],
            ..Default::default()
        };
        assert_eq!(to_annotated_ranges(&ranges), vec![(r(0, 12), StyleTag::Header(1))]);
    }

    #[test]
    fn test_markers_come_last() {
        let ranges = StyleRanges {
            italic: vec![r(2, 7)],
            markers: vec![r(0, 1)],
            links: vec![r(10, 16)],
            ..Default::default()
        };
        let tags: Vec<StyleTag> = to_annotated_ranges(&ranges).into_iter().map(|(_, tag)| tag).collect();
        assert_eq!(
            tags,
            vec![
                StyleTag::Link,
                StyleTag::Italic,
                StyleTag::Symbol,
                StyleTag::Symbol,
                StyleTag::Marker
            ]
        );
    }

    #[test]
    fn test_code_span_symbols() {
        let ranges = StyleRanges {
            code: vec![r(4, 7)],
            ..Default::default()
        };
        let symbols: Vec<TextRange> = to_annotated_ranges(&ranges)
            .into_iter()
            .filter(|(_, tag)| *tag == StyleTag::Symbol)
            .map(|(range, _)| range)
            .collect();
        assert_eq!(symbols, vec![r(4, 5), r(6, 7)]);
    }
}
