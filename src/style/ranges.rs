use crate::types::TextRange;
use crate::utils::offsets::OffsetMap;
use serde::Serialize;

/// A heading span together with its level (1..=6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderRange {
    pub range: TextRange,
    pub level: u8,
    /// Length of the leading `#` run plus one space, 0 for setext headings.
    /// ASCII only, so the same in every offset encoding.
    pub marker_width: usize,
}

/// Every styled range found in one document, grouped by kind.
///
/// Lists are in document order. Ranges of different kinds may overlap (a link
/// contains its markers, a heading contains its emphasis); callers apply the
/// kinds in a fixed priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleRanges {
    pub code: Vec<TextRange>,
    pub bold: Vec<TextRange>,
    pub italic: Vec<TextRange>,
    pub bold_italic: Vec<TextRange>,
    pub strikethrough: Vec<TextRange>,
    pub underline: Vec<TextRange>,
    pub highlight: Vec<TextRange>,
    pub headers: Vec<HeaderRange>,
    /// List bullets, ordered-list prefixes, task boxes, table pipes and code fences
    pub markers: Vec<TextRange>,
    pub links: Vec<TextRange>,
    pub fenced_code_block_info: Vec<TextRange>,
    pub code_block_content: Vec<TextRange>,
}

impl StyleRanges {
    /// The aggregate produced for empty input
    pub const EMPTY: StyleRanges = StyleRanges {
        code: Vec::new(),
        bold: Vec::new(),
        italic: Vec::new(),
        bold_italic: Vec::new(),
        strikethrough: Vec::new(),
        underline: Vec::new(),
        highlight: Vec::new(),
        headers: Vec::new(),
        markers: Vec::new(),
        links: Vec::new(),
        fenced_code_block_info: Vec::new(),
        code_block_content: Vec::new(),
    };

    pub fn empty() -> Self {
        Self::EMPTY
    }

    pub fn is_empty(&self) -> bool {
        self.all_ranges().next().is_none()
    }

    /// Every range of every kind, headers included, in no particular order
    pub fn all_ranges(&self) -> impl Iterator<Item = TextRange> + '_ {
        [
            &self.code,
            &self.bold,
            &self.italic,
            &self.bold_italic,
            &self.strikethrough,
            &self.underline,
            &self.highlight,
            &self.markers,
            &self.links,
            &self.fenced_code_block_info,
            &self.code_block_content,
        ]
        .into_iter()
        .flat_map(|list| list.iter().copied())
        .chain(self.headers.iter().map(|header| header.range))
    }

    /// Sort every list by position; the tree walk visits nested nodes after
    /// their parents, so siblings of different depths can arrive out of order.
    pub(crate) fn sort(&mut self) {
        for list in [
            &mut self.code,
            &mut self.bold,
            &mut self.italic,
            &mut self.bold_italic,
            &mut self.strikethrough,
            &mut self.underline,
            &mut self.highlight,
            &mut self.markers,
            &mut self.links,
            &mut self.fenced_code_block_info,
            &mut self.code_block_content,
        ] {
            list.sort();
        }
        self.headers.sort_by_key(|header| header.range);
    }

    /// Convert every range from byte offsets through `map`
    pub(crate) fn map_offsets(mut self, map: &OffsetMap) -> Self {
        if map.is_identity() {
            return self;
        }
        for list in [
            &mut self.code,
            &mut self.bold,
            &mut self.italic,
            &mut self.bold_italic,
            &mut self.strikethrough,
            &mut self.underline,
            &mut self.highlight,
            &mut self.markers,
            &mut self.links,
            &mut self.fenced_code_block_info,
            &mut self.code_block_content,
        ] {
            for range in list.iter_mut() {
                *range = map.convert_range(*range);
            }
        }
        for header in &mut self.headers {
            header.range = map.convert_range(header.range);
        }
        self
    }
}
