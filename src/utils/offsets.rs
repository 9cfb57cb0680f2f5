//! Conversion from internal byte offsets to the public offset encoding.

use crate::types::{OffsetEncoding, TextRange};

/// Maps UTF-8 byte offsets of one source string to the requested encoding.
///
/// For UTF-8 output, and for ASCII input in any encoding, the mapping is the
/// identity and no table is allocated.
#[derive(Debug, Clone)]
pub struct OffsetMap {
    /// Code-unit offset for every byte offset `0..=len`
    table: Option<Vec<usize>>,
}

impl OffsetMap {
    pub fn new(text: &str, encoding: OffsetEncoding) -> Self {
        let table = match encoding {
            OffsetEncoding::Utf8 => None,
            OffsetEncoding::Utf16 if text.is_ascii() => None,
            OffsetEncoding::Utf16 => {
                let mut table = Vec::with_capacity(text.len() + 1);
                let mut units = 0;
                for ch in text.chars() {
                    // Offsets that land inside a multi-byte character map to its start
                    table.extend(std::iter::repeat_n(units, ch.len_utf8()));
                    units += ch.len_utf16();
                }
                table.push(units);
                Some(table)
            }
        };
        Self { table }
    }

    pub fn is_identity(&self) -> bool {
        self.table.is_none()
    }

    pub fn convert(&self, byte_offset: usize) -> usize {
        match &self.table {
            None => byte_offset,
            Some(table) => table
                .get(byte_offset)
                .or_else(|| table.last())
                .copied()
                .unwrap_or(0),
        }
    }

    pub fn convert_range(&self, range: TextRange) -> TextRange {
        TextRange::new(self.convert(range.start), self.convert(range.end))
    }
}
