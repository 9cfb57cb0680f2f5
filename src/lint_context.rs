use crate::types::TextRange;
use crate::utils::code_regions::{CodeRegion, covered_ranges, detect_code_regions, is_fence_line, is_in_code_region};

/// Pre-computed information about a line
#[derive(Debug, Clone)]
pub struct LineInfo {
    /// Byte offset where this line starts in the document
    pub byte_offset: usize,
    /// Length of the line in bytes (without newline)
    pub byte_len: usize,
    /// Whether the line is blank (empty or only whitespace)
    pub is_blank: bool,
    /// Whether the start of this line falls inside a fenced block or inline code span
    pub in_code_region: bool,
    /// Whether this line opens or closes a fenced block
    pub is_fence_delimiter: bool,
}

impl LineInfo {
    /// Get the line content as a string slice from the source document
    pub fn content<'a>(&self, source: &'a str) -> &'a str {
        &source[self.byte_offset..self.byte_offset + self.byte_len]
    }

    /// Byte offset just past the last character of the line (before the newline)
    pub fn byte_end(&self) -> usize {
        self.byte_offset + self.byte_len
    }
}

/// Shared, read-only view of a document for the lint rules.
///
/// Lines are produced by splitting on `'\n'` exactly, so the offset of line
/// `n + 1` is always `byte_offset + byte_len + 1` of line `n`. A trailing
/// `'\r'` stays part of the line content.
pub struct LintContext<'a> {
    pub content: &'a str,
    pub lines: Vec<LineInfo>,
    pub code_regions: Vec<CodeRegion>,
    line_offsets: Vec<usize>,
}

impl<'a> LintContext<'a> {
    pub fn new(content: &'a str) -> Self {
        let code_regions = detect_code_regions(content);
        let code_coverage = covered_ranges(&code_regions);
        let lines = Self::compute_line_info(content, &code_coverage);
        let line_offsets = lines.iter().map(|line| line.byte_offset).collect();

        Self {
            content,
            lines,
            code_regions,
            line_offsets,
        }
    }

    fn compute_line_info(content: &str, code_coverage: &[TextRange]) -> Vec<LineInfo> {
        if content.is_empty() {
            return Vec::new();
        }

        let mut lines = Vec::new();
        let mut current_index = 0;
        for line in content.split('\n') {
            lines.push(LineInfo {
                byte_offset: current_index,
                byte_len: line.len(),
                is_blank: line.trim().is_empty(),
                in_code_region: is_in_code_region(code_coverage, current_index),
                is_fence_delimiter: is_fence_line(line),
            });
            current_index += line.len() + 1;
        }
        lines
    }

    /// Map a byte offset to a 1-indexed (line, column) pair
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        match self.line_offsets.binary_search(&offset) {
            Ok(line) => (line + 1, 1),
            Err(line) => {
                let line_start = self.line_offsets.get(line.wrapping_sub(1)).copied().unwrap_or(0);
                let prefix_end = offset.min(self.content.len());
                let col = self
                    .content
                    .get(line_start..prefix_end)
                    .map(|prefix| prefix.chars().count())
                    .unwrap_or(offset - line_start);
                (line.max(1), col + 1)
            }
        }
    }

    /// Iterate `(line_index, info, content)` for lines outside code regions
    pub fn lines_outside_code(&self) -> impl Iterator<Item = (usize, &LineInfo, &'a str)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, info)| !info.in_code_region)
            .map(|(idx, info)| (idx, info, info.content(self.content)))
    }
}
