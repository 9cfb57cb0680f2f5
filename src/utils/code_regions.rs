//! Detection of fenced and inline code regions.
//!
//! Every structural lint rule consults these regions so that Markdown-looking
//! text inside code is never reported.

use crate::types::TextRange;

/// A byte interval covering a fenced block (opening through closing fence
/// line) or an inline code span including its backticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRegion {
    pub start: usize,
    pub end: usize,
    pub kind: CodeRegionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRegionKind {
    Fenced,
    Inline,
}

impl CodeRegion {
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }
}

/// Whether `line` opens or closes a fenced block.
pub fn is_fence_line(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// Whether the byte at `pos` is preceded by an odd number of backslashes.
pub fn is_escaped(text: &str, pos: usize) -> bool {
    let bytes = text.as_bytes();
    let mut backslashes = 0;
    let mut i = pos.min(bytes.len());
    while i > 0 && bytes[i - 1] == b'\\' {
        backslashes += 1;
        i -= 1;
    }
    backslashes % 2 == 1
}

/// Fold regions sorted by start into disjoint ranges sorted by start.
///
/// An unterminated inline span can run over later fences, so raw regions may
/// overlap; the merged form supports binary search.
pub fn covered_ranges(regions: &[CodeRegion]) -> Vec<TextRange> {
    let mut covered: Vec<TextRange> = Vec::with_capacity(regions.len());
    for range in regions.iter().map(CodeRegion::range) {
        match covered.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => covered.push(range),
        }
    }
    covered
}

/// Whether `pos` falls inside one of the disjoint, sorted `covered` ranges.
pub fn is_in_code_region(covered: &[TextRange], pos: usize) -> bool {
    let idx = covered.partition_point(|range| range.start <= pos);
    idx > 0 && covered[idx - 1].contains(pos)
}

/// Compute all code regions of `text`, sorted by start offset.
pub fn detect_code_regions(text: &str) -> Vec<CodeRegion> {
    let fenced = detect_fenced_regions(text);
    let inline = detect_inline_regions(text, &fenced);

    let mut regions = fenced;
    regions.extend(inline);
    regions.sort_by_key(|region| region.start);
    regions
}

fn detect_fenced_regions(text: &str) -> Vec<CodeRegion> {
    let mut regions = Vec::new();
    let mut open_at: Option<usize> = None;
    let mut current_index = 0;

    for line in text.split('\n') {
        if is_fence_line(line) {
            match open_at.take() {
                Some(start) => regions.push(CodeRegion {
                    start,
                    end: current_index + line.len(),
                    kind: CodeRegionKind::Fenced,
                }),
                None => open_at = Some(current_index),
            }
        }
        current_index += line.len() + 1;
    }

    // An unterminated fence swallows the rest of the document
    if let Some(start) = open_at {
        regions.push(CodeRegion {
            start,
            end: text.len(),
            kind: CodeRegionKind::Fenced,
        });
    }

    regions
}

/// Pair backtick runs outside fenced regions. A closing run must have the same
/// length as its opener; an escaped opener is literal text.
fn detect_inline_regions(text: &str, fenced: &[CodeRegion]) -> Vec<CodeRegion> {
    let bytes = text.as_bytes();
    let mut regions = Vec::new();
    let mut open: Option<(usize, usize)> = None;
    let mut fence_idx = 0;
    let mut i = 0;

    while i < bytes.len() {
        while fence_idx < fenced.len() && fenced[fence_idx].end <= i {
            fence_idx += 1;
        }
        if let Some(region) = fenced.get(fence_idx)
            && region.contains(i)
        {
            i = region.end;
            continue;
        }

        if bytes[i] != b'`' {
            i += 1;
            continue;
        }

        let mut run_start = i;
        while i < bytes.len() && bytes[i] == b'`' {
            i += 1;
        }

        match open {
            Some((start, len)) if i - run_start == len => {
                regions.push(CodeRegion {
                    start,
                    end: i,
                    kind: CodeRegionKind::Inline,
                });
                open = None;
            }
            Some(_) => {}
            None => {
                if is_escaped(text, run_start) {
                    run_start += 1;
                }
                if run_start < i {
                    open = Some((run_start, i - run_start));
                }
            }
        }
    }

    if let Some((start, _)) = open {
        regions.push(CodeRegion {
            start,
            end: text.len(),
            kind: CodeRegionKind::Inline,
        });
    }

    regions
}
