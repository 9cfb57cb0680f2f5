//! Recovery of `++ins++` and `==highlight==` spans.
//!
//! pulldown-cmark has no syntax for either, so both arrive as literal text.
//! Scanning only the parser's own text runs keeps the delimiters out of code
//! spans, link destinations and code blocks.

use super::tree::{NodeKind, SyntaxNode};
use crate::utils::code_regions::is_escaped;
use std::ops::Range;

const DELIMITERS: &[(&str, NodeKind)] = &[("++", NodeKind::Ins), ("==", NodeKind::Highlight)];

/// Pair delimiters across the text runs of one block, left to right. An opener
/// must be followed by non-whitespace and a closer preceded by non-whitespace;
/// runs of three or more delimiter characters are ignored.
pub(crate) fn scan(text: &str, runs: &[Range<usize>]) -> Vec<SyntaxNode> {
    let runs = merge_contiguous(runs);
    let mut nodes = Vec::new();

    for &(delimiter, kind) in DELIMITERS {
        let delimiter_byte = delimiter.as_bytes()[0];
        let mut opener: Option<usize> = None;

        for run in &runs {
            let mut pos = run.start;
            while let Some(found) = text[pos..run.end].find(delimiter) {
                let at = pos + found;
                let char_run_end = at + text.as_bytes()[at..run.end]
                    .iter()
                    .take_while(|&&b| b == delimiter_byte)
                    .count();
                pos = char_run_end;

                if char_run_end - at != delimiter.len() || is_escaped(text, at) {
                    continue;
                }

                let before = text[..at].chars().next_back();
                let after = text[char_run_end..].chars().next();
                let can_close = before.is_some_and(|c| !c.is_whitespace());
                let can_open = after.is_some_and(|c| !c.is_whitespace());

                match opener {
                    Some(start) if can_close && at > start + delimiter.len() => {
                        nodes.push(SyntaxNode::new(kind, start..char_run_end));
                        opener = None;
                    }
                    _ if can_open => opener = Some(at),
                    _ => {}
                }
            }
        }
    }

    nodes.sort_by_key(|node| node.span.start);
    nodes
}

fn merge_contiguous(runs: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(runs.len());
    for run in runs {
        match merged.last_mut() {
            Some(last) if last.end == run.start => last.end = run.end,
            _ => merged.push(run.clone()),
        }
    }
    merged
}
