//! Style-range extraction for editor syntax highlighting.
//!
//! [`extract_style_ranges`] parses a document and returns the spans of every
//! styled construct; [`to_annotated_ranges`] turns them into tagged decorations
//! with separate delimiter ranges.

pub mod annotate;
pub mod extractor;
mod inline_delimiters;
pub mod ranges;
pub mod tree;

pub use annotate::{StyleTag, to_annotated_ranges};
pub use extractor::{extract_style_ranges, extract_style_ranges_with};
pub use ranges::{HeaderRange, StyleRanges};
