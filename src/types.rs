//! Core value types shared by the style extractor and the structural linter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A half-open `[start, end)` interval over offsets into a source string.
///
/// The unit of the offsets depends on the [`OffsetEncoding`] the range was
/// produced with. Library internals always work in UTF-8 byte offsets and
/// convert once at the public boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted range {start}..{end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Clamp both ends to `len`, keeping `start <= end`.
    pub fn clamp(self, len: usize) -> Self {
        let end = self.end.min(len);
        Self {
            start: self.start.min(end),
            end,
        }
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A structural problem reported by the linter: `(start, end)` of the offending
/// line or blank-line run. Presence alone signals the problem.
pub type Issue = (usize, usize);

/// The unit in which public offsets are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OffsetEncoding {
    /// UTF-16 code units, as used by editor text fields
    #[default]
    #[serde(alias = "utf-16")]
    Utf16,
    /// UTF-8 byte offsets
    #[serde(alias = "utf-8", alias = "bytes")]
    Utf8,
}

impl fmt::Display for OffsetEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetEncoding::Utf16 => write!(f, "utf16"),
            OffsetEncoding::Utf8 => write!(f, "utf8"),
        }
    }
}

impl FromStr for OffsetEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf16" | "utf-16" => Ok(OffsetEncoding::Utf16),
            "utf8" | "utf-8" | "bytes" => Ok(OffsetEncoding::Utf8),
            _ => Err(format!("Unknown offset encoding: {s}")),
        }
    }
}
