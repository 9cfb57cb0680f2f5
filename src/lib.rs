pub mod config;
pub mod exit_codes;
pub mod lint_context;
pub mod rule;
pub mod rule_config_serde;
pub mod rules;
pub mod style;
pub mod types;
pub mod utils;

pub use rules::*;

pub use crate::lint_context::{LineInfo, LintContext};
pub use crate::style::{
    HeaderRange, StyleRanges, StyleTag, extract_style_ranges, extract_style_ranges_with, to_annotated_ranges,
};
pub use crate::types::{Issue, OffsetEncoding, TextRange};
use crate::config::Config;
use crate::rule::{LintError, LintResult, LintWarning, Rule, RuleCategory};
use crate::utils::offsets::OffsetMap;

/// Content characteristics for efficient rule filtering
#[derive(Debug, Default)]
struct ContentCharacteristics {
    has_headings: bool,    // lines starting with #
    has_blockquotes: bool, // > markers
}

impl ContentCharacteristics {
    fn analyze(content: &str) -> Self {
        let mut chars = Self::default();

        for line in content.split('\n') {
            if !chars.has_headings && line.trim_start().starts_with('#') {
                chars.has_headings = true;
            }
            if !chars.has_blockquotes && line.starts_with('>') {
                chars.has_blockquotes = true;
            }
            if chars.has_headings && chars.has_blockquotes {
                break;
            }
        }

        chars
    }

    /// Check if a rule should be skipped based on content characteristics
    fn should_skip_rule(&self, rule: &dyn Rule) -> bool {
        match rule.category() {
            RuleCategory::Heading => !self.has_headings,
            RuleCategory::Blockquote => !self.has_blockquotes,
            // Whitespace rules apply to all content
            RuleCategory::Whitespace => false,
        }
    }
}

/// Lint a document against the given rules with content-based rule filtering.
///
/// Assumes `rules` is the final, configured and filtered set to execute.
/// Warnings are returned rule by rule in the order of `rules`.
pub fn lint(content: &str, rules: &[Box<dyn Rule>]) -> LintResult {
    let mut warnings = Vec::new();

    if content.is_empty() {
        return Ok(warnings);
    }

    let characteristics = ContentCharacteristics::analyze(content);
    let applicable_rules: Vec<_> = rules
        .iter()
        .filter(|rule| !characteristics.should_skip_rule(rule.as_ref()))
        .collect();

    let skipped = rules.len() - applicable_rules.len();
    if skipped > 0 {
        log::debug!("Skipped {skipped} of {} rules based on content analysis", rules.len());
    }

    // Parse LintContext once for all rules
    let lint_ctx = LintContext::new(content);

    for rule in applicable_rules {
        match rule.check(&lint_ctx).and_then(|rule_warnings| check_spans(content, rule.name(), rule_warnings)) {
            Ok(rule_warnings) => warnings.extend(rule_warnings),
            Err(e) => {
                log::error!("Error checking rule {}: {}", rule.name(), e);
                return Err(e);
            }
        }
    }

    Ok(warnings)
}

/// Reject warnings whose span is not a char-aligned slice of `content`
fn check_spans(content: &str, rule: &str, warnings: Vec<LintWarning>) -> LintResult {
    let bad = warnings.iter().find(|w| {
        w.byte_offset > w.byte_end || !content.is_char_boundary(w.byte_offset) || !content.is_char_boundary(w.byte_end)
    });
    match bad {
        Some(w) => Err(LintError::RuleFailed {
            rule: rule.to_string(),
            message: format!("invalid span {}..{} in {} bytes", w.byte_offset, w.byte_end, content.len()),
        }),
        None => Ok(warnings),
    }
}

/// A configured lint pipeline.
///
/// Built once from a [`Config`] and reused across documents; it holds no
/// per-document state.
#[derive(Clone)]
pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
    encoding: OffsetEncoding,
}

impl Linter {
    pub fn new(config: &Config) -> Self {
        for name in config.unknown_rule_names(&rules::rule_names()) {
            log::warn!("Unknown rule in configuration: {name}");
        }
        let rules = rules::filter_rules(&rules::all_rules(config), &config.global);
        Self {
            rules,
            encoding: config.offset_encoding(),
        }
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn encoding(&self) -> OffsetEncoding {
        self.encoding
    }

    /// Run every rule and return full warnings with byte offsets
    pub fn lint(&self, text: &str) -> LintResult {
        lint(text, &self.rules)
    }

    /// Run every rule and return `(start, end)` issue spans in the configured
    /// offset encoding. Never fails: a rule error is logged and yields no issues.
    pub fn validate(&self, text: &str) -> Vec<Issue> {
        let warnings = match self.lint(text) {
            Ok(warnings) => warnings,
            Err(e) => {
                log::error!("Validation failed: {e}");
                return Vec::new();
            }
        };

        let map = OffsetMap::new(text, self.encoding);
        let issues: Vec<Issue> = warnings
            .iter()
            .map(|warning| {
                let range = map.convert_range(TextRange::new(warning.byte_offset, warning.byte_end));
                (range.start, range.end)
            })
            .collect();
        log::debug!("Found {} issues", issues.len());
        issues
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl std::fmt::Debug for Linter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linter")
            .field("rules", &self.rules.iter().map(|rule| rule.name()).collect::<Vec<_>>())
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// Validate a document with the default rule set, returning issue spans in
/// UTF-16 code units.
pub fn validate_markdown(text: &str) -> Vec<Issue> {
    Linter::default().validate(text)
}
