use crate::lint_context::LintContext;
use crate::rule::{LintResult, LintWarning, Rule, RuleCategory};
use regex::Regex;
use std::sync::LazyLock;

static WELL_FORMED_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}\s.+$").unwrap());
static MULTIPLE_SPACES_AFTER_HASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}\s{2,}").unwrap());

const TERMINAL_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Why a heading line was rejected. Checks run in declaration order and the
/// first failure wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingProblem {
    Indented,
    Malformed,
    MultipleSpaces,
    TrailingPunctuation,
}

impl HeadingProblem {
    fn message(self) -> &'static str {
        match self {
            HeadingProblem::Indented => "Heading should start at the beginning of the line",
            HeadingProblem::Malformed => "Heading should be 1-6 '#' followed by a space and text",
            HeadingProblem::MultipleSpaces => "Multiple spaces after heading marker",
            HeadingProblem::TrailingPunctuation => "Heading should not end with punctuation",
        }
    }
}

/// Classify a line whose trimmed start is `#`
pub fn heading_problem(line: &str) -> Option<HeadingProblem> {
    if line.starts_with(char::is_whitespace) {
        return Some(HeadingProblem::Indented);
    }
    if !WELL_FORMED_HEADING.is_match(line) {
        return Some(HeadingProblem::Malformed);
    }
    if MULTIPLE_SPACES_AFTER_HASHES.is_match(line) {
        return Some(HeadingProblem::MultipleSpaces);
    }
    if line.trim_end().ends_with(TERMINAL_PUNCTUATION) {
        return Some(HeadingProblem::TrailingPunctuation);
    }
    None
}

/// Flags malformed ATX headings: indented, missing the space after `#`, empty,
/// deeper than six levels, padded with extra spaces, or ending in punctuation.
#[derive(Clone, Default)]
pub struct HeadingFormat;

impl Rule for HeadingFormat {
    fn name(&self) -> &'static str {
        "heading-format"
    }

    fn description(&self) -> &'static str {
        "Headings should be well-formed ATX headings without trailing punctuation"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Heading
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for (_, info, line) in ctx.lines_outside_code() {
            if !line.trim_start().starts_with('#') {
                continue;
            }
            if let Some(problem) = heading_problem(line) {
                warnings.push(LintWarning::spanning(
                    ctx,
                    self.name(),
                    problem.message(),
                    info.byte_offset,
                    info.byte_end(),
                ));
            }
        }

        Ok(warnings)
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        Box::new(HeadingFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(content: &str) -> Vec<(usize, usize)> {
        let ctx = LintContext::new(content);
        HeadingFormat.check(&ctx).unwrap().iter().map(LintWarning::span).collect()
    }

    #[test]
    fn test_problem_priority() {
        assert_eq!(heading_problem(" # Indented"), Some(HeadingProblem::Indented));
        assert_eq!(heading_problem("#Bad"), Some(HeadingProblem::Malformed));
        assert_eq!(heading_problem("# "), Some(HeadingProblem::Malformed));
        assert_eq!(heading_problem("####### Seven"), Some(HeadingProblem::Malformed));
        assert_eq!(heading_problem("##  Spaced"), Some(HeadingProblem::MultipleSpaces));
        assert_eq!(heading_problem("# Heading!"), Some(HeadingProblem::TrailingPunctuation));
        assert_eq!(heading_problem("# Heading.  "), Some(HeadingProblem::TrailingPunctuation));
        assert_eq!(heading_problem("# Good heading"), None);
        assert_eq!(heading_problem("###### Six"), None);
    }

    #[test]
    fn test_flags_whole_line() {
        assert_eq!(check("#Bad"), vec![(0, 4)]);
        assert_eq!(check("text\n#Bad\nmore"), vec![(5, 9)]);
    }

    #[test]
    fn test_valid_headings() {
        assert!(check("# Good heading\n\n## Another one").is_empty());
    }

    #[test]
    fn test_skips_code_regions() {
        assert!(check("```\n#notaheading\n```").is_empty());
        assert!(check("`start\n#inside span`").is_empty());
    }

    #[test]
    fn test_one_issue_per_line() {
        // Indented and punctuated: only the first failing check reports
        assert_eq!(check("  #Bad!"), vec![(0, 7)]);
    }
}
