use crate::lint_context::LintContext;
use crate::rule::{LintResult, LintWarning, Rule, RuleCategory};
use regex::Regex;
use std::sync::LazyLock;

static WELL_FORMED_BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^>\s.+$").unwrap());
static MULTIPLE_SPACES_AFTER_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^>\s{2,}").unwrap());

/// Flags blockquote lines that are not `> text`, and separately lines with more
/// than one space after the marker. A line can receive both issues.
#[derive(Clone, Default)]
pub struct BlockquoteFormat;

impl Rule for BlockquoteFormat {
    fn name(&self) -> &'static str {
        "blockquote-format"
    }

    fn description(&self) -> &'static str {
        "Blockquotes should be '>' followed by a single space and text"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Blockquote
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for (_, info, line) in ctx.lines_outside_code() {
            if !line.starts_with('>') {
                continue;
            }

            if !WELL_FORMED_BLOCKQUOTE.is_match(line) {
                warnings.push(LintWarning::spanning(
                    ctx,
                    self.name(),
                    "Blockquote should be '>' followed by a space and text",
                    info.byte_offset,
                    info.byte_end(),
                ));
            }
            if MULTIPLE_SPACES_AFTER_MARKER.is_match(line) {
                warnings.push(LintWarning::spanning(
                    ctx,
                    self.name(),
                    "Multiple spaces after blockquote symbol",
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
        Box::new(BlockquoteFormat)
    }
}
