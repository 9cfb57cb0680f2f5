use crate::lint_context::LintContext;
use dyn_clone::DynClone;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while checking a document
#[derive(Debug, Error)]
pub enum LintError {
    /// A rule produced a warning that does not describe a valid span of the input
    #[error("Rule {rule} failed: {message}")]
    RuleFailed { rule: String, message: String },
}

pub type LintResult = Result<Vec<LintWarning>, LintError>;

/// A single structural issue found by a rule.
///
/// `byte_offset..byte_end` is the flagged span in UTF-8 bytes; `line`/`column`
/// are 1-indexed and column counts characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintWarning {
    pub rule_name: Option<String>,
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub byte_offset: usize,
    pub byte_end: usize,
}

impl LintWarning {
    /// Build a warning spanning `byte_offset..byte_end`, resolving line and column
    /// positions through the context.
    pub fn spanning(
        ctx: &LintContext,
        rule_name: &str,
        message: impl Into<String>,
        byte_offset: usize,
        byte_end: usize,
    ) -> Self {
        let (line, column) = ctx.offset_to_line_col(byte_offset);
        let (end_line, end_column) = ctx.offset_to_line_col(byte_end);
        Self {
            rule_name: Some(rule_name.to_string()),
            message: message.into(),
            line,
            column,
            end_line,
            end_column,
            byte_offset,
            byte_end,
        }
    }

    /// The flagged span as an `(start, end)` byte pair
    pub fn span(&self) -> (usize, usize) {
        (self.byte_offset, self.byte_end)
    }
}

/// Rule categories used to skip rules whose constructs are absent from a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    Heading,
    Blockquote,
    Whitespace,
}

pub trait Rule: DynClone + Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn category(&self) -> RuleCategory;

    fn check(&self, ctx: &LintContext) -> LintResult;

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized;

    /// Default configuration section for this rule, if it has options
    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        None
    }
}

dyn_clone::clone_trait_object!(Rule);
