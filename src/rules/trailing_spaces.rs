use crate::lint_context::LintContext;
use crate::rule::{LintResult, LintWarning, Rule, RuleCategory};
use crate::rule_config_serde::{RuleConfig, default_config_section, load_rule_config};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct TrailingSpacesConfig {
    /// Number of trailing whitespace characters that makes a line an issue
    #[serde(alias = "min_spaces")]
    pub min_spaces: usize,
}

impl Default for TrailingSpacesConfig {
    fn default() -> Self {
        Self { min_spaces: 3 }
    }
}

impl RuleConfig for TrailingSpacesConfig {
    const RULE_NAME: &'static str = "trailing-spaces";
}

/// Flags lines ending in a run of whitespace. Two trailing spaces are a
/// Markdown hard break, so the default threshold is three.
#[derive(Clone, Default)]
pub struct TrailingSpaces {
    config: TrailingSpacesConfig,
}

impl TrailingSpaces {
    pub fn new(min_spaces: usize) -> Self {
        Self {
            config: TrailingSpacesConfig {
                min_spaces: min_spaces.max(1),
            },
        }
    }

    pub fn from_config_struct(config: TrailingSpacesConfig) -> Self {
        Self::new(config.min_spaces)
    }

    /// Whitespace before the line ending; a CRLF line's `'\r'` is not counted
    fn trailing_whitespace(line: &str) -> usize {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line.chars().rev().take_while(|c| c.is_whitespace()).count()
    }
}

impl Rule for TrailingSpaces {
    fn name(&self) -> &'static str {
        "trailing-spaces"
    }

    fn description(&self) -> &'static str {
        "Lines should not end with excessive whitespace"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Whitespace
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for (_, info, line) in ctx.lines_outside_code() {
            let trailing = Self::trailing_whitespace(line);
            if trailing >= self.config.min_spaces {
                warnings.push(LintWarning::spanning(
                    ctx,
                    self.name(),
                    format!("{trailing} trailing whitespace characters"),
                    info.byte_offset,
                    info.byte_end(),
                ));
            }
        }

        Ok(warnings)
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = load_rule_config::<TrailingSpacesConfig>(config);
        Box::new(Self::from_config_struct(rule_config))
    }

    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        default_config_section::<TrailingSpacesConfig>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(rule: &TrailingSpaces, content: &str) -> Vec<(usize, usize)> {
        let ctx = LintContext::new(content);
        rule.check(&ctx).unwrap().iter().map(LintWarning::span).collect()
    }

    #[test]
    fn test_hard_break_is_allowed() {
        assert!(check(&TrailingSpaces::default(), "line  \nnext").is_empty());
    }

    #[test]
    fn test_three_spaces_flagged() {
        assert_eq!(check(&TrailingSpaces::default(), "line   \nnext"), vec![(0, 7)]);
    }

    #[test]
    fn test_tabs_count_as_whitespace() {
        assert_eq!(check(&TrailingSpaces::default(), "a\nline \t \n"), vec![(2, 9)]);
    }

    #[test]
    fn test_whitespace_only_line() {
        assert_eq!(check(&TrailingSpaces::default(), "a\n    \nb"), vec![(2, 6)]);
    }

    #[test]
    fn test_crlf_line_ending_not_counted() {
        assert!(check(&TrailingSpaces::default(), "line  \r\nnext\r\n").is_empty());
        assert_eq!(check(&TrailingSpaces::default(), "line   \r\nnext"), vec![(0, 8)]);
    }

    #[test]
    fn test_custom_threshold() {
        let rule = TrailingSpaces::new(1);
        assert_eq!(check(&rule, "a \nb"), vec![(0, 2)]);
    }

    #[test]
    fn test_skips_fenced_code() {
        assert!(check(&TrailingSpaces::default(), "```\ncode    \n```").is_empty());
    }

    #[test]
    fn test_default_config_section() {
        let (name, value) = TrailingSpaces::default().default_config_section().unwrap();
        assert_eq!(name, "trailing-spaces");
        assert_eq!(value.get("min-spaces"), Some(&toml::Value::Integer(3)));
    }
}
