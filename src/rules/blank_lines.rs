use crate::lint_context::LintContext;
use crate::rule::{LintResult, LintWarning, Rule, RuleCategory};
use crate::rule_config_serde::{RuleConfig, default_config_section, load_rule_config};
use serde::{Deserialize, Serialize};

/// How a run of too many blank lines is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlankRunMode {
    /// Every blank line past the maximum reports the run so far, producing
    /// overlapping issues that all start at the first blank line
    #[default]
    Repeat,
    /// A single issue covers the whole run once it ends
    Merge,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct BlankLinesConfig {
    /// Blank lines allowed in a row
    pub maximum: usize,
    pub mode: BlankRunMode,
}

impl Default for BlankLinesConfig {
    fn default() -> Self {
        Self {
            maximum: 1,
            mode: BlankRunMode::Repeat,
        }
    }
}

impl RuleConfig for BlankLinesConfig {
    const RULE_NAME: &'static str = "blank-lines";
}

/// Flags runs of consecutive blank lines outside code. The blank line right
/// after a fence delimiter line is not counted.
#[derive(Clone, Default)]
pub struct ConsecutiveBlankLines {
    config: BlankLinesConfig,
}

/// An open run of blank lines
struct BlankRun {
    start: usize,
    end: usize,
    count: usize,
}

impl ConsecutiveBlankLines {
    pub fn new(maximum: usize, mode: BlankRunMode) -> Self {
        Self {
            config: BlankLinesConfig { maximum, mode },
        }
    }

    pub fn from_config_struct(config: BlankLinesConfig) -> Self {
        Self { config }
    }

    fn warning(&self, ctx: &LintContext, run: &BlankRun) -> LintWarning {
        LintWarning::spanning(
            ctx,
            self.name(),
            format!(
                "Multiple consecutive blank lines (expected at most {}, found {})",
                self.config.maximum, run.count
            ),
            run.start,
            run.end,
        )
    }

    fn close_run(&self, ctx: &LintContext, run: Option<BlankRun>, warnings: &mut Vec<LintWarning>) {
        if self.config.mode == BlankRunMode::Merge
            && let Some(run) = run
            && run.count > self.config.maximum
        {
            warnings.push(self.warning(ctx, &run));
        }
    }
}

impl Rule for ConsecutiveBlankLines {
    fn name(&self) -> &'static str {
        "blank-lines"
    }

    fn description(&self) -> &'static str {
        "Multiple consecutive blank lines"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Whitespace
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();
        let mut run: Option<BlankRun> = None;
        let mut after_fence = false;

        for info in &ctx.lines {
            if info.in_code_region || !info.is_blank {
                self.close_run(ctx, run.take(), &mut warnings);
                after_fence = info.is_fence_delimiter;
                continue;
            }

            if after_fence {
                after_fence = false;
                continue;
            }

            let current = run.get_or_insert(BlankRun {
                start: info.byte_offset,
                end: info.byte_end(),
                count: 0,
            });
            current.count += 1;
            current.end = info.byte_end();

            if self.config.mode == BlankRunMode::Repeat && current.count > self.config.maximum {
                warnings.push(self.warning(ctx, current));
            }
        }
        self.close_run(ctx, run, &mut warnings);

        Ok(warnings)
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = load_rule_config::<BlankLinesConfig>(config);
        Box::new(Self::from_config_struct(rule_config))
    }

    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        default_config_section::<BlankLinesConfig>()
    }
}
