mod blank_lines;
mod blockquote_format;
pub mod heading_format;
mod trailing_spaces;

pub use blank_lines::{BlankLinesConfig, BlankRunMode, ConsecutiveBlankLines};
pub use blockquote_format::BlockquoteFormat;
pub use heading_format::{HeadingFormat, HeadingProblem};
pub use trailing_spaces::{TrailingSpaces, TrailingSpacesConfig};

use crate::config::GlobalConfig;
use crate::rule::Rule;
use std::collections::HashSet;

type RuleCtor = fn(&crate::config::Config) -> Box<dyn Rule>;

/// Rules in pipeline order: headings, blockquotes, trailing whitespace, blank-line runs
const RULES: &[(&str, RuleCtor)] = &[
    ("heading-format", HeadingFormat::from_config),
    ("blockquote-format", BlockquoteFormat::from_config),
    ("trailing-spaces", TrailingSpaces::from_config),
    ("blank-lines", ConsecutiveBlankLines::from_config),
];

/// Names of every available rule
pub fn rule_names() -> Vec<&'static str> {
    RULES.iter().map(|(name, _)| *name).collect()
}

/// Returns all rule instances, configured from `config`
pub fn all_rules(config: &crate::config::Config) -> Vec<Box<dyn Rule>> {
    RULES.iter().map(|(_, ctor)| ctor(config)).collect()
}

/// Apply the `enable` / `disable` lists of the global config
pub fn filter_rules(rules: &[Box<dyn Rule>], global_config: &GlobalConfig) -> Vec<Box<dyn Rule>> {
    let disabled_rules: HashSet<&str> = global_config.disable.iter().map(String::as_str).collect();
    let enabled_rules: HashSet<&str> = global_config.enable.iter().map(String::as_str).collect();

    // 'disable = ["all"]' leaves only the explicitly enabled rules
    if disabled_rules.contains("all") {
        return rules
            .iter()
            .filter(|rule| enabled_rules.contains(rule.name()))
            .map(|rule| dyn_clone::clone_box(&**rule))
            .collect();
    }

    rules
        .iter()
        .filter(|rule| enabled_rules.is_empty() || enabled_rules.contains(rule.name()))
        .filter(|rule| !disabled_rules.contains(rule.name()))
        .map(|rule| dyn_clone::clone_box(&**rule))
        .collect()
}
