use mdlite_lib::config::Config;
use mdlite_lib::lint_context::LintContext;
use mdlite_lib::rule::Rule;
use mdlite_lib::rules::{BlankRunMode, ConsecutiveBlankLines};
use pretty_assertions::assert_eq;

fn spans(rule: &dyn Rule, content: &str) -> Vec<(usize, usize)> {
    let ctx = LintContext::new(content);
    rule.check(&ctx).unwrap().iter().map(|w| w.span()).collect()
}

#[test]
fn test_single_blank_line_allowed() {
    assert!(spans(&ConsecutiveBlankLines::default(), "a\n\nb").is_empty());
}

#[test]
fn test_two_blank_lines() {
    assert_eq!(spans(&ConsecutiveBlankLines::default(), "a\n\n\nb"), vec![(2, 3)]);
}

#[test]
fn test_repeat_mode_reports_growing_run() {
    // Blank lines start at offsets 2, 3 and 4
    let rule = ConsecutiveBlankLines::new(1, BlankRunMode::Repeat);
    assert_eq!(spans(&rule, "a\n\n\n\nb"), vec![(2, 3), (2, 4)]);
}

#[test]
fn test_merge_mode_reports_run_once() {
    let rule = ConsecutiveBlankLines::new(1, BlankRunMode::Merge);
    assert_eq!(spans(&rule, "a\n\n\n\nb"), vec![(2, 4)]);
    assert_eq!(spans(&rule, "a\n\n\nb\n\n\nc"), vec![(2, 3), (6, 7)]);
}

#[test]
fn test_mode_from_config() {
    let config = Config::from_toml_str("[blank-lines]\nmode = \"merge\"\nmaximum = 2\n").unwrap();
    let rule = ConsecutiveBlankLines::from_config(&config);
    assert!(spans(rule.as_ref(), "a\n\n\nb").is_empty());
    assert_eq!(spans(rule.as_ref(), "a\n\n\n\n\nb"), vec![(2, 5)]);
}

#[test]
fn test_blank_after_fence_not_counted() {
    let rule = ConsecutiveBlankLines::default();
    assert!(spans(&rule, "```\ncode\n```\n\n\nb").is_empty());
    assert_eq!(spans(&rule, "```\ncode\n```\n\n\n\nb"), vec![(14, 15)]);
}

#[test]
fn test_blank_lines_inside_fence_ignored() {
    let rule = ConsecutiveBlankLines::default();
    assert!(spans(&rule, "```\n\n\n\n```").is_empty());
}
