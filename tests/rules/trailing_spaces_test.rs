use mdlite_lib::config::Config;
use mdlite_lib::lint_context::LintContext;
use mdlite_lib::rule::Rule;
use mdlite_lib::rules::TrailingSpaces;

fn spans(rule: &dyn Rule, content: &str) -> Vec<(usize, usize)> {
    let ctx = LintContext::new(content);
    rule.check(&ctx).unwrap().iter().map(|w| w.span()).collect()
}

#[test]
fn test_default_threshold() {
    let rule = TrailingSpaces::default();
    assert!(spans(&rule, "one \ntwo  \n").is_empty());
    assert_eq!(spans(&rule, "one \ntwo   \nthree"), vec![(5, 11)]);
}

#[test]
fn test_crlf_hard_break_allowed() {
    let rule = TrailingSpaces::default();
    assert!(spans(&rule, "line  \r\nnext\r\n").is_empty());
    assert_eq!(spans(&rule, "a\r\nb    \r\n"), vec![(3, 9)]);
}

#[test]
fn test_each_line_reported() {
    let rule = TrailingSpaces::default();
    assert_eq!(spans(&rule, "a   \nb    \n"), vec![(0, 4), (5, 10)]);
}

#[test]
fn test_configured_threshold() {
    let config = Config::from_toml_str("[trailing-spaces]\nmin-spaces = 1\n").unwrap();
    let rule = TrailingSpaces::from_config(&config);
    assert_eq!(spans(rule.as_ref(), "a \nb"), vec![(0, 2)]);
}

#[test]
fn test_snake_case_option() {
    let config = Config::from_toml_str("[trailing_spaces]\nmin_spaces = 5\n").unwrap();
    let rule = TrailingSpaces::from_config(&config);
    assert!(spans(rule.as_ref(), "a    \n").is_empty());
    assert_eq!(spans(rule.as_ref(), "a     \n"), vec![(0, 6)]);
}

#[test]
fn test_invalid_option_falls_back_to_default() {
    let config = Config::from_toml_str("[trailing-spaces]\nmin-spaces = \"lots\"\n").unwrap();
    let rule = TrailingSpaces::from_config(&config);
    assert_eq!(spans(rule.as_ref(), "a   \n"), vec![(0, 4)]);
}

#[test]
fn test_inside_fence_ignored() {
    let rule = TrailingSpaces::default();
    assert!(spans(&rule, "```\nlet x = 1;     \n```\n").is_empty());
}
