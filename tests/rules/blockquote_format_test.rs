use mdlite_lib::lint_context::LintContext;
use mdlite_lib::rule::Rule;
use mdlite_lib::rules::BlockquoteFormat;

fn messages(content: &str) -> Vec<((usize, usize), String)> {
    let ctx = LintContext::new(content);
    BlockquoteFormat
        .check(&ctx)
        .unwrap()
        .into_iter()
        .map(|w| (w.span(), w.message))
        .collect()
}

#[test]
fn test_valid_blockquotes() {
    assert!(messages("> A quote\n> continues here").is_empty());
}

#[test]
fn test_missing_space() {
    let result = messages("text\n>quote");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].0, (5, 11));
}

#[test]
fn test_multiple_spaces_only() {
    let result = messages(">   spaced");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].0, (0, 10));
    assert!(result[0].1.contains("Multiple spaces"));
}

#[test]
fn test_bare_marker() {
    assert_eq!(messages(">").len(), 1);
}

#[test]
fn test_nested_marker() {
    // The second '>' is not whitespace
    assert_eq!(messages(">> nested").len(), 1);
    assert!(messages("> > nested").is_empty());
}

#[test]
fn test_indented_marker_is_not_checked() {
    assert!(messages("  >quote").is_empty());
}

#[test]
fn test_inside_fence_ignored() {
    assert!(messages("```\n>quote\n```").is_empty());
}
