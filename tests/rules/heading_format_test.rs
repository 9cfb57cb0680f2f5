use mdlite_lib::lint_context::LintContext;
use mdlite_lib::rule::Rule;
use mdlite_lib::rules::HeadingFormat;

fn spans(content: &str) -> Vec<(usize, usize)> {
    let ctx = LintContext::new(content);
    HeadingFormat.check(&ctx).unwrap().iter().map(|w| w.span()).collect()
}

#[test]
fn test_valid_headings() {
    let content = "# Title\n\n## Section two\n\n###### Deepest";
    assert!(spans(content).is_empty());
}

#[test]
fn test_missing_space() {
    let content = "#Bad";
    let ctx = LintContext::new(content);
    let result = HeadingFormat.check(&ctx).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].span(), (0, 4));
    assert_eq!(result[0].rule_name.as_deref(), Some("heading-format"));
}

#[test]
fn test_line_and_column_positions() {
    let content = "intro\n\n##Broken heading";
    let ctx = LintContext::new(content);
    let result = HeadingFormat.check(&ctx).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!((result[0].line, result[0].column), (3, 1));
    assert_eq!((result[0].end_line, result[0].end_column), (3, 17));
}

#[test]
fn test_trailing_punctuation() {
    for content in ["# Heading!", "# Heading.", "# Heading?", "# Heading:", "# Heading;", "# Heading,"] {
        assert_eq!(spans(content).len(), 1, "{content}");
    }
    assert!(spans("# Heading").is_empty());
}

#[test]
fn test_indented_heading() {
    assert_eq!(spans("   # Indented"), vec![(0, 13)]);
}

#[test]
fn test_seven_hashes() {
    assert_eq!(spans("####### Too deep"), vec![(0, 16)]);
}

#[test]
fn test_empty_heading() {
    assert_eq!(spans("#"), vec![(0, 1)]);
    assert_eq!(spans("## "), vec![(0, 3)]);
}

#[test]
fn test_multiple_spaces() {
    assert_eq!(spans("#   Spaced out"), vec![(0, 14)]);
}

#[test]
fn test_hash_inside_fence_ignored() {
    assert!(spans("```\n#notaheading\n```").is_empty());
    assert!(spans("text\n```bash\n#!/bin/sh\n# comment!\n```\n").is_empty());
}

#[test]
fn test_hash_inside_inline_code_ignored() {
    // The span closes on the next line and covers its start
    assert!(spans("see `code\n#tag`").is_empty());
}

#[test]
fn test_escaped_backtick_does_not_open_code() {
    assert_eq!(spans("see \\`code\n#tag"), vec![(11, 15)]);
}

#[test]
fn test_one_issue_per_line() {
    let content = "#A\n#B\n# Fine\n# Bad!";
    assert_eq!(spans(content), vec![(0, 2), (3, 5), (13, 19)]);
}
