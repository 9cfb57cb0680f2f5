use mdlite_lib::{
    HeaderRange, OffsetEncoding, StyleRanges, StyleTag, TextRange, extract_style_ranges, extract_style_ranges_with,
    to_annotated_ranges,
};
use pretty_assertions::assert_eq;

fn r(start: usize, end: usize) -> TextRange {
    TextRange::new(start, end)
}

#[test]
fn test_empty_input_yields_empty_ranges() {
    assert_eq!(extract_style_ranges(""), StyleRanges::empty());
    assert!(to_annotated_ranges(&extract_style_ranges("")).is_empty());
}

#[test]
fn test_plain_text_has_no_ranges() {
    assert!(extract_style_ranges("just some words\nover two lines").is_empty());
}

#[test]
fn test_bold_detection() {
    let ranges = extract_style_ranges("**bold**");
    assert_eq!(ranges.bold, vec![r(0, 8)]);
    assert!(ranges.italic.is_empty());
    assert!(ranges.bold_italic.is_empty());
}

#[test]
fn test_nested_emphasis_is_bold_italic() {
    let ranges = extract_style_ranges("**_x_**");
    assert!(ranges.bold.is_empty());
    assert!(ranges.italic.is_empty());
    assert!(ranges.bold_italic.contains(&r(2, 5)));
}

#[test]
fn test_task_list_marker() {
    let text = "- [x] done";
    let ranges = extract_style_ranges(text);
    assert!(ranges.markers.contains(&r(0, 1)));
    assert!(ranges.markers.contains(&r(2, 5)));
    assert_eq!(&text[2..5], "[x]");
}

#[test]
fn test_ordered_item_starting_with_period() {
    // Text that begins with the delimiter character must not widen the marker
    let ranges = extract_style_ranges("1. .env\n2. ..\n");
    assert_eq!(ranges.markers, vec![r(0, 2), r(8, 10)]);
}

#[test]
fn test_ordered_item_with_paren_in_text() {
    let ranges = extract_style_ranges("1. call f(x) now\n");
    assert_eq!(ranges.markers, vec![r(0, 2)]);
}

#[test]
fn test_headers_by_level() {
    let ranges = extract_style_ranges("# One\n\n### Three\n");
    assert_eq!(
        ranges.headers,
        vec![
            HeaderRange {
                range: r(0, 6),
                level: 1,
                marker_width: 2
            },
            HeaderRange {
                range: r(7, 17),
                level: 3,
                marker_width: 4
            },
        ]
    );
}

#[test]
fn test_inline_styles_inside_heading() {
    let ranges = extract_style_ranges("## A **b** ==c==\n");
    assert_eq!(ranges.bold, vec![r(5, 10)]);
    assert_eq!(ranges.highlight, vec![r(11, 16)]);
}

#[test]
fn test_underline_and_highlight_need_tight_delimiters() {
    let ranges = extract_style_ranges("a ++ b ++ c == d ==");
    assert!(ranges.underline.is_empty());
    assert!(ranges.highlight.is_empty());
}

#[test]
fn test_escaped_delimiters_are_text() {
    let ranges = extract_style_ranges("\\==no== and \\*\\*no\\*\\*");
    assert!(ranges.highlight.is_empty());
    assert!(ranges.bold.is_empty());
}

#[test]
fn test_code_span_hides_markup() {
    let ranges = extract_style_ranges("`**x** ==y==`");
    assert_eq!(ranges.code, vec![r(0, 13)]);
    assert!(ranges.bold.is_empty());
    assert!(ranges.highlight.is_empty());
}

#[test]
fn test_fenced_block_parts() {
    let text = "text\n\n~~~ python\nprint(1)\n~~~\n";
    let ranges = extract_style_ranges(text);
    assert_eq!(ranges.markers, vec![r(6, 9), r(26, 29)]);
    assert_eq!(ranges.fenced_code_block_info, vec![r(10, 16)]);
    assert_eq!(ranges.code_block_content, vec![r(17, 26)]);
}

#[test]
fn test_utf16_offsets_for_non_bmp_text() {
    // "😀" is 4 UTF-8 bytes and 2 UTF-16 units
    let text = "# 😀 x\n*it*";
    let utf16 = extract_style_ranges(text);
    assert_eq!(utf16.headers[0].range, r(0, 7));
    assert_eq!(utf16.italic, vec![r(7, 11)]);

    let utf8 = extract_style_ranges_with(text, OffsetEncoding::Utf8);
    assert_eq!(utf8.headers[0].range, r(0, 9));
    assert_eq!(utf8.italic, vec![r(9, 13)]);
}

#[test]
fn test_ascii_offsets_match_in_both_encodings() {
    let text = "- **a** `b` [c](d)\n";
    assert_eq!(
        extract_style_ranges(text),
        extract_style_ranges_with(text, OffsetEncoding::Utf8)
    );
}

#[test]
fn test_idempotent() {
    let text = "# Notes\n\n> quote with *em*\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n- [ ] todo ~~old~~\n";
    assert_eq!(extract_style_ranges(text), extract_style_ranges(text));
}

#[test]
fn test_annotated_ranges() {
    let ranges = extract_style_ranges("**bold** _i_\n");
    let annotated = to_annotated_ranges(&ranges);
    assert_eq!(
        annotated,
        vec![
            (r(0, 8), StyleTag::Bold),
            (r(9, 12), StyleTag::Italic),
            (r(0, 2), StyleTag::Symbol),
            (r(6, 8), StyleTag::Symbol),
            (r(9, 10), StyleTag::Symbol),
            (r(11, 12), StyleTag::Symbol),
        ]
    );
}

#[test]
fn test_annotated_header_and_markers() {
    let ranges = extract_style_ranges("## Title\n- item\n");
    let annotated = to_annotated_ranges(&ranges);
    assert_eq!(annotated.first(), Some(&(r(0, 9), StyleTag::Header(2))));
    assert!(annotated.contains(&(r(0, 3), StyleTag::Symbol)));
    assert_eq!(annotated.last(), Some(&(r(9, 10), StyleTag::Marker)));
}

#[test]
fn test_annotated_setext_header_keeps_text() {
    let annotated = to_annotated_ranges(&extract_style_ranges("Title\n=====\n"));
    assert!(matches!(annotated.first(), Some((_, StyleTag::Header(1)))));
    assert!(annotated.iter().all(|(_, tag)| *tag != StyleTag::Symbol));
}

#[test]
fn test_fence_in_blockquote_keeps_closing_marker() {
    let text = "> ```js\n> let x;\n> ```\n";
    let ranges = extract_style_ranges(text);
    assert_eq!(ranges.markers, vec![r(2, 5), r(19, 22)]);
    assert_eq!(ranges.fenced_code_block_info, vec![r(5, 7)]);
    assert!(ranges.code_block_content.iter().all(|c| c.end <= 17));
}

#[test]
fn test_ranges_serialize_to_json() {
    let json = serde_json::to_value(extract_style_ranges("**b**")).unwrap();
    assert_eq!(json["bold"], serde_json::json!([{ "start": 0, "end": 5 }]));
    assert_eq!(json["italic"], serde_json::json!([]));
}
