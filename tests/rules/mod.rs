mod blank_lines_test;
mod blockquote_format_test;
mod heading_format_test;
mod trailing_spaces_test;
