use super::*;
use crate::diagnostics::Diagnostics;

#[test]
fn render_interleaves_lines_and_diagnostics() {
    let mut listing = Listing::new();
    listing.push_line("x := 1;");
    listing.push_line("y := x + z;");

    let mut diags = Diagnostics::new();
    diags.error(2, "undeclared identifier: z").emit();

    let rendered = listing.render(&diags);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "   1 | x := 1;");
    assert_eq!(lines[1], "   2 | y := x + z;");
    assert!(lines[2].contains("undeclared identifier: z"));
}

#[test]
fn line_is_one_indexed() {
    let mut listing = Listing::new();
    listing.push_line("first");
    assert_eq!(listing.line(1), Some("first"));
    assert_eq!(listing.line(2), None);
}
