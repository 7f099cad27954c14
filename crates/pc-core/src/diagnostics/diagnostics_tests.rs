use super::*;

#[test]
fn same_message_same_line_is_deduplicated_on_insert() {
    let mut diags = Diagnostics::new();
    diags.error(3, "Unknown Character").emit();
    diags.error(3, "Unknown Character").emit();
    assert_eq!(diags.len(), 1);
}

#[test]
fn same_message_different_line_is_kept() {
    let mut diags = Diagnostics::new();
    diags.error(3, "Unknown Character").emit();
    diags.error(4, "Unknown Character").emit();
    assert_eq!(diags.len(), 2);
}

#[test]
fn has_errors_ignores_warnings() {
    let mut diags = Diagnostics::new();
    diags.warning(1, "unused identifier").emit();
    assert!(!diags.has_errors());
    diags.error(1, "Redeclaration of identifier").emit();
    assert!(diags.has_errors());
}

#[test]
fn rendered_for_line_filters_by_line() {
    let mut diags = Diagnostics::new();
    diags.error(1, "a").emit();
    diags.error(2, "b").emit();
    assert_eq!(diags.rendered_for_line(1), vec!["error on line 1: a"]);
}

#[test]
fn extend_deduplicates_across_collections() {
    let mut a = Diagnostics::new();
    a.error(1, "dup").emit();
    let mut b = Diagnostics::new();
    b.error(1, "dup").emit();
    b.error(2, "new").emit();
    a.extend(b);
    assert_eq!(a.len(), 2);
}
