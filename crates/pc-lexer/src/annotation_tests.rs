use super::*;

#[test]
fn parses_mixed_numeric_and_flag_entries() {
    let map = parse_annotation(" attribute = 3, attcount", 1).unwrap();
    assert_eq!(map.number("attribute"), Some(3));
    assert!(map.flag("attcount"));
}

#[test]
fn duplicate_key_is_a_hard_error() {
    let err = parse_annotation("attribute = 1, attribute = 2", 1).unwrap_err();
    assert!(matches!(err, SpecError::DuplicateAnnotationKey { .. }));
}

#[test]
fn non_numeric_value_is_a_hard_error() {
    let err = parse_annotation("length = abc", 1).unwrap_err();
    assert!(matches!(err, SpecError::UnexpectedToken { .. }));
}
