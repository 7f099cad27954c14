use super::*;
use crate::spec_parser::parse_spec;

#[test]
fn keyword_vs_identifier() {
    let set = parse_spec("if\n\n<letter>{composite} => i|f|x\n<id> => <letter>+\n").unwrap();
    let (tokens, _, diags) = Lexer::new(&set, "ifx if").tokenize();
    assert!(diags.is_empty());
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].lexeme, "ifx");
    assert_eq!(tokens[0].kind, set.get("id").unwrap().kind);
    assert_eq!(tokens[1].lexeme, "if");
    let (if_kind, _) = *set.keywords.get("if").unwrap();
    assert_eq!(tokens[1].kind, if_kind);
    assert_ne!(tokens[1].kind, tokens[0].kind);
}

#[test]
fn maximal_munch_prefers_longest_machine() {
    let set = parse_spec("\n<assignop> => :=\n<colon> => :\n").unwrap();
    let (tokens, _, diags) = Lexer::new(&set, ":=:").tokenize();
    assert!(diags.is_empty());
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].lexeme, ":=");
    assert_eq!(tokens[0].kind, set.get("assignop").unwrap().kind);
    assert_eq!(tokens[1].lexeme, ":");
    assert_eq!(tokens[1].kind, set.get("colon").unwrap().kind);
}

#[test]
fn lexeme_of_exactly_max_lexlen_is_accepted() {
    let set = parse_spec("\n<x> => a+\n").unwrap();
    let input = "a".repeat(31);
    let (tokens, _, diags) = Lexer::new(&set, &input).tokenize();
    assert!(diags.is_empty());
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].lexeme.len(), 31);
}

#[test]
fn lexeme_exceeding_max_lexlen_is_a_token_too_long_error() {
    let set = parse_spec("\n<x> => a+\n").unwrap();
    let input = "a".repeat(32);
    let (tokens, _, diags) = Lexer::new(&set, &input).tokenize();
    assert!(diags.has_errors());
    assert_eq!(tokens[0].kind, Kind::ERROR);
}

#[test]
fn unknown_character_is_reported_and_does_not_abort_the_rest_of_the_line() {
    let set = parse_spec("\n<x> => a\n").unwrap();
    let (tokens, _, diags) = Lexer::new(&set, "a%a").tokenize();
    assert_eq!(tokens.len(), 3);
    assert!(tokens[1].is_error());
    assert!(diags.has_errors());
}
