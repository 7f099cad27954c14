use super::*;
use crate::grammar::Symbol;

#[test]
fn parses_alternatives_and_resolves_forward_references() {
    let g = parse_grammar("stmt => expr | if\nexpr => id\n$").unwrap();
    assert_eq!(g.pdas.len(), 2);
    assert_eq!(g.pdas[0].name, "stmt");
    assert_eq!(g.pdas[0].productions.len(), 2);
    assert_eq!(g.pdas[0].productions[0].symbols, vec![Symbol::Nonterminal(1)]);
    match &g.pdas[0].productions[1].symbols[..] {
        [Symbol::Terminal(t)] => assert_eq!(t.lexeme, "if"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn epsilon_production_is_distinct_from_terminal() {
    let g = parse_grammar("empty => \u{03B5}\n").unwrap();
    assert_eq!(g.pdas[0].productions[0].symbols, vec![Symbol::Epsilon]);
}

#[test]
fn duplicate_nonterminal_is_a_hard_error() {
    let err = parse_grammar("a => x\na => y\n").unwrap_err();
    assert!(matches!(err, GrammarError::DuplicateNonterminal { name } if name == "a"));
}

#[test]
fn trailing_annotation_is_attached_to_its_production() {
    let g = parse_grammar("a => x { v := 1 }\n").unwrap();
    assert_eq!(g.pdas[0].productions[0].annotation.as_deref(), Some(" v := 1 "));
}

#[test]
fn start_is_the_first_rule_declared_regardless_of_reference_order() {
    let g = parse_grammar("program => stmt\nstmt => x\n").unwrap();
    assert_eq!(g.start(), 0);
    assert_eq!(g.pdas[g.start()].name, "program");
}
