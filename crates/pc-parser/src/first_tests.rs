use super::*;
use crate::bnf_parser::parse_grammar;
use pc_core::token::KindAllocator;
use pc_core::Kind;

fn kind(n: u32) -> Kind {
    KindAllocator::semantics(n)
}

#[test]
fn first_of_terminal_leading_production_is_itself() {
    let mut g = parse_grammar("a => x\n").unwrap();
    compute_first_sets(&mut g);
    assert!(!g.pdas[0].first.nullable);
    assert_eq!(g.pdas[0].first.terminals.len(), 1);
}

#[test]
fn epsilon_production_makes_the_nonterminal_nullable() {
    let mut g = parse_grammar("a => \u{03B5}\n").unwrap();
    compute_first_sets(&mut g);
    assert!(g.pdas[0].first.nullable);
    assert!(g.pdas[0].first.terminals.is_empty());
}

#[test]
fn first_propagates_through_a_nullable_leading_nonterminal() {
    let mut g = parse_grammar("a => b c\nb => \u{03B5}\nc => y\n").unwrap();
    compute_first_sets(&mut g);
    // a's first must include c's first (b contributes nothing, being
    // nullable) and a must itself be nullable only if c is too.
    assert!(!g.pdas[0].first.nullable);
    assert_eq!(g.pdas[0].first.terminals, g.pdas[2].first.terminals);
}

#[test]
fn left_recursive_rule_does_not_infinite_loop() {
    let mut g = parse_grammar("a => a x | y\n").unwrap();
    compute_first_sets(&mut g);
    assert!(!g.pdas[0].first.nullable);
    assert_eq!(g.pdas[0].first.terminals.len(), 1);
}

#[test]
fn first_of_sequence_stops_at_first_non_nullable_symbol() {
    use crate::grammar::{Symbol, TerminalSymbol};
    let mut g = parse_grammar("b => \u{03B5}\n").unwrap();
    compute_first_sets(&mut g);
    let seq = vec![
        Symbol::Nonterminal(0),
        Symbol::Terminal(TerminalSymbol { lexeme: "z".into(), kind: kind(7) }),
    ];
    let fs = first_of_sequence(&g, &seq);
    assert!(!fs.nullable);
    assert!(fs.terminals.contains(&kind(7)));
}
