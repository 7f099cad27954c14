use super::*;
use crate::bnf_parser::parse_grammar;
use crate::first::compute_first_sets;
use crate::follow::compute_follow_sets;

fn build(src: &str) -> (Grammar, Table) {
    let mut g = parse_grammar(src).unwrap();
    compute_first_sets(&mut g);
    compute_follow_sets(&mut g);
    let t = build_table(&g).unwrap();
    (g, t)
}

#[test]
fn distinct_alternatives_occupy_distinct_cells() {
    let (g, t) = build("s => a | b\n");
    let nt = g.start();
    let a_prod = match &g.pdas[nt].productions[0].symbols[0] {
        crate::grammar::Symbol::Terminal(term) => term.kind,
        _ => panic!(),
    };
    let b_prod = match &g.pdas[nt].productions[1].symbols[0] {
        crate::grammar::Symbol::Terminal(term) => term.kind,
        _ => panic!(),
    };
    assert_eq!(t.get(nt, a_prod), Some(0));
    assert_eq!(t.get(nt, b_prod), Some(1));
}

#[test]
fn nullable_production_is_reachable_through_follow() {
    let (g, t) = build("s => a_rule end\na_rule => a | \u{03B5}\n");
    let a_idx = g.index_of("a_rule").unwrap();
    // a_rule's epsilon alternative must be selected on every terminal in
    // FOLLOW(a_rule), which includes `end`'s kind.
    let end_kind = match &g.pdas[g.start()].productions[0].symbols[1] {
        crate::grammar::Symbol::Terminal(term) => term.kind,
        _ => panic!(),
    };
    assert_eq!(t.get(a_idx, end_kind), Some(1));
}

#[test]
fn two_productions_starting_with_the_same_terminal_conflict() {
    let mut g = parse_grammar("s => same x | same y\n").unwrap();
    compute_first_sets(&mut g);
    compute_follow_sets(&mut g);
    let err = build_table(&g).unwrap_err();
    assert!(matches!(err, GrammarError::TableConflict { .. }));
}
