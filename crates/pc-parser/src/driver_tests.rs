use super::*;
use crate::bnf_parser::parse_grammar;
use crate::first::compute_first_sets;
use crate::follow::compute_follow_sets;
use crate::table::build_table;
use pc_core::Token;

fn lex(spec: &str, source: &str) -> Vec<Token> {
    let machines = pc_lexer::parse_spec(spec).unwrap();
    let lexer = pc_lexer::Lexer::new(&machines, source);
    let (tokens, _listing, diagnostics) = lexer.tokenize();
    assert!(!diagnostics.has_errors());
    tokens
}

fn prepare(spec: &str, grammar_src: &str) -> (Grammar, Table) {
    let machines = pc_lexer::parse_spec(spec).unwrap();
    let mut grammar = parse_grammar(grammar_src).unwrap();
    grammar.reconcile_terminals(&machines);
    compute_first_sets(&mut grammar);
    compute_follow_sets(&mut grammar);
    let table = build_table(&grammar).unwrap();
    (grammar, table)
}

#[test]
fn parses_a_single_identifier_without_diagnostics() {
    let spec = "\n<id> => (a|b)+\n";
    let (grammar, table) = prepare(spec, "s => id\n");
    let tokens = lex(spec, "ab");

    let mut diags = Diagnostics::new();
    let arena: PnaArena<i64> = parse(&grammar, &table, &tokens, &mut diags);
    assert!(!diags.has_errors());
    assert_eq!(arena.len(), 2); // root `s` + the one `id` terminal
    match &arena.get(0).kind {
        PnaKind::Nonterminal { pda, .. } => assert_eq!(*pda, grammar.start()),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn children_are_recorded_in_left_to_right_production_order() {
    let spec = "\n<id> => (a|b)+\n<num> => (0|1)+\n";
    let (grammar, table) = prepare(spec, "s => num id\n");
    let tokens = lex(spec, "0 a");

    let mut diags = Diagnostics::new();
    let arena: PnaArena<i64> = parse(&grammar, &table, &tokens, &mut diags);
    assert!(!diags.has_errors());
    let root = arena.get(0);
    assert_eq!(root.children.len(), 2);
    let first = arena.get(root.children[0]);
    let second = arena.get(root.children[1]);
    match (&first.kind, &second.kind) {
        (PnaKind::Terminal(a), PnaKind::Terminal(b)) => {
            assert_eq!(a.lexeme, "0");
            assert_eq!(b.lexeme, "a");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn mismatched_terminal_is_recorded_as_a_diagnostic() {
    let spec = "\n<id> => (a|b)+\n<num> => (0|1)+\n";
    let (grammar, table) = prepare(spec, "s => num id\n");
    // `num id` is expected but the source starts with an identifier.
    let bad_tokens = lex(spec, "a 0");

    let mut diags = Diagnostics::new();
    let _arena: PnaArena<i64> = parse(&grammar, &table, &bad_tokens, &mut diags);
    assert!(diags.has_errors());
}
