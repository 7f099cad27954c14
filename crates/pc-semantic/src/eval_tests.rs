use super::*;
use pc_core::Diagnostics;
use pc_parser::{build_table, compute_first_sets, compute_follow_sets, parse, parse_grammar};

fn run(lexer_spec: &str, grammar_src: &str, source: &str) -> EvalOutput {
    let machines = pc_lexer::parse_spec(lexer_spec).unwrap();
    let mut grammar = parse_grammar(grammar_src).unwrap();
    grammar.reconcile_terminals(&machines);
    compute_first_sets(&mut grammar);
    compute_follow_sets(&mut grammar);
    let table = build_table(&grammar).unwrap();

    let lexer = pc_lexer::Lexer::new(&machines, source);
    let (tokens, _listing, lex_diags) = lexer.tokenize();
    assert!(!lex_diags.has_errors());

    let mut diagnostics = Diagnostics::new();
    let arena: PnaArena<Value> = parse(&grammar, &table, &tokens, &mut diagnostics);
    assert!(!diagnostics.has_errors());

    evaluate(&grammar, arena, diagnostics).unwrap()
}

#[test]
fn synthesized_attribute_combines_two_terminal_children() {
    let lexer_spec = "\n<id> => (a|b)+\n<num> => (0|1)+\n";
    let grammar_src = "s => num id { s.val := num.val + id.val }\n";
    let out = run(lexer_spec, grammar_src, "1 a");
    assert!(!out.diagnostics.has_errors());
    let root = out.arena.get(0);
    // `a` doesn't parse as a structural number, so `id.val` is `Error`;
    // adding it to `num.val` (1) collapses the whole sum to `Error` too —
    // this production only really exercises `num.val` reaching the sum.
    assert_eq!(root.synthesized.get("val"), Some(&Value::Error));
}

#[test]
fn indexed_ident_ref_picks_the_nth_occurrence_of_a_repeated_symbol() {
    let lexer_spec = "\n<num> => (0|1)+\n";
    let grammar_src = "s => num num { s.val := num[2].val }\n";
    let out = run(lexer_spec, grammar_src, "0 1");
    let root = out.arena.get(0);
    assert_eq!(root.synthesized.get("val"), Some(&Value::Int(1)));
}

#[test]
fn inherited_attribute_flows_down_to_a_named_child() {
    let lexer_spec = "\n<num> => (0|1)+\n<plus> => \\+\n";
    let grammar_src = "expr => num plus num { num[2].scale := num[1].val expr.val := num[1].val }\n";
    let out = run(lexer_spec, grammar_src, "1 + 0");
    let root = out.arena.get(0);
    let second_num = out.arena.get(root.children[2]);
    assert_eq!(second_num.inherited.get("scale"), Some(&Value::Int(1)));
    assert_eq!(root.synthesized.get("val"), Some(&Value::Int(1)));
}

#[test]
fn terminal_entry_and_type_accessors_read_the_raw_token() {
    let lexer_spec = "\n<id> => (a|b)+\n";
    let grammar_src = "s => id { s.name := id.entry s.kind := id.type }\n";
    let out = run(lexer_spec, grammar_src, "ab");
    let root = out.arena.get(0);
    assert_eq!(root.synthesized.get("name"), Some(&Value::Identifier("ab".to_string())));
    assert!(root.synthesized.contains_key("kind"));
}

#[test]
fn mutating_builtin_fires_at_most_once_across_passes() {
    let lexer_spec = "\n<id> => (a|b)+\n";
    let grammar_src = "s => id { addtype(id.entry, \"integer\") s.v := lookup(id.entry) }\n";
    let out = run(lexer_spec, grammar_src, "ab");
    assert!(!out.diagnostics.has_errors());
    let root = out.arena.get(0);
    assert_eq!(root.synthesized.get("v"), Some(&Value::Code("integer".to_string())));
}

#[test]
fn if_then_else_selects_the_matching_branch() {
    let lexer_spec = "\n<num> => (0|1)+\n";
    let grammar_src = "s => num { if num.val = 0 then s.v := 10 else s.v := 20 end }\n";
    let out = run(lexer_spec, grammar_src, "0");
    let root = out.arena.get(0);
    assert_eq!(root.synthesized.get("v"), Some(&Value::Int(10)));
}

#[test]
fn halt_aborts_evaluation_with_an_error() {
    let lexer_spec = "\n<num> => (0|1)+\n";
    let grammar_src = "s => num { halt() }\n";
    let machines = pc_lexer::parse_spec(lexer_spec).unwrap();
    let mut grammar = parse_grammar(grammar_src).unwrap();
    grammar.reconcile_terminals(&machines);
    compute_first_sets(&mut grammar);
    compute_follow_sets(&mut grammar);
    let table = build_table(&grammar).unwrap();
    let lexer = pc_lexer::Lexer::new(&machines, "0");
    let (tokens, _listing, lex_diags) = lexer.tokenize();
    assert!(!lex_diags.has_errors());
    let mut diagnostics = Diagnostics::new();
    let arena: PnaArena<Value> = parse(&grammar, &table, &tokens, &mut diagnostics);
    let err = evaluate(&grammar, arena, diagnostics).unwrap_err();
    assert!(matches!(err, SemanticError::Halted { .. }));
}

#[test]
fn unresolved_attribute_read_stays_not_evaluated_until_its_source_converges() {
    // `s.v` depends on `num[2]`, which doesn't exist in this production —
    // `find_child` never resolves it, so the read is stuck at
    // `NotEvaluated` forever and the fixpoint loop still terminates.
    let lexer_spec = "\n<num> => (0|1)+\n";
    let grammar_src = "s => num { s.v := num[2].val }\n";
    let out = run(lexer_spec, grammar_src, "0");
    let root = out.arena.get(0);
    assert_eq!(root.synthesized.get("v"), Some(&Value::NotEvaluated));
}
