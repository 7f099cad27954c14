use super::*;
use pc_core::Kind;

#[test]
fn declare_assigns_sequential_indices_and_rejects_duplicates() {
    let mut g = Grammar::new();
    assert_eq!(g.declare("stmt".into()), Some(0));
    assert_eq!(g.declare("expr".into()), Some(1));
    assert_eq!(g.declare("stmt".into()), None);
    assert_eq!(g.index_of("expr"), Some(1));
    assert_eq!(g.index_of("missing"), None);
}

#[test]
fn start_is_the_first_declared_nonterminal() {
    let mut g = Grammar::new();
    g.declare("program".into());
    g.declare("stmt".into());
    assert_eq!(g.start(), 0);
    assert_eq!(g.pdas[g.start()].name, "program");
}

#[test]
fn reconcile_terminals_prefers_machines_over_keywords() {
    let mut g = Grammar::new();
    let idx = g.declare("stmt".into()).unwrap();
    g.pdas[idx].productions.push(Production {
        symbols: vec![
            Symbol::Terminal(TerminalSymbol { lexeme: "id".into(), kind: Kind::ERROR }),
            Symbol::Terminal(TerminalSymbol { lexeme: "if".into(), kind: Kind::ERROR }),
            Symbol::Terminal(TerminalSymbol { lexeme: "nosuchthing".into(), kind: Kind::ERROR }),
        ],
        annotation: None,
    });

    let machines = pc_lexer::parse_spec("if\n\n<id> => (a|b)+\n").unwrap();

    g.reconcile_terminals(&machines);
    let Symbol::Terminal(id_sym) = &g.pdas[idx].productions[0].symbols[0] else { panic!() };
    assert_eq!(id_sym.kind, machines.get("id").unwrap().kind);

    let Symbol::Terminal(if_sym) = &g.pdas[idx].productions[0].symbols[1] else { panic!() };
    assert_eq!(if_sym.kind, machines.keywords.get("if").unwrap().0);

    let Symbol::Terminal(unknown_sym) = &g.pdas[idx].productions[0].symbols[2] else { panic!() };
    assert_eq!(unknown_sym.kind, Kind::ERROR);
}

#[test]
fn first_set_default_is_empty_and_not_nullable() {
    let first = FirstSet::default();
    assert!(first.terminals.is_empty());
    assert!(!first.nullable);
}
