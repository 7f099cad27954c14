use super::*;
use pc_core::Diagnostics;

#[allow(clippy::too_many_arguments)]
fn ctx<'a>(
    scope: &'a mut ScopeTree,
    diags: &'a mut Diagnostics,
    log: &'a mut Vec<String>,
    tempcount: &'a mut u32,
    labelcount: &'a mut u32,
    isfinal: bool,
) -> BuiltinCtx<'a> {
    BuiltinCtx { scope, diagnostics: diags, print_log: log, tempcount, labelcount, isfinal }
}

#[test]
fn from_name_is_case_insensitive() {
    assert_eq!(from_name("AddType"), Some(Builtin::AddType));
    assert_eq!(from_name("HALT"), Some(Builtin::Halt));
    assert_eq!(from_name("nonsense"), None);
}

#[test]
fn addtype_then_lookup_round_trips_the_declared_type() {
    let mut scope = ScopeTree::new("main");
    let mut diags = Diagnostics::new();
    let mut log = Vec::new();
    let (mut tempcount, mut labelcount) = (0, 0);
    let mut c = ctx(&mut scope, &mut diags, &mut log, &mut tempcount, &mut labelcount, false);

    call(Builtin::AddType, vec![Value::Identifier("x".into()), Value::Identifier("integer".into())], 1, &mut c).unwrap();
    let result = call(Builtin::Lookup, vec![Value::Identifier("x".into())], 2, &mut c).unwrap();
    assert_eq!(result, Value::Identifier("integer".into()));
}

#[test]
fn lookup_of_undeclared_identifier_on_final_pass_emits_a_diagnostic() {
    let mut scope = ScopeTree::new("main");
    let mut diags = Diagnostics::new();
    let mut log = Vec::new();
    let (mut tempcount, mut labelcount) = (0, 0);
    let mut c = ctx(&mut scope, &mut diags, &mut log, &mut tempcount, &mut labelcount, true);

    let result = call(Builtin::Lookup, vec![Value::Identifier("nope".into())], 5, &mut c).unwrap();
    assert_eq!(result, Value::Null);
    assert!(diags.has_errors());
}

#[test]
fn redeclaration_of_a_concrete_type_is_always_an_error() {
    // Unlike `lookup`'s "undeclared identifier", this isn't gated on
    // `isfinal`: the driver only ever gives a mutating built-in like
    // `addtype` one attempt, so it has to report immediately.
    let mut scope = ScopeTree::new("main");
    let mut diags = Diagnostics::new();
    let mut log = Vec::new();
    let (mut tempcount, mut labelcount) = (0, 0);
    let mut c = ctx(&mut scope, &mut diags, &mut log, &mut tempcount, &mut labelcount, false);

    call(Builtin::AddType, vec![Value::Identifier("x".into()), Value::Identifier("integer".into())], 1, &mut c).unwrap();
    call(Builtin::AddType, vec![Value::Identifier("x".into()), Value::Identifier("real".into())], 2, &mut c).unwrap();
    assert!(diags.has_errors());
}

#[test]
fn listappend_grows_an_actual_arglist_queue() {
    let mut scope = ScopeTree::new("main");
    let mut diags = Diagnostics::new();
    let mut log = Vec::new();
    let (mut tempcount, mut labelcount) = (0, 0);
    let mut c = ctx(&mut scope, &mut diags, &mut log, &mut tempcount, &mut labelcount, false);

    let list = call(Builtin::MakeListA, vec![Value::Int(1)], 1, &mut c).unwrap();
    let grown = call(Builtin::ListAppend, vec![list, Value::Int(2)], 1, &mut c).unwrap();
    match grown {
        Value::ActualArgList(q) => assert_eq!(q.len(), 2),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn emit_substitutes_labelf_with_the_active_scope_label() {
    let mut scope = ScopeTree::new("main");
    let mut diags = Diagnostics::new();
    let mut log = Vec::new();
    let (mut tempcount, mut labelcount) = (0, 0);
    let mut c = ctx(&mut scope, &mut diags, &mut log, &mut tempcount, &mut labelcount, false);

    call(Builtin::Emit, vec![Value::Identifier("labelf".into()), Value::Code(":".into())], 1, &mut c).unwrap();
    assert_eq!(scope.get(scope.root()).code, vec!["main :"]);
}

#[test]
fn halt_propagates_as_a_fatal_error() {
    let mut scope = ScopeTree::new("main");
    let mut diags = Diagnostics::new();
    let mut log = Vec::new();
    let (mut tempcount, mut labelcount) = (0, 0);
    let mut c = ctx(&mut scope, &mut diags, &mut log, &mut tempcount, &mut labelcount, false);

    let err = call(Builtin::Halt, vec![], 9, &mut c).unwrap_err();
    assert!(matches!(err, SemanticError::Halted { line: 9 }));
}

#[test]
fn a_not_evaluated_argument_short_circuits_to_not_evaluated() {
    let mut scope = ScopeTree::new("main");
    let mut diags = Diagnostics::new();
    let mut log = Vec::new();
    let (mut tempcount, mut labelcount) = (0, 0);
    let mut c = ctx(&mut scope, &mut diags, &mut log, &mut tempcount, &mut labelcount, false);

    let result = call(Builtin::Lookup, vec![Value::NotEvaluated], 1, &mut c).unwrap();
    assert_eq!(result, Value::NotEvaluated);
}

#[test]
fn resettemps_zeroes_both_counters() {
    let mut scope = ScopeTree::new("main");
    let mut diags = Diagnostics::new();
    let mut log = Vec::new();
    let (mut tempcount, mut labelcount) = (7, 3);
    let mut c = ctx(&mut scope, &mut diags, &mut log, &mut tempcount, &mut labelcount, false);

    call(Builtin::ResetTemps, vec![], 1, &mut c).unwrap();
    assert_eq!(tempcount, 0);
    assert_eq!(labelcount, 0);
}
