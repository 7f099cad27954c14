use super::*;

#[test]
fn parses_keyword_block_and_one_machine() {
    let spec = "if\n\n<id> => a\n";
    let set = parse_spec(spec).unwrap();
    assert!(set.keywords.contains("if"));
    assert_eq!(set.machines.len(), 1);
    assert_eq!(set.machines[0].name, "id");
}

#[test]
fn alternation_at_one_level_produces_a_single_union_frame() {
    let spec = "\n<x> => a|b|c\n";
    let set = parse_spec(spec).unwrap();
    let nfa = &set.machines[0].nfa;
    assert_eq!(nfa.states[nfa.start].edges.len(), 3);
}

#[test]
fn duplicate_machine_name_is_a_hard_error() {
    let spec = "\n<x> => a\n<x> => b\n";
    let err = parse_spec(spec).unwrap_err();
    assert!(matches!(err, SpecError::DuplicateMachine { .. }));
}

#[test]
fn reference_to_undeclared_machine_is_a_hard_error() {
    let spec = "\n<x> => <nope>\n";
    let err = parse_spec(spec).unwrap_err();
    assert!(matches!(err, SpecError::UndefinedMachine { .. }));
}

#[test]
fn forward_reference_between_machines_resolves() {
    let spec = "\n<id> => <letter>+\n<letter> => a\n";
    let set = parse_spec(spec).unwrap();
    assert_eq!(set.machines.len(), 2);
}

#[test]
fn edge_annotation_sets_fixed_attribute() {
    let spec = "\n<colon> => :{attribute = 5}\n";
    let set = parse_spec(spec).unwrap();
    let nfa = &set.machines[0].nfa;
    let edge = &nfa.states[nfa.start].edges[0];
    assert_eq!(edge.annotation.attribute, crate::nfa::EdgeAttribute::Fixed(5));
}

#[test]
fn machine_level_length_overrides_max_lexlen() {
    let spec = "\n<id>{length = 8} => a\n";
    let set = parse_spec(spec).unwrap();
    assert_eq!(set.machines[0].flags.lexlen, 8);
}

#[test]
fn composite_and_idtype_are_mutually_exclusive_last_wins() {
    let spec = "\n<x>{idtype, composite} => a\n";
    let set = parse_spec(spec).unwrap();
    assert!(set.machines[0].flags.composite);
    assert!(!set.machines[0].flags.attr_id);
}

#[test]
fn idtype_assigns_a_per_lexeme_attribute() {
    let spec = "\n<id>{idtype} => a\n";
    let set = parse_spec(spec).unwrap();
    assert!(set.machines[0].flags.attr_id);
    assert!(!set.machines[0].flags.composite);
}

#[test]
fn custom_allocator_draws_kinds_from_the_semantics_partition() {
    let spec = "\n<x> => a\n";
    let set = parse_spec_with_allocator(spec, pc_core::token::KindAllocator::for_semantics_language()).unwrap();
    assert_eq!(set.machines[0].kind.space(), pc_core::KindSpace::Semantics);
}
