//! FIRST-set computation. Straightforward recursion with memoization per
//! PDA; cycles are broken by an in-progress marker. No thread cooperation
//! is required — unlike FOLLOW, a nonterminal's FIRST set never depends on
//! where it is used, only on its own productions.

use std::collections::HashSet;

use crate::grammar::{FirstSet, Grammar, Symbol};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

pub fn compute_first_sets(grammar: &mut Grammar) {
    let mut marks = vec![None; grammar.pdas.len()];
    for idx in 0..grammar.pdas.len() {
        if marks[idx].is_none() {
            first_of(grammar, idx, &mut marks);
        }
    }
}

fn first_of(grammar: &mut Grammar, idx: usize, marks: &mut Vec<Option<Mark>>) -> FirstSet {
    match marks[idx] {
        Some(Mark::Done) => return grammar.pdas[idx].first.clone(),
        // A cycle: `A => A ...` contributes nothing new at this recursion
        // depth — the outer call that is already in progress will pick up
        // whatever this pass adds to `grammar.pdas[idx].first` directly.
        Some(Mark::InProgress) => return grammar.pdas[idx].first.clone(),
        None => {}
    }
    marks[idx] = Some(Mark::InProgress);

    let mut result = FirstSet::default();
    let production_count = grammar.pdas[idx].productions.len();
    for p in 0..production_count {
        let symbols = grammar.pdas[idx].productions[p].symbols.clone();
        let mut all_nullable_so_far = true;
        for symbol in &symbols {
            match symbol {
                Symbol::Epsilon => {
                    break;
                }
                Symbol::Terminal(t) => {
                    result.terminals.insert(t.kind);
                    all_nullable_so_far = false;
                    break;
                }
                Symbol::Nonterminal(other) => {
                    let other_first = if *other == idx {
                        grammar.pdas[idx].first.clone()
                    } else {
                        first_of(grammar, *other, marks)
                    };
                    result.terminals.extend(other_first.terminals.iter().copied());
                    if !other_first.nullable {
                        all_nullable_so_far = false;
                        break;
                    }
                }
            }
        }
        if symbols.is_empty() || all_nullable_so_far {
            result.nullable = true;
        }
        grammar.pdas[idx].first = result.clone();
    }
    if production_count == 0 {
        result.nullable = true;
    }

    marks[idx] = Some(Mark::Done);
    grammar.pdas[idx].first = result.clone();
    result
}

/// FIRST of a whole symbol sequence (used when computing FOLLOW). Walks
/// symbols left to right, stopping at the first non-nullable one.
pub fn first_of_sequence(grammar: &Grammar, symbols: &[Symbol]) -> FirstSet {
    let mut result = FirstSet { terminals: HashSet::new(), nullable: true };
    for symbol in symbols {
        match symbol {
            Symbol::Epsilon => break,
            Symbol::Terminal(t) => {
                result.terminals.insert(t.kind);
                result.nullable = false;
                break;
            }
            Symbol::Nonterminal(idx) => {
                let nf = &grammar.pdas[*idx].first;
                result.terminals.extend(nf.terminals.iter().copied());
                if !nf.nullable {
                    result.nullable = false;
                    break;
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod first_tests;
