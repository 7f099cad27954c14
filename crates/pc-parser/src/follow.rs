//! FOLLOW-set computation, run concurrently: one worker per PDA, released
//! by a single start barrier. Each worker scans the whole grammar for
//! occurrences of its own PDA on a production's right-hand side and writes
//! only to its own terminal set and its own inherit-edge list — no worker
//! ever touches another worker's data, so no further synchronization is
//! needed until all of them have joined.

use std::collections::HashSet;
use std::sync::Barrier;

use pc_core::Kind;

use crate::first::first_of_sequence;
use crate::grammar::{FollowSet, Grammar, Symbol};

pub fn compute_follow_sets(grammar: &mut Grammar) {
    let n = grammar.pdas.len();
    if n == 0 {
        return;
    }
    let start = grammar.start();
    grammar.pdas[start].follow.insert(Kind::EOF);

    let barrier = Barrier::new(n);
    let grammar_ref: &Grammar = grammar;
    let results: Vec<(FollowSet, Vec<usize>)> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..n)
            .map(|target| {
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    scan_for(grammar_ref, target)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("follow worker panicked")).collect()
    });

    let mut inherit_edges: Vec<Vec<usize>> = Vec::with_capacity(n);
    for (idx, (terminals, edges)) in results.into_iter().enumerate() {
        grammar.pdas[idx].follow.extend(terminals);
        inherit_edges.push(edges);
    }

    // Single-threaded, deterministic: iterate the PDA array in declaration
    // order so the observable FOLLOW sets never depend on thread scheduling.
    for idx in 0..n {
        let mut visited = HashSet::new();
        apply_closure(grammar, idx, &inherit_edges, &mut visited);
    }
}

/// Every occurrence of `target` on a production's right-hand side
/// contributes FIRST of its suffix (minus epsilon, which never appears in
/// a FIRST set's terminal member) to `target`'s FOLLOW; a nullable (or
/// empty) suffix additionally means `target` inherits FOLLOW from that
/// production's own nonterminal.
fn scan_for(grammar: &Grammar, target: usize) -> (FollowSet, Vec<usize>) {
    let mut terminals = HashSet::new();
    let mut edges = Vec::new();
    for (lhs, pda) in grammar.pdas.iter().enumerate() {
        for production in &pda.productions {
            let symbols = &production.symbols;
            for (i, symbol) in symbols.iter().enumerate() {
                if let Symbol::Nonterminal(n) = symbol {
                    if *n != target {
                        continue;
                    }
                    let suffix = &symbols[i + 1..];
                    let suffix_first = first_of_sequence(grammar, suffix);
                    terminals.extend(suffix_first.terminals.iter().copied());
                    if suffix.is_empty() || suffix_first.nullable {
                        edges.push(lhs);
                    }
                }
            }
        }
    }
    (terminals, edges)
}

fn apply_closure(
    grammar: &mut Grammar,
    idx: usize,
    inherit_edges: &[Vec<usize>],
    visited: &mut HashSet<usize>,
) {
    if !visited.insert(idx) {
        return;
    }
    for &source in &inherit_edges[idx] {
        if source == idx {
            continue;
        }
        apply_closure(grammar, source, inherit_edges, visited);
        let inherited: Vec<Kind> = grammar.pdas[source].follow.iter().copied().collect();
        grammar.pdas[idx].follow.extend(inherited);
    }
}

#[cfg(test)]
mod follow_tests;
