//! The predictive parser: an explicit symbol stack driven by the LL(1)
//! table, building the pna tree as it descends.
//!
//! On a terminal mismatch or an empty table cell, the driver panics: it
//! discards lookahead tokens until one lands back in the expected set (the
//! single terminal it wanted, or the current nonterminal's FOLLOW), bounded
//! by [`MAX_PANIC_SKIPS`] so a pathological input can't spin forever before
//! a fatal diagnostic is raised instead.

use pc_core::{Diagnostics, Kind, Token};

use crate::grammar::{Grammar, Symbol};
use crate::pna::{PnaArena, PnaKind};
use crate::table::Table;

/// Upper bound on tokens skipped during one panic-mode recovery before the
/// driver gives up on resynchronizing and emits a fatal parse error instead
/// of looping on a broken source file.
pub const MAX_PANIC_SKIPS: usize = 64;

struct Frame {
    symbol: Symbol,
    pna: Option<usize>,
}

pub fn parse<V>(
    grammar: &Grammar,
    table: &Table,
    tokens: &[Token],
    diagnostics: &mut Diagnostics,
) -> PnaArena<V> {
    let mut arena = PnaArena::new();
    let start = grammar.start();
    let root = arena.alloc(PnaKind::Pending, None);
    let mut stack = vec![Frame { symbol: Symbol::Nonterminal(start), pna: Some(root) }];
    let mut pos = 0usize;

    while let Some(frame) = stack.pop() {
        let lookahead = current_kind(tokens, pos);
        match frame.symbol {
            Symbol::Epsilon => {}
            Symbol::Terminal(expected) => {
                if lookahead == expected.kind {
                    if let Some(pna) = frame.pna {
                        arena.get_mut(pna).kind = PnaKind::Terminal(tokens[pos].clone());
                    }
                    pos += 1;
                } else {
                    let line = tokens.get(pos).map(|t| t.line).unwrap_or(0);
                    diagnostics
                        .error(line, format!("expected {:?}, found {:?}", expected.kind, lookahead))
                        .emit();
                    pos = skip_until(tokens, pos, |k| k == expected.kind);
                    if current_kind(tokens, pos) == expected.kind {
                        if let Some(pna) = frame.pna {
                            arena.get_mut(pna).kind = PnaKind::Terminal(tokens[pos].clone());
                        }
                        pos += 1;
                    }
                }
            }
            Symbol::Nonterminal(nt) => match table.get(nt, lookahead) {
                Some(production_idx) => {
                    if let Some(pna) = frame.pna {
                        arena.get_mut(pna).kind = PnaKind::Nonterminal { pda: nt, production: production_idx };
                    }
                    let production = &grammar.pdas[nt].productions[production_idx];
                    // Allocate children left-to-right so `PnaEntry::children`
                    // reflects production order, then push the frames in
                    // reverse so the stack (LIFO) still visits them
                    // left-to-right.
                    let child_pnas: Vec<Option<usize>> = production
                        .symbols
                        .iter()
                        .map(|symbol| {
                            frame.pna.and_then(|p| match symbol {
                                Symbol::Epsilon => None,
                                _ => Some(arena.alloc(PnaKind::Pending, Some(p))),
                            })
                        })
                        .collect();
                    for (symbol, child_pna) in production.symbols.iter().zip(child_pnas).rev() {
                        stack.push(Frame {
                            symbol: symbol.clone(),
                            pna: child_pna,
                        });
                    }
                }
                None => {
                    let line = tokens.get(pos).map(|t| t.line).unwrap_or(0);
                    diagnostics
                        .error(line, format!("unexpected {lookahead:?} while parsing {:?}", grammar.pdas[nt].name))
                        .emit();
                    let follow = &grammar.pdas[nt].follow;
                    pos = skip_until(tokens, pos, |k| follow.contains(&k) || k == Kind::EOF);
                }
            },
        }
    }
    arena
}

fn current_kind(tokens: &[Token], pos: usize) -> Kind {
    tokens.get(pos).map(|t| t.kind).unwrap_or(Kind::EOF)
}

/// Advance `pos` until `stop` matches the lookahead kind, the token stream
/// is exhausted, or [`MAX_PANIC_SKIPS`] tokens have been discarded.
fn skip_until(tokens: &[Token], mut pos: usize, stop: impl Fn(Kind) -> bool) -> usize {
    let mut skipped = 0;
    while skipped < MAX_PANIC_SKIPS && !stop(current_kind(tokens, pos)) && pos < tokens.len() {
        pos += 1;
        skipped += 1;
    }
    pos
}

#[cfg(test)]
mod driver_tests;
