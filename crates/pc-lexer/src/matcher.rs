//! Maximal-munch matching against a compiled [`MachineSet`], and the token
//! emission loop that drives it over source text.

use std::collections::HashMap;

use pc_core::{Diagnostics, Kind, Listing, Token, Trie};

use crate::machine::{Machine, MachineSet};
use crate::nfa::{EdgeAttribute, EdgeLabel, Nfa, StateId};

#[derive(Debug, Clone, Copy)]
struct MatchOutcome {
    length: usize,
    attribute: i64,
}

/// Attempt a match of `nfa` starting at `state` against `buf`, honoring a
/// remaining-character budget threaded down from any enclosing edge
/// `length` caps. Returns the longest successful path; `None` if every
/// path either mismatches or overflows its budget.
fn match_from_state(
    machines: &MachineSet,
    nfa: &Nfa,
    state: StateId,
    buf: &[char],
    budget: Option<u32>,
) -> Option<MatchOutcome> {
    if state == nfa.accept {
        return Some(MatchOutcome { length: 0, attribute: 0 });
    }

    let mut best: Option<MatchOutcome> = None;
    for edge in &nfa.states[state].edges {
        let edge_budget = match edge.annotation.length {
            Some(cap) => Some(budget.map_or(cap, |b| b.min(cap))),
            None => budget,
        };

        let candidate = match &edge.label {
            EdgeLabel::Epsilon => {
                match_from_state(machines, nfa, edge.target, buf, edge_budget)
            }
            EdgeLabel::Terminal(c) => {
                if buf.first() != Some(c) {
                    None
                } else if edge_budget == Some(0) {
                    None
                } else {
                    let next_budget = edge_budget.map(|b| b - 1);
                    match_from_state(machines, nfa, edge.target, &buf[1..], next_budget)
                        .map(|m| MatchOutcome { length: 1 + m.length, attribute: m.attribute })
                }
            }
            EdgeLabel::Machine(name) => {
                let sub = machines.get(name)?;
                let sub_budget = Some(edge_budget.map_or(sub.flags.lexlen, |b| b.min(sub.flags.lexlen)));
                match_from_state(machines, &sub.nfa, sub.nfa.start, buf, sub_budget).and_then(|inner| {
                    let remaining_budget = edge_budget.map(|b| b.saturating_sub(inner.length as u32));
                    if edge_budget.is_some_and(|b| inner.length as u32 > b) {
                        return None;
                    }
                    match_from_state(machines, nfa, edge.target, &buf[inner.length..], remaining_budget)
                        .map(|m| MatchOutcome { length: inner.length + m.length, attribute: inner.attribute.max(m.attribute) })
                })
            }
        };

        let candidate = candidate.map(|outcome| {
            let attribute = match edge.annotation.attribute {
                EdgeAttribute::Fixed(n) if n != 0 => n,
                _ => outcome.attribute,
            };
            MatchOutcome { length: outcome.length, attribute }
        });

        best = match (best, candidate) {
            (None, c) => c,
            (b, None) => b,
            (Some(b), Some(c)) => Some(if c.length > b.length { c } else { b }),
        };
    }
    best
}

/// Try every top-level machine at the current position, returning the
/// longest match, ties broken by declaration order.
fn best_top_level_match<'m>(
    machines: &'m MachineSet,
    buf: &[char],
) -> Option<(&'m Machine, MatchOutcome)> {
    let mut best: Option<(&Machine, MatchOutcome)> = None;
    for m in machines.top_level() {
        let Some(outcome) = match_from_state(machines, &m.nfa, m.nfa.start, buf, None) else {
            continue;
        };
        if outcome.length == 0 {
            continue;
        }
        // Edge-level `length` caps prune individual paths during traversal;
        // the machine's own `lexlen` is instead a post-condition: a greedy
        // match that would run past it is a failure, not a truncation.
        if outcome.length as u32 > m.flags.lexlen {
            continue;
        }
        best = match best {
            None => Some((m, outcome)),
            Some((bm, bo)) => {
                if outcome.length > bo.length {
                    Some((m, outcome))
                } else {
                    Some((bm, bo))
                }
            }
        };
    }
    best
}

/// Drives the matcher over source text, emitting tokens, maintaining the
/// listing, and interning `attr_id` machine lexemes.
pub struct Lexer<'m> {
    machines: &'m MachineSet,
    src: Vec<char>,
    pos: usize,
    line: u32,
    line_start: usize,
    pub listing: Listing,
    pub diagnostics: Diagnostics,
    id_tables: HashMap<String, (Trie<i64>, i64)>,
}

impl<'m> Lexer<'m> {
    pub fn new(machines: &'m MachineSet, source: &str) -> Self {
        Self {
            machines,
            src: source.chars().collect(),
            pos: 0,
            line: 1,
            line_start: 0,
            listing: Listing::new(),
            diagnostics: Diagnostics::new(),
            id_tables: HashMap::new(),
        }
    }

    fn remaining(&self) -> &[char] {
        &self.src[self.pos..]
    }

    fn advance(&mut self, n: usize) {
        for _ in 0..n {
            if self.src[self.pos] == '\n' {
                self.finish_line();
            }
            self.pos += 1;
        }
    }

    fn finish_line(&mut self) {
        let text: String = self.src[self.line_start..self.pos].iter().collect();
        self.listing.push_line(text);
        self.line += 1;
        self.line_start = self.pos + 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.src.get(self.pos) {
            if c.is_whitespace() {
                self.advance(1);
            } else {
                break;
            }
        }
    }

    pub fn tokenize(mut self) -> (Vec<Token>, Listing, Diagnostics) {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            if self.pos >= self.src.len() {
                break;
            }
            let line = self.line;
            match best_top_level_match(self.machines, self.remaining()) {
                Some((machine, outcome)) => {
                    let lexeme: String = self.src[self.pos..self.pos + outcome.length].iter().collect();
                    let token = self.classify(machine, &lexeme, outcome.attribute, line);
                    self.advance(outcome.length);
                    tokens.push(token);
                }
                None => {
                    let bad = self.src[self.pos];
                    let message = if self.remaining().len() > crate::machine::MAX_LEXLEN as usize {
                        "Token too long"
                    } else {
                        "Unknown Character"
                    };
                    self.diagnostics.error(line, message).emit();
                    tokens.push(Token::new(bad.to_string(), Kind::ERROR, 0, line));
                    self.advance(1);
                }
            }
        }
        if self.line_start < self.pos {
            self.finish_line_at_eof();
        }
        (tokens, self.listing, self.diagnostics)
    }

    fn finish_line_at_eof(&mut self) {
        let text: String = self.src[self.line_start..self.pos].iter().collect();
        self.listing.push_line(text);
        self.line_start = self.pos;
    }

    fn classify(&mut self, machine: &Machine, lexeme: &str, nfa_attribute: i64, line: u32) -> Token {
        if let Some(&(kind, attribute)) = self.machines.keywords.get(lexeme) {
            return Token::new(lexeme, kind, attribute, line);
        }
        if machine.flags.attr_id {
            let (trie, counter) = self
                .id_tables
                .entry(machine.name.clone())
                .or_insert_with(|| (Trie::new(), 0));
            let attribute = match trie.get(lexeme) {
                Some(a) => *a,
                None => {
                    *counter += 1;
                    let fresh = *counter;
                    trie.insert(lexeme, fresh);
                    fresh
                }
            };
            return Token::new(lexeme, machine.kind, attribute, line);
        }
        Token::new(lexeme, machine.kind, nfa_attribute, line)
    }
}

#[cfg(test)]
mod matcher_tests;
