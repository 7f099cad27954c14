//! The grammar table: one [`Pda`] per nonterminal, each holding its
//! productions and, once computed, its FIRST and FOLLOW sets.

use std::collections::HashSet;

use indexmap::IndexMap;
use pc_core::Kind;

/// One grammar symbol appearing in a production's right-hand side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Terminal(TerminalSymbol),
    /// Index into [`Grammar::pdas`].
    Nonterminal(usize),
    Epsilon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSymbol {
    pub lexeme: String,
    /// Resolved by [`Grammar::reconcile_terminals`]. `Kind::ERROR` until
    /// then, or permanently if the lexeme never matched a machine or
    /// keyword.
    pub kind: Kind,
}

#[derive(Debug, Clone)]
pub struct Production {
    pub symbols: Vec<Symbol>,
    /// Raw annotation text, re-tokenized by the attribute engine using its
    /// own embedded regex spec — the parser generator does not interpret
    /// it.
    pub annotation: Option<String>,
}

/// FIRST(A): the set of terminal kinds that can begin a derivation of A,
/// plus whether A can derive epsilon. Epsilon is tracked out-of-band so it
/// can never leak into a FOLLOW set by accident.
#[derive(Debug, Clone, Default)]
pub struct FirstSet {
    pub terminals: HashSet<Kind>,
    pub nullable: bool,
}

pub type FollowSet = HashSet<Kind>;

#[derive(Debug, Clone)]
pub struct Pda {
    pub name: String,
    pub productions: Vec<Production>,
    pub first: FirstSet,
    pub follow: FollowSet,
}

impl Pda {
    fn new(name: String) -> Self {
        Self {
            name,
            productions: Vec::new(),
            first: FirstSet::default(),
            follow: FollowSet::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Grammar {
    pub pdas: Vec<Pda>,
    names: IndexMap<String, usize>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> usize {
        0
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    pub(crate) fn declare(&mut self, name: String) -> Option<usize> {
        if self.names.contains_key(&name) {
            return None;
        }
        let idx = self.pdas.len();
        self.names.insert(name.clone(), idx);
        self.pdas.push(Pda::new(name));
        Some(idx)
    }

    /// Resolve every unmatched terminal's lexeme against the compiled
    /// machine set and keyword table (§4.2 "Token/kind reconciliation").
    /// Terminals whose lexeme matches neither remain `Kind::ERROR` and
    /// surface at first use.
    pub fn reconcile_terminals(&mut self, machines: &pc_lexer::MachineSet) {
        for pda in &mut self.pdas {
            for production in &mut pda.productions {
                for symbol in &mut production.symbols {
                    if let Symbol::Terminal(t) = symbol {
                        if let Some(m) = machines.get(&t.lexeme) {
                            t.kind = m.kind;
                        } else if let Some(&(kind, _)) = machines.keywords.get(&t.lexeme) {
                            t.kind = kind;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod grammar_tests;
