//! Parse-node ("pna") tree, arena-indexed rather than owning-handle —
//! nodes refer to parent and children by index so the LHS-attribute read
//! (`X.a`, which needs to walk upward from a child) never needs an owning
//! back-reference.

use std::collections::HashMap;

use pc_core::Token;

#[derive(Debug, Clone)]
pub enum PnaKind {
    Terminal(Token),
    Nonterminal { pda: usize, production: usize },
    /// Allocated but not yet resolved by the driver (a nonterminal frame
    /// whose production hasn't been selected yet, or a terminal frame
    /// still awaiting its matched token).
    Pending,
}

/// One occurrence of a grammar symbol in the parse tree. `V` is the
/// attribute value type — left generic so this crate never needs to know
/// about the attribute engine's `Value` enum.
#[derive(Debug, Clone)]
pub struct PnaEntry<V> {
    pub kind: PnaKind,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub inherited: HashMap<String, V>,
    pub synthesized: HashMap<String, V>,
}

#[derive(Debug, Clone, Default)]
pub struct PnaArena<V> {
    entries: Vec<PnaEntry<V>>,
}

impl<V> PnaArena<V> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn alloc(&mut self, kind: PnaKind, parent: Option<usize>) -> usize {
        let idx = self.entries.len();
        self.entries.push(PnaEntry {
            kind,
            parent,
            children: Vec::new(),
            inherited: HashMap::new(),
            synthesized: HashMap::new(),
        });
        if let Some(p) = parent {
            self.entries[p].children.push(idx);
        }
        idx
    }

    pub fn get(&self, idx: usize) -> &PnaEntry<V> {
        &self.entries[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut PnaEntry<V> {
        &mut self.entries[idx]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod pna_tests;
