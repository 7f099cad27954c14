//! The compiled output of the lexer generator: one [`Machine`] per
//! declared NFA plus the shared keyword table.

use pc_core::trie::Trie;
use pc_core::Kind;

use crate::nfa::Nfa;

pub const MAX_LEXLEN: u32 = 31;

#[derive(Debug, Clone, Default)]
pub struct MachineFlags {
    /// Auto-assigns a unique attribute to each distinct matched lexeme (as
    /// for identifiers).
    pub attr_id: bool,
    /// May not participate in top-level matching, only as a callee.
    pub composite: bool,
    pub typecount: Option<i64>,
    /// Hard upper bound on any match by this machine. Defaults to
    /// [`MAX_LEXLEN`].
    pub lexlen: u32,
}

impl MachineFlags {
    pub fn new() -> Self {
        Self {
            lexlen: MAX_LEXLEN,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Machine {
    pub name: String,
    pub kind: Kind,
    pub nfa: Nfa,
    pub flags: MachineFlags,
    /// Position in declaration order, used to break maximal-munch ties.
    pub declared_order: usize,
}

/// The full compiled regex spec: every declared machine plus the keyword
/// trie, which lookup consults before a machine's matched lexeme is
/// accepted.
#[derive(Debug, Default)]
pub struct MachineSet {
    pub machines: Vec<Machine>,
    pub keywords: Trie<(Kind, i64)>,
}

impl MachineSet {
    pub fn get(&self, name: &str) -> Option<&Machine> {
        self.machines.iter().find(|m| m.name == name)
    }

    /// Non-composite machines, in declaration order — the set tried at
    /// every source position during matching.
    pub fn top_level(&self) -> impl Iterator<Item = &Machine> {
        self.machines.iter().filter(|m| !m.flags.composite)
    }
}
