//! Fatal, spec-parse-time errors for the BNF grammar.

#[derive(Debug, Clone, thiserror::Error)]
pub enum GrammarError {
    #[error("line {line}: unexpected token, expected {expected}, found {found:?}")]
    UnexpectedToken {
        line: u32,
        expected: &'static str,
        found: String,
    },

    #[error("nonterminal {name:?} redefined (already declared)")]
    DuplicateNonterminal { name: String },

    #[error("production for {nonterminal:?} references undefined nonterminal {name:?}")]
    UndefinedNonterminal { nonterminal: String, name: String },

    #[error("LL(1) conflict in table[{nonterminal:?}, {terminal:?}]: production {a} and production {b} both apply")]
    TableConflict {
        nonterminal: String,
        terminal: String,
        a: usize,
        b: usize,
    },
}

pub type Result<T> = std::result::Result<T, GrammarError>;
