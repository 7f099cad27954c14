//! Core data structures shared by the lexer, parser and attribute-evaluator
//! crates: the [`Token`] model, an identifier [`trie::Trie`], a generic
//! [`queue::Queue`], the per-line [`listing::Listing`] and the
//! [`diagnostics::Diagnostics`] collection attached to it.

pub mod diagnostics;
pub mod listing;
pub mod queue;
pub mod token;
pub mod trie;

pub use diagnostics::{DiagnosticBuilder, Diagnostics, Severity};
pub use listing::Listing;
pub use queue::Queue;
pub use token::{Kind, KindSpace, Token};
pub use trie::Trie;
