//! The parser generator: parses a BNF grammar file into a [`grammar::Grammar`],
//! computes FIRST and FOLLOW, builds an LL(1) [`table::Table`], and drives a
//! predictive parse into an arena-indexed pna tree ([`pna::PnaArena`]).

mod bnf_lexer;
mod bnf_parser;
mod driver;
mod error;
mod first;
mod follow;
mod grammar;
mod pna;
mod table;

pub use bnf_parser::parse_grammar;
pub use driver::{parse, MAX_PANIC_SKIPS};
pub use error::GrammarError;
pub use first::compute_first_sets;
pub use follow::compute_follow_sets;
pub use grammar::{FirstSet, FollowSet, Grammar, Pda, Production, Symbol, TerminalSymbol};
pub use pna::{PnaArena, PnaEntry, PnaKind};
pub use table::{build_table, Table};
