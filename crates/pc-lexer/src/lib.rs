//! The lexer generator: parses a regex specification into per-machine
//! NFAs (§4.1), then matches those NFAs against source text by maximal
//! munch, producing a token stream plus a rendered [`pc_core::Listing`].

pub mod annotation;
pub mod error;
pub mod machine;
pub mod matcher;
pub mod nfa;
pub mod spec_lexer;
pub mod spec_parser;

pub use error::SpecError;
pub use machine::{Machine, MachineFlags, MachineSet, MAX_LEXLEN};
pub use matcher::Lexer;
pub use spec_parser::{parse_spec, parse_spec_with_allocator};
