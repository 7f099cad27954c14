//! The attribute evaluator: the annotation language's own lexer and
//! recursive-descent parser, a scope tree, the built-in action registry, and
//! the multi-pass fixpoint driver that ties them to a parsed pna tree.

pub mod annotation_lexer;
pub mod annotation_parser;
pub mod ast;
pub mod builtins;
pub mod error;
pub mod eval;
pub mod scope;
pub mod value;

pub use builtins::{Builtin, BuiltinCtx};
pub use error::{Result, SemanticError};
pub use eval::{evaluate, EvalOutput};
pub use scope::{Scope, ScopeTree, Symbol};
pub use value::{apply_binop, logical_not, negate, BinOp, FormalArg, Value};
