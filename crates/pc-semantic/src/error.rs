//! Fatal errors: malformed annotation syntax, or the `halt()` built-in.

#[derive(Debug, Clone, thiserror::Error)]
pub enum SemanticError {
    #[error("annotation line {line}: unexpected token, expected {expected}, found {found:?}")]
    UnexpectedToken {
        line: u32,
        expected: &'static str,
        found: String,
    },

    #[error("annotation line {line}: unknown built-in {name:?}")]
    UnknownBuiltin { line: u32, name: String },

    #[error("halt() invoked at line {line}")]
    Halted { line: u32 },
}

pub type Result<T> = std::result::Result<T, SemanticError>;
