//! Fatal, spec-parse-time errors. These never reach the listing: they abort
//! compilation before a single source token is lexed.

/// A fatal error while parsing a regex specification file.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SpecError {
    #[error("line {line}: unexpected character {found:?}")]
    UnexpectedChar { line: u32, found: char },

    #[error("line {line}: unterminated annotation block")]
    UnterminatedAnnotation { line: u32 },

    #[error("line {line}: annotation key {key:?} assigned twice")]
    DuplicateAnnotationKey { line: u32, key: String },

    #[error("line {line}: unrecognized annotation key {key:?}")]
    UnrecognizedAnnotationKey { line: u32, key: String },

    #[error("line {line}: expected {expected}, found {found:?}")]
    UnexpectedToken {
        line: u32,
        expected: &'static str,
        found: String,
    },

    #[error("machine {name:?} declared more than once")]
    DuplicateMachine { name: String },

    #[error("reference to undefined machine {name:?}")]
    UndefinedMachine { name: String },

    #[error("machine kind budget exhausted: too many machines declared")]
    MachineBudgetExhausted,
}

pub type Result<T> = std::result::Result<T, SpecError>;
