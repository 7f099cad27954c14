//! Fatal errors `pc` can `?`-propagate to a non-zero exit code (§6 "Exit
//! codes"). Lexical/syntactic/semantic findings never surface here — those
//! are listing diagnostics, reported and exited on separately.

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("property {property:?} given more than once")]
    RepeatedProperty { property: &'static str },

    #[error("{path}: {source}")]
    Io { path: String, source: std::io::Error },

    #[error(transparent)]
    Spec(#[from] pc_lexer::SpecError),

    #[error(transparent)]
    Grammar(#[from] pc_parser::GrammarError),

    #[error(transparent)]
    Semantic(#[from] pc_semantic::SemanticError),
}
