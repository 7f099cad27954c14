//! Argument parsing and default file-path resolution (§6 "CLI surface").

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::error::CliError;

/// Literal defaults substituted when a property is omitted (§6 "Absence of
/// any property substitutes documented defaults").
pub mod defaults {
    pub const REGEX: &str = "lex.txt";
    pub const CFG: &str = "grammar.txt";
    pub const SOURCE: &str = "source.txt";
}

#[derive(Parser, Debug)]
#[command(name = "pc", about = "Lexer generator, parser generator and attribute evaluator")]
pub struct Cli {
    /// Source program to compile.
    #[arg(value_name = "SOURCEFILE")]
    sourcefile: Option<PathBuf>,

    /// Source program to compile (equivalent to the positional argument).
    #[arg(short = 's', long = "source", value_name = "FILE", action = ArgAction::Append)]
    source: Vec<PathBuf>,

    /// Regex specification file.
    #[arg(short = 'r', long = "regex", value_name = "FILE", action = ArgAction::Append)]
    regex: Vec<PathBuf>,

    /// BNF grammar file.
    #[arg(short = 'p', long = "cfg", value_name = "FILE", action = ArgAction::Append)]
    cfg: Vec<PathBuf>,
}

/// The three resolved input file paths, after defaulting and repeated-flag
/// validation.
pub struct Files {
    pub regex: PathBuf,
    pub cfg: PathBuf,
    pub source: PathBuf,
}

impl Cli {
    /// Resolve the three file properties, erroring if any one of them was
    /// specified more than once (§6 "Repeating a property... is a fatal
    /// usage error").
    pub fn resolve_files(self) -> Result<Files, CliError> {
        let mut sources = self.source;
        if let Some(s) = self.sourcefile {
            sources.push(s);
        }
        Ok(Files {
            regex: pick("regex", self.regex)?.unwrap_or_else(|| PathBuf::from(defaults::REGEX)),
            cfg: pick("cfg", self.cfg)?.unwrap_or_else(|| PathBuf::from(defaults::CFG)),
            source: pick("source", sources)?.unwrap_or_else(|| PathBuf::from(defaults::SOURCE)),
        })
    }
}

fn pick(property: &'static str, values: Vec<PathBuf>) -> Result<Option<PathBuf>, CliError> {
    match values.len() {
        0 => Ok(None),
        1 => Ok(values.into_iter().next()),
        _ => Err(CliError::RepeatedProperty { property }),
    }
}
