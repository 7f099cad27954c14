//! Wires the three generator crates and the attribute engine into one
//! compile pass: read the two spec files and the source program, lex,
//! parse, evaluate (§6 "wiring the three generators + engine together").

use std::fs;
use std::path::Path;

use pc_parser::PnaArena;
use pc_semantic::{EvalOutput, Value};

use crate::cli::Files;
use crate::error::CliError;

pub struct CompileOutput {
    pub listing_text: String,
    pub eval: EvalOutput,
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io { path: path.display().to_string(), source })
}

pub fn compile(files: Files) -> Result<CompileOutput, CliError> {
    let regex_spec = read_file(&files.regex)?;
    let grammar_src = read_file(&files.cfg)?;
    let source = read_file(&files.source)?;

    let machines = pc_lexer::parse_spec(&regex_spec)?;
    let mut grammar = pc_parser::parse_grammar(&grammar_src)?;
    grammar.reconcile_terminals(&machines);
    pc_parser::compute_first_sets(&mut grammar);
    pc_parser::compute_follow_sets(&mut grammar);
    let table = pc_parser::build_table(&grammar)?;

    let lexer = pc_lexer::Lexer::new(&machines, &source);
    let (tokens, listing, mut diagnostics) = lexer.tokenize();

    let arena: PnaArena<Value> = pc_parser::parse(&grammar, &table, &tokens, &mut diagnostics);
    let eval = pc_semantic::evaluate(&grammar, arena, diagnostics)?;

    Ok(CompileOutput {
        listing_text: listing.render(&eval.diagnostics),
        eval,
    })
}
