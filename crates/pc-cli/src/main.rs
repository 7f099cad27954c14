//! `pc`: reads a regex spec, a BNF grammar, and a source program, then
//! lexes, parses and evaluates attributes over it, rendering the listing
//! and emitted TAC to stdout (§6 "External interfaces").

mod cli;
mod driver;
mod error;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    env_logger::init();

    let files = match cli::Cli::parse().resolve_files() {
        Ok(files) => files,
        Err(e) => {
            eprintln!("pc: {e}");
            return ExitCode::FAILURE;
        }
    };

    let output = match driver::compile(files) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("pc: {e}");
            return ExitCode::FAILURE;
        }
    };

    print!("{}", output.listing_text);

    let mut emitdest = std::io::stdout();
    if let Err(e) = output.eval.scope.write_code(&mut emitdest) {
        eprintln!("pc: failed writing emitted code: {e}");
        return ExitCode::FAILURE;
    }
    for line in &output.eval.print_log {
        println!("{line}");
    }

    if output.eval.diagnostics.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
