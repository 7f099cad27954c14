//! Parses the BNF token stream into a [`Grammar`]. `nonterminal =>
//! production ( '|' production )* ( EOL nonterminal => ... )* $`.
//!
//! Symbol resolution happens in two passes: the first collects every
//! declared nonterminal name (so forward references work), the second
//! resolves each RHS word against that name set — a match becomes
//! [`Symbol::Nonterminal`], anything else starts life as an unresolved
//! [`Symbol::Terminal`] (kind `Kind::ERROR`) for
//! [`Grammar::reconcile_terminals`] to fix up once a [`pc_lexer::MachineSet`]
//! is available.

use pc_core::Kind;

use crate::bnf_lexer::{BnfLexer, BnfTok, Spanned};
use crate::error::{GrammarError, Result};
use crate::grammar::{Grammar, Production, Symbol, TerminalSymbol};

struct RawProduction {
    words: Vec<RawSymbol>,
    annotation: Option<String>,
}

enum RawSymbol {
    Word(String),
    Epsilon,
}

struct RawRule {
    lhs: String,
    line: u32,
    productions: Vec<RawProduction>,
}

pub fn parse_grammar(src: &str) -> Result<Grammar> {
    let toks = BnfLexer::new(src).tokenize()?;
    let raw_rules = parse_raw(&toks)?;

    let mut grammar = Grammar::new();
    for rule in &raw_rules {
        if grammar.declare(rule.lhs.clone()).is_none() {
            return Err(GrammarError::DuplicateNonterminal { name: rule.lhs.clone() });
        }
    }

    for rule in &raw_rules {
        let idx = grammar.index_of(&rule.lhs).expect("just declared");
        for raw in &rule.productions {
            let mut symbols = Vec::new();
            for w in &raw.words {
                match w {
                    RawSymbol::Epsilon => symbols.push(Symbol::Epsilon),
                    RawSymbol::Word(name) => {
                        if let Some(ni) = grammar.index_of(name) {
                            symbols.push(Symbol::Nonterminal(ni));
                        } else {
                            symbols.push(Symbol::Terminal(TerminalSymbol {
                                lexeme: name.clone(),
                                kind: Kind::ERROR,
                            }));
                        }
                    }
                }
            }
            grammar.pdas[idx].productions.push(Production {
                symbols,
                annotation: raw.annotation.clone(),
            });
        }
    }

    Ok(grammar)
}

fn parse_raw(toks: &[Spanned]) -> Result<Vec<RawRule>> {
    let mut rules = Vec::new();
    let mut pos = 0;
    let skip_eols = |toks: &[Spanned], pos: &mut usize| {
        while matches!(toks[*pos].tok, BnfTok::Eol) {
            *pos += 1;
        }
    };
    skip_eols(toks, &mut pos);

    while !matches!(toks[pos].tok, BnfTok::Eof | BnfTok::Dollar) {
        let line = toks[pos].line;
        let lhs = match &toks[pos].tok {
            BnfTok::Word(w) => w.clone(),
            other => {
                return Err(GrammarError::UnexpectedToken {
                    line,
                    expected: "nonterminal",
                    found: format!("{other:?}"),
                })
            }
        };
        pos += 1;
        match &toks[pos].tok {
            BnfTok::Prodsym => pos += 1,
            other => {
                return Err(GrammarError::UnexpectedToken {
                    line,
                    expected: "=>",
                    found: format!("{other:?}"),
                })
            }
        }

        let mut productions = vec![parse_one_production(toks, &mut pos)?];
        while matches!(toks[pos].tok, BnfTok::Pipe) {
            pos += 1;
            productions.push(parse_one_production(toks, &mut pos)?);
        }
        rules.push(RawRule { lhs, line, productions });
        skip_eols(toks, &mut pos);
    }
    Ok(rules)
}

fn parse_one_production(toks: &[Spanned], pos: &mut usize) -> Result<RawProduction> {
    let mut words = Vec::new();
    loop {
        match &toks[*pos].tok {
            BnfTok::Word(w) => {
                words.push(RawSymbol::Word(w.clone()));
                *pos += 1;
            }
            BnfTok::Epsilon => {
                words.push(RawSymbol::Epsilon);
                *pos += 1;
            }
            _ => break,
        }
    }
    let annotation = if let BnfTok::Annotation(body) = &toks[*pos].tok {
        let body = body.clone();
        *pos += 1;
        Some(body)
    } else {
        None
    };
    Ok(RawProduction { words, annotation })
}

#[cfg(test)]
mod bnf_parser_tests;
