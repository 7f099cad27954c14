//! Hand-written tokenizer for the BNF grammar file. Shares lexical
//! conventions with the regex spec (annotation braces, `ε`, EOL) plus `=>`
//! between a nonterminal and its first production, `|` between
//! alternatives, and `$` terminating the file.

use crate::error::{GrammarError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BnfTok {
    /// A bare identifier word — nonterminal-or-terminal, resolved later
    /// once every nonterminal LHS has been seen.
    Word(String),
    Pipe,
    Prodsym,
    Eol,
    Epsilon,
    Dollar,
    Annotation(String),
    Eof,
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub tok: BnfTok,
    pub line: u32,
}

pub struct BnfLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: u32,
}

impl<'a> BnfLexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    pub fn tokenize(mut self) -> Result<Vec<Spanned>> {
        let mut out = Vec::new();
        loop {
            let tok = self.next_token()?;
            let eof = matches!(tok.tok, BnfTok::Eof);
            out.push(tok);
            if eof {
                break;
            }
        }
        Ok(out)
    }

    fn next_token(&mut self) -> Result<Spanned> {
        loop {
            match self.chars.peek().copied() {
                None => return Ok(Spanned { tok: BnfTok::Eof, line: self.line }),
                Some('\n') => {
                    let line = self.line;
                    self.bump();
                    return Ok(Spanned { tok: BnfTok::Eol, line });
                }
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') => {
                    while !matches!(self.chars.peek(), None | Some('\n')) {
                        self.bump();
                    }
                }
                _ => break,
            }
        }

        let line = self.line;
        match self.chars.peek().copied().unwrap() {
            '|' => {
                self.bump();
                Ok(Spanned { tok: BnfTok::Pipe, line })
            }
            '$' => {
                self.bump();
                Ok(Spanned { tok: BnfTok::Dollar, line })
            }
            '\u{03B5}' => {
                self.bump();
                Ok(Spanned { tok: BnfTok::Epsilon, line })
            }
            '=' => {
                self.bump();
                if self.chars.peek() == Some(&'>') {
                    self.bump();
                    Ok(Spanned { tok: BnfTok::Prodsym, line })
                } else {
                    Err(GrammarError::UnexpectedToken {
                        line,
                        expected: "=>",
                        found: "=".to_string(),
                    })
                }
            }
            '{' => {
                self.bump();
                let mut body = String::new();
                let mut depth = 1;
                loop {
                    match self.bump() {
                        Some('{') => {
                            depth += 1;
                            body.push('{');
                        }
                        Some('}') => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                            body.push('}');
                        }
                        Some(c) => body.push(c),
                        None => {
                            return Err(GrammarError::UnexpectedToken {
                                line,
                                expected: "}",
                                found: "<eof>".to_string(),
                            })
                        }
                    }
                }
                Ok(Spanned { tok: BnfTok::Annotation(body), line })
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = self.chars.peek() {
                    if c.is_whitespace() || matches!(c, '|' | '$' | '{' | '=' | '\u{03B5}') {
                        break;
                    }
                    word.push(c);
                    self.bump();
                }
                Ok(Spanned { tok: BnfTok::Word(word), line })
            }
        }
    }
}

#[cfg(test)]
mod bnf_lexer_tests;
