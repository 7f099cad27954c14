//! Hand-written tokenizer for the regex specification file itself. This is
//! bootstrap code: the spec parser cannot depend on the machine it is about
//! to build, so its own alphabet `{ | ( ) * + ? EOL ε → < > terminal
//! nonterminal annotation-block }` is tokenized directly.

use crate::error::{Result, SpecError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecTok {
    Pipe,
    LParen,
    RParen,
    Star,
    Plus,
    Question,
    Eol,
    Epsilon,
    Prodsym, // "=>"
    /// `<name>` — a reference to another declared machine.
    MachineRef(String),
    /// A single literal character to match.
    Terminal(char),
    /// `{ ... }` — raw annotation text, unparsed.
    Annotation(String),
    Eof,
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub tok: SpecTok,
    pub line: u32,
}

pub struct SpecLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: u32,
}

impl<'a> SpecLexer<'a> {
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

    /// Tokenize the whole input eagerly; spec files are small and this
    /// keeps the recursive-descent parser free of lexer state.
    pub fn tokenize(mut self) -> Result<Vec<Spanned>> {
        let mut out = Vec::new();
        loop {
            let tok = self.next_token()?;
            let eof = matches!(tok.tok, SpecTok::Eof);
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
                None => return Ok(Spanned { tok: SpecTok::Eof, line: self.line }),
                Some('\n') => {
                    let line = self.line;
                    self.bump();
                    return Ok(Spanned { tok: SpecTok::Eol, line });
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
        let c = self.bump().expect("checked by peek above");
        let tok = match c {
            '|' => SpecTok::Pipe,
            '(' => SpecTok::LParen,
            ')' => SpecTok::RParen,
            '*' => SpecTok::Star,
            '+' => SpecTok::Plus,
            '?' => SpecTok::Question,
            '\u{03B5}' => SpecTok::Epsilon,
            '=' if self.chars.peek() == Some(&'>') => {
                self.bump();
                SpecTok::Prodsym
            }
            '<' => {
                let mut name = String::new();
                while let Some(&c) = self.chars.peek() {
                    if c == '>' {
                        break;
                    }
                    name.push(c);
                    self.bump();
                }
                if self.chars.peek() != Some(&'>') {
                    return Err(SpecError::UnexpectedChar { line, found: '<' });
                }
                self.bump();
                SpecTok::MachineRef(name)
            }
            '{' => {
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
                        None => return Err(SpecError::UnterminatedAnnotation { line }),
                    }
                }
                SpecTok::Annotation(body)
            }
            '\\' => match self.bump() {
                Some(escaped) => SpecTok::Terminal(escaped),
                None => return Err(SpecError::UnexpectedChar { line, found: '\\' }),
            },
            other => SpecTok::Terminal(other),
        };
        Ok(Spanned { tok, line })
    }
}

#[cfg(test)]
mod spec_lexer_tests;
