//! Recursive-descent parser from the regex spec token stream straight into
//! NFA fragments. Alternation is flattened before a union frame is built
//! (see [`crate::nfa::NfaBuilder::union`]) instead of nesting binary unions.

use pc_core::token::KindAllocator;
use pc_core::Kind;

use crate::annotation::{parse_annotation, AnnotationMap};
use crate::error::{Result, SpecError};
use crate::machine::{Machine, MachineFlags, MachineSet, MAX_LEXLEN};
use crate::nfa::{EdgeAnnotation, EdgeAttribute, Frag, Nfa, NfaBuilder};
use crate::spec_lexer::{SpecLexer, SpecTok, Spanned};

pub struct SpecParser<'a> {
    toks: &'a [Spanned],
    pos: usize,
    kind_alloc: KindAllocator,
    machines: Vec<Machine>,
    declared_names: std::collections::HashSet<String>,
}

pub fn parse_spec(src: &str) -> Result<MachineSet> {
    parse_spec_with_allocator(src, KindAllocator::new())
}

/// As [`parse_spec`], but kinds are drawn from a caller-supplied allocator
/// instead of always starting at [`KindAllocator::MACHINE_BASE`]. Used by
/// the attribute engine to tokenize its own annotation language with kinds
/// from the semantics partition instead of the machine partition, so the
/// two can never collide even though both go through this same parser.
pub fn parse_spec_with_allocator(src: &str, kind_alloc: KindAllocator) -> Result<MachineSet> {
    let toks = SpecLexer::new(src).tokenize()?;
    let mut parser = SpecParser {
        toks: &toks,
        pos: 0,
        kind_alloc,
        machines: Vec::new(),
        declared_names: std::collections::HashSet::new(),
    };
    let keywords = parser.parse_keyword_block()?;
    parser.parse_machines()?;
    parser.resolve_machine_refs()?;

    Ok(MachineSet {
        machines: parser.machines,
        keywords,
    })
}

impl<'a> SpecParser<'a> {
    fn peek(&self) -> &SpecTok {
        &self.toks[self.pos].tok
    }

    fn line(&self) -> u32 {
        self.toks[self.pos].line
    }

    fn bump(&mut self) -> SpecTok {
        let tok = self.toks[self.pos].tok.clone();
        if self.pos + 1 < self.toks.len() {
            self.pos += 1;
        }
        tok
    }

    fn skip_eols(&mut self) {
        while matches!(self.peek(), SpecTok::Eol) {
            self.bump();
        }
    }

    /// Keyword block: one keyword word per line, each character tokenized
    /// separately, terminated by a blank line (two consecutive EOLs).
    fn parse_keyword_block(&mut self) -> Result<pc_core::Trie<(Kind, i64)>> {
        let mut trie = pc_core::Trie::new();
        loop {
            if matches!(self.peek(), SpecTok::Eol) {
                self.bump();
                break;
            }
            let mut word = String::new();
            while let SpecTok::Terminal(c) = self.peek() {
                word.push(*c);
                self.bump();
            }
            if word.is_empty() {
                break;
            }
            let kind = self
                .kind_alloc
                .alloc_machine()
                .ok_or(SpecError::MachineBudgetExhausted)?;
            trie.insert(&word, (kind, 0));
            if matches!(self.peek(), SpecTok::Eol) {
                self.bump();
            }
        }
        Ok(trie)
    }

    fn parse_machines(&mut self) -> Result<()> {
        self.skip_eols();
        while !matches!(self.peek(), SpecTok::Eof) {
            self.parse_machine()?;
            self.skip_eols();
        }
        Ok(())
    }

    fn parse_machine(&mut self) -> Result<()> {
        let line = self.line();
        let name = match self.bump() {
            SpecTok::MachineRef(n) => n,
            other => {
                return Err(SpecError::UnexpectedToken {
                    line,
                    expected: "machine header <name>",
                    found: format!("{other:?}"),
                })
            }
        };
        if !self.declared_names.insert(name.clone()) {
            return Err(SpecError::DuplicateMachine { name });
        }

        let mut flags = MachineFlags::new();
        if let SpecTok::Annotation(raw) = self.peek().clone() {
            self.bump();
            let map = parse_annotation(&raw, line)?;
            apply_machine_flags(&mut flags, &map, line)?;
        }

        match self.bump() {
            SpecTok::Prodsym => {}
            other => {
                return Err(SpecError::UnexpectedToken {
                    line,
                    expected: "=>",
                    found: format!("{other:?}"),
                })
            }
        }

        let mut builder = NfaBuilder::new();
        let frag = self.parse_expr(&mut builder)?;
        match self.peek() {
            SpecTok::Eol | SpecTok::Eof => {}
            other => {
                return Err(SpecError::UnexpectedToken {
                    line: self.line(),
                    expected: "end of line",
                    found: format!("{other:?}"),
                })
            }
        }

        let kind = self
            .kind_alloc
            .alloc_machine()
            .ok_or(SpecError::MachineBudgetExhausted)?;
        let declared_order = self.machines.len();
        self.machines.push(Machine {
            name,
            kind,
            nfa: Nfa::from_frag(builder, frag),
            flags,
            declared_order,
        });
        Ok(())
    }

    /// `expr := term ( '|' expr )?` — but every alternative at this
    /// precedence level is collected into one flat list before a single
    /// union frame is built, so `a | b | c` never nests.
    fn parse_expr(&mut self, builder: &mut NfaBuilder) -> Result<Frag> {
        let mut alts = vec![self.parse_term(builder)?];
        while matches!(self.peek(), SpecTok::Pipe) {
            self.bump();
            alts.push(self.parse_term(builder)?);
        }
        Ok(builder.union(alts))
    }

    /// `term := catom+` where `catom := atom closure*` — one or more
    /// closured atoms concatenated (implicit concatenation by juxtaposition,
    /// the usual regex convention).
    fn parse_term(&mut self, builder: &mut NfaBuilder) -> Result<Frag> {
        let mut frag = self.parse_catom(builder)?;
        while self.starts_atom() {
            let next = self.parse_catom(builder)?;
            frag = builder.concat(frag, next);
        }
        Ok(frag)
    }

    fn starts_atom(&self) -> bool {
        matches!(
            self.peek(),
            SpecTok::LParen | SpecTok::Terminal(_) | SpecTok::MachineRef(_) | SpecTok::Epsilon
        )
    }

    fn parse_catom(&mut self, builder: &mut NfaBuilder) -> Result<Frag> {
        let mut frag = self.parse_atom(builder)?;
        loop {
            frag = match self.peek() {
                SpecTok::Star => {
                    self.bump();
                    builder.star(frag)
                }
                SpecTok::Plus => {
                    self.bump();
                    builder.plus(frag)
                }
                SpecTok::Question => {
                    self.bump();
                    builder.optional(frag)
                }
                _ => break,
            };
        }
        Ok(frag)
    }

    fn parse_atom(&mut self, builder: &mut NfaBuilder) -> Result<Frag> {
        let line = self.line();
        match self.bump() {
            SpecTok::LParen => {
                let frag = self.parse_expr(builder)?;
                match self.bump() {
                    SpecTok::RParen => Ok(frag),
                    other => Err(SpecError::UnexpectedToken {
                        line,
                        expected: ")",
                        found: format!("{other:?}"),
                    }),
                }
            }
            SpecTok::Epsilon => Ok(builder.epsilon_frag()),
            SpecTok::Terminal(c) => {
                let annotation = self.take_edge_annotation(line)?;
                Ok(builder.terminal_frag(c, annotation))
            }
            SpecTok::MachineRef(name) => {
                let annotation = self.take_edge_annotation(line)?;
                Ok(builder.machine_frag(name, annotation))
            }
            other => Err(SpecError::UnexpectedToken {
                line,
                expected: "atom",
                found: format!("{other:?}"),
            }),
        }
    }

    fn take_edge_annotation(&mut self, line: u32) -> Result<EdgeAnnotation> {
        if let SpecTok::Annotation(raw) = self.peek().clone() {
            self.bump();
            let map = parse_annotation(&raw, line)?;
            return build_edge_annotation(&map, line);
        }
        Ok(EdgeAnnotation::default())
    }

    /// Every `EdgeLabel::Machine` reference must name a declared machine.
    /// Checked after the whole spec is parsed so forward references work.
    fn resolve_machine_refs(&self) -> Result<()> {
        for m in &self.machines {
            for state in &m.nfa.states {
                for edge in &state.edges {
                    if let crate::nfa::EdgeLabel::Machine(name) = &edge.label {
                        if !self.declared_names.contains(name) {
                            return Err(SpecError::UndefinedMachine { name: name.clone() });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn build_edge_annotation(map: &AnnotationMap, line: u32) -> Result<EdgeAnnotation> {
    for key in map.entries.keys() {
        if !matches!(key.as_str(), "attribute" | "length" | "attcount") {
            return Err(SpecError::UnrecognizedAnnotationKey {
                line,
                key: key.clone(),
            });
        }
    }
    let attribute = match map.number("attribute") {
        Some(n) => EdgeAttribute::Fixed(n),
        None => EdgeAttribute::None,
    };
    Ok(EdgeAnnotation {
        attribute,
        length: map.number("length").map(|n| n as u32),
        attcount: map.flag("attcount"),
    })
}

fn apply_machine_flags(flags: &mut MachineFlags, map: &AnnotationMap, line: u32) -> Result<()> {
    for key in map.entries.keys() {
        if !matches!(key.as_str(), "typecount" | "idtype" | "composite" | "length") {
            return Err(SpecError::UnrecognizedAnnotationKey {
                line,
                key: key.clone(),
            });
        }
    }
    if let Some(n) = map.number("typecount") {
        flags.typecount = Some(n);
    }
    if let Some(n) = map.number("length") {
        flags.lexlen = n as u32;
    } else {
        flags.lexlen = MAX_LEXLEN;
    }
    // idtype and composite are mutually exclusive and overwrite one
    // another; whichever appears later in the annotation text wins.
    // `original_source/lex.c:763-766`: `idtype` sets `attr_id = true,
    // composite = false` directly, with no separate idtype field.
    for key in map.entries.keys() {
        match key.as_str() {
            "idtype" => {
                flags.attr_id = true;
                flags.composite = false;
            }
            "composite" => {
                flags.composite = true;
                flags.attr_id = false;
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod spec_parser_tests;
