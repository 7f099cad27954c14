//! Tokenizes annotation-language text (the body of a BNF production's `{
//! ... }` block) using the same regex-spec machinery the lexer generator
//! itself is built on, just fed its own fixed spec with kinds drawn from
//! the semantics partition ([`KindAllocator::for_semantics_language`]) so
//! they can never collide with a source grammar's machine kinds.
//!
//! The spec text is assembled programmatically rather than typed out as a
//! literal: the code-literal alphabet is most of printable ASCII, and every
//! character of it needs the same backslash-escaping a hand-written regex
//! spec file would require of its author.

use std::sync::OnceLock;

use pc_core::token::KindAllocator;
use pc_core::{Diagnostics, Kind, Token};
use pc_lexer::{parse_spec_with_allocator, Lexer, MachineSet};

const KEYWORDS: &[&str] = &["if", "then", "elif", "else", "end", "not"];

fn escape(c: char) -> String {
    format!("\\{c}")
}

fn alternation(chars: impl Iterator<Item = char>) -> String {
    chars.map(escape).collect::<Vec<_>>().join("|")
}

fn build_spec_text() -> String {
    let mut s = String::new();
    for kw in KEYWORDS {
        s.push_str(kw);
        s.push('\n');
    }
    s.push('\n');

    let letters = alternation((b'a'..=b'z').chain(b'A'..=b'Z').map(char::from));
    let digits = alternation((b'0'..=b'9').map(char::from));
    let body_chars = alternation((0x20u8..=0x7E).map(char::from).filter(|&c| c != '"'));

    s.push_str(&format!("<letter>{{composite}} => {letters}\n"));
    s.push_str(&format!("<digit>{{composite}} => {digits}\n"));
    s.push_str(&format!("<bodychar>{{composite}} => {body_chars}\n"));
    s.push_str("<id>{attr_id} => <letter> (<letter>|<digit>|_)*\n");
    s.push_str("<integer> => <digit>+\n");
    s.push_str("<real> => <digit>+.<digit>+\n");
    s.push_str("<code> => \"(<bodychar>)*\"\n");
    s.push_str("<assign> => :=\n");
    s.push_str("<dot> => .\n");
    s.push_str("<lbracket> => [\n");
    s.push_str("<rbracket> => ]\n");
    s.push_str("<lparen> => \\(\n");
    s.push_str("<rparen> => \\)\n");
    s.push_str("<comma> => ,\n");
    // Attribute numbers mirror the original implementation's ATTYPE_ADD=0,
    // ATTYPE_SUB=1, ATTYPE_OR=2 (and analogously for mulop/relop) so a
    // matched token's `attribute` field identifies which alternative fired.
    s.push_str("<addop> => \\+{attribute=0}|-{attribute=1}|or{attribute=2}\n");
    s.push_str("<mulop> => \\*{attribute=0}|/{attribute=1}|and{attribute=2}\n");
    s.push_str("<relop> => ={attribute=0}|\\<>{attribute=1}|\\<={attribute=3}|\\<{attribute=2}|>={attribute=4}|>{attribute=5}\n");
    s
}

fn machine_set() -> &'static MachineSet {
    static SET: OnceLock<MachineSet> = OnceLock::new();
    SET.get_or_init(|| {
        parse_spec_with_allocator(&build_spec_text(), KindAllocator::for_semantics_language())
            .expect("annotation-language spec is a fixed, internally-valid constant")
    })
}

/// The fixed kinds of every annotation-language token, resolved once from
/// the compiled [`MachineSet`] by name rather than hardcoded as numeric
/// offsets.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationKinds {
    pub if_kw: Kind,
    pub then_kw: Kind,
    pub elif_kw: Kind,
    pub else_kw: Kind,
    pub end_kw: Kind,
    pub not_kw: Kind,
    pub id: Kind,
    pub integer: Kind,
    pub real: Kind,
    pub code: Kind,
    pub assign: Kind,
    pub dot: Kind,
    pub lbracket: Kind,
    pub rbracket: Kind,
    pub lparen: Kind,
    pub rparen: Kind,
    pub comma: Kind,
    pub addop: Kind,
    pub mulop: Kind,
    pub relop: Kind,
}

pub fn kinds() -> AnnotationKinds {
    static KINDS: OnceLock<AnnotationKinds> = OnceLock::new();
    *KINDS.get_or_init(|| {
        let set = machine_set();
        let kw = |name: &str| set.keywords.get(name).expect("declared above").0;
        let m = |name: &str| set.get(name).expect("declared above").kind;
        AnnotationKinds {
            if_kw: kw("if"),
            then_kw: kw("then"),
            elif_kw: kw("elif"),
            else_kw: kw("else"),
            end_kw: kw("end"),
            not_kw: kw("not"),
            id: m("id"),
            integer: m("integer"),
            real: m("real"),
            code: m("code"),
            assign: m("assign"),
            dot: m("dot"),
            lbracket: m("lbracket"),
            rbracket: m("rbracket"),
            lparen: m("lparen"),
            rparen: m("rparen"),
            comma: m("comma"),
            addop: m("addop"),
            mulop: m("mulop"),
            relop: m("relop"),
        }
    })
}

/// Tokenize one annotation body. Lines are numbered from 1 within `text`;
/// the caller offsets them by the production's source line.
pub fn tokenize(text: &str) -> (Vec<Token>, Diagnostics) {
    let (tokens, _listing, diagnostics) = Lexer::new(machine_set(), text).tokenize();
    (tokens, diagnostics)
}

#[cfg(test)]
mod annotation_lexer_tests;
