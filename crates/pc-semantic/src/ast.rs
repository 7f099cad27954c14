//! AST for the annotation language's statement/expression grammar.

use crate::value::BinOp;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign {
        target: IdentRef,
        expr: Expr,
        line: u32,
    },
    If {
        branches: Vec<(Expr, Vec<Stmt>)>,
        else_branch: Option<Vec<Stmt>>,
        line: u32,
    },
    BuiltinCall {
        name: String,
        args: Vec<Expr>,
        line: u32,
    },
}

impl Stmt {
    pub fn line(&self) -> u32 {
        match self {
            Stmt::Assign { line, .. } => *line,
            Stmt::If { line, .. } => *line,
            Stmt::BuiltinCall { line, .. } => *line,
        }
    }
}

/// `ident ( '[' expr ']' )? ( '.' attr ( '.' '.' ident '[' num ']' '.' ident )? )?`
#[derive(Debug, Clone, PartialEq)]
pub struct IdentRef {
    pub ident: String,
    pub index: Option<Box<Expr>>,
    pub attr: Option<String>,
    pub cross: Option<CrossRef>,
    pub line: u32,
}

/// The `.. ident '[' num ']' '.' ident` tail: a reference into another RHS
/// child's own attribute, used when one sibling's action needs to read a
/// value belonging to a different sibling than the one it is attached to.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossRef {
    pub ident: String,
    pub index: i64,
    pub attr: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Real(f64),
    Code(String),
    Ref(IdentRef),
    /// `newtemp` / `newlabel` are not built-ins but expression forms,
    /// recognized by the parser from an identifier's spelling rather than
    /// a dedicated lexical kind (matching the original's comparison by
    /// lexeme rather than token type).
    NewTemp,
    NewLabel,
    Not(Box<Expr>),
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// `name '(' (expr (',' expr)*)? ')'` used where a value is expected,
    /// e.g. `s.v := lookup(id.entry)` — distinct from `Stmt::BuiltinCall`,
    /// which is the same call spelled as a bare statement with its result
    /// discarded.
    Call { name: String, args: Vec<Expr>, line: u32 },
}
