//! Recursive-descent parser from annotation tokens into the [`crate::ast`]
//! types, following the grammar in the attribute-engine module's
//! `stmt`/`expr`/`simple`/`term`/`factor`/`ident-ref` rules exactly.

use pc_core::{Kind, Token};

use crate::annotation_lexer::{kinds, tokenize, AnnotationKinds};
use crate::ast::{CrossRef, Expr, IdentRef, Stmt};
use crate::error::{Result, SemanticError};
use crate::value::BinOp;

pub fn parse_statements(text: &str) -> Result<Vec<Stmt>> {
    let (tokens, diagnostics) = tokenize(text);
    if diagnostics.has_errors() {
        return Err(SemanticError::UnexpectedToken {
            line: tokens.first().map(|t| t.line).unwrap_or(0),
            expected: "well-formed annotation text",
            found: diagnostics.rendered().join("; "),
        });
    }
    let mut parser = Parser { toks: tokens, pos: 0, kinds: kinds() };
    let stmts = parser.parse_stmts()?;
    parser.expect_eof()?;
    Ok(stmts)
}

struct Parser {
    toks: Vec<Token>,
    pos: usize,
    kinds: AnnotationKinds,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.toks.get(self.pos)
    }

    fn peek_kind(&self) -> Kind {
        self.peek().map(|t| t.kind).unwrap_or(Kind::EOF)
    }

    /// The line of the current token, or the last token's line at end of
    /// input (there is no trailing EOF token to carry one).
    fn line(&self) -> u32 {
        self.peek().or_else(|| self.toks.last()).map(|t| t.line).unwrap_or(0)
    }

    fn found(&self) -> String {
        self.peek().map(|t| t.lexeme.clone()).unwrap_or_else(|| "<end of annotation>".to_string())
    }

    fn check(&self, kind: Kind) -> bool {
        self.peek_kind() == kind
    }

    fn bump(&mut self) -> Token {
        let tok = self.toks.get(self.pos).cloned().unwrap_or_else(|| Token::new("", Kind::EOF, 0, self.line()));
        if self.pos < self.toks.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: Kind, what: &'static str) -> Result<Token> {
        if self.check(kind) {
            Ok(self.bump())
        } else {
            Err(SemanticError::UnexpectedToken {
                line: self.line(),
                expected: what,
                found: self.found(),
            })
        }
    }

    fn expect_eof(&mut self) -> Result<()> {
        if self.peek_kind() == Kind::EOF {
            Ok(())
        } else {
            Err(SemanticError::UnexpectedToken {
                line: self.line(),
                expected: "end of annotation",
                found: self.found(),
            })
        }
    }

    fn expect_id(&mut self) -> Result<String> {
        let tok = self.expect(self.kinds.id, "identifier")?;
        Ok(tok.lexeme)
    }

    fn at_stmt_stop(&self) -> bool {
        self.check(self.kinds.elif_kw)
            || self.check(self.kinds.else_kw)
            || self.check(self.kinds.end_kw)
            || self.peek_kind() == Kind::EOF
    }

    fn parse_stmts(&mut self) -> Result<Vec<Stmt>> {
        let mut out = Vec::new();
        while !self.at_stmt_stop() {
            out.push(self.parse_stmt()?);
        }
        Ok(out)
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        let line = self.line();
        if self.check(self.kinds.if_kw) {
            return self.parse_if();
        }

        let name = self.expect_id()?;
        if self.check(self.kinds.lparen) {
            self.bump();
            let mut args = Vec::new();
            if !self.check(self.kinds.rparen) {
                args.push(self.parse_expr()?);
                while self.check(self.kinds.comma) {
                    self.bump();
                    args.push(self.parse_expr()?);
                }
            }
            self.expect(self.kinds.rparen, ")")?;
            return Ok(Stmt::BuiltinCall { name, args, line });
        }

        let target = self.parse_ident_ref_tail(name, line)?;
        if target.attr.is_none() {
            return Err(SemanticError::UnexpectedToken {
                line,
                expected: "'.' attr on assignment target",
                found: self.found(),
            });
        }
        self.expect(self.kinds.assign, ":=")?;
        let expr = self.parse_expr()?;
        Ok(Stmt::Assign { target, expr, line })
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        let line = self.line();
        self.bump();
        let mut branches = Vec::new();

        let cond = self.parse_expr()?;
        self.expect(self.kinds.then_kw, "then")?;
        let body = self.parse_stmts()?;
        branches.push((cond, body));

        while self.check(self.kinds.elif_kw) {
            self.bump();
            let cond = self.parse_expr()?;
            self.expect(self.kinds.then_kw, "then")?;
            let body = self.parse_stmts()?;
            branches.push((cond, body));
        }

        let else_branch = if self.check(self.kinds.else_kw) {
            self.bump();
            Some(self.parse_stmts()?)
        } else {
            None
        };

        self.expect(self.kinds.end_kw, "end")?;
        Ok(Stmt::If { branches, else_branch, line })
    }

    /// Optional `( '[' expr ']' )? ( '.' attr ( '.' '.' ident '[' num ']' '.' ident )? )?`
    /// tail, shared by assignment targets and ident-ref factors.
    fn parse_ident_ref_tail(&mut self, ident: String, line: u32) -> Result<IdentRef> {
        let index = if self.check(self.kinds.lbracket) {
            self.bump();
            let e = self.parse_expr()?;
            self.expect(self.kinds.rbracket, "]")?;
            Some(Box::new(e))
        } else {
            None
        };

        let (attr, cross) = if self.check(self.kinds.dot) {
            self.bump();
            let attr = self.expect_id()?;
            let cross = if self.check(self.kinds.dot) {
                self.bump();
                self.expect(self.kinds.dot, ".")?;
                let cross_ident = self.expect_id()?;
                self.expect(self.kinds.lbracket, "[")?;
                let n = self.expect_integer()?;
                self.expect(self.kinds.rbracket, "]")?;
                self.expect(self.kinds.dot, ".")?;
                let cross_attr = self.expect_id()?;
                Some(CrossRef { ident: cross_ident, index: n, attr: cross_attr })
            } else {
                None
            };
            (Some(attr), cross)
        } else {
            (None, None)
        };

        Ok(IdentRef { ident, index, attr, cross, line })
    }

    fn expect_integer(&mut self) -> Result<i64> {
        let tok = self.expect(self.kinds.integer, "integer")?;
        Ok(tok.lexeme.parse().expect("<integer> machine only matches digits"))
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        let lhs = self.parse_simple()?;
        if self.check(self.kinds.relop) {
            let tok = self.bump();
            let op = relop_of(tok.attribute);
            let rhs = self.parse_simple()?;
            Ok(Expr::Binary(op, Box::new(lhs), Box::new(rhs)))
        } else {
            Ok(lhs)
        }
    }

    fn parse_simple(&mut self) -> Result<Expr> {
        let negate = if self.check(self.kinds.addop) {
            match self.peek().map(|t| t.attribute).unwrap_or(0) {
                0 => {
                    self.bump();
                    false
                }
                1 => {
                    self.bump();
                    true
                }
                _ => {
                    return Err(SemanticError::UnexpectedToken {
                        line: self.line(),
                        expected: "'+' or '-' as a leading sign",
                        found: self.found(),
                    })
                }
            }
        } else {
            false
        };

        let mut lhs = self.parse_term()?;
        if negate {
            lhs = Expr::Neg(Box::new(lhs));
        }

        while self.check(self.kinds.addop) {
            let tok = self.bump();
            let op = addop_of(tok.attribute);
            let rhs = self.parse_term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_factor()?;
        while self.check(self.kinds.mulop) {
            let tok = self.bump();
            let op = mulop_of(tok.attribute);
            let rhs = self.parse_factor()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_factor(&mut self) -> Result<Expr> {
        let line = self.line();
        if self.check(self.kinds.integer) {
            let tok = self.bump();
            return Ok(Expr::Int(tok.lexeme.parse().expect("<integer> machine only matches digits")));
        }
        if self.check(self.kinds.real) {
            let tok = self.bump();
            return Ok(Expr::Real(tok.lexeme.parse().expect("<real> machine only matches digit+.digit+")));
        }
        if self.check(self.kinds.code) {
            let tok = self.bump();
            let inner = tok.lexeme.trim_matches('"').to_string();
            return Ok(Expr::Code(inner));
        }
        if self.check(self.kinds.lparen) {
            self.bump();
            let e = self.parse_expr()?;
            self.expect(self.kinds.rparen, ")")?;
            return Ok(e);
        }
        if self.check(self.kinds.not_kw) {
            self.bump();
            let f = self.parse_factor()?;
            return Ok(Expr::Not(Box::new(f)));
        }
        if self.check(self.kinds.id) {
            let name = self.expect_id()?;
            match name.as_str() {
                "newtemp" => return Ok(Expr::NewTemp),
                "newlabel" => return Ok(Expr::NewLabel),
                _ => {}
            }
            if self.check(self.kinds.lparen) {
                self.bump();
                let mut args = Vec::new();
                if !self.check(self.kinds.rparen) {
                    args.push(self.parse_expr()?);
                    while self.check(self.kinds.comma) {
                        self.bump();
                        args.push(self.parse_expr()?);
                    }
                }
                self.expect(self.kinds.rparen, ")")?;
                return Ok(Expr::Call { name, args, line });
            }
            let ident_ref = self.parse_ident_ref_tail(name, line)?;
            return Ok(Expr::Ref(ident_ref));
        }
        Err(SemanticError::UnexpectedToken {
            line,
            expected: "number, code literal, identifier, '(' or 'not'",
            found: self.found(),
        })
    }
}

fn addop_of(attribute: i64) -> BinOp {
    match attribute {
        0 => BinOp::Add,
        1 => BinOp::Sub,
        2 => BinOp::Or,
        other => unreachable!("addop machine produced an unknown attribute {other}"),
    }
}

fn mulop_of(attribute: i64) -> BinOp {
    match attribute {
        0 => BinOp::Mul,
        1 => BinOp::Div,
        2 => BinOp::And,
        other => unreachable!("mulop machine produced an unknown attribute {other}"),
    }
}

fn relop_of(attribute: i64) -> BinOp {
    match attribute {
        0 => BinOp::Eq,
        1 => BinOp::Ne,
        2 => BinOp::Lt,
        3 => BinOp::Le,
        4 => BinOp::Ge,
        5 => BinOp::Gt,
        other => unreachable!("relop machine produced an unknown attribute {other}"),
    }
}

#[cfg(test)]
mod annotation_parser_tests;
