//! The multi-pass fixpoint driver (§4.3, §5, §8 "Testable properties"):
//! walks the pna arena once per pass, re-running every production's
//! annotation statements, until a pass produces no new attribute and no
//! new mutating side effect, then runs one final `isfinal` pass that may
//! emit semantic diagnostics.

use std::collections::{HashMap, HashSet};

use pc_core::{Diagnostics, Token};
use pc_parser::{Grammar, PnaArena, PnaKind, Symbol};

use crate::ast::{CrossRef, Expr, IdentRef, Stmt};
use crate::builtins::{self, BuiltinCtx};
use crate::error::{Result, SemanticError};
use crate::scope::ScopeTree;
use crate::value::{apply_binop, logical_not, negate, Value};

/// Upper bound on passes before giving up on convergence — a grammar whose
/// annotations can never stabilize (a genuine author bug, not something
/// this engine can fix) would otherwise loop forever.
const MAX_PASSES: usize = 256;

pub struct EvalOutput {
    pub arena: PnaArena<Value>,
    pub scope: ScopeTree,
    pub diagnostics: Diagnostics,
    pub print_log: Vec<String>,
}

pub fn evaluate(grammar: &Grammar, mut arena: PnaArena<Value>, mut diagnostics: Diagnostics) -> Result<EvalOutput> {
    let mut engine = Evaluator {
        grammar,
        stmt_cache: HashMap::new(),
        executed: HashSet::new(),
        temp_memo: HashMap::new(),
        label_memo: HashMap::new(),
        tempcount: 0,
        labelcount: 0,
        scope: ScopeTree::new("main"),
        print_log: Vec::new(),
    };

    let mut pass = 0usize;
    loop {
        pass += 1;
        let changed = engine.run_pass(&mut arena, &mut diagnostics, false)?;
        log::debug!("pass {pass}: {}", if changed { "new attributes defined" } else { "no change" });
        if !changed {
            break;
        }
        if pass >= MAX_PASSES {
            log::warn!("attribute evaluation did not converge after {MAX_PASSES} passes");
            break;
        }
    }
    engine.run_pass(&mut arena, &mut diagnostics, true)?;

    if engine.scope.depth() != 0 {
        diagnostics.error(0, "scope stack not empty at end of evaluation".to_string()).emit();
    }

    Ok(EvalOutput {
        arena,
        scope: engine.scope,
        diagnostics,
        print_log: engine.print_log,
    })
}

/// Identity of one statement occurrence: the pna node it executes under,
/// plus its textual position within that node's (possibly nested, inside
/// `if`/`elif`/`else`) statement tree.
type StmtKey = (usize, String);

struct Evaluator<'g> {
    grammar: &'g Grammar,
    /// Parsed once per `(pda, production)` pair — every node instance that
    /// selects the same production shares the same statement text.
    stmt_cache: HashMap<(usize, usize), Vec<Stmt>>,
    /// Mutating built-in calls that have already fired, kept across the
    /// whole multi-pass run (§8 "fire at most once per AST-identity").
    executed: HashSet<StmtKey>,
    temp_memo: HashMap<StmtKey, String>,
    label_memo: HashMap<StmtKey, String>,
    tempcount: u32,
    labelcount: u32,
    scope: ScopeTree,
    print_log: Vec<String>,
}

const MUTATING: &[&str] = &["addtype", "addarg", "pushscope", "popscope", "resettemps", "emit", "error", "halt"];

impl<'g> Evaluator<'g> {
    fn run_pass(&mut self, arena: &mut PnaArena<Value>, diagnostics: &mut Diagnostics, isfinal: bool) -> Result<bool> {
        let mut changed = false;
        for node_idx in 0..arena.len() {
            let (pda, production) = match &arena.get(node_idx).kind {
                PnaKind::Nonterminal { pda, production } => (*pda, *production),
                _ => continue,
            };
            let Some(annotation) = self.grammar.pdas[pda].productions[production].annotation.clone() else {
                continue;
            };
            let stmts = self.parsed_statements(pda, production, &annotation)?;
            let source_line = leftmost_terminal_line(arena, node_idx);
            let mut ctx = NodeCtx {
                node_idx,
                pda,
                production,
                arena: &mut *arena,
                diagnostics: &mut *diagnostics,
                isfinal,
                source_line,
            };
            for (i, stmt) in stmts.iter().enumerate() {
                changed |= self.exec_stmt(stmt, &mut ctx, &i.to_string())?;
            }
        }
        Ok(changed)
    }

    fn parsed_statements(&mut self, pda: usize, production: usize, text: &str) -> Result<Vec<Stmt>> {
        if let Some(cached) = self.stmt_cache.get(&(pda, production)) {
            return Ok(cached.clone());
        }
        let stmts = crate::annotation_parser::parse_statements(text)?;
        self.stmt_cache.insert((pda, production), stmts.clone());
        Ok(stmts)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, ctx: &mut NodeCtx, path: &str) -> Result<bool> {
        match stmt {
            Stmt::Assign { target, expr, .. } => {
                let value = self.eval_expr(expr, ctx.source_line, ctx, path)?;
                self.write_ident_ref(target, value, ctx, path)
            }
            Stmt::If { branches, else_branch, .. } => {
                for (i, (cond, body)) in branches.iter().enumerate() {
                    let cond_value = self.eval_expr(cond, ctx.source_line, ctx, &format!("{path}.if{i}"))?;
                    match cond_value {
                        Value::NotEvaluated => return Ok(false),
                        Value::Int(n) if n != 0 => {
                            let mut changed = false;
                            for (j, s) in body.iter().enumerate() {
                                changed |= self.exec_stmt(s, ctx, &format!("{path}.if{i}.{j}"))?;
                            }
                            return Ok(changed);
                        }
                        _ => continue,
                    }
                }
                if let Some(body) = else_branch {
                    let mut changed = false;
                    for (j, s) in body.iter().enumerate() {
                        changed |= self.exec_stmt(s, ctx, &format!("{path}.else.{j}"))?;
                    }
                    return Ok(changed);
                }
                Ok(false)
            }
            Stmt::BuiltinCall { name, args, .. } => {
                let (_, changed) = self.call_builtin(name, args, ctx, path)?;
                Ok(changed)
            }
        }
    }

    /// Shared by `Stmt::BuiltinCall` (result discarded, `changed` reported
    /// to the fixpoint loop) and `Expr::Call` (result used, `changed`
    /// ignored). A mutating built-in (§4.3 `MUTATING`) only ever gets one
    /// attempt per `StmtKey`, whichever expression or statement reaches it
    /// first across the whole multi-pass run.
    fn call_builtin(&mut self, name: &str, args: &[Expr], ctx: &mut NodeCtx, path: &str) -> Result<(Value, bool)> {
        let key: StmtKey = (ctx.node_idx, path.to_string());
        let is_mutating = MUTATING.contains(&name.to_ascii_lowercase().as_str());
        if is_mutating && self.executed.contains(&key) {
            return Ok((Value::Void, false));
        }
        let line = ctx.source_line;

        let mut values = Vec::with_capacity(args.len());
        for (i, a) in args.iter().enumerate() {
            values.push(self.eval_expr(a, line, ctx, &format!("{path}.arg{i}"))?);
        }

        let Some(builtin) = builtins::from_name(name) else {
            return Err(SemanticError::UnknownBuiltin { line, name: name.to_string() });
        };

        if is_mutating && values.iter().any(Value::is_not_evaluated) {
            return Ok((Value::NotEvaluated, false));
        }

        let mut bctx = BuiltinCtx {
            scope: &mut self.scope,
            diagnostics: ctx.diagnostics,
            print_log: &mut self.print_log,
            tempcount: &mut self.tempcount,
            labelcount: &mut self.labelcount,
            isfinal: ctx.isfinal,
        };
        let result = builtins::call(builtin, values, line, &mut bctx)?;

        if is_mutating {
            self.executed.insert(key);
            return Ok((result, true));
        }
        Ok((result, false))
    }

    /// Writes `value` into the target's attribute map, applying the
    /// monotonic-upgrade rule: a concrete value already on record is never
    /// clobbered by a fresh `not-evaluated` recomputation.
    fn write_ident_ref(&mut self, target: &IdentRef, value: Value, ctx: &mut NodeCtx, path: &str) -> Result<bool> {
        let Some(attr) = &target.attr else { return Ok(false) };
        let Some(child_idx) = self.resolve_target_node(target, ctx, path)? else { return Ok(false) };
        let is_self = child_idx == ctx.node_idx;
        let entry = ctx.arena.get(child_idx);
        let existing = if is_self {
            entry.synthesized.get(attr).or_else(|| entry.inherited.get(attr)).cloned()
        } else {
            entry.inherited.get(attr).cloned()
        };
        let final_value = match (&existing, &value) {
            (Some(old), Value::NotEvaluated) if !old.is_not_evaluated() => old.clone(),
            _ => value,
        };
        let changed = existing.as_ref() != Some(&final_value);
        let map = if is_self {
            &mut ctx.arena.get_mut(child_idx).synthesized
        } else {
            &mut ctx.arena.get_mut(child_idx).inherited
        };
        map.insert(attr.clone(), final_value);
        Ok(changed)
    }

    /// `X` is the LHS (this node) when `X`'s name equals this node's own
    /// producing nonterminal; otherwise `X[i]` selects the `i`-th (1-based,
    /// default 1) child symbol named `X` in this node's production.
    fn resolve_target_node(&mut self, r: &IdentRef, ctx: &mut NodeCtx, path: &str) -> Result<Option<usize>> {
        if r.ident == self.grammar.pdas[ctx.pda].name {
            return Ok(Some(ctx.node_idx));
        }
        let occurrence = match &r.index {
            Some(e) => match self.eval_expr(e, ctx.source_line, ctx, &format!("{path}.targetidx"))? {
                Value::Int(n) => n.max(1) as usize,
                Value::NotEvaluated => return Ok(None),
                _ => 1,
            },
            None => 1,
        };
        Ok(self.find_child(ctx, &r.ident, occurrence))
    }

    fn find_child(&self, ctx: &NodeCtx, name: &str, occurrence_1based: usize) -> Option<usize> {
        let production = &self.grammar.pdas[ctx.pda].productions[ctx.production];
        let children = &ctx.arena.get(ctx.node_idx).children;
        let mut seen = 0usize;
        for (symbol, &child) in production.symbols.iter().zip(children.iter()) {
            if symbol_name(self.grammar, symbol) == name {
                seen += 1;
                if seen == occurrence_1based {
                    return Some(child);
                }
            }
        }
        None
    }

    fn eval_expr(&mut self, expr: &Expr, line: u32, ctx: &mut NodeCtx, path: &str) -> Result<Value> {
        Ok(match expr {
            Expr::Int(n) => Value::Int(*n),
            Expr::Real(r) => Value::Real(*r),
            Expr::Code(s) => Value::Code(s.clone()),
            Expr::NewTemp => self.newtemp(ctx, path),
            Expr::NewLabel => self.newlabel(ctx, path),
            Expr::Not(inner) => {
                let v = self.eval_expr(inner, line, ctx, &format!("{path}.not"))?;
                logical_not(v)
            }
            Expr::Neg(inner) => {
                let v = self.eval_expr(inner, line, ctx, &format!("{path}.neg"))?;
                negate(v)
            }
            Expr::Binary(op, lhs, rhs) => {
                let l = self.eval_expr(lhs, line, ctx, &format!("{path}.l"))?;
                let r = self.eval_expr(rhs, line, ctx, &format!("{path}.r"))?;
                match (op, &l, &r) {
                    (crate::value::BinOp::Eq, Value::FormalArgList(formal), Value::ActualArgList(actual)) => {
                        self.check_arglist(formal, actual, line, ctx)
                    }
                    (crate::value::BinOp::Eq, Value::ActualArgList(actual), Value::FormalArgList(formal)) => {
                        self.check_arglist(formal, actual, line, ctx)
                    }
                    _ => apply_binop(*op, l, r),
                }
            }
            Expr::Ref(r) => self.eval_ident_ref(r, ctx)?,
            Expr::Call { name, args, .. } => self.call_builtin(name, args, ctx, path)?.0,
        })
    }

    fn newtemp(&mut self, ctx: &NodeCtx, path: &str) -> Value {
        let key: StmtKey = (ctx.node_idx, path.to_string());
        if let Some(name) = self.temp_memo.get(&key) {
            return Value::Temp(name.clone());
        }
        let name = format!("_t{}", self.tempcount);
        self.tempcount += 1;
        self.temp_memo.insert(key, name.clone());
        Value::Temp(name)
    }

    fn newlabel(&mut self, ctx: &NodeCtx, path: &str) -> Value {
        let key: StmtKey = (ctx.node_idx, path.to_string());
        if let Some(name) = self.label_memo.get(&key) {
            return Value::Label(name.clone());
        }
        let name = format!("_L{}", self.labelcount);
        self.labelcount += 1;
        self.label_memo.insert(key, name.clone());
        Value::Label(name)
    }

    fn eval_ident_ref(&mut self, r: &IdentRef, ctx: &mut NodeCtx) -> Result<Value> {
        let occurrence = match &r.index {
            Some(e) => match self.eval_expr(e, ctx.source_line, ctx, &format!("idx{}", r.line))? {
                Value::Int(n) => n.max(1) as usize,
                Value::NotEvaluated => return Ok(Value::NotEvaluated),
                _ => 1,
            },
            None => 1,
        };

        let is_self = r.ident == self.grammar.pdas[ctx.pda].name;
        let Some(node) = (if is_self { Some(ctx.node_idx) } else { self.find_child(ctx, &r.ident, occurrence) }) else {
            return Ok(Value::NotEvaluated);
        };

        let Some(attr) = &r.attr else {
            return Ok(Value::NotEvaluated);
        };

        if let Some(cross) = &r.cross {
            return Ok(self.eval_cross_ref(ctx, cross));
        }

        Ok(self.read_node_attr(ctx.arena.get(node), attr, is_self))
    }

    fn eval_cross_ref(&self, ctx: &NodeCtx, cross: &CrossRef) -> Value {
        let Some(node) = self.find_child(ctx, &cross.ident, cross.index.max(1) as usize) else {
            return Value::NotEvaluated;
        };
        self.read_node_attr(ctx.arena.get(node), &cross.attr, false)
    }

    fn read_node_attr(&self, entry: &pc_parser::PnaEntry<Value>, attr: &str, is_self: bool) -> Value {
        if let PnaKind::Terminal(tok) = &entry.kind {
            match attr.as_ref() {
                "entry" => return Value::Identifier(tok.lexeme.clone()),
                "val" => return token_numeric_value(tok),
                "type" => return Value::Identifier(tok.structural_type.clone().unwrap_or_else(|| "unknown".to_string())),
                _ => {}
            }
        }
        let primary = if is_self {
            entry.synthesized.get(attr).or_else(|| entry.inherited.get(attr))
        } else {
            entry.synthesized.get(attr)
        };
        primary.cloned().unwrap_or(Value::NotEvaluated)
    }

    /// A procedure call's `formal = actual` comparison (`x = y` in the
    /// annotation language, applied to a `FormalArgList`/`ActualArgList`
    /// pair): walks both lists in lockstep, type-checking each position,
    /// then reports excess or missing arguments (§8 scenario 6).
    /// Diagnostics only fire on the final pass, like every other builtin.
    fn check_arglist(
        &mut self,
        formal: &pc_core::Queue<crate::value::FormalArg>,
        actual: &pc_core::Queue<Value>,
        line: u32,
        ctx: &mut NodeCtx,
    ) -> Value {
        let mut ok = true;
        let mut f_iter = formal.iter();
        let mut a_iter = actual.iter();
        loop {
            match (f_iter.next(), a_iter.next()) {
                (Some(f), Some(a)) => {
                    let actual_ty = a.type_name();
                    let compatible = match f.ty.as_str() {
                        "real" => actual_ty == "real" || actual_ty == "integer",
                        "integer" => actual_ty == "integer",
                        other => other == actual_ty,
                    };
                    if !compatible {
                        ok = false;
                        if ctx.isfinal {
                            ctx.diagnostics
                                .error(line, format!("expected {} but got {actual_ty}", f.ty))
                                .emit();
                        }
                    }
                }
                (Some(_), None) => {
                    ok = false;
                    if ctx.isfinal {
                        ctx.diagnostics.error(line, "Not Enough Arguments Used in function call".to_string()).emit();
                    }
                    break;
                }
                (None, Some(_)) => {
                    ok = false;
                    if ctx.isfinal {
                        ctx.diagnostics.error(line, "Excess Parameters Used in function call".to_string()).emit();
                    }
                    break;
                }
                (None, None) => break,
            }
        }
        Value::Int(ok as i64)
    }
}

fn token_numeric_value(tok: &Token) -> Value {
    match tok.structural_type.as_deref() {
        Some("real") => tok.lexeme.parse::<f64>().map(Value::Real).unwrap_or(Value::Error),
        _ => tok.lexeme.parse::<i64>().map(Value::Int).unwrap_or(Value::Error),
    }
}

fn symbol_name(grammar: &Grammar, symbol: &Symbol) -> String {
    match symbol {
        Symbol::Terminal(t) => t.lexeme.clone(),
        Symbol::Nonterminal(idx) => grammar.pdas[*idx].name.clone(),
        Symbol::Epsilon => String::new(),
    }
}

struct NodeCtx<'a> {
    node_idx: usize,
    pda: usize,
    production: usize,
    arena: &'a mut PnaArena<Value>,
    diagnostics: &'a mut Diagnostics,
    isfinal: bool,
    /// Source line of this node's leftmost terminal descendant, used for
    /// diagnostics instead of the annotation text's own internal line
    /// count — a value doesn't carry a token back-pointer once it's been
    /// through an expression, so this is the closest approximation of
    /// "the line this construct appears on" available at diagnostic time.
    source_line: u32,
}

/// Walks down `children[0]` until it reaches a terminal, returning that
/// token's source line, or `0` if the node has no terminal descendant
/// (an all-epsilon production).
fn leftmost_terminal_line(arena: &PnaArena<Value>, node_idx: usize) -> u32 {
    let mut cur = node_idx;
    loop {
        match &arena.get(cur).kind {
            PnaKind::Terminal(tok) => return tok.line,
            PnaKind::Nonterminal { .. } => match arena.get(cur).children.first() {
                Some(&child) => cur = child,
                None => return 0,
            },
            PnaKind::Pending => return 0,
        }
    }
}

#[cfg(test)]
mod eval_tests;
