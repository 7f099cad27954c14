//! The built-in action registry (§4.3), rewritten as a tagged-variant enum
//! plus an exhaustive `match` per §9 ("dynamic dispatch... rewrite as
//! tagged-variant enum"). The name table below exists only for parsing —
//! dispatch itself never goes through it.

use pc_core::{Diagnostics, Queue};

use crate::error::{Result, SemanticError};
use crate::scope::ScopeTree;
use crate::value::{FormalArg, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    AddType,
    AddArg,
    Lookup,
    GetType,
    GetArray,
    Array,
    Width,
    Low,
    MakeListF,
    MakeListA,
    ListAppend,
    ResolveProc,
    PushScope,
    PopScope,
    ResetTemps,
    Emit,
    Print,
    Error,
    Halt,
}

/// Case-insensitive lookup over the fixed alphabetized table (§4.3).
pub fn from_name(name: &str) -> Option<Builtin> {
    match name.to_ascii_lowercase().as_str() {
        "addarg" => Some(Builtin::AddArg),
        "addtype" => Some(Builtin::AddType),
        "array" => Some(Builtin::Array),
        "emit" => Some(Builtin::Emit),
        "error" => Some(Builtin::Error),
        "getarray" => Some(Builtin::GetArray),
        "gettype" => Some(Builtin::GetType),
        "halt" => Some(Builtin::Halt),
        "listappend" => Some(Builtin::ListAppend),
        "lookup" => Some(Builtin::Lookup),
        "low" => Some(Builtin::Low),
        "makelista" => Some(Builtin::MakeListA),
        "makelistf" => Some(Builtin::MakeListF),
        "popscope" => Some(Builtin::PopScope),
        "print" => Some(Builtin::Print),
        "pushscope" => Some(Builtin::PushScope),
        "resettemps" => Some(Builtin::ResetTemps),
        "resolveproc" => Some(Builtin::ResolveProc),
        "width" => Some(Builtin::Width),
        _ => None,
    }
}

/// The process-wide mutable state a builtin call may touch (§9 "Global
/// mutable state... become fields of an `AttributeEngine` context passed
/// explicitly").
pub struct BuiltinCtx<'a> {
    pub scope: &'a mut ScopeTree,
    pub diagnostics: &'a mut Diagnostics,
    pub print_log: &'a mut Vec<String>,
    pub tempcount: &'a mut u32,
    pub labelcount: &'a mut u32,
    pub isfinal: bool,
}

fn arg(args: &[Value], i: usize) -> Value {
    args.get(i).cloned().unwrap_or(Value::Error)
}

fn identifier_name(v: &Value) -> Option<&str> {
    match v {
        Value::Identifier(s) => Some(s),
        _ => None,
    }
}

/// Same as `identifier_name(&arg(args, i))`, but returning an owned
/// `String` rather than a borrow of a temporary `Value` that would
/// otherwise be dropped at the end of the binding statement.
fn arg_identifier(args: &[Value], i: usize) -> Option<String> {
    match args.get(i) {
        Some(Value::Identifier(s)) => Some(s.clone()),
        _ => None,
    }
}

pub fn call(b: Builtin, args: Vec<Value>, line: u32, ctx: &mut BuiltinCtx) -> Result<Value> {
    if args.iter().any(Value::is_not_evaluated) && !matches!(b, Builtin::PopScope | Builtin::ResetTemps | Builtin::Halt) {
        return Ok(Value::NotEvaluated);
    }

    match b {
        Builtin::AddType => {
            let Some(id) = arg_identifier(&args, 0) else { return Ok(Value::Error) };
            let ty = arg(&args, 1);
            match ctx.scope.add_type(&id, ty, line) {
                Ok(()) => Ok(Value::Void),
                Err(msg) => {
                    // Unlike `Lookup`'s "undeclared identifier", this isn't
                    // gated on `isfinal`: `addtype` only ever gets the one
                    // attempt the multi-pass driver grants a mutating
                    // built-in, so whatever it finds on that attempt is
                    // already the converged answer.
                    ctx.diagnostics.error(line, msg.to_string()).emit();
                    Ok(Value::Error)
                }
            }
        }
        Builtin::AddArg => {
            let Some(id) = arg_identifier(&args, 0) else { return Ok(Value::Error) };
            let ty = arg(&args, 1).type_name();
            ctx.scope.add_arg(&id, &ty);
            Ok(Value::Void)
        }
        Builtin::Lookup => {
            let Some(id) = arg_identifier(&args, 0) else { return Ok(Value::Error) };
            match ctx.scope.lookup(&id) {
                Some(ty) => Ok(ty.clone()),
                None => {
                    if ctx.isfinal {
                        ctx.diagnostics.error(line, format!("undeclared identifier {id:?}")).emit();
                    }
                    Ok(Value::Null)
                }
            }
        }
        Builtin::GetType => Ok(Value::Identifier(arg(&args, 0).type_name())),
        Builtin::GetArray => match arg(&args, 0) {
            Value::Array { element_type, .. } => Ok(Value::Identifier(element_type)),
            _ => {
                if ctx.isfinal {
                    ctx.diagnostics.error(line, "identifier is not declared as an array".to_string()).emit();
                }
                Ok(Value::Error)
            }
        },
        Builtin::Array => {
            let elem = arg(&args, 0).type_name();
            let (low, high) = match arg(&args, 1) {
                Value::ActualArgList(q) => {
                    let items: Vec<Value> = q.into_iter().collect();
                    match (items.first(), items.get(1)) {
                        (Some(Value::Int(l)), Some(Value::Int(h))) => (*l, *h),
                        _ => (0, -1),
                    }
                }
                _ => (0, -1),
            };
            Ok(Value::Array { element_type: elem, low, high })
        }
        Builtin::Width => Ok(arg(&args, 0).array_width()),
        Builtin::Low => Ok(arg(&args, 0).array_low()),
        Builtin::MakeListF => Ok(Value::FormalArgList(Queue::of_one(FormalArg {
            name: String::new(),
            ty: arg(&args, 0).type_name(),
        }))),
        Builtin::MakeListA => Ok(Value::ActualArgList(Queue::of_one(arg(&args, 0)))),
        Builtin::ListAppend => match arg(&args, 0) {
            Value::FormalArgList(mut q) => {
                q.push_back(FormalArg { name: String::new(), ty: arg(&args, 1).type_name() });
                Ok(Value::FormalArgList(q))
            }
            Value::ActualArgList(mut q) => {
                q.push_back(arg(&args, 1));
                Ok(Value::ActualArgList(q))
            }
            _ => Ok(Value::Error),
        },
        Builtin::ResolveProc => {
            let Some(name) = arg_identifier(&args, 0) else { return Ok(Value::Error) };
            match ctx.scope.resolve_proc(&name) {
                Some(full_id) => Ok(Value::Label(full_id.to_string())),
                None => {
                    if ctx.isfinal {
                        ctx.diagnostics.error(line, format!("undeclared procedure {name:?}")).emit();
                    }
                    Ok(Value::Error)
                }
            }
        }
        Builtin::PushScope => {
            let Some(name) = arg_identifier(&args, 0) else { return Ok(Value::Error) };
            ctx.scope.push(name);
            Ok(Value::Void)
        }
        Builtin::PopScope => {
            ctx.scope.pop();
            Ok(Value::Void)
        }
        Builtin::ResetTemps => {
            *ctx.tempcount = 0;
            *ctx.labelcount = 0;
            Ok(Value::Void)
        }
        Builtin::Emit => {
            let mut line_text = String::new();
            for (i, a) in args.iter().enumerate() {
                if i > 0 {
                    line_text.push(' ');
                }
                match identifier_name(a) {
                    Some("labelf" | "label") => line_text.push_str(ctx.scope.active_full_id()),
                    _ => line_text.push_str(&render_emit_arg(a)),
                }
            }
            ctx.scope.emit(line_text);
            Ok(Value::Void)
        }
        Builtin::Print => {
            let rendered = args.iter().map(render_emit_arg).collect::<Vec<_>>().join(" ");
            ctx.print_log.push(rendered);
            Ok(Value::Void)
        }
        Builtin::Error => {
            let message = match arg(&args, 1) {
                Value::Code(s) | Value::Identifier(s) => s,
                other => format!("{other:?}"),
            };
            ctx.diagnostics.error(line, message).emit();
            Ok(Value::Void)
        }
        Builtin::Halt => {
            log::error!("halt() invoked at line {line}");
            Err(SemanticError::Halted { line })
        }
    }
}

fn render_emit_arg(v: &Value) -> String {
    match v {
        Value::Code(s) | Value::Identifier(s) | Value::Temp(s) | Value::Label(s) => s.clone(),
        Value::Int(n) => n.to_string(),
        Value::Real(r) => r.to_string(),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod builtins_tests;
