//! The tagged attribute value and the arithmetic/comparison rules that
//! operate on it.

use pc_core::Queue;

/// One formal parameter: a name plus its declared type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormalArg {
    pub name: String,
    pub ty: String,
}

/// An attribute value. `NotEvaluated` and `Null` are both legal in
/// intermediate passes (invariant (f)); only `NotEvaluated` is forbidden
/// from surviving into the final pass's output.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Real(f64),
    /// An identifier-string value (a declared type name, a token spelling
    /// used as a type tag, etc.) — distinct from `Code`, which is always
    /// quoted TAC text.
    Identifier(String),
    Code(String),
    Array { element_type: String, low: i64, high: i64 },
    FormalArgList(Queue<FormalArg>),
    ActualArgList(Queue<Value>),
    Temp(String),
    Label(String),
    Void,
    Null,
    NotEvaluated,
    Error,
}

impl Value {
    pub fn is_not_evaluated(&self) -> bool {
        matches!(self, Value::NotEvaluated)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `width(id)`: `high - low + 1` for an array value, otherwise `Error`.
    pub fn array_width(&self) -> Value {
        match self {
            Value::Array { low, high, .. } => Value::Int(high - low + 1),
            _ => Value::Error,
        }
    }

    /// `low(id)`: the declared lower bound of an array value.
    pub fn array_low(&self) -> Value {
        match self {
            Value::Array { low, .. } => Value::Int(*low),
            _ => Value::Error,
        }
    }

    /// `gettype(x)`: the structural type name a value carries, dispatched
    /// by variant rather than by re-consulting the lexer (the value no
    /// longer carries a token by the time an expression holds it).
    pub fn type_name(&self) -> String {
        match self {
            Value::Int(_) => "integer".to_string(),
            Value::Real(_) => "real".to_string(),
            Value::Identifier(name) => name.clone(),
            Value::Code(_) => "code".to_string(),
            Value::Array { element_type, low, high } => format!("array({element_type}, {low}..{high})"),
            Value::FormalArgList(_) => "formal".to_string(),
            Value::ActualArgList(_) => "actual".to_string(),
            Value::Temp(_) => "temp".to_string(),
            Value::Label(_) => "label".to_string(),
            Value::Void => "void".to_string(),
            Value::Null => "null".to_string(),
            Value::NotEvaluated => "not-evaluated".to_string(),
            Value::Error => "error".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Mul,
    Div,
    Add,
    Sub,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    Or,
    And,
}

/// Arithmetic and comparison with implicit numeric coercion (`int op real
/// -> real`). Division between two integers truncates per C integer
/// division, then the truncated quotient is stored as `Real` — a
/// deliberately kept, not patched, legacy behavior (see DESIGN.md).
pub fn apply_binop(op: BinOp, lhs: Value, rhs: Value) -> Value {
    if lhs.is_not_evaluated() || rhs.is_not_evaluated() {
        return Value::NotEvaluated;
    }
    match (op, &lhs, &rhs) {
        (BinOp::Eq, Value::Null, other) | (BinOp::Eq, other, Value::Null) => {
            return Value::Int((other.is_null() || other.is_not_evaluated()) as i64);
        }
        (BinOp::Ne, Value::Null, other) | (BinOp::Ne, other, Value::Null) => {
            return Value::Int(!(other.is_null() || other.is_not_evaluated()) as i64);
        }
        _ if lhs.is_null() || rhs.is_null() => return Value::Null,
        _ => {}
    }

    match op {
        BinOp::Mul => numeric_binop(lhs, rhs, |a, b| a * b, |a, b| a * b),
        BinOp::Add => numeric_binop(lhs, rhs, |a, b| a + b, |a, b| a + b),
        BinOp::Sub => numeric_binop(lhs, rhs, |a, b| a - b, |a, b| a - b),
        BinOp::Div => divide(lhs, rhs),
        BinOp::Lt => compare(lhs, rhs, |a, b| a < b, |a, b| a < b),
        BinOp::Gt => compare(lhs, rhs, |a, b| a > b, |a, b| a > b),
        BinOp::Le => compare(lhs, rhs, |a, b| a <= b, |a, b| a <= b),
        BinOp::Ge => compare(lhs, rhs, |a, b| a >= b, |a, b| a >= b),
        BinOp::Eq => equals(lhs, rhs),
        BinOp::Ne => negate_int(equals(lhs, rhs)),
        BinOp::Or => logical(lhs, rhs, |a, b| a != 0 || b != 0),
        BinOp::And => logical(lhs, rhs, |a, b| a != 0 && b != 0),
    }
}

fn as_real(v: &Value) -> Option<f64> {
    match v {
        Value::Int(n) => Some(*n as f64),
        Value::Real(r) => Some(*r),
        _ => None,
    }
}

fn numeric_binop(lhs: Value, rhs: Value, int_op: fn(i64, i64) -> i64, real_op: fn(f64, f64) -> f64) -> Value {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => Value::Int(int_op(*a, *b)),
        _ => match (as_real(&lhs), as_real(&rhs)) {
            (Some(a), Some(b)) => Value::Real(real_op(a, b)),
            _ => Value::Error,
        },
    }
}

/// int/int division truncates toward zero, then the truncated quotient is
/// widened to `Real` — matching the legacy `result.real_ = v1.int_ / v2.int_`
/// assignment rather than performing real division on the integer operands.
fn divide(lhs: Value, rhs: Value) -> Value {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) if *b != 0 => Value::Real((a / b) as f64),
        _ => match (as_real(&lhs), as_real(&rhs)) {
            (Some(a), Some(b)) if b != 0.0 => Value::Real(a / b),
            _ => Value::Error,
        },
    }
}

fn compare(lhs: Value, rhs: Value, int_op: fn(i64, i64) -> bool, real_op: fn(f64, f64) -> bool) -> Value {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => Value::Int(int_op(*a, *b) as i64),
        _ => match (as_real(&lhs), as_real(&rhs)) {
            (Some(a), Some(b)) => Value::Int(real_op(a, b) as i64),
            _ => Value::Error,
        },
    }
}

fn logical(lhs: Value, rhs: Value, op: fn(i64, i64) -> bool) -> Value {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => Value::Int(op(*a, *b) as i64),
        _ => Value::Error,
    }
}

fn equals(lhs: Value, rhs: Value) -> Value {
    let result = match (&lhs, &rhs) {
        (Value::Identifier(a) | Value::Code(a), Value::Identifier(b) | Value::Code(b)) => a == b,
        (Value::Void, Value::Void) => true,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Int(a), Value::Real(b)) | (Value::Real(b), Value::Int(a)) => (*a as f64) == *b,
        (Value::Real(a), Value::Real(b)) => a == b,
        (
            Value::Array { element_type: t1, low: l1, high: h1 },
            Value::Array { element_type: t2, low: l2, high: h2 },
        ) => t1 == t2 && l1 == l2 && h1 == h2,
        _ => false,
    };
    Value::Int(result as i64)
}

fn negate_int(v: Value) -> Value {
    match v {
        Value::Int(n) => Value::Int((n == 0) as i64),
        other => other,
    }
}

/// Unary negation. Identifier/code operands are a type error.
pub fn negate(v: Value) -> Value {
    match v {
        Value::Int(n) => Value::Int(-n),
        Value::Real(r) => Value::Real(-r),
        Value::NotEvaluated => Value::NotEvaluated,
        Value::Null => Value::Null,
        _ => Value::Error,
    }
}

/// `not` — logical negation over an int truth value.
pub fn logical_not(v: Value) -> Value {
    match v {
        Value::Int(n) => Value::Int((n == 0) as i64),
        Value::NotEvaluated => Value::NotEvaluated,
        _ => Value::Error,
    }
}

#[cfg(test)]
mod value_tests;
