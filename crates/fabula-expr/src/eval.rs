//! Tree-walking evaluation over script values.

use std::cmp::Ordering;

use fabula_core::state::Variables;
use fabula_core::value::Value;

use crate::EvalError;
use crate::parser::{ArithOp, CmpOp, Expr};

/// Evaluates `expr`. Unbound variables read as `0`.
///
/// # Errors
///
/// Returns `EvalError` on type mismatches, division by zero or overflow.
pub fn eval(expr: &Expr, variables: &Variables) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Var(name) => Ok(variables.get(name).cloned().unwrap_or(Value::ZERO)),
        Expr::Neg(inner) => match number(&eval(inner, variables)?)? {
            Number::Int(i) => i.checked_neg().map(Value::Int).ok_or(EvalError::Overflow),
            Number::Float(f) => Ok(Value::Float(-f)),
        },
        Expr::Not(inner) => Ok(Value::Bool(!eval(inner, variables)?.is_truthy())),
        Expr::And(lhs, rhs) => {
            let result =
                eval(lhs, variables)?.is_truthy() && eval(rhs, variables)?.is_truthy();
            Ok(Value::Bool(result))
        }
        Expr::Or(lhs, rhs) => {
            let result =
                eval(lhs, variables)?.is_truthy() || eval(rhs, variables)?.is_truthy();
            Ok(Value::Bool(result))
        }
        Expr::Arith(op, lhs, rhs) => arith(*op, &eval(lhs, variables)?, &eval(rhs, variables)?),
        Expr::Compare(op, lhs, rhs) => {
            compare(*op, &eval(lhs, variables)?, &eval(rhs, variables)?).map(Value::Bool)
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

fn number(value: &Value) -> Result<Number, EvalError> {
    match value {
        Value::Int(i) => Ok(Number::Int(*i)),
        Value::Float(f) => Ok(Number::Float(*f)),
        Value::Bool(b) => Ok(Number::Int(i64::from(*b))),
        Value::Text(_) => Err(EvalError::TypeMismatch(format!(
            "expected a number, found text {value:?}"
        ))),
    }
}

fn finite(f: f64) -> Result<Value, EvalError> {
    if f.is_finite() {
        Ok(Value::Float(f))
    } else {
        Err(EvalError::Overflow)
    }
}

fn arith(op: ArithOp, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
    if let (ArithOp::Add, Value::Text(a), Value::Text(b)) = (op, lhs, rhs) {
        return Ok(Value::Text(format!("{a}{b}")));
    }
    let (a, b) = (number(lhs)?, number(rhs)?);
    match (op, a, b) {
        (ArithOp::Add, Number::Int(x), Number::Int(y)) => {
            x.checked_add(y).map(Value::Int).ok_or(EvalError::Overflow)
        }
        (ArithOp::Sub, Number::Int(x), Number::Int(y)) => {
            x.checked_sub(y).map(Value::Int).ok_or(EvalError::Overflow)
        }
        (ArithOp::Mul, Number::Int(x), Number::Int(y)) => {
            x.checked_mul(y).map(Value::Int).ok_or(EvalError::Overflow)
        }
        (ArithOp::Rem, Number::Int(x), Number::Int(y)) => {
            if y == 0 {
                return Err(EvalError::DivisionByZero);
            }
            // Floored modulo: the result takes the divisor's sign.
            let r = x.checked_rem(y).ok_or(EvalError::Overflow)?;
            Ok(Value::Int(if r != 0 && (r < 0) != (y < 0) { r + y } else { r }))
        }
        (ArithOp::Pow, Number::Int(x), Number::Int(y)) if y >= 0 => {
            let exp = u32::try_from(y).map_err(|_| EvalError::Overflow)?;
            x.checked_pow(exp).map(Value::Int).ok_or(EvalError::Overflow)
        }
        (ArithOp::Add, a, b) => finite(a.as_f64() + b.as_f64()),
        (ArithOp::Sub, a, b) => finite(a.as_f64() - b.as_f64()),
        (ArithOp::Mul, a, b) => finite(a.as_f64() * b.as_f64()),
        (ArithOp::Div, a, b) => {
            if b.as_f64() == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            finite(a.as_f64() / b.as_f64())
        }
        (ArithOp::Rem, a, b) => {
            let (x, y) = (a.as_f64(), b.as_f64());
            if y == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            let r = x % y;
            finite(if r != 0.0 && (r < 0.0) != (y < 0.0) { r + y } else { r })
        }
        (ArithOp::Pow, a, b) => finite(a.as_f64().powf(b.as_f64())),
    }
}

fn compare(op: CmpOp, lhs: &Value, rhs: &Value) -> Result<bool, EvalError> {
    let ordering = match (lhs, rhs) {
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Text(_), _) | (_, Value::Text(_)) => None,
        _ => match (number(lhs)?, number(rhs)?) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        },
    };
    match (op, ordering) {
        (CmpOp::Eq, ordering) => Ok(ordering == Some(Ordering::Equal)),
        (CmpOp::Ne, ordering) => Ok(ordering != Some(Ordering::Equal)),
        (_, None) => Err(EvalError::TypeMismatch(format!(
            "cannot order {lhs:?} and {rhs:?}"
        ))),
        (CmpOp::Gt, Some(o)) => Ok(o == Ordering::Greater),
        (CmpOp::Ge, Some(o)) => Ok(o != Ordering::Less),
        (CmpOp::Lt, Some(o)) => Ok(o == Ordering::Less),
        (CmpOp::Le, Some(o)) => Ok(o != Ordering::Greater),
    }
}
