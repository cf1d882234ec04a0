//! Fabula Expr — the restricted expression language used by script
//! conditions, assignments and rolls.
//!
//! Supports numeric, boolean and string literals, variable references,
//! `+ - * / % ^`, comparisons and `and`/`or`/`not`. There are no calls,
//! loops or definitions. Brace characters are stripped and dice notation
//! (`2d6`, `d20`) is expanded before parsing.
//!
//! [`evaluate`] never fails: anything it cannot evaluate yields `0`.

pub mod dice;
pub mod eval;
pub mod lexer;
pub mod parser;

use std::sync::{LazyLock, Mutex, PoisonError};

use fabula_core::rng::{DeterministicRng, SystemRng};
use fabula_core::state::Variables;
use fabula_core::value::Value;
use thiserror::Error;
use tracing::debug;

pub use dice::expand_dice;

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Unrecognized input at a byte offset.
    #[error("unrecognized input at offset {0}")]
    Lex(usize),

    /// Syntax the grammar does not support.
    #[error("parse error: {0}")]
    Parse(String),

    /// Operand types do not fit the operator.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Integer overflow or a non-finite decimal result.
    #[error("arithmetic overflow")]
    Overflow,

    /// A dice term that cannot be rolled.
    #[error("invalid dice term '{0}'")]
    InvalidDice(String),
}

static PROCESS_RNG: LazyLock<Mutex<SystemRng>> = LazyLock::new(|| Mutex::new(SystemRng::from_os()));

/// Evaluates `expression` against `variables`, rolling dice from the
/// process-wide generator. Returns `0` on any failure.
#[must_use]
pub fn evaluate(expression: &str, variables: &Variables) -> Value {
    let mut rng = PROCESS_RNG.lock().unwrap_or_else(PoisonError::into_inner);
    evaluate_with(expression, variables, &mut *rng)
}

/// Evaluates `expression` rolling dice from `rng`. Returns `0` on any
/// failure.
#[must_use]
pub fn evaluate_with(
    expression: &str,
    variables: &Variables,
    rng: &mut dyn DeterministicRng,
) -> Value {
    try_evaluate(expression, variables, rng).unwrap_or_else(|err| {
        debug!(expression, error = %err, "expression fell back to 0");
        Value::ZERO
    })
}

/// Evaluates a condition; failures read as `false`.
#[must_use]
pub fn is_satisfied(
    condition: &str,
    variables: &Variables,
    rng: &mut dyn DeterministicRng,
) -> bool {
    evaluate_with(condition, variables, rng).is_truthy()
}

/// Evaluates `expression`, reporting why it failed.
///
/// # Errors
///
/// Returns `EvalError` on invalid dice, unrecognized input, unsupported
/// syntax, or an arithmetic failure.
pub fn try_evaluate(
    expression: &str,
    variables: &Variables,
    rng: &mut dyn DeterministicRng,
) -> Result<Value, EvalError> {
    let stripped: String = expression.chars().filter(|c| !matches!(c, '{' | '}')).collect();
    let expanded = expand_dice(stripped.trim(), rng)?;
    let tokens = lexer::tokenize(&expanded).map_err(EvalError::Lex)?;
    let expr = parser::parse(&tokens)?;
    eval::eval(&expr, variables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_test_support::{MockRng, SequenceRng};

    #[test]
    fn test_two_d_six_is_always_between_two_and_twelve() {
        for _ in 0..200 {
            match evaluate("2d6", &Variables::new()) {
                Value::Int(total) => assert!((2..=12).contains(&total)),
                other => panic!("expected integer, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_variable_arithmetic() {
        let mut vars = Variables::new();
        vars.insert("x".to_owned(), Value::Int(5));

        assert_eq!(evaluate("x+1", &vars), Value::Int(6));
    }

    #[test]
    fn test_malformed_input_falls_back_to_zero() {
        assert_eq!(evaluate("bogus{{", &Variables::new()), Value::Int(0));
        assert_eq!(evaluate("1 +", &Variables::new()), Value::Int(0));
        assert_eq!(evaluate("max(1, 2)", &Variables::new()), Value::Int(0));
        assert_eq!(evaluate("", &Variables::new()), Value::Int(0));
    }

    #[test]
    fn test_deeply_nested_expression_falls_back_to_zero() {
        let deep = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
        let negations = format!("{}1", "-".repeat(5000));

        assert_eq!(evaluate(&deep, &Variables::new()), Value::Int(0));
        assert_eq!(evaluate(&negations, &Variables::new()), Value::Int(0));
        assert_eq!(evaluate("((1 + 2)) * -(-3)", &Variables::new()), Value::Int(9));
    }

    #[test]
    fn test_large_decimal_literal_keeps_its_value() {
        assert_eq!(evaluate("1e20", &Variables::new()), Value::Float(1e20));
        assert_eq!(evaluate("1e20 > 99", &Variables::new()), Value::Bool(true));
    }

    #[test]
    fn test_braces_are_stripped_before_evaluation() {
        let mut vars = Variables::new();
        vars.insert("hp".to_owned(), Value::Int(3));

        assert_eq!(evaluate("{hp} * 2", &vars), Value::Int(6));
    }

    #[test]
    fn test_dice_and_modifiers_use_injected_rng() {
        let mut rng = SequenceRng::new(vec![17]);
        let mut vars = Variables::new();
        vars.insert("bonus".to_owned(), Value::Int(3));

        assert_eq!(
            evaluate_with("1d20 + bonus", &vars, &mut rng),
            Value::Int(20)
        );
    }

    #[test]
    fn test_is_satisfied_treats_errors_as_false() {
        let mut rng = MockRng;

        assert!(!is_satisfied("1 / 0", &Variables::new(), &mut rng));
        assert!(is_satisfied("2 > 1", &Variables::new(), &mut rng));
    }

    #[test]
    fn test_try_evaluate_reports_the_failure() {
        let mut rng = MockRng;

        assert_eq!(
            try_evaluate("1 ? 2", &Variables::new(), &mut rng),
            Err(EvalError::Lex(2))
        );
    }
}
