//! Script variable values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value stored in a script variable or produced by an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Decimal value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl Value {
    /// The fallback produced when an expression cannot be evaluated.
    pub const ZERO: Value = Value::Int(0);

    /// Coerces raw client input: integer first, then decimal, else text.
    #[must_use]
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            return Value::Int(int);
        }
        match trimmed.parse::<f64>() {
            Ok(float) if float.is_finite() => Value::Float(float),
            _ => Value::Text(raw.to_owned()),
        }
    }

    /// Truthiness used by menu conditions.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            // Whole decimals keep a trailing `.0` so they read as decimals.
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{x:.1}")
            }
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_prefers_integer() {
        assert_eq!(Value::from_input("42"), Value::Int(42));
        assert_eq!(Value::from_input(" -7 "), Value::Int(-7));
    }

    #[test]
    fn test_from_input_falls_back_to_decimal_then_text() {
        assert_eq!(Value::from_input("2.5"), Value::Float(2.5));
        assert_eq!(Value::from_input("Alice"), Value::Text("Alice".to_owned()));
        assert_eq!(Value::from_input("NaN"), Value::Text("NaN".to_owned()));
    }

    #[test]
    fn test_display_keeps_decimal_point_on_whole_floats() {
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(2.25).to_string(), "2.25");
        assert_eq!(Value::Int(3).to_string(), "3");
    }

    #[test]
    fn test_untagged_serialization() {
        let json = serde_json::to_value(vec![
            Value::Int(1),
            Value::Float(1.5),
            Value::Bool(true),
            Value::from("hi"),
        ])
        .unwrap();
        assert_eq!(json, serde_json::json!([1, 1.5, true, "hi"]));

        let back: Vec<Value> = serde_json::from_value(json).unwrap();
        assert_eq!(back[0], Value::Int(1));
        assert_eq!(back[1], Value::Float(1.5));
    }
}
