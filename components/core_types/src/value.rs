//! Dialogue value representation.
//!
//! This module provides the `Value` enum that every stack slot, variable
//! binding and standard-library argument is expressed in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents any value the dialogue VM can hold.
///
/// The set of variants is closed: there is no implicit coercion between
/// them. Opcodes and library functions that need a particular variant check
/// for it explicitly.
///
/// Values serialize untagged so a snapshot reads as plain JSON
/// (`"text"`, `3.5`, `true`, `null`).
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// let name = Value::from("Sally");
/// let count = Value::Number(3.0);
///
/// assert_eq!(name.as_str(), Some("Sally"));
/// assert_eq!(count.as_number(), Some(3.0));
/// assert_eq!(Value::Null.type_name(), "null");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value (pushed by PUSH_NULL)
    Null,
    /// Boolean (true or false)
    Boolean(bool),
    /// IEEE 754 double-precision number
    Number(f64),
    /// String value
    String(String),
}

impl Value {
    /// Returns the name of this value's variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }

    /// Returns the string contents if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

/// Display form used when a value is substituted into dialogue text.
///
/// Integer-valued numbers display without a decimal point, matching how
/// authors write them in scripts.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// assert_eq!(Value::Number(3.0).to_string(), "3");
/// assert_eq!(Value::Number(2.5).to_string(), "2.5");
/// assert_eq!(Value::Boolean(true).to_string(), "True");
/// assert_eq!(Value::Null.to_string(), "null");
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Value::Number(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if n.is_sign_positive() {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
        }
    }
}
