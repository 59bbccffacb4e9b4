//! Number operators

use core_types::{DialogueError, DialogueResult, Value};

use crate::library::number_arg;

/// Operators registered under the `Number.` prefix
///
/// Every operator takes its arguments in push order: for a binary
/// operator `args[0]` is the left operand.
pub struct NumberOperators;

impl NumberOperators {
    fn pair(function: &str, args: &[Value]) -> DialogueResult<(f64, f64)> {
        Ok((number_arg(function, args, 0)?, number_arg(function, args, 1)?))
    }

    fn divisor_pair(function: &str, args: &[Value]) -> DialogueResult<(f64, f64)> {
        let (a, b) = Self::pair(function, args)?;
        if b == 0.0 {
            return Err(DialogueError::DivisionByZero {
                function: function.to_string(),
            });
        }
        Ok((a, b))
    }

    fn finite(function: &str, n: f64) -> DialogueResult<Value> {
        if n.is_finite() {
            Ok(Value::Number(n))
        } else {
            Err(DialogueError::NumberOverflow {
                function: function.to_string(),
            })
        }
    }

    /// Number.Add(a, b)
    pub fn add(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Number.Add", args)?;
        Self::finite("Number.Add", a + b)
    }

    /// Number.Minus(a, b)
    pub fn minus(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Number.Minus", args)?;
        Self::finite("Number.Minus", a - b)
    }

    /// Number.Multiply(a, b)
    pub fn multiply(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Number.Multiply", args)?;
        Self::finite("Number.Multiply", a * b)
    }

    /// Number.Divide(a, b)
    ///
    /// A zero divisor is an error.
    pub fn divide(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::divisor_pair("Number.Divide", args)?;
        Self::finite("Number.Divide", a / b)
    }

    /// Number.Modulo(a, b) - truncated remainder, sign follows `a`
    pub fn modulo(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::divisor_pair("Number.Modulo", args)?;
        Ok(Value::Number(a % b))
    }

    /// Number.UnaryMinus(a)
    pub fn unary_minus(args: &[Value]) -> DialogueResult<Value> {
        let a = number_arg("Number.UnaryMinus", args, 0)?;
        Ok(Value::Number(-a))
    }

    /// Number.EqualTo(a, b)
    pub fn equal_to(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Number.EqualTo", args)?;
        Ok(Value::Boolean(a == b))
    }

    /// Number.NotEqualTo(a, b)
    pub fn not_equal_to(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Number.NotEqualTo", args)?;
        Ok(Value::Boolean(a != b))
    }

    /// Number.GreaterThan(a, b)
    pub fn greater_than(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Number.GreaterThan", args)?;
        Ok(Value::Boolean(a > b))
    }

    /// Number.GreaterThanOrEqualTo(a, b)
    pub fn greater_than_or_equal_to(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Number.GreaterThanOrEqualTo", args)?;
        Ok(Value::Boolean(a >= b))
    }

    /// Number.LessThan(a, b)
    pub fn less_than(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Number.LessThan", args)?;
        Ok(Value::Boolean(a < b))
    }

    /// Number.LessThanOrEqualTo(a, b)
    pub fn less_than_or_equal_to(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Number.LessThanOrEqualTo", args)?;
        Ok(Value::Boolean(a <= b))
    }
}
