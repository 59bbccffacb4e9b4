//! Boolean operators

use core_types::{DialogueResult, Value};

use crate::library::bool_arg;

/// Operators registered under the `Bool.` prefix
pub struct BoolOperators;

impl BoolOperators {
    fn pair(function: &str, args: &[Value]) -> DialogueResult<(bool, bool)> {
        Ok((bool_arg(function, args, 0)?, bool_arg(function, args, 1)?))
    }

    /// Bool.And(a, b)
    pub fn and(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Bool.And", args)?;
        Ok(Value::Boolean(a && b))
    }

    /// Bool.Or(a, b)
    pub fn or(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Bool.Or", args)?;
        Ok(Value::Boolean(a || b))
    }

    /// Bool.Xor(a, b)
    pub fn xor(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Bool.Xor", args)?;
        Ok(Value::Boolean(a ^ b))
    }

    /// Bool.Not(a)
    pub fn not(args: &[Value]) -> DialogueResult<Value> {
        let a = bool_arg("Bool.Not", args, 0)?;
        Ok(Value::Boolean(!a))
    }

    /// Bool.EqualTo(a, b)
    pub fn equal_to(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Bool.EqualTo", args)?;
        Ok(Value::Boolean(a == b))
    }

    /// Bool.NotEqualTo(a, b)
    pub fn not_equal_to(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("Bool.NotEqualTo", args)?;
        Ok(Value::Boolean(a != b))
    }
}
