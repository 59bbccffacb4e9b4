//! String operators

use core_types::{DialogueResult, Value};

use crate::library::str_arg;

/// Operators registered under the `String.` prefix
pub struct StringOperators;

impl StringOperators {
    fn pair<'a>(function: &str, args: &'a [Value]) -> DialogueResult<(&'a str, &'a str)> {
        Ok((str_arg(function, args, 0)?, str_arg(function, args, 1)?))
    }

    /// String.Add(a, b) - concatenation
    pub fn add(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("String.Add", args)?;
        let mut joined = String::with_capacity(a.len() + b.len());
        joined.push_str(a);
        joined.push_str(b);
        Ok(Value::String(joined))
    }

    /// String.EqualTo(a, b)
    pub fn equal_to(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("String.EqualTo", args)?;
        Ok(Value::Boolean(a == b))
    }

    /// String.NotEqualTo(a, b)
    pub fn not_equal_to(args: &[Value]) -> DialogueResult<Value> {
        let (a, b) = Self::pair("String.NotEqualTo", args)?;
        Ok(Value::Boolean(a != b))
    }
}
