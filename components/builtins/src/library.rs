//! Standard library registry
//!
//! A fixed mapping from function name to (arity, implementation). The VM
//! calls into it for CALL_FUNC; arity is checked before anything is
//! invoked.

use core_types::{DialogueError, DialogueResult, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::boolean::BoolOperators;
use crate::number::NumberOperators;
use crate::string::StringOperators;

/// Signature of a library function implementation
pub type NativeFn = dyn Fn(&[Value]) -> DialogueResult<Value> + Send + Sync;

/// A registered function: declared arity plus implementation
#[derive(Clone)]
pub struct LibraryFunction {
    arity: usize,
    func: Arc<NativeFn>,
}

impl LibraryFunction {
    /// Create a new function entry
    pub fn new<F>(arity: usize, func: F) -> Self
    where
        F: Fn(&[Value]) -> DialogueResult<Value> + Send + Sync + 'static,
    {
        Self {
            arity,
            func: Arc::new(func),
        }
    }

    /// Declared number of parameters
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Invoke the function
    ///
    /// The caller is responsible for having checked the argument count.
    pub fn invoke(&self, args: &[Value]) -> DialogueResult<Value> {
        (self.func)(args)
    }
}

impl fmt::Debug for LibraryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryFunction")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Registry of functions callable from dialogue bytecode
///
/// # Example
///
/// ```
/// use builtins::StandardLibrary;
/// use core_types::Value;
///
/// let library = StandardLibrary::yarn();
/// let sum = library
///     .call("Number.Add", &[Value::Number(2.0), Value::Number(3.0)])
///     .unwrap();
/// assert_eq!(sum, Value::Number(5.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StandardLibrary {
    functions: HashMap<String, LibraryFunction>,
}

impl StandardLibrary {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the Yarn operator functions
    pub fn yarn() -> Self {
        let mut library = Self::new();

        library.register("Number.Add", 2, NumberOperators::add);
        library.register("Number.Minus", 2, NumberOperators::minus);
        library.register("Number.Multiply", 2, NumberOperators::multiply);
        library.register("Number.Divide", 2, NumberOperators::divide);
        library.register("Number.Modulo", 2, NumberOperators::modulo);
        library.register("Number.UnaryMinus", 1, NumberOperators::unary_minus);
        library.register("Number.EqualTo", 2, NumberOperators::equal_to);
        library.register("Number.NotEqualTo", 2, NumberOperators::not_equal_to);
        library.register("Number.GreaterThan", 2, NumberOperators::greater_than);
        library.register(
            "Number.GreaterThanOrEqualTo",
            2,
            NumberOperators::greater_than_or_equal_to,
        );
        library.register("Number.LessThan", 2, NumberOperators::less_than);
        library.register(
            "Number.LessThanOrEqualTo",
            2,
            NumberOperators::less_than_or_equal_to,
        );

        library.register("Bool.And", 2, BoolOperators::and);
        library.register("Bool.Or", 2, BoolOperators::or);
        library.register("Bool.Xor", 2, BoolOperators::xor);
        library.register("Bool.Not", 1, BoolOperators::not);
        library.register("Bool.EqualTo", 2, BoolOperators::equal_to);
        library.register("Bool.NotEqualTo", 2, BoolOperators::not_equal_to);

        library.register("String.Add", 2, StringOperators::add);
        library.register("String.EqualTo", 2, StringOperators::equal_to);
        library.register("String.NotEqualTo", 2, StringOperators::not_equal_to);

        library
    }

    /// Register (or replace) a function
    pub fn register<F>(&mut self, name: impl Into<String>, arity: usize, func: F)
    where
        F: Fn(&[Value]) -> DialogueResult<Value> + Send + Sync + 'static,
    {
        self.functions
            .insert(name.into(), LibraryFunction::new(arity, func));
    }

    /// Look up a function
    pub fn get(&self, name: &str) -> Option<&LibraryFunction> {
        self.functions.get(name)
    }

    /// Check whether a function is registered
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Names of all registered functions, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up, arity-check and invoke a function
    pub fn call(&self, name: &str, args: &[Value]) -> DialogueResult<Value> {
        let function = self.get(name).ok_or_else(|| DialogueError::UnknownFunction {
            name: name.to_string(),
        })?;
        if function.arity() != args.len() {
            return Err(DialogueError::Arity {
                function: name.to_string(),
                expected: function.arity(),
                received: args.len(),
            });
        }
        function.invoke(args)
    }
}

/// Extract a numeric argument or report a type mismatch
pub(crate) fn number_arg(function: &str, args: &[Value], index: usize) -> DialogueResult<f64> {
    let value = &args[index];
    value.as_number().ok_or_else(|| DialogueError::TypeMismatch {
        function: function.to_string(),
        expected: "number",
        found: value.type_name(),
    })
}

/// Extract a boolean argument or report a type mismatch
pub(crate) fn bool_arg(function: &str, args: &[Value], index: usize) -> DialogueResult<bool> {
    let value = &args[index];
    value.as_bool().ok_or_else(|| DialogueError::TypeMismatch {
        function: function.to_string(),
        expected: "boolean",
        found: value.type_name(),
    })
}

/// Extract a string argument or report a type mismatch
pub(crate) fn str_arg<'a>(function: &str, args: &'a [Value], index: usize) -> DialogueResult<&'a str> {
    let value = &args[index];
    value.as_str().ok_or_else(|| DialogueError::TypeMismatch {
        function: function.to_string(),
        expected: "string",
        found: value.type_name(),
    })
}
