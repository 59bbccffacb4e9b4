//! Standard library for the dialogue runtime
//!
//! This crate provides the function registry consulted by CALL_FUNC and
//! the default set of Yarn operators:
//! - `Number.*` arithmetic and comparison
//! - `Bool.*` logic
//! - `String.*` concatenation and comparison
//!
//! # Example
//!
//! ```
//! use builtins::StandardLibrary;
//! use core_types::Value;
//!
//! let mut library = StandardLibrary::yarn();
//! library.register("shout", 1, |args| {
//!     Ok(Value::String(args[0].to_string().to_uppercase()))
//! });
//!
//! let loud = library.call("shout", &[Value::from("hey")]).unwrap();
//! assert_eq!(loud, Value::from("HEY"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boolean;
pub mod library;
pub mod number;
pub mod string;

// Re-export main types for convenience
pub use boolean::BoolOperators;
pub use library::{LibraryFunction, NativeFn, StandardLibrary};
pub use number::NumberOperators;
pub use string::StringOperators;
