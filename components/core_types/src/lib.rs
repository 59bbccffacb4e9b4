//! Core dialogue value types and error handling.
//!
//! This crate provides the foundational types shared by every part of the
//! dialogue runtime: the runtime value representation and the error
//! taxonomy surfaced to hosts.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of dialogue values
//! - [`DialogueError`] - Fatal runtime errors raised by the VM
//! - [`ErrorKind`] - Coarse classification of those errors
//!
//! # Examples
//!
//! ```
//! use core_types::{DialogueError, ErrorKind, Value};
//!
//! let gold = Value::Number(42.0);
//! assert_eq!(gold.type_name(), "number");
//! assert_eq!(gold.to_string(), "42");
//!
//! let error = DialogueError::UnsetVariable {
//!     name: "$gold".to_string(),
//! };
//! assert_eq!(error.kind(), ErrorKind::Lookup);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod value;

pub use error::{DialogueError, DialogueResult, ErrorKind};
pub use value::Value;
