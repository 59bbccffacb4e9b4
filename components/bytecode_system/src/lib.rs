//! Bytecode system for the dialogue runtime
//!
//! This crate provides the Yarn instruction set, the immutable program
//! store and the string table, together with their loaders.
//!
//! # Features
//!
//! - Stack-machine opcode set with raw-number compatibility
//! - Protobuf binary bundles (`prost`) and protobuf-JSON documents (`serde_json`)
//! - CSV string tables and line metadata (`csv`)
//! - In-code program construction for tests and tools
//!
//! # Example
//!
//! ```
//! use bytecode_system::{Node, OpCode, Operand, Program, StringTable};
//!
//! let mut node = Node::new("Start");
//! node.emit(OpCode::RunLine, vec![Operand::from("line:1")]);
//! node.emit(OpCode::Stop, vec![]);
//!
//! let program = Program::new("demo").with_node(node);
//! let strings = StringTable::new().with_line("line:1", "Hi!", 1);
//!
//! // Serialize
//! let bytes = program.to_bytes();
//! let restored = Program::from_bytes(&bytes).unwrap();
//! assert_eq!(restored.node("Start").unwrap().instruction_count(), 2);
//! assert_eq!(strings.text("line:1"), Some("Hi!"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod proto;
pub mod string_table;

// Re-export main types at crate root
pub use error::{LoadError, LoadResult};
pub use instruction::{Instruction, Operand};
pub use opcode::OpCode;
pub use program::{Node, Program};
pub use string_table::{StringEntry, StringTable};
