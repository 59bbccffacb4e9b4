//! Bytecode interpreter for Yarn dialogue
//!
//! This crate provides the dialogue virtual machine:
//! - Stack-machine dispatch loop that runs to the next suspension point
//! - Serializable execution state for save and restore
//! - Command bridge for host-registered commands
//! - Extension point for inline expression substitution
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use builtins::StandardLibrary;
//! use bytecode_system::{Node, OpCode, Operand, Program, StringTable};
//! use interpreter::{DialogueRunner, RunnerConfig};
//!
//! let mut start = Node::new("Start");
//! start.emit(OpCode::AddOption, vec![Operand::from("line:yes"), Operand::from("L1")]);
//! start.emit(OpCode::ShowOptions, vec![]);
//! start.emit(OpCode::Jump, vec![]);
//! start.mark_label("L1");
//! start.emit(OpCode::Pop, vec![]);
//! start.emit(OpCode::RunLine, vec![Operand::from("line:ok")]);
//! start.emit(OpCode::Stop, vec![]);
//!
//! let strings = StringTable::new()
//!     .with_line("line:yes", "Yes", 1)
//!     .with_line("line:ok", "Okay then.", 2);
//!
//! let mut runner = DialogueRunner::new(
//!     Arc::new(Program::new("demo").with_node(start)),
//!     Arc::new(strings),
//!     Arc::new(StandardLibrary::yarn()),
//!     RunnerConfig::new(),
//! )
//! .unwrap();
//!
//! assert_eq!(runner.choices()[0].text, "Yes");
//! runner.choose(0).unwrap();
//! assert_eq!(runner.get_line(), Some("Okay then.".to_string()));
//! assert!(runner.is_finished());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod config;
mod dispatch;
pub mod expression;
pub mod runner;
pub mod state;

// Re-export main types at crate root
pub use command::{CommandBridge, CommandHandler};
pub use config::RunnerConfig;
pub use expression::ExpressionEvaluator;
pub use runner::DialogueRunner;
pub use state::{DialogueOption, ExecutionState};
