//! Dialogue runtime error types.
//!
//! Every failure the VM can raise is a variant of [`DialogueError`]. The
//! variants are grouped into a handful of [`ErrorKind`]s so hosts can react
//! to the class of failure without matching on every site.

use std::fmt;
use thiserror::Error;

/// The class of a dialogue runtime error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Structurally broken program or state (unknown node/label, program
    /// counter overrun, stack underflow, wrongly typed operand)
    MalformedProgram,
    /// A key the program references is missing (string table entry,
    /// variable, library function)
    Lookup,
    /// Function called with the wrong number of arguments
    Arity,
    /// The host drove the session out of order
    Protocol,
    /// Opcode or extension point the runtime does not implement
    Unimplemented,
    /// A library function received a value of the wrong variant
    Type,
    /// Division by zero or a result outside the finite number range
    Arithmetic,
}

impl ErrorKind {
    /// Get the kind name as a string
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::MalformedProgram => "MalformedProgramError",
            ErrorKind::Lookup => "LookupError",
            ErrorKind::Arity => "ArityError",
            ErrorKind::Protocol => "ProtocolError",
            ErrorKind::Unimplemented => "UnimplementedError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Arithmetic => "ArithmeticError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A fatal error raised while running dialogue.
///
/// Errors propagate to the caller of `resume()`/`choose()` immediately.
/// Side effects applied before the failure (buffered lines, stored
/// variables) are not rolled back.
///
/// # Examples
///
/// ```
/// use core_types::{DialogueError, ErrorKind};
///
/// let error = DialogueError::UnknownLabel {
///     node: "Start".to_string(),
///     label: "L9".to_string(),
/// };
/// assert_eq!(error.kind(), ErrorKind::MalformedProgram);
/// assert_eq!(
///     error.to_string(),
///     "the current node `Start` does not have a label named `L9`"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DialogueError {
    /// The program counter ran off the end of the node without a STOP
    #[error("the program counter reached the end of node `{node}` (pc {pc}) without encountering a STOP opcode")]
    ProgramCounterOverrun {
        /// Node being executed, `<bootstrap>` before the first transition
        node: String,
        /// Program counter at the time of the fetch
        pc: usize,
    },

    /// RUN_NODE targeted a node the program does not contain
    #[error("`{node}` is not a valid node in this program")]
    UnknownNode {
        /// Requested node name
        node: String,
    },

    /// A jump referenced a label missing from the current node
    #[error("the current node `{node}` does not have a label named `{label}`")]
    UnknownLabel {
        /// Current node
        node: String,
        /// Requested label
        label: String,
    },

    /// An opcode needed more values than the stack holds
    #[error("{opcode} requires a value on the stack, but the stack is empty")]
    StackUnderflow {
        /// Opcode that underflowed
        opcode: String,
    },

    /// JUMP or RUN_NODE found something other than a string on the stack
    #[error("{opcode} requires a string on top of the stack, found {found}")]
    InvalidJumpTarget {
        /// Opcode that performed the check
        opcode: String,
        /// Variant actually found
        found: &'static str,
    },

    /// An operand was absent or of the wrong variant
    #[error("{opcode} expects operand {index} to be a {expected}")]
    InvalidOperand {
        /// Opcode being executed
        opcode: String,
        /// Positional operand index
        index: usize,
        /// Expected operand variant
        expected: &'static str,
    },

    /// A string id is not present in the string table
    #[error("`{id}` is not a key in the string lookup table")]
    MissingString {
        /// Requested string id
        id: String,
    },

    /// Line spacing needs a line number the string table does not carry
    #[error("string table entry `{id}` has no line number")]
    MissingLineNumber {
        /// String id without a line number
        id: String,
    },

    /// PUSH_VARIABLE read a variable that has never been stored
    #[error("variable {name} has not been set")]
    UnsetVariable {
        /// Variable name
        name: String,
    },

    /// CALL_FUNC named a function the standard library does not provide
    #[error("the function `{name}` is not implemented in this runtime")]
    UnknownFunction {
        /// Function name
        name: String,
    },

    /// The argument count on the stack was not a number
    #[error("CALL_FUNC `{function}` expects an argument count on the stack, found {found}")]
    InvalidArgumentCount {
        /// Function being called
        function: String,
        /// Variant actually found
        found: &'static str,
    },

    /// Declared and supplied argument counts differ
    #[error("the function `{function}` expects {expected} parameters but received {received}")]
    Arity {
        /// Function being called
        function: String,
        /// Declared arity
        expected: usize,
        /// Count found on the stack
        received: usize,
    },

    /// A library function received an argument of the wrong variant
    #[error("the function `{function}` expects a {expected} argument, found {found}")]
    TypeMismatch {
        /// Function being called
        function: String,
        /// Expected variant
        expected: &'static str,
        /// Variant actually found
        found: &'static str,
    },

    /// Number.Divide or Number.Modulo was given a zero divisor
    #[error("the function `{function}` was called with a zero divisor")]
    DivisionByZero {
        /// Function being called
        function: String,
    },

    /// An arithmetic result left the finite range
    #[error("the function `{function}` overflowed the number range")]
    NumberOverflow {
        /// Function being called
        function: String,
    },

    /// resume() was called without a jump target on top of the stack
    #[error("attempted to resume play, but no node or option has been selected")]
    NoJumpTarget,

    /// resume() was called after the dialogue reached STOP
    #[error("the dialogue has already finished")]
    Finished,

    /// choose() was called with an index outside the option buffer
    #[error("option {index} is out of range ({available} options available)")]
    ChoiceOutOfRange {
        /// Requested index
        index: usize,
        /// Number of options currently offered
        available: usize,
    },

    /// A serialized execution state could not be read
    #[error("invalid execution state snapshot: {message}")]
    InvalidSnapshot {
        /// Parser diagnostic
        message: String,
    },

    /// The instruction's opcode is not one the dispatcher recognises
    #[error("opcode {opcode} is not yet implemented")]
    UnimplementedOpcode {
        /// Raw opcode number
        opcode: i32,
    },

    /// Text carries inline expressions but no evaluator is installed
    #[error("interpolated inline expressions are not supported ({count} found)")]
    InlineExpressionsUnsupported {
        /// Number of expressions the instruction declares
        count: usize,
    },
}

impl DialogueError {
    /// Returns the class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DialogueError::ProgramCounterOverrun { .. }
            | DialogueError::UnknownNode { .. }
            | DialogueError::UnknownLabel { .. }
            | DialogueError::StackUnderflow { .. }
            | DialogueError::InvalidJumpTarget { .. }
            | DialogueError::InvalidOperand { .. }
            | DialogueError::InvalidArgumentCount { .. } => ErrorKind::MalformedProgram,
            DialogueError::MissingString { .. }
            | DialogueError::MissingLineNumber { .. }
            | DialogueError::UnsetVariable { .. }
            | DialogueError::UnknownFunction { .. } => ErrorKind::Lookup,
            DialogueError::Arity { .. } => ErrorKind::Arity,
            DialogueError::TypeMismatch { .. } => ErrorKind::Type,
            DialogueError::DivisionByZero { .. } | DialogueError::NumberOverflow { .. } => {
                ErrorKind::Arithmetic
            }
            DialogueError::NoJumpTarget
            | DialogueError::Finished
            | DialogueError::ChoiceOutOfRange { .. }
            | DialogueError::InvalidSnapshot { .. } => ErrorKind::Protocol,
            DialogueError::UnimplementedOpcode { .. }
            | DialogueError::InlineExpressionsUnsupported { .. } => ErrorKind::Unimplemented,
        }
    }
}

/// Result type for dialogue runtime operations
pub type DialogueResult<T> = Result<T, DialogueError>;
