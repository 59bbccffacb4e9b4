//! Yarn bytecode opcodes
//!
//! Defines the instruction set of the dialogue VM. Numbering follows the
//! compiled program format, so a raw opcode read from a bundle maps onto
//! the same variant here.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Bytecode opcodes for dialogue execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OpCode {
    /// Jump to a named label in the current node
    #[default]
    JumpTo,
    /// Peek a label name from the stack and jump to it
    Jump,
    /// Deliver a line (by string id) to the host
    RunLine,
    /// Deliver a command to the host
    RunCommand,
    /// Add an entry to the option list
    AddOption,
    /// Present the option list and suspend
    ShowOptions,
    /// Push a string operand
    PushString,
    /// Push a numeric operand
    PushFloat,
    /// Push a boolean operand
    PushBool,
    /// Push null
    PushNull,
    /// Jump to a label if the top of the stack is false
    JumpIfFalse,
    /// Discard the top of the stack
    Pop,
    /// Call a standard library function
    CallFunc,
    /// Push the contents of a variable
    PushVariable,
    /// Store the top of the stack in a variable
    StoreVariable,
    /// Stop execution
    Stop,
    /// Transition to another node
    RunNode,
    /// Opcode number this runtime does not recognise
    Unrecognized(i32),
}

impl OpCode {
    /// Every recognised opcode, in numeric order
    pub const ALL: [OpCode; 17] = [
        OpCode::JumpTo,
        OpCode::Jump,
        OpCode::RunLine,
        OpCode::RunCommand,
        OpCode::AddOption,
        OpCode::ShowOptions,
        OpCode::PushString,
        OpCode::PushFloat,
        OpCode::PushBool,
        OpCode::PushNull,
        OpCode::JumpIfFalse,
        OpCode::Pop,
        OpCode::CallFunc,
        OpCode::PushVariable,
        OpCode::StoreVariable,
        OpCode::Stop,
        OpCode::RunNode,
    ];

    /// Map a raw opcode number onto a variant
    pub fn from_i32(raw: i32) -> Self {
        usize::try_from(raw)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .unwrap_or(OpCode::Unrecognized(raw))
    }

    /// Raw opcode number as stored in compiled programs
    pub fn number(&self) -> i32 {
        match self {
            OpCode::JumpTo => 0,
            OpCode::Jump => 1,
            OpCode::RunLine => 2,
            OpCode::RunCommand => 3,
            OpCode::AddOption => 4,
            OpCode::ShowOptions => 5,
            OpCode::PushString => 6,
            OpCode::PushFloat => 7,
            OpCode::PushBool => 8,
            OpCode::PushNull => 9,
            OpCode::JumpIfFalse => 10,
            OpCode::Pop => 11,
            OpCode::CallFunc => 12,
            OpCode::PushVariable => 13,
            OpCode::StoreVariable => 14,
            OpCode::Stop => 15,
            OpCode::RunNode => 16,
            OpCode::Unrecognized(raw) => *raw,
        }
    }

    /// Canonical upper-case name, `None` for unrecognised opcodes
    pub fn name(&self) -> Option<&'static str> {
        let name = match self {
            OpCode::JumpTo => "JUMP_TO",
            OpCode::Jump => "JUMP",
            OpCode::RunLine => "RUN_LINE",
            OpCode::RunCommand => "RUN_COMMAND",
            OpCode::AddOption => "ADD_OPTION",
            OpCode::ShowOptions => "SHOW_OPTIONS",
            OpCode::PushString => "PUSH_STRING",
            OpCode::PushFloat => "PUSH_FLOAT",
            OpCode::PushBool => "PUSH_BOOL",
            OpCode::PushNull => "PUSH_NULL",
            OpCode::JumpIfFalse => "JUMP_IF_FALSE",
            OpCode::Pop => "POP",
            OpCode::CallFunc => "CALL_FUNC",
            OpCode::PushVariable => "PUSH_VARIABLE",
            OpCode::StoreVariable => "STORE_VARIABLE",
            OpCode::Stop => "STOP",
            OpCode::RunNode => "RUN_NODE",
            OpCode::Unrecognized(_) => return None,
        };
        Some(name)
    }

    /// Look up an opcode by its canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.name() == Some(name))
    }

    /// Check if this opcode ends the dispatch run when executed
    pub fn is_suspension(&self) -> bool {
        matches!(self, OpCode::ShowOptions | OpCode::Stop)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "UNRECOGNIZED({})", self.number()),
        }
    }
}

// Protobuf-JSON writes enums by name and accepts either names or numbers.
impl Serialize for OpCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_i32(self.number()),
        }
    }
}

impl<'de> Deserialize<'de> for OpCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OpCodeVisitor;

        impl<'de> Visitor<'de> for OpCodeVisitor {
            type Value = OpCode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an opcode name or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<OpCode, E> {
                OpCode::from_name(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<OpCode, E> {
                i32::try_from(v)
                    .map(OpCode::from_i32)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<OpCode, E> {
                i32::try_from(v)
                    .map(OpCode::from_i32)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }
        }

        deserializer.deserialize_any(OpCodeVisitor)
    }
}
