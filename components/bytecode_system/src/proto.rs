//! Protobuf wire messages for compiled program bundles.
//!
//! These mirror the compiler's `yarn_spinner.proto`. Opcodes are kept as
//! raw `int32` so numbers outside the known set survive decoding and are
//! rejected only if executed.

use std::collections::HashMap;

/// A complete compiled program.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Program {
    /// The name of the program.
    #[prost(string, tag = "1")]
    pub name: String,
    /// The collection of nodes in this program.
    #[prost(map = "string, message", tag = "2")]
    pub nodes: HashMap<String, Node>,
    /// Initial values for variables declared in the program.
    #[prost(map = "string, message", tag = "3")]
    pub initial_values: HashMap<String, Operand>,
}

/// A named list of instructions.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Node {
    /// The name of this node.
    #[prost(string, tag = "1")]
    pub name: String,
    /// The list of instructions in this node.
    #[prost(message, repeated, tag = "2")]
    pub instructions: Vec<Instruction>,
    /// Jump table mapping label names to positions in `instructions`.
    #[prost(map = "string, int32", tag = "3")]
    pub labels: HashMap<String, i32>,
    /// The tags associated with this node.
    #[prost(string, repeated, tag = "4")]
    pub tags: Vec<String>,
    /// String table entry holding the node's source text, if any.
    #[prost(string, tag = "5")]
    pub source_text_string_id: String,
}

/// A single instruction.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Instruction {
    /// The opcode number.
    #[prost(int32, tag = "1")]
    pub opcode: i32,
    /// The operands, if any.
    #[prost(message, repeated, tag = "2")]
    pub operands: Vec<Operand>,
}

/// A value used by an instruction.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Operand {
    /// The operand's value.
    #[prost(oneof = "operand::Value", tags = "1, 2, 3")]
    pub value: Option<operand::Value>,
}

/// Nested types of [`Operand`].
pub mod operand {
    /// The type of operand this is.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        /// A string.
        #[prost(string, tag = "1")]
        StringValue(String),
        /// A boolean.
        #[prost(bool, tag = "2")]
        BoolValue(bool),
        /// A floating point number.
        #[prost(float, tag = "3")]
        FloatValue(f32),
    }
}
