//! Bytecode instruction representation
//!
//! Contains the instruction structure and its typed operands.

use core_types::{DialogueError, DialogueResult, Value};
use serde::{Deserialize, Serialize};

use crate::opcode::OpCode;

/// A single instruction operand.
///
/// Serializes in the protobuf-JSON shape used by compiled program
/// documents: `{"stringValue": "..."}`, `{"floatValue": 1}` or
/// `{"boolValue": true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// String operand (label, string id, node or variable name)
    #[serde(rename = "stringValue")]
    String(String),
    /// Numeric operand (stored as a 32-bit float in binary bundles)
    #[serde(rename = "floatValue")]
    Number(f64),
    /// Boolean operand
    #[serde(rename = "boolValue")]
    Bool(bool),
}

impl Operand {
    /// Try to get the string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Operand::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the number value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Operand::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Operand::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert the operand into a runtime value
    pub fn to_value(&self) -> Value {
        match self {
            Operand::String(s) => Value::String(s.clone()),
            Operand::Number(n) => Value::Number(*n),
            Operand::Bool(b) => Value::Boolean(*b),
        }
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::String(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::String(s)
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Number(n)
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

/// A single bytecode instruction
///
/// `opcode` defaults to `JUMP_TO` when absent, because protobuf-JSON omits
/// fields holding the zero value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Instruction {
    /// The opcode for this instruction
    #[serde(default)]
    pub opcode: OpCode,
    /// Positional operands; meaning is opcode-specific
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operands: Vec<Operand>,
}

impl Instruction {
    /// Create a new instruction
    pub fn new(opcode: OpCode, operands: Vec<Operand>) -> Self {
        Self { opcode, operands }
    }

    /// Create an instruction without operands
    pub fn bare(opcode: OpCode) -> Self {
        Self::new(opcode, Vec::new())
    }

    /// Get the operand at `index`, if present
    pub fn operand(&self, index: usize) -> Option<&Operand> {
        self.operands.get(index)
    }

    /// Get a required string operand
    pub fn string_operand(&self, index: usize) -> DialogueResult<&str> {
        self.operand(index)
            .and_then(Operand::as_str)
            .ok_or_else(|| self.invalid_operand(index, "string"))
    }

    /// Get a required numeric operand
    pub fn number_operand(&self, index: usize) -> DialogueResult<f64> {
        self.operand(index)
            .and_then(Operand::as_number)
            .ok_or_else(|| self.invalid_operand(index, "number"))
    }

    /// Get a required boolean operand
    pub fn bool_operand(&self, index: usize) -> DialogueResult<bool> {
        self.operand(index)
            .and_then(Operand::as_bool)
            .ok_or_else(|| self.invalid_operand(index, "boolean"))
    }

    /// Number of inline expressions declared by the optional count operand
    ///
    /// Returns 0 when the operand is absent.
    pub fn expression_count(&self, index: usize) -> DialogueResult<usize> {
        match self.operand(index) {
            None => Ok(0),
            Some(Operand::Number(n)) if *n >= 0.0 => Ok(*n as usize),
            Some(_) => Err(self.invalid_operand(index, "non-negative number")),
        }
    }

    fn invalid_operand(&self, index: usize, expected: &'static str) -> DialogueError {
        DialogueError::InvalidOperand {
            opcode: self.opcode.to_string(),
            index,
            expected,
        }
    }
}
