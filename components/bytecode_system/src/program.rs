//! Compiled program store
//!
//! Immutable, decoded form of a compiled dialogue program: a set of named
//! nodes, each an ordered instruction list plus a local label table.

use prost::Message;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::{LoadError, LoadResult};
use crate::instruction::{Instruction, Operand};
use crate::opcode::OpCode;
use crate::proto;

/// A named, ordered list of instructions with its jump table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node name
    #[serde(default)]
    pub name: String,
    /// Instructions in execution order
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    /// Label name to instruction index within this node
    #[serde(default)]
    pub labels: HashMap<String, usize>,
    /// Tags attached to the node by its author
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Node {
    /// Create a new empty node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append an instruction
    pub fn emit(&mut self, opcode: OpCode, operands: Vec<Operand>) {
        self.instructions.push(Instruction::new(opcode, operands));
    }

    /// Point `label` at the next instruction to be emitted
    pub fn mark_label(&mut self, label: impl Into<String>) {
        self.labels.insert(label.into(), self.instructions.len());
    }

    /// Resolve a label to its instruction index
    pub fn label(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    /// Get the number of instructions
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    fn from_proto(key: &str, node: proto::Node) -> LoadResult<Self> {
        let instructions = node
            .instructions
            .into_iter()
            .map(|inst| {
                let operands = inst
                    .operands
                    .into_iter()
                    .map(|op| operand_from_proto(op, key))
                    .collect::<LoadResult<Vec<_>>>()?;
                Ok(Instruction::new(OpCode::from_i32(inst.opcode), operands))
            })
            .collect::<LoadResult<Vec<_>>>()?;

        let labels = node
            .labels
            .into_iter()
            .map(|(label, idx)| {
                usize::try_from(idx).map(|idx| (label.clone(), idx)).map_err(|_| {
                    LoadError::Structure(format!(
                        "label `{}` in node `{}` has negative index {}",
                        label, key, idx
                    ))
                })
            })
            .collect::<LoadResult<HashMap<_, _>>>()?;

        Ok(Self {
            name: if node.name.is_empty() {
                key.to_string()
            } else {
                node.name
            },
            instructions,
            labels,
            tags: node.tags,
        })
    }

    fn to_proto(&self) -> proto::Node {
        proto::Node {
            name: self.name.clone(),
            instructions: self
                .instructions
                .iter()
                .map(|inst| proto::Instruction {
                    opcode: inst.opcode.number(),
                    operands: inst.operands.iter().map(operand_to_proto).collect(),
                })
                .collect(),
            labels: self
                .labels
                .iter()
                .map(|(label, idx)| (label.clone(), *idx as i32))
                .collect(),
            tags: self.tags.clone(),
            source_text_string_id: String::new(),
        }
    }
}

fn operand_from_proto(op: proto::Operand, node: &str) -> LoadResult<Operand> {
    match op.value {
        Some(proto::operand::Value::StringValue(s)) => Ok(Operand::String(s)),
        Some(proto::operand::Value::BoolValue(b)) => Ok(Operand::Bool(b)),
        Some(proto::operand::Value::FloatValue(f)) => Ok(Operand::Number(f64::from(f))),
        None => Err(LoadError::Structure(format!(
            "operand without a value in node `{}`",
            node
        ))),
    }
}

fn operand_to_proto(op: &Operand) -> proto::Operand {
    let value = match op {
        Operand::String(s) => proto::operand::Value::StringValue(s.clone()),
        Operand::Bool(b) => proto::operand::Value::BoolValue(*b),
        Operand::Number(n) => proto::operand::Value::FloatValue(*n as f32),
    };
    proto::Operand { value: Some(value) }
}

/// A compiled dialogue program
///
/// Nodes are reference-counted so a running session can hold on to the
/// active node's instructions without borrowing the whole program.
///
/// # Example
///
/// ```
/// use bytecode_system::{Node, OpCode, Operand, Program};
///
/// let mut start = Node::new("Start");
/// start.emit(OpCode::RunLine, vec![Operand::from("line:1")]);
/// start.emit(OpCode::Stop, vec![]);
///
/// let program = Program::new("story").with_node(start);
/// assert!(program.node("Start").is_some());
///
/// let bytes = program.to_bytes();
/// let restored = Program::from_bytes(&bytes).unwrap();
/// assert_eq!(restored, program);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Program name
    #[serde(default)]
    pub name: String,
    /// Nodes keyed by name
    #[serde(default)]
    pub nodes: HashMap<String, Arc<Node>>,
    /// Declared initial values of variables
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub initial_values: BTreeMap<String, Operand>,
}

impl Program {
    /// Create a new empty program
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a node, replacing any node with the same name
    pub fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.name.clone(), Arc::new(node));
    }

    /// Builder form of [`Program::insert_node`]
    pub fn with_node(mut self, node: Node) -> Self {
        self.insert_node(node);
        self
    }

    /// Declare an initial value for a variable
    pub fn with_initial_value(mut self, name: impl Into<String>, value: Operand) -> Self {
        self.initial_values.insert(name.into(), value);
        self
    }

    /// Look up a node by name
    pub fn node(&self, name: &str) -> Option<&Arc<Node>> {
        self.nodes.get(name)
    }

    /// Check whether the program contains a node
    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Resolve a label inside a node
    pub fn label(&self, node: &str, label: &str) -> Option<usize> {
        self.node(node).and_then(|n| n.label(label))
    }

    /// Names of all nodes, in no particular order
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Tags of a node
    pub fn node_tags(&self, name: &str) -> Option<&[String]> {
        self.node(name).map(|n| n.tags.as_slice())
    }

    /// Decode a protobuf program bundle
    pub fn from_bytes(bytes: &[u8]) -> LoadResult<Self> {
        let decoded = proto::Program::decode(bytes)?;

        let nodes = decoded
            .nodes
            .into_iter()
            .map(|(key, node)| {
                let node = Node::from_proto(&key, node)?;
                Ok((key, Arc::new(node)))
            })
            .collect::<LoadResult<HashMap<_, _>>>()?;

        let initial_values = decoded
            .initial_values
            .into_iter()
            .map(|(name, op)| {
                let op = operand_from_proto(op, "<initial values>")?;
                Ok((name, op))
            })
            .collect::<LoadResult<BTreeMap<_, _>>>()?;

        Ok(Self {
            name: decoded.name,
            nodes,
            initial_values,
        })
    }

    /// Encode as a protobuf program bundle
    ///
    /// Numeric operands are narrowed to 32-bit floats, as the format
    /// requires.
    pub fn to_bytes(&self) -> Vec<u8> {
        let encoded = proto::Program {
            name: self.name.clone(),
            nodes: self
                .nodes
                .iter()
                .map(|(key, node)| (key.clone(), node.to_proto()))
                .collect(),
            initial_values: self
                .initial_values
                .iter()
                .map(|(name, op)| (name.clone(), operand_to_proto(op)))
                .collect(),
        };
        encoded.encode_to_vec()
    }

    /// Parse a protobuf-JSON program document
    pub fn from_json(json: &str) -> LoadResult<Self> {
        let mut program: Program = serde_json::from_str(json)?;
        for (key, node) in program.nodes.iter_mut() {
            if node.name.is_empty() {
                Arc::make_mut(node).name = key.clone();
            }
        }
        Ok(program)
    }

    /// Render as a protobuf-JSON program document
    pub fn to_json(&self) -> LoadResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a program from disk, binary bundle or JSON document
    pub fn from_path(path: impl AsRef<std::path::Path>, json: bool) -> LoadResult<Self> {
        if json {
            let text = std::fs::read_to_string(path)?;
            Self::from_json(&text)
        } else {
            let bytes = std::fs::read(path)?;
            Self::from_bytes(&bytes)
        }
    }
}
