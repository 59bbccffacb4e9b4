//! Execution state
//!
//! Every mutable register of a dialogue session lives here so that a
//! session can be captured with serde and later resumed exactly where it
//! stopped. The active instruction list is not serialized; it is relinked
//! from `current_node` when a snapshot is imported.

use bytecode_system::{Instruction, Node, OpCode, Program};
use core_types::{DialogueError, DialogueResult, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

/// A choice offered to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueOption {
    /// Position in the option buffer
    pub index: usize,
    /// Resolved display text
    pub text: String,
    /// Label or node name pushed when this option is chosen
    pub choice_target: String,
}

fn bootstrap_node() -> Arc<Node> {
    let mut node = Node::new("");
    node.emit(OpCode::RunNode, Vec::new());
    Arc::new(node)
}

fn run_node_marker() -> Instruction {
    Instruction::bare(OpCode::RunNode)
}

/// Mutable VM registers for one dialogue session
///
/// The value stack is stored bottom to top: the last element is the top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionState {
    /// Value stack, bottom first
    pub value_stack: Vec<Value>,
    /// Node being executed; unset until the first RUN_NODE
    pub current_node: Option<String>,
    /// Index of the next instruction in the active node
    pub program_counter: usize,
    /// Last instruction that completed without suspending
    #[serde(default = "run_node_marker")]
    pub previous_instruction: Instruction,
    /// Number of times each node has been entered
    pub visits: BTreeMap<String, u64>,
    /// Variables stored by STORE_VARIABLE or seeded by the host
    pub variables: BTreeMap<String, Value>,
    /// Waiting for the host (initially, or after SHOW_OPTIONS)
    pub paused: bool,
    /// STOP was executed; no further dispatch
    pub finished: bool,
    /// Lines not yet taken by the host
    pub line_buffer: VecDeque<String>,
    /// Options offered since the last choice
    pub option_buffer: Vec<DialogueOption>,
    #[serde(skip, default = "bootstrap_node")]
    active: Arc<Node>,
}

impl ExecutionState {
    /// Fresh state for `program` with `start_node` on the stack
    ///
    /// Every node gets a zero visit count and the program's initial values
    /// are bound as variables.
    pub fn new(program: &Program, start_node: impl Into<String>) -> Self {
        let visits = program
            .node_names()
            .map(|name| (name.to_string(), 0))
            .collect();
        let variables = program
            .initial_values
            .iter()
            .map(|(name, operand)| (name.clone(), operand.to_value()))
            .collect();

        Self {
            value_stack: vec![Value::String(start_node.into())],
            current_node: None,
            program_counter: 0,
            previous_instruction: run_node_marker(),
            visits,
            variables,
            paused: true,
            finished: false,
            line_buffer: VecDeque::new(),
            option_buffer: Vec::new(),
            active: bootstrap_node(),
        }
    }

    /// Point the active instruction list back at `program`
    ///
    /// Needed after deserializing. Fails when the program does not contain
    /// the current node.
    pub fn relink(&mut self, program: &Program) -> DialogueResult<()> {
        self.active = match &self.current_node {
            None => bootstrap_node(),
            Some(name) => Arc::clone(program.node(name).ok_or_else(|| {
                DialogueError::UnknownNode { node: name.clone() }
            })?),
        };
        Ok(())
    }

    /// Instructions of the active node (the bootstrap list before any node)
    pub fn active_instructions(&self) -> &[Instruction] {
        &self.active.instructions
    }

    pub(crate) fn active_node(&self) -> Arc<Node> {
        Arc::clone(&self.active)
    }

    /// Switch to `node`, counting the visit under its program key
    pub(crate) fn enter_node(&mut self, key: &str, node: Arc<Node>) {
        *self.visits.entry(key.to_string()).or_insert(0) += 1;
        self.current_node = Some(key.to_string());
        self.active = node;
        self.program_counter = 0;
        self.previous_instruction = run_node_marker();
    }

    /// Name used in diagnostics for the active node
    pub(crate) fn node_label(&self) -> &str {
        self.current_node.as_deref().unwrap_or("<bootstrap>")
    }

    /// Push a value on top of the stack
    pub fn push(&mut self, value: Value) {
        self.value_stack.push(value);
    }

    /// Pop the top of the stack
    pub fn pop(&mut self, opcode: OpCode) -> DialogueResult<Value> {
        self.value_stack
            .pop()
            .ok_or_else(|| DialogueError::StackUnderflow {
                opcode: opcode.to_string(),
            })
    }

    /// Borrow the top of the stack without removing it
    pub fn peek(&self, opcode: OpCode) -> DialogueResult<&Value> {
        self.value_stack
            .last()
            .ok_or_else(|| DialogueError::StackUnderflow {
                opcode: opcode.to_string(),
            })
    }

    /// Top of the stack, if any
    pub fn top(&self) -> Option<&Value> {
        self.value_stack.last()
    }

    /// Number of values on the stack
    pub fn stack_depth(&self) -> usize {
        self.value_stack.len()
    }

    /// Visit count for a node, 0 when unknown
    pub fn visit_count(&self, node: &str) -> u64 {
        self.visits.get(node).copied().unwrap_or(0)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON and relink against `program`
    pub fn from_json(json: &str, program: &Program) -> DialogueResult<Self> {
        let mut state: Self =
            serde_json::from_str(json).map_err(|e| DialogueError::InvalidSnapshot {
                message: e.to_string(),
            })?;
        state.relink(program)?;
        Ok(state)
    }
}
