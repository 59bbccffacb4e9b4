//! Dispatch loop for bytecode execution
//!
//! Runs instructions of the active node until the dialogue suspends
//! (SHOW_OPTIONS), finishes (STOP) or fails. Node transitions replace the
//! active instruction list; there is no call stack.

use builtins::StandardLibrary;
use bytecode_system::{Instruction, OpCode, Program, StringTable};
use core_types::{DialogueError, DialogueResult, Value};
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace, warn};

use crate::command::CommandBridge;
use crate::expression::{substitute, ExpressionEvaluator};
use crate::state::{DialogueOption, ExecutionState};

fn visits_regex() -> &'static Regex {
    static VISITS: OnceLock<Regex> = OnceLock::new();
    VISITS.get_or_init(|| Regex::new(r"\$visits_([a-zA-Z_0-9]+)").expect("visits regex must compile"))
}

/// Borrowed view of a session's collaborators for one `resume`
pub(crate) struct Dispatcher<'a> {
    pub(crate) program: &'a Program,
    pub(crate) strings: &'a StringTable,
    pub(crate) library: &'a StandardLibrary,
    pub(crate) commands: &'a mut CommandBridge,
    pub(crate) evaluator: Option<&'a mut Box<dyn ExpressionEvaluator + Send>>,
    pub(crate) line_spacing: bool,
}

impl<'a> Dispatcher<'a> {
    /// Execute until the state is paused or finished
    pub(crate) fn run(&mut self, state: &mut ExecutionState) -> DialogueResult<()> {
        state.paused = false;
        loop {
            let node = state.active_node();
            let pc = state.program_counter;
            let instruction = node.instructions.get(pc).ok_or_else(|| {
                DialogueError::ProgramCounterOverrun {
                    node: state.node_label().to_string(),
                    pc,
                }
            })?;
            state.program_counter += 1;

            trace!(node = state.node_label(), pc, opcode = %instruction.opcode, "dispatch");
            self.execute(state, instruction)?;

            if instruction.opcode.is_suspension() {
                if state.finished {
                    debug!(node = state.node_label(), "dialogue finished");
                } else {
                    debug!(
                        node = state.node_label(),
                        options = state.option_buffer.len(),
                        "waiting for a choice"
                    );
                }
                return Ok(());
            }
            if instruction.opcode != OpCode::RunNode {
                state.previous_instruction = instruction.clone();
            }
        }
    }

    fn execute(&mut self, state: &mut ExecutionState, instruction: &Instruction) -> DialogueResult<()> {
        let opcode = instruction.opcode;
        match opcode {
            OpCode::JumpTo => {
                let label = instruction.string_operand(0)?;
                Self::jump(state, label)
            }
            OpCode::Jump => {
                let label = match state.peek(opcode)? {
                    Value::String(label) => label.clone(),
                    other => {
                        return Err(DialogueError::InvalidJumpTarget {
                            opcode: opcode.to_string(),
                            found: other.type_name(),
                        })
                    }
                };
                Self::jump(state, &label)
            }
            OpCode::RunLine => self.run_line(state, instruction),
            OpCode::RunCommand => self.run_command(state, instruction),
            OpCode::AddOption => self.add_option(state, instruction),
            OpCode::ShowOptions => {
                state.paused = true;
                Ok(())
            }
            OpCode::PushString => {
                let value = instruction.string_operand(0)?.to_string();
                state.push(Value::String(value));
                Ok(())
            }
            OpCode::PushFloat => {
                let value = instruction.number_operand(0)?;
                state.push(Value::Number(value));
                Ok(())
            }
            OpCode::PushBool => {
                let value = instruction.bool_operand(0)?;
                state.push(Value::Boolean(value));
                Ok(())
            }
            OpCode::PushNull => {
                state.push(Value::Null);
                Ok(())
            }
            OpCode::JumpIfFalse => {
                let label = instruction.string_operand(0)?;
                if *state.peek(opcode)? == Value::Boolean(false) {
                    Self::jump(state, label)?;
                }
                Ok(())
            }
            OpCode::Pop => state.pop(opcode).map(|_| ()),
            OpCode::CallFunc => self.call_func(state, instruction),
            OpCode::PushVariable => {
                let name = instruction.string_operand(0)?;
                let value = Self::read_variable(state, name)?;
                state.push(value);
                Ok(())
            }
            OpCode::StoreVariable => {
                let name = instruction.string_operand(0)?.to_string();
                let value = state.peek(opcode)?.clone();
                state.variables.insert(name, value);
                Ok(())
            }
            OpCode::Stop => {
                state.finished = true;
                Ok(())
            }
            OpCode::RunNode => self.run_node(state, instruction),
            OpCode::Unrecognized(raw) => Err(DialogueError::UnimplementedOpcode { opcode: raw }),
        }
    }

    fn jump(state: &mut ExecutionState, label: &str) -> DialogueResult<()> {
        let target = state
            .active_node()
            .label(label)
            .ok_or_else(|| DialogueError::UnknownLabel {
                node: state.node_label().to_string(),
                label: label.to_string(),
            })?;
        trace!(from = state.program_counter, to = target, label, "jump");
        state.program_counter = target;
        Ok(())
    }

    fn text(&self, id: &str) -> DialogueResult<&'a str> {
        self.strings
            .text(id)
            .ok_or_else(|| DialogueError::MissingString { id: id.to_string() })
    }

    fn line_number(&self, id: &str) -> DialogueResult<u32> {
        let entry = self
            .strings
            .entry(id)
            .ok_or_else(|| DialogueError::MissingString { id: id.to_string() })?;
        entry
            .line_number
            .ok_or_else(|| DialogueError::MissingLineNumber { id: id.to_string() })
    }

    fn evaluate_expressions(
        &mut self,
        state: &mut ExecutionState,
        count: usize,
    ) -> DialogueResult<Vec<Value>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        match self.evaluator.as_mut() {
            Some(evaluator) => (0..count).map(|index| evaluator.evaluate(state, index)).collect(),
            None => Err(DialogueError::InlineExpressionsUnsupported { count }),
        }
    }

    fn run_line(&mut self, state: &mut ExecutionState, instruction: &Instruction) -> DialogueResult<()> {
        let id = instruction.string_operand(0)?;
        let values = self.evaluate_expressions(state, instruction.expression_count(1)?)?;

        if self.line_spacing && state.previous_instruction.opcode == OpCode::RunLine {
            let previous = self.line_number(state.previous_instruction.string_operand(0)?)?;
            let current = self.line_number(id)?;
            let gap = i64::from(current) - i64::from(previous);
            for _ in 1..gap {
                state.line_buffer.push_back(String::new());
            }
        }

        let text = substitute(self.text(id)?, &values);
        state.line_buffer.push_back(text);
        Ok(())
    }

    fn run_command(&mut self, state: &mut ExecutionState, instruction: &Instruction) -> DialogueResult<()> {
        let text = instruction.string_operand(0)?;
        let tokens = CommandBridge::tokenize(text);
        let (name, args) = match tokens.split_first() {
            Some((name, args)) => (name.as_str(), args),
            None => ("", &[][..]),
        };

        if !self.commands.contains(name) {
            warn!(command = name, "command does not have a registered handler");
            return Ok(());
        }

        let values = self.evaluate_expressions(state, instruction.expression_count(1)?)?;
        let args: Vec<String> = args.iter().map(|arg| substitute(arg, &values)).collect();
        if let Some(Some(line)) = self.commands.invoke(name, &args) {
            state.line_buffer.push_back(line);
        }
        Ok(())
    }

    fn add_option(&mut self, state: &mut ExecutionState, instruction: &Instruction) -> DialogueResult<()> {
        let title = instruction.string_operand(0)?;
        let target = instruction.string_operand(1)?;
        let values = self.evaluate_expressions(state, instruction.expression_count(2)?)?;
        let text = substitute(self.text(title)?, &values);

        state.option_buffer.push(DialogueOption {
            index: state.option_buffer.len(),
            text,
            choice_target: target.to_string(),
        });
        Ok(())
    }

    fn call_func(&mut self, state: &mut ExecutionState, instruction: &Instruction) -> DialogueResult<()> {
        let name = instruction.string_operand(0)?;
        let function = self
            .library
            .get(name)
            .ok_or_else(|| DialogueError::UnknownFunction { name: name.to_string() })?;

        let count = match state.peek(instruction.opcode)? {
            Value::Number(count) => *count,
            other => {
                return Err(DialogueError::InvalidArgumentCount {
                    function: name.to_string(),
                    found: other.type_name(),
                })
            }
        };
        let arity = function.arity();
        if count.fract() != 0.0 || count < 0.0 || count as usize != arity {
            return Err(DialogueError::Arity {
                function: name.to_string(),
                expected: arity,
                received: count as usize,
            });
        }
        if state.stack_depth() < arity + 1 {
            return Err(DialogueError::StackUnderflow {
                opcode: instruction.opcode.to_string(),
            });
        }

        state.pop(instruction.opcode)?;
        let first_arg = state.stack_depth() - arity;
        let args = state.value_stack.split_off(first_arg);
        let result = function.invoke(&args)?;
        state.push(result);
        Ok(())
    }

    fn read_variable(state: &ExecutionState, name: &str) -> DialogueResult<Value> {
        if let Some(captures) = visits_regex().captures(name) {
            let node = &captures[1];
            let visits = state
                .visits
                .iter()
                .find(|(key, _)| key.replace('.', "_") == node)
                .map_or(0, |(_, count)| *count);
            return Ok(Value::Number(visits as f64));
        }

        state
            .variables
            .get(name)
            .cloned()
            .ok_or_else(|| DialogueError::UnsetVariable { name: name.to_string() })
    }

    fn run_node(&mut self, state: &mut ExecutionState, instruction: &Instruction) -> DialogueResult<()> {
        let target = if instruction.operand(0).is_some() {
            instruction.string_operand(0)?.to_string()
        } else {
            match state.pop(instruction.opcode)? {
                Value::String(target) => target,
                other => {
                    let found = other.type_name();
                    state.push(other);
                    return Err(DialogueError::InvalidJumpTarget {
                        opcode: instruction.opcode.to_string(),
                        found,
                    });
                }
            }
        };

        let node = self
            .program
            .node(&target)
            .ok_or_else(|| DialogueError::UnknownNode { node: target.clone() })?;
        debug!(from = state.node_label(), to = %target, "entering node");
        state.enter_node(&target, Arc::clone(node));
        Ok(())
    }
}
