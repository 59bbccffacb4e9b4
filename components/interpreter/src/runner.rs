//! Dialogue session
//!
//! The host-facing API. A `DialogueRunner` owns one execution state and
//! borrows the shared program, string table and standard library.

use builtins::StandardLibrary;
use bytecode_system::{Program, StringTable};
use core_types::{DialogueError, DialogueResult, Value};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::command::CommandBridge;
use crate::config::RunnerConfig;
use crate::dispatch::Dispatcher;
use crate::expression::ExpressionEvaluator;
use crate::state::{DialogueOption, ExecutionState};

/// An interactive dialogue session
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use builtins::StandardLibrary;
/// use bytecode_system::{Node, OpCode, Operand, Program, StringTable};
/// use interpreter::{DialogueRunner, RunnerConfig};
///
/// let mut start = Node::new("Start");
/// start.emit(OpCode::RunLine, vec![Operand::from("line:1")]);
/// start.emit(OpCode::Stop, vec![]);
///
/// let program = Arc::new(Program::new("demo").with_node(start));
/// let strings = Arc::new(StringTable::new().with_line("line:1", "Hello!", 1));
/// let library = Arc::new(StandardLibrary::yarn());
///
/// let mut runner = DialogueRunner::new(program, strings, library, RunnerConfig::new()).unwrap();
/// assert_eq!(runner.get_line(), Some("Hello!".to_string()));
/// assert!(runner.is_finished());
/// ```
pub struct DialogueRunner {
    program: Arc<Program>,
    strings: Arc<StringTable>,
    library: Arc<StandardLibrary>,
    commands: CommandBridge,
    evaluator: Option<Box<dyn ExpressionEvaluator + Send>>,
    config: RunnerConfig,
    state: ExecutionState,
}

impl DialogueRunner {
    /// Create a session positioned before `config.start_node`
    ///
    /// With `config.autostart` the first `resume` happens here, so any
    /// error it raises is returned.
    pub fn new(
        program: Arc<Program>,
        strings: Arc<StringTable>,
        library: Arc<StandardLibrary>,
        config: RunnerConfig,
    ) -> DialogueResult<Self> {
        let state = ExecutionState::new(&program, config.start_node.clone());
        let autostart = config.autostart;
        let mut runner = Self {
            program,
            strings,
            library,
            commands: CommandBridge::new(),
            evaluator: None,
            config,
            state,
        };
        if autostart {
            runner.resume()?;
        }
        Ok(runner)
    }

    /// Continue a session from an exported state
    ///
    /// Never autostarts. Fails when the program lacks the snapshot's
    /// current node.
    pub fn from_state(
        program: Arc<Program>,
        strings: Arc<StringTable>,
        library: Arc<StandardLibrary>,
        mut state: ExecutionState,
        config: RunnerConfig,
    ) -> DialogueResult<Self> {
        state.relink(&program)?;
        Ok(Self {
            program,
            strings,
            library,
            commands: CommandBridge::new(),
            evaluator: None,
            config,
            state,
        })
    }

    /// Run until the next suspension point or the end of the dialogue
    pub fn resume(&mut self) -> DialogueResult<()> {
        if self.state.finished {
            return Err(DialogueError::Finished);
        }
        if !self.state.top().is_some_and(Value::is_string) {
            return Err(DialogueError::NoJumpTarget);
        }

        let mut dispatcher = Dispatcher {
            program: &self.program,
            strings: &self.strings,
            library: &self.library,
            commands: &mut self.commands,
            evaluator: self.evaluator.as_mut(),
            line_spacing: self.config.line_spacing,
        };
        dispatcher.run(&mut self.state)
    }

    /// Select an offered option and resume
    pub fn choose(&mut self, index: usize) -> DialogueResult<()> {
        let option = self
            .state
            .option_buffer
            .get(index)
            .ok_or(DialogueError::ChoiceOutOfRange {
                index,
                available: self.state.option_buffer.len(),
            })?;
        let target = option.choice_target.clone();
        debug!(index, target = %target, "option chosen");

        self.state.option_buffer.clear();
        self.state.push(Value::String(target));
        self.resume()
    }

    /// Take the oldest buffered line
    pub fn get_line(&mut self) -> Option<String> {
        self.state.line_buffer.pop_front()
    }

    /// Check whether a line is buffered
    pub fn has_line(&self) -> bool {
        !self.state.line_buffer.is_empty()
    }

    /// Take every buffered line, oldest first
    pub fn get_lines(&mut self) -> Vec<String> {
        self.state.line_buffer.drain(..).collect()
    }

    /// Options offered since the last choice
    pub fn choices(&self) -> &[DialogueOption] {
        &self.state.option_buffer
    }

    /// Register a handler for a dialogue command
    pub fn add_command_handler<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&[String]) -> Option<String> + Send + 'static,
    {
        self.commands.register(name, handler);
    }

    /// Remove a command handler, returning whether one was registered
    pub fn remove_command_handler(&mut self, name: &str) -> bool {
        self.commands.unregister(name)
    }

    /// Install the evaluator used for inline expressions
    pub fn set_expression_evaluator<E>(&mut self, evaluator: E)
    where
        E: ExpressionEvaluator + Send + 'static,
    {
        self.evaluator = Some(Box::new(evaluator));
    }

    /// Snapshot of the execution state
    pub fn export_state(&self) -> ExecutionState {
        self.state.clone()
    }

    /// Borrow the execution state
    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    /// Waiting for the host to resume or choose
    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// STOP has been executed
    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    /// Node being executed, if any
    pub fn current_node(&self) -> Option<&str> {
        self.state.current_node.as_deref()
    }

    /// Number of times `node` has been entered
    pub fn visits(&self, node: &str) -> u64 {
        self.state.visit_count(node)
    }

    /// Read a variable
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.state.variables.get(name)
    }

    /// Bind a variable, typically before the first resume
    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) {
        self.state.variables.insert(name.into(), value);
    }

    /// The loaded program
    pub fn program(&self) -> &Arc<Program> {
        &self.program
    }

    /// The session configuration
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }
}

impl fmt::Debug for DialogueRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogueRunner")
            .field("program", &self.program.name)
            .field("config", &self.config)
            .field("commands", &self.commands)
            .field("has_evaluator", &self.evaluator.is_some())
            .field("state", &self.state)
            .finish()
    }
}
