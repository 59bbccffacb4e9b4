//! Story loading and session setup
//!
//! The Player struct gathers the files named on the command line and
//! turns them into a ready-to-play dialogue session:
//! - Program bundle (binary or JSON)
//! - String table plus optional line metadata
//! - Optional state snapshot to resume from

use crate::cli::Cli;
use crate::error::CliResult;
use builtins::StandardLibrary;
use bytecode_system::{Program, StringTable};
use interpreter::{DialogueRunner, ExecutionState, RunnerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Loads a story and starts a dialogue session
#[derive(Debug, Clone)]
pub struct Player {
    /// Program bundle path
    program: PathBuf,
    /// String table path
    strings: PathBuf,
    /// Line metadata path
    metadata: Option<PathBuf>,
    /// Whether the program is protobuf-JSON
    json: bool,
    /// Snapshot to resume from
    state: Option<PathBuf>,
    /// Session options
    config: RunnerConfig,
}

impl Player {
    /// Create a player for a program and its string table
    ///
    /// # Example
    /// ```
    /// use yarn_cli::Player;
    ///
    /// let player = Player::new("story.yarnc", "story-Lines.csv").with_line_spacing(true);
    /// assert!(player.config().line_spacing);
    /// ```
    pub fn new(program: impl Into<PathBuf>, strings: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            strings: strings.into(),
            metadata: None,
            json: false,
            state: None,
            config: RunnerConfig::new(),
        }
    }

    /// Create a player from parsed command-line arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(&cli.program, &cli.strings)
            .with_metadata(cli.metadata.clone())
            .with_json(cli.json)
            .with_state(cli.state.clone())
            .with_config(cli.runner_config())
    }

    /// Attach a line metadata table
    pub fn with_metadata(mut self, path: Option<PathBuf>) -> Self {
        self.metadata = path;
        self
    }

    /// Read the program as protobuf-JSON
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Resume from a saved snapshot instead of the start node
    pub fn with_state(mut self, path: Option<PathBuf>) -> Self {
        self.state = path;
        self
    }

    /// Replace the session options
    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable line spacing
    pub fn with_line_spacing(mut self, enabled: bool) -> Self {
        self.config = self.config.with_line_spacing(enabled);
        self
    }

    /// Session options
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Load the story files
    pub fn load(&self) -> CliResult<(Program, StringTable)> {
        let program = Program::from_path(&self.program, self.json)?;
        let mut strings = StringTable::from_csv_path(&self.strings)?;
        if let Some(metadata) = &self.metadata {
            strings.merge_metadata_csv(fs::File::open(metadata)?)?;
        }
        info!(
            program = %program.name,
            nodes = program.nodes.len(),
            strings = strings.len(),
            "story loaded"
        );
        Ok((program, strings))
    }

    /// Load the story and run it to its first suspension point
    ///
    /// The built-in `wait` command is registered before anything runs.
    pub fn start(&self) -> CliResult<DialogueRunner> {
        let (program, strings) = self.load()?;
        let program = Arc::new(program);
        let strings = Arc::new(strings);
        let library = Arc::new(StandardLibrary::yarn());
        let config = self.config.clone().with_autostart(false);

        let mut runner = match &self.state {
            Some(path) => {
                let snapshot = ExecutionState::from_json(&fs::read_to_string(path)?, &program)?;
                debug!(path = %path.display(), "resuming from snapshot");
                DialogueRunner::from_state(program, strings, library, snapshot, config)?
            }
            None => DialogueRunner::new(program, strings, library, config)?,
        };
        runner.add_command_handler("wait", |_: &[String]| None);

        if runner.current_node().is_none() && !runner.is_finished() {
            runner.resume()?;
        }
        Ok(runner)
    }
}

/// Write a session snapshot as JSON
pub fn save_state(runner: &DialogueRunner, path: &Path) -> CliResult<()> {
    let json = runner.export_state().to_json()?;
    fs::write(path, json)?;
    Ok(())
}
