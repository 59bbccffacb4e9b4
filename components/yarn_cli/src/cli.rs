//! Command-line arguments

use clap::Parser;
use interpreter::RunnerConfig;
use std::path::PathBuf;

/// Play a compiled Yarn story in the terminal
#[derive(Debug, Clone, Parser)]
#[command(name = "yarn-runner", version)]
pub struct Cli {
    /// Compiled program (protobuf binary, or JSON with --json)
    #[arg(short, long, value_name = "FILE")]
    pub program: PathBuf,

    /// String table CSV (id,text,file,node,lineNumber)
    #[arg(short, long, value_name = "FILE")]
    pub strings: PathBuf,

    /// Line metadata CSV (id,node,lineNumber,tags)
    #[arg(short, long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Read the program as protobuf-JSON
    #[arg(long)]
    pub json: bool,

    /// Node to start from
    #[arg(long, default_value = "Start")]
    pub start: String,

    /// Keep blank lines between non-adjacent source lines
    #[arg(long)]
    pub line_spacing: bool,

    /// Resume from a saved state snapshot
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. `debug`, `interpreter=trace`)
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    pub trace: String,
}

impl Cli {
    /// Arguments for playing `program` with `strings` and default options
    pub fn for_story(program: impl Into<PathBuf>, strings: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            strings: strings.into(),
            metadata: None,
            json: false,
            start: "Start".to_string(),
            line_spacing: false,
            state: None,
            trace: "warn".to_string(),
        }
    }

    /// Session configuration selected by the flags
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig::new()
            .with_start_node(self.start.clone())
            .with_line_spacing(self.line_spacing)
    }
}
