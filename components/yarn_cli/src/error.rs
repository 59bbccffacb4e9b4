//! Error types for the CLI

use bytecode_system::LoadError;
use core_types::DialogueError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Program or string table could not be loaded
    #[error("failed to load story: {0}")]
    Load(#[from] LoadError),

    /// Dialogue execution error
    #[error("{}: {0}", .0.kind())]
    Dialogue(#[from] DialogueError),

    /// State snapshot could not be written
    #[error("failed to encode state: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// File I/O error
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    /// REPL error
    #[error("REPL error: {0}")]
    Repl(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
