//! Errors raised while loading programs and string tables

use thiserror::Error;

/// Failure to load a program bundle or string table.
///
/// Loading validates structure only; references between program and
/// string table are checked lazily by the VM.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The binary bundle is not valid protobuf
    #[error("failed to decode program bundle: {0}")]
    Decode(#[from] prost::DecodeError),

    /// The program document is not valid protobuf-JSON
    #[error("failed to parse program document: {0}")]
    Json(#[from] serde_json::Error),

    /// The string table CSV could not be read
    #[error("failed to read string table: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input parsed but violates the program's structure
    #[error("malformed program: {0}")]
    Structure(String),
}

/// Result type for loading operations
pub type LoadResult<T> = Result<T, LoadError>;
