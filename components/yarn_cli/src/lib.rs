//! Yarn dialogue player CLI library
//!
//! Provides the Player struct and supporting modules for `yarn-runner`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod player;
pub mod repl;

pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use player::Player;
