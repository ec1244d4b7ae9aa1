//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration for the working directory
//! 2. Calls into the dispatcher or config layer
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! The `ai` commands are async because they involve network I/O. Their
//! handler builds a tokio runtime and blocks on the async implementation.

mod ai;
mod completion;
mod config_cmd;

// Re-export command functions for testing and direct invocation
pub use ai::{ai, run_action};
pub use completion::{completion, write_completion};
pub use config_cmd::{get as config_get, list as config_list, set as config_set};

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Ai { action } => ai::ai(ctx, action),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
