//! cli
//!
//! Command-line interface layer for devai.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Set up logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches `ai`
//! commands to the [`crate::dispatch::CommandDispatcher`], which forwards
//! them to the configured AI handler.

pub mod args;
pub mod commands;
pub mod help;

pub use args::{Cli, Shell};

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::ui::Verbosity;

/// Per-invocation settings derived from global flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Directory to run in (defaults to the process working directory)
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled
    pub debug: bool,
    /// Minimal output
    pub quiet: bool,
}

impl Context {
    /// Output verbosity for these flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// The working directory for this invocation.
    pub fn working_dir(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.debug);

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the tracing subscriber.
///
/// Logs go to stderr. `RUST_LOG` wins; otherwise `--debug` enables debug
/// output for this crate and everything else stays at `warn`.
fn init_logging(debug: bool) {
    let default = if debug { "warn,devai=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be set when running inside tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
