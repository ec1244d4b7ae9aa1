//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// devai - AI-assisted changes to your project's README and source tree
#[derive(Parser, Debug)]
#[command(name = "devai")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if devai was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// AI commands
    #[command(
        name = "ai",
        long_about = "Generate and apply code with the help of an AI service.\n\n\
            The AI service builds the prompt, calls the language model and merges \
            the answer into the project's README and source tree. Configure where \
            it lives with 'devai config set handler.endpoint <url>'."
    )]
    Ai {
        #[command(subcommand)]
        action: AiAction,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        after_help = "\
KEYS:
    handler.endpoint       Base URL of the AI service
    handler.timeout_secs   Request timeout in seconds (default 120)
    handler.model          Model name forwarded to the AI service

WORKFLOW EXAMPLES:
    devai config set handler.endpoint http://localhost:8080/api/ai
    devai config get handler.endpoint
    devai config list"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for devai commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    devai completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    devai completion zsh >> ~/.zshrc

    # Fish
    devai completion fish > ~/.config/fish/completions/devai.fish

    # PowerShell
    devai completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-commands of `ai`.
///
/// `--description` is declared optional here so that the dispatcher, not
/// clap, reports a missing description.
#[derive(Subcommand, Debug)]
pub enum AiAction {
    /// Add code to the project from AI
    #[command(
        name = "add",
        after_help = "\
WORKFLOW EXAMPLES:
    # Generate and apply code for a well known project name
    devai ai add --description JPA

    # Only write the README file, leave the source tree alone
    devai ai add --description JPA --preview"
    )]
    Add {
        /// The description of the code to create. This can be as short as a
        /// well known project name, such as 'JPA'.
        #[arg(long)]
        description: Option<String>,

        /// Path on which to run the command. Defaults to the current
        /// working directory.
        #[arg(long)]
        path: Option<PathBuf>,

        /// Create the README file but do not apply the changes to the code base
        #[arg(long)]
        preview: bool,

        /// Rewrite the 'description' option of the README file but do not
        /// apply the changes to the code base
        #[arg(long)]
        rewrite: bool,
    },

    /// Print the prompt the AI service would send, as JSON
    #[command(name = "prompt")]
    Prompt {
        /// The description of the code to create. This can be as short as a
        /// well known project name, such as 'JPA'.
        #[arg(long)]
        description: Option<String>,

        /// Path on which to run the command. Defaults to the current
        /// working directory.
        #[arg(long)]
        path: Option<PathBuf>,

        /// Rewrite the 'description' option of the README file but do not
        /// apply the changes to the code base
        #[arg(long)]
        rewrite: bool,
    },

    /// Enhance a previous AI response, e.g. bring it up to date with current
    /// framework versions
    #[command(name = "enhance-response")]
    EnhanceResponse {
        /// README file containing the response from the AI
        #[arg(long)]
        file: Option<PathBuf>,

        /// Path on which to run the command. Defaults to the current
        /// working directory.
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Config subcommand actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
