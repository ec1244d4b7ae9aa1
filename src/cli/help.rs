//! cli::help
//!
//! Help text rendered from the clap command tree.

use clap::CommandFactory;

use crate::cli::args::Cli;
use crate::dispatch::{HelpError, HelpProvider};

/// [`HelpProvider`] backed by the CLI's own clap definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClapHelp;

impl HelpProvider for ClapHelp {
    fn help(&self, command: &[&str]) -> Result<String, HelpError> {
        let mut root = Cli::command();
        // Propagates bin names so usage lines read "devai ai add".
        root.build();

        let mut current = &mut root;
        for name in command {
            current = current
                .find_subcommand_mut(name)
                .ok_or_else(|| HelpError::UnknownCommand(command.join(" ")))?;
        }

        let rendered = current.render_help().to_string();
        if rendered.trim().is_empty() {
            return Err(HelpError::Render(command.join(" ")));
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_ai_add_help() {
        let help = ClapHelp.help(&["ai", "add"]).unwrap();
        assert!(help.contains("--description"));
        assert!(help.contains("--preview"));
        assert!(help.contains("devai ai add"));
    }

    #[test]
    fn unknown_command_is_an_error() {
        let err = ClapHelp.help(&["ai", "remove"]).unwrap_err();
        assert!(matches!(err, HelpError::UnknownCommand(ref c) if c == "ai remove"));
    }
}
