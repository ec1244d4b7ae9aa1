//! dispatch
//!
//! Command dispatcher for the `ai` command group.
//!
//! # Design
//!
//! [`CommandDispatcher`] maps each sub-command onto exactly one call on an
//! [`AiHandler`]. It validates the `description` option, serializes the
//! prompt result, and otherwise stays out of the way: handler errors pass
//! through unchanged and nothing is retried.
//!
//! All collaborators are supplied at construction. The help provider is
//! optional; without one, the missing-description diagnostic is printed on
//! its own.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use devai::dispatch::CommandDispatcher;
//! use devai::handler::mock::MockAiHandler;
//! use devai::ui::BufferSink;
//!
//! # tokio_test::block_on(async {
//! let sink = BufferSink::new();
//! let dispatcher = CommandDispatcher::new(
//!     Arc::new(MockAiHandler::new().with_enhanced_response("done")),
//!     Arc::new(sink.clone()),
//!     None,
//! );
//!
//! let text = dispatcher.enhance_response(None, None).await.unwrap();
//! assert_eq!(text, "done");
//! # });
//! ```

use std::path::Path;
use std::sync::Arc;

use console::style;
use thiserror::Error;
use tracing::debug;

use crate::handler::{AiError, AiHandler};
use crate::ui::OutputSink;

/// Diagnostic printed when `--description` is missing.
pub const MISSING_DESCRIPTION: &str = "Error: Missing required argument: [description]";

/// Command whose help accompanies the missing-description diagnostic.
pub const ADD_COMMAND_PATH: &[&str] = &["ai", "add"];

/// Errors surfaced by the dispatcher.
///
/// Both variants are transparent: the user sees the collaborator's own
/// message.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The AI handler failed.
    #[error(transparent)]
    Handler(#[from] AiError),

    /// The prompt result could not be encoded as JSON.
    #[error(transparent)]
    Encoding(#[from] serde_json::Error),
}

/// Errors from help lookup.
#[derive(Debug, Error)]
pub enum HelpError {
    /// No command exists at the requested path.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Help text could not be rendered.
    #[error("failed to render help: {0}")]
    Render(String),
}

/// Source of command help text.
pub trait HelpProvider: Send + Sync {
    /// Render help for the command at `command` (e.g. `["ai", "add"]`).
    fn help(&self, command: &[&str]) -> Result<String, HelpError>;
}

/// Dispatcher for the `ai` sub-commands.
///
/// Holds no mutable state; one instance can serve any number of
/// invocations.
#[derive(Clone)]
pub struct CommandDispatcher {
    handler: Arc<dyn AiHandler>,
    sink: Arc<dyn OutputSink>,
    help: Option<Arc<dyn HelpProvider>>,
}

impl std::fmt::Debug for CommandDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDispatcher")
            .field("handler", &self.handler.name())
            .field("has_help", &self.help.is_some())
            .finish()
    }
}

impl CommandDispatcher {
    /// Create a dispatcher with its collaborators.
    pub fn new(
        handler: Arc<dyn AiHandler>,
        sink: Arc<dyn OutputSink>,
        help: Option<Arc<dyn HelpProvider>>,
    ) -> Self {
        Self {
            handler,
            sink,
            help,
        }
    }

    /// `ai add`: generate code for `description` and apply it.
    ///
    /// A missing or blank description prints the diagnostic instead of
    /// calling the handler.
    pub async fn add(
        &self,
        description: Option<&str>,
        path: Option<&Path>,
        preview: bool,
        rewrite: bool,
    ) -> Result<(), DispatchError> {
        let Some(description) = self.require_description(description) else {
            return Ok(());
        };

        debug!(handler = self.handler.name(), preview, rewrite, "dispatching ai add");
        self.handler
            .add(description, path, preview, rewrite, self.sink.as_ref())
            .await?;
        Ok(())
    }

    /// `ai prompt`: return the prompt for `description` as JSON text.
    ///
    /// Returns `Ok(None)` when the description is missing and the
    /// diagnostic was printed.
    pub async fn prompt(
        &self,
        description: Option<&str>,
        path: Option<&Path>,
        rewrite: bool,
    ) -> Result<Option<String>, DispatchError> {
        let Some(description) = self.require_description(description) else {
            return Ok(None);
        };

        debug!(handler = self.handler.name(), rewrite, "dispatching ai prompt");
        let prompt = self
            .handler
            .prompt(description, path, rewrite, self.sink.as_ref())
            .await?;
        Ok(Some(serde_json::to_string(&prompt)?))
    }

    /// `ai enhance-response`: return the handler's enhanced response verbatim.
    pub async fn enhance_response(
        &self,
        file: Option<&Path>,
        path: Option<&Path>,
    ) -> Result<String, DispatchError> {
        debug!(handler = self.handler.name(), "dispatching ai enhance-response");
        Ok(self.handler.modify_ai_response(file, path).await?)
    }

    /// Print the missing-description diagnostic and, if available, the
    /// help for `ai add`.
    ///
    /// Never fails. A help lookup error only omits the help text.
    pub fn print_missing_description_message(&self) {
        self.sink
            .print(&style(MISSING_DESCRIPTION).white().to_string());

        let Some(help) = &self.help else {
            return;
        };

        match help.help(ADD_COMMAND_PATH) {
            Ok(text) => self.sink.print(&text),
            Err(e) => debug!(error = %e, "help lookup failed"),
        }
    }

    fn require_description<'a>(&self, description: Option<&'a str>) -> Option<&'a str> {
        match description {
            Some(d) if !d.trim().is_empty() => Some(d),
            _ => {
                self.print_missing_description_message();
                None
            }
        }
    }
}
