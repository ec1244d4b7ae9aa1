//! handler::traits
//!
//! AI handler trait definition and the types it exchanges.
//!
//! # Design
//!
//! The `AiHandler` trait is async because handler operations involve network
//! I/O. Handlers own every side effect of an `ai` command: building prompts,
//! calling the model backend, and writing results into the project. Callers
//! never inspect or translate the errors they return.
//!
//! # Example
//!
//! ```ignore
//! use devai::handler::AiHandler;
//! use devai::ui::TerminalSink;
//!
//! async fn show_prompt(handler: &dyn AiHandler, sink: &TerminalSink) -> anyhow::Result<()> {
//!     let prompt = handler.prompt("JPA", None, false, sink).await?;
//!     println!("{}", prompt.user_prompt);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ui::OutputSink;

/// Errors from handler operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AiError {
    /// The handler has no backend to talk to.
    #[error("AI handler not configured: {0}")]
    NotConfigured(String),

    /// A path option does not point at anything usable.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The backend returned an error status.
    #[error("AI service error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the service
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The backend answered with something that could not be decoded.
    #[error("invalid response from AI service: {0}")]
    InvalidResponse(String),
}

/// Prompt produced for a description, as it would be sent to the model.
///
/// Serialized with camelCase keys so that the JSON written by `ai prompt`
/// can be fed straight back into other tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    /// System prompt
    pub system_prompt: String,
    /// User prompt
    pub user_prompt: String,
}

impl PromptRequest {
    /// Create a prompt from its two parts.
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
        }
    }
}

/// Backend that performs the work behind the `ai` commands.
///
/// `path` is the project directory; `None` means the current working
/// directory and is resolved by the implementation.
#[async_trait]
pub trait AiHandler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Generate code for `description` and apply it to the project.
    ///
    /// With `preview`, only the description file (README) is produced and
    /// the source tree is left untouched. With `rewrite`, only the
    /// description file's content is regenerated. Progress messages go to
    /// `sink`.
    async fn add(
        &self,
        description: &str,
        path: Option<&Path>,
        preview: bool,
        rewrite: bool,
        sink: &dyn OutputSink,
    ) -> Result<(), AiError>;

    /// Build the prompt that `add` would send for `description`.
    async fn prompt(
        &self,
        description: &str,
        path: Option<&Path>,
        rewrite: bool,
        sink: &dyn OutputSink,
    ) -> Result<PromptRequest, AiError>;

    /// Post-process a previously generated description file.
    ///
    /// Returns the enhanced response text.
    async fn modify_ai_response(
        &self,
        file: Option<&Path>,
        path: Option<&Path>,
    ) -> Result<String, AiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_request_uses_camel_case_keys() {
        let prompt = PromptRequest::new("be terse", "add JPA");
        let json = serde_json::to_value(&prompt).unwrap();
        assert_eq!(json["systemPrompt"], "be terse");
        assert_eq!(json["userPrompt"], "add JPA");
    }

    #[test]
    fn ai_error_display() {
        assert_eq!(
            format!("{}", AiError::NotConfigured("no endpoint".into())),
            "AI handler not configured: no endpoint"
        );
        assert_eq!(
            format!("{}", AiError::InvalidPath("/nope".into())),
            "invalid path: /nope"
        );
        assert_eq!(
            format!(
                "{}",
                AiError::ApiError {
                    status: 502,
                    message: "model unavailable".into()
                }
            ),
            "AI service error: 502 - model unavailable"
        );
        assert_eq!(
            format!("{}", AiError::NetworkError("connection refused".into())),
            "network error: connection refused"
        );
        assert_eq!(
            format!("{}", AiError::InvalidResponse("missing field".into())),
            "invalid response from AI service: missing field"
        );
    }
}
