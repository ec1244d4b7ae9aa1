//! handler::mock
//!
//! Mock AI handler for deterministic testing.
//!
//! # Design
//!
//! The mock handler records every call it receives and answers with canned
//! values. A single operation can be configured to fail, which is how the
//! error propagation paths of the dispatcher are exercised.
//!
//! # Example
//!
//! ```
//! use devai::handler::mock::{MockAiHandler, MockOperation};
//! use devai::handler::{AiHandler, PromptRequest};
//! use devai::ui::BufferSink;
//!
//! # tokio_test::block_on(async {
//! let handler = MockAiHandler::new()
//!     .with_prompt(PromptRequest::new("system", "user"));
//! let sink = BufferSink::new();
//!
//! let prompt = handler.prompt("JPA", None, false, &sink).await.unwrap();
//! assert_eq!(prompt.user_prompt, "user");
//! assert_eq!(handler.operations().len(), 1);
//! # });
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{AiError, AiHandler, PromptRequest};
use crate::ui::OutputSink;

/// Mock handler for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockAiHandler {
    inner: Arc<Mutex<MockAiHandlerInner>>,
}

#[derive(Debug)]
struct MockAiHandlerInner {
    /// Returned by `prompt`.
    prompt: PromptRequest,
    /// Returned by `modify_ai_response`.
    enhanced: String,
    /// Printed to the sink by `add` and `prompt`.
    messages: Vec<String>,
    /// Method to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail `add` with the given error.
    Add(AiError),
    /// Fail `prompt` with the given error.
    Prompt(AiError),
    /// Fail `modify_ai_response` with the given error.
    ModifyAiResponse(AiError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Add {
        description: String,
        path: Option<PathBuf>,
        preview: bool,
        rewrite: bool,
    },
    Prompt {
        description: String,
        path: Option<PathBuf>,
        rewrite: bool,
    },
    ModifyAiResponse {
        file: Option<PathBuf>,
        path: Option<PathBuf>,
    },
}

impl MockAiHandler {
    /// Create a mock handler with empty canned responses.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockAiHandlerInner {
                prompt: PromptRequest::default(),
                enhanced: String::new(),
                messages: Vec::new(),
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Set the prompt returned by `prompt`.
    pub fn with_prompt(self, prompt: PromptRequest) -> Self {
        self.inner.lock().unwrap().prompt = prompt;
        self
    }

    /// Set the text returned by `modify_ai_response`.
    pub fn with_enhanced_response(self, text: impl Into<String>) -> Self {
        self.inner.lock().unwrap().enhanced = text.into();
        self
    }

    /// Set progress messages printed to the sink by `add` and `prompt`.
    pub fn with_messages<I, S>(self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.lock().unwrap().messages = messages.into_iter().map(Into::into).collect();
        self
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.inner.lock().unwrap().fail_on = Some(fail_on);
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }

    fn record(&self, op: MockOperation) {
        self.inner.lock().unwrap().operations.push(op);
    }

    fn check_fail(&self, expected: &str) -> Result<(), AiError> {
        let inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::Add(e)) if expected == "add" => Err(e.clone()),
            Some(FailOn::Prompt(e)) if expected == "prompt" => Err(e.clone()),
            Some(FailOn::ModifyAiResponse(e)) if expected == "modify_ai_response" => {
                Err(e.clone())
            }
            _ => Ok(()),
        }
    }

    fn emit_messages(&self, sink: &dyn OutputSink) {
        let messages = self.inner.lock().unwrap().messages.clone();
        for message in &messages {
            sink.print(message);
        }
    }
}

impl Default for MockAiHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiHandler for MockAiHandler {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn add(
        &self,
        description: &str,
        path: Option<&Path>,
        preview: bool,
        rewrite: bool,
        sink: &dyn OutputSink,
    ) -> Result<(), AiError> {
        self.record(MockOperation::Add {
            description: description.to_string(),
            path: path.map(Path::to_path_buf),
            preview,
            rewrite,
        });
        self.check_fail("add")?;
        self.emit_messages(sink);
        Ok(())
    }

    async fn prompt(
        &self,
        description: &str,
        path: Option<&Path>,
        rewrite: bool,
        sink: &dyn OutputSink,
    ) -> Result<PromptRequest, AiError> {
        self.record(MockOperation::Prompt {
            description: description.to_string(),
            path: path.map(Path::to_path_buf),
            rewrite,
        });
        self.check_fail("prompt")?;
        self.emit_messages(sink);
        Ok(self.inner.lock().unwrap().prompt.clone())
    }

    async fn modify_ai_response(
        &self,
        file: Option<&Path>,
        path: Option<&Path>,
    ) -> Result<String, AiError> {
        self.record(MockOperation::ModifyAiResponse {
            file: file.map(Path::to_path_buf),
            path: path.map(Path::to_path_buf),
        });
        self.check_fail("modify_ai_response")?;
        Ok(self.inner.lock().unwrap().enhanced.clone())
    }
}
