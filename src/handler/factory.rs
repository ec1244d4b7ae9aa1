//! handler::factory
//!
//! Handler selection and creation.
//!
//! Commands use [`create_handler`] instead of constructing a specific
//! handler, so the CLI layer never depends on a concrete backend.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::http::HttpAiHandler;
use super::traits::{AiError, AiHandler, PromptRequest};
use crate::core::config::{Config, ConfigKey, ENDPOINT_ENV};
use crate::ui::OutputSink;

/// Create the AI handler described by `config`.
///
/// `working_dir` is the directory used when a command gets no `--path`.
///
/// Without an endpoint, the returned handler fails every operation with
/// `AiError::NotConfigured`. Construction itself only fails for a malformed
/// endpoint.
pub fn create_handler(config: &Config, working_dir: &Path) -> Result<Arc<dyn AiHandler>, AiError> {
    let Some(endpoint) = config.endpoint() else {
        debug!("no AI service endpoint configured");
        return Ok(unavailable_handler(format!(
            "no AI service endpoint set. Run 'devai config set {} <url>' or set ${}",
            ConfigKey::Endpoint,
            ENDPOINT_ENV
        )));
    };

    debug!(%endpoint, timeout = ?config.timeout(), "creating HTTP AI handler");

    let handler = HttpAiHandler::new(endpoint, working_dir, config.timeout())?
        .with_model(config.model());
    Ok(Arc::new(handler))
}

/// Create a handler that fails every operation with `reason`.
///
/// Used when no working handler can be built, so that commands which never
/// reach the handler still run.
pub fn unavailable_handler(reason: impl Into<String>) -> Arc<dyn AiHandler> {
    Arc::new(UnconfiguredHandler {
        reason: reason.into(),
    })
}

/// Stand-in used when no endpoint is configured or the config is unusable.
#[derive(Debug)]
struct UnconfiguredHandler {
    reason: String,
}

impl UnconfiguredHandler {
    fn error(&self) -> AiError {
        AiError::NotConfigured(self.reason.clone())
    }
}

#[async_trait]
impl AiHandler for UnconfiguredHandler {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    async fn add(
        &self,
        _description: &str,
        _path: Option<&Path>,
        _preview: bool,
        _rewrite: bool,
        _sink: &dyn OutputSink,
    ) -> Result<(), AiError> {
        Err(self.error())
    }

    async fn prompt(
        &self,
        _description: &str,
        _path: Option<&Path>,
        _rewrite: bool,
        _sink: &dyn OutputSink,
    ) -> Result<PromptRequest, AiError> {
        Err(self.error())
    }

    async fn modify_ai_response(
        &self,
        _file: Option<&Path>,
        _path: Option<&Path>,
    ) -> Result<String, AiError> {
        Err(self.error())
    }
}
