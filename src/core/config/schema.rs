//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$DEVAI_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/devai/config.toml`
//! 3. `~/.devai/config.toml` (canonical write location)
//!
//! # Project Config
//!
//! Located at `<project>/.devai/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected formats (e.g., the endpoint must be an http(s) URL).

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Configuration file contents (both scopes share one schema).
///
/// # Example
///
/// ```toml
/// [handler]
/// endpoint = "http://localhost:8080/api/ai"
/// timeout_secs = 120
/// model = "gpt-4"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// AI handler settings
    pub handler: Option<HandlerConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(handler) = &self.handler {
            handler.validate()?;
        }
        Ok(())
    }

    /// Mutable access to the handler table, creating it if absent.
    pub fn handler_mut(&mut self) -> &mut HandlerConfig {
        self.handler.get_or_insert_with(HandlerConfig::default)
    }
}

/// AI handler settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HandlerConfig {
    /// Base URL of the AI orchestration service
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Model name forwarded to the service
    pub model: Option<String>,
}

impl HandlerConfig {
    /// Validate the handler settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.endpoint {
            validate_endpoint(endpoint)?;
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "handler.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "handler.model cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Check that an endpoint is an http(s) URL with a host part.
pub fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let rest = endpoint
        .strip_prefix("http://")
        .or_else(|| endpoint.strip_prefix("https://"));

    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(ConfigError::InvalidValue(format!(
            "invalid endpoint '{}', must be an http:// or https:// URL",
            endpoint
        ))),
    }
}
