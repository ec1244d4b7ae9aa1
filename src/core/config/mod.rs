//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! devai has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Overrides for one project directory
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. `$DEVAI_ENDPOINT` (endpoint only)
//! 5. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$DEVAI_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/devai/config.toml`
//! 3. `~/.devai/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use devai::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! if let Some(endpoint) = config.endpoint() {
//!     println!("AI service: {}", endpoint);
//! }
//! println!("Timeout: {:?}", config.timeout());
//! ```

pub mod schema;

pub use schema::{FileConfig, HandlerConfig};

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "DEVAI_CONFIG";

/// Environment variable overriding `handler.endpoint`.
pub const ENDPOINT_ENV: &str = "DEVAI_ENDPOINT";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Keys addressable through `config get` and `config set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Endpoint,
    TimeoutSecs,
    Model,
}

impl ConfigKey {
    /// All keys, in display order.
    pub const ALL: &'static [ConfigKey] =
        &[ConfigKey::Endpoint, ConfigKey::TimeoutSecs, ConfigKey::Model];

    /// Dotted key name as used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::Endpoint => "handler.endpoint",
            ConfigKey::TimeoutSecs => "handler.timeout_secs",
            ConfigKey::Model => "handler.model",
        }
    }

    /// Parse a dotted key name.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules automatically.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: FileConfig,
    /// Project configuration (if present)
    pub project: Option<FileConfig>,
    /// Endpoint from the environment
    env_endpoint: Option<String>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the project config file (if loaded)
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations and the environment.
    ///
    /// If `project_dir` is provided, also loads its project config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(project_dir: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config = Self::load_from(Self::locate_global().as_deref(), project_dir)?;

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.is_empty() {
                schema::validate_endpoint(&endpoint)?;
                config.env_endpoint = Some(endpoint);
            }
        }

        Ok(config)
    }

    /// Load configuration from an explicit global file (ignoring the
    /// environment).
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<Config, ConfigError> {
        let global = match global_path {
            Some(path) if path.exists() => Self::read_config(path)?,
            _ => FileConfig::default(),
        };

        let project_path = project_dir
            .map(Self::project_config_path)
            .filter(|p| p.exists());
        let project = project_path
            .as_deref()
            .map(Self::read_config)
            .transpose()?;

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        debug!(
            global = ?global_path,
            project = ?project_path,
            "loaded configuration"
        );

        Ok(Config {
            global,
            project,
            env_endpoint: None,
            global_path: global_path.filter(|p| p.exists()).map(Path::to_path_buf),
            project_path,
        })
    }

    /// Find the global config file to read, if any.
    fn locate_global() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        if let Some(path) = Self::xdg_config_path().filter(|p| p.exists()) {
            return Some(path);
        }
        dirs::home_dir().map(|home| home.join(".devai/config.toml"))
    }

    /// `$XDG_CONFIG_HOME/devai/config.toml`, if `$XDG_CONFIG_HOME` is set.
    fn xdg_config_path() -> Option<PathBuf> {
        std::env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(|dir| PathBuf::from(dir).join("devai/config.toml"))
    }

    /// Read and parse a config file.
    pub fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path `config set` writes to.
    ///
    /// This is the file [`Config::load`] reads: `$DEVAI_CONFIG` if set, an
    /// existing `$XDG_CONFIG_HOME/devai/config.toml`, else
    /// `~/.devai/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        Self::locate_global().ok_or(ConfigError::NoHomeDir)
    }

    /// Get the path for project config.
    pub fn project_config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(".devai/config.toml")
    }

    /// Write a config file atomically.
    ///
    /// Creates parent directories if needed. Writes to a temp file in the
    /// same directory, then renames it over the target.
    pub fn write_atomic(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Path of the global file that was loaded, if any.
    pub fn global_path(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Path of the project file that was loaded, if any.
    pub fn project_path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn handler_value<T>(&self, pick: impl Fn(&HandlerConfig) -> Option<T>) -> Option<T> {
        self.project
            .as_ref()
            .and_then(|p| p.handler.as_ref())
            .and_then(&pick)
            .or_else(|| self.global.handler.as_ref().and_then(&pick))
    }

    /// Get the AI service endpoint.
    ///
    /// Returns `None` if not configured anywhere.
    pub fn endpoint(&self) -> Option<String> {
        self.env_endpoint
            .clone()
            .or_else(|| self.handler_value(|h| h.endpoint.clone()))
    }

    /// Get the request timeout.
    ///
    /// Defaults to 120 seconds.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.handler_value(|h| h.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Get the model forwarded to the service, if any.
    pub fn model(&self) -> Option<String> {
        self.handler_value(|h| h.model.clone())
    }

    /// Effective value of a key, rendered for display.
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::Endpoint => self.endpoint(),
            ConfigKey::TimeoutSecs => Some(self.timeout().as_secs().to_string()),
            ConfigKey::Model => self.model(),
        }
    }
}

/// Set a key on a config file's contents, validating the new value.
pub fn set_value(config: &mut FileConfig, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
    let handler = config.handler_mut();
    match key {
        ConfigKey::Endpoint => {
            schema::validate_endpoint(value)?;
            handler.endpoint = Some(value.to_string());
        }
        ConfigKey::TimeoutSecs => {
            let secs: u64 = value.parse().map_err(|_| {
                ConfigError::InvalidValue(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    key, value
                ))
            })?;
            handler.timeout_secs = Some(secs);
        }
        ConfigKey::Model => {
            handler.model = Some(value.to_string());
        }
    }
    config.validate()
}
