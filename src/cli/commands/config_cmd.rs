//! config command - Get, set, or list configuration values

use crate::cli::Context;
use crate::core::config::{self, Config, ConfigKey};
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Get a configuration value.
///
/// Prints the effective value (all scopes and the environment applied).
/// Prints nothing if the key has no value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let key = ConfigKey::parse(key)?;
    let cwd = ctx.working_dir()?;
    let config = Config::load(Some(&cwd)).context("Failed to load config")?;

    if let Some(value) = config.get(key) {
        output::result(value);
    }
    Ok(())
}

/// Set a configuration value in the global config file.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let key = ConfigKey::parse(key)?;
    let path = Config::global_config_path()?;

    let mut file = if path.exists() {
        Config::read_config(&path)?
    } else {
        config::FileConfig::default()
    };

    config::set_value(&mut file, key, value)?;
    Config::write_atomic(&path, &file).context("Failed to write config")?;

    output::print(
        format!("Set {} = {} in {}", key, value, path.display()),
        ctx.verbosity(),
    );

    if key == ConfigKey::Endpoint && std::env::var_os(config::ENDPOINT_ENV).is_some() {
        output::warn(
            format!(
                "${} is set and overrides {}",
                config::ENDPOINT_ENV,
                ConfigKey::Endpoint
            ),
            ctx.verbosity(),
        );
    }
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let cwd = ctx.working_dir()?;
    let config = Config::load(Some(&cwd)).context("Failed to load config")?;

    println!("{}", render_list(&config));
    Ok(())
}

fn render_list(config: &Config) -> String {
    let mut lines = vec!["# Configuration".to_string()];

    match config.global_path() {
        Some(path) => lines.push(format!("# global: {}", path.display())),
        None => lines.push("# global: (none)".to_string()),
    }
    if let Some(path) = config.project_path() {
        lines.push(format!("# project: {}", path.display()));
    }

    for key in ConfigKey::ALL {
        let value = config
            .get(*key)
            .unwrap_or_else(|| "(not set)".to_string());
        lines.push(format!("{} = {}", key, value));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn render_list_shows_every_key() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("config.toml");
        std::fs::write(&global, "[handler]\nendpoint = \"http://localhost:8080\"\n").unwrap();

        let config = Config::load_from(Some(&global), None).unwrap();
        let rendered = render_list(&config);

        assert!(rendered.contains("handler.endpoint = http://localhost:8080"));
        assert!(rendered.contains("handler.timeout_secs = 120"));
        assert!(rendered.contains("handler.model = (not set)"));
        assert!(rendered.contains(&format!("# global: {}", global.display())));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let ctx = Context::default();
        let err = get(&ctx, "trunk.branch").unwrap_err();
        assert!(err.to_string().contains("unknown configuration key"));
    }
}
