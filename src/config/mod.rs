mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `.env`, an optional YAML file and the process
/// environment, in that order of precedence (environment wins).
pub async fn load() -> Result<Config> {
    // A missing .env is the normal case in production.
    let _ = dotenvy::dotenv();

    let mut config = match env::var("CONFIG_PATH") {
        Ok(path) => from_file(&path).await?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => from_file(DEFAULT_CONFIG_PATH).await?,
        Err(_) => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, |key| env::var(key).ok())?;

    Ok(config)
}

pub async fn from_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// Applies `GEMINI_API_KEY`, `GEMINI_MODEL`, `HOST` and `PORT` on top of a
/// loaded configuration. `lookup` resolves a variable name to its value.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(api_key) = lookup("GEMINI_API_KEY") {
        config.llm.api_key = api_key;
    }

    if let Some(model) = lookup("GEMINI_MODEL").filter(|m| !m.trim().is_empty()) {
        config.llm.model = model;
    }

    if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
        config.server.host = host;
    }

    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("PORT must be a port number, got '{}'", port)))?;
    }

    Ok(())
}
