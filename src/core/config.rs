use crate::models::config::ToolConfig;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Load the config file if one was given, defaults otherwise.
pub fn load_optional(path: Option<&Path>) -> Result<ToolConfig> {
    match path {
        Some(path) => load(path),
        None => Ok(ToolConfig::default()),
    }
}

pub fn load(path: &Path) -> Result<ToolConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config: ToolConfig =
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
    validate(&config).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn validate(config: &ToolConfig) -> Result<()> {
    let scheme = config.device.scheme.as_str();
    if scheme != "https" && scheme != "http" {
        bail!("device.scheme must be https or http, got '{}'", scheme);
    }
    if config.device.timeout_secs == 0 {
        bail!("device.timeout_secs must be at least 1");
    }
    Ok(())
}
