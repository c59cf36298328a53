use anyhow::{Context, Result};
use seed_core::SeedConfig;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/seed.toml";

/// Config file from the command line, or the default location
pub fn config_path(arg: Option<PathBuf>) -> PathBuf {
  arg.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load, apply environment overrides and validate
pub fn load(path: &Path) -> Result<SeedConfig> {
  let config = SeedConfig::load(path)
    .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

  config.validate().with_context(|| format!("Invalid configuration in {}", path.display()))?;

  Ok(config)
}
