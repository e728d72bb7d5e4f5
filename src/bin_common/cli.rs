//! CLI utilities for binaries
//!
//! Resolves which configuration file a binary should read.

use anyhow::{Context, Result};
use logistics::PlannerConfig;
use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Planner configuration (config/planner.yaml)
    Planner,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Planner => "config/planner.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        "CONFIG_PATH"
    }
}

/// Load configuration path from environment or use default
///
/// # Examples
/// ```
/// use blackroad_logistics::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Planner);
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    match config_type {
        // An explicit path always wins over the environment
        ConfigType::Custom(path) => path.into(),
        other => std::env::var(other.env_var_name())
            .unwrap_or_else(|_| other.default_path().to_string())
            .into(),
    }
}

/// Load the planner configuration the way `logistics-planner` does.
///
/// An explicit `--config` file must exist. Without one the path comes from
/// `CONFIG_PATH`, then `config/planner.yaml`, and a missing file means defaults.
/// `--db` replaces `database.path` afterwards, so an empty value is rejected.
pub fn load_planner_config(explicit: Option<PathBuf>, db: Option<PathBuf>) -> Result<PlannerConfig> {
    let config = match explicit {
        Some(path) => PlannerConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => {
            let path = load_config_from_env(ConfigType::Planner);
            PlannerConfig::load_or_default(&path)
                .with_context(|| format!("loading config {}", path.display()))?
        }
    };

    let config = match db {
        Some(db) => config.with_db_path(db),
        None => config,
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_type_paths() {
        assert_eq!(ConfigType::Planner.default_path(), "config/planner.yaml");

        let custom = ConfigType::Custom("custom.yaml".to_string());
        assert_eq!(custom.default_path(), "custom.yaml");
    }

    #[test]
    fn test_env_var_names() {
        assert_eq!(ConfigType::Planner.env_var_name(), "CONFIG_PATH");
    }
}
