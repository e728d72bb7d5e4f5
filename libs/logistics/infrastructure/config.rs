use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::geo::DEFAULT_AVERAGE_SPEED_KMH;

/// Environment variable that overrides `database.path`
pub const DB_PATH_ENV: &str = "LOGISTICS_DB_PATH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Logistics planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub routing: RoutingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default = "default_average_speed")]
    pub average_speed_kmh: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
        }
    }
}

/// `~/.blackroad/logistics.db`, relative to the working directory if there is no home
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".blackroad")
        .join("logistics.db")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_average_speed() -> f64 {
    DEFAULT_AVERAGE_SPEED_KMH
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            log_level: default_log_level(),
            routing: RoutingConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a YAML file, then apply `.env` / environment overrides
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let config: PlannerConfig = serde_yaml::from_str(&yaml_content)?;
        config.finish()
    }

    /// Like [`PlannerConfig::load`], but fall back to defaults when the file does not exist
    pub fn load_or_default(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        if config_path.exists() {
            Self::load(config_path)
        } else {
            debug!("No config at {}, using defaults", config_path.display());
            Self::default().finish()
        }
    }

    fn finish(mut self) -> Result<Self> {
        dotenv::dotenv().ok(); // Don't fail if .env doesn't exist

        self.apply_overrides(std::env::var(DB_PATH_ENV).ok());
        self.validate()?;
        Ok(self)
    }

    fn apply_overrides(&mut self, db_path: Option<String>) {
        if let Some(db_path) = db_path.filter(|p| !p.trim().is_empty()) {
            info!("Overriding database path from {}", DB_PATH_ENV);
            self.database.path = PathBuf::from(db_path);
        }
    }

    /// Override the database path (e.g. from a command-line flag)
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database.path = path.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.path cannot be empty".to_string(),
            ));
        }
        if !(self.routing.average_speed_kmh.is_finite() && self.routing.average_speed_kmh > 0.0) {
            return Err(ConfigError::ValidationError(
                "routing.average_speed_kmh must be greater than 0".to_string(),
            ));
        }
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }
        Ok(())
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  Database path: {}", self.database.path.display());
        info!("  Log level: {}", self.log_level);
        info!("  Average speed: {} km/h", self.routing.average_speed_kmh);
    }
}
