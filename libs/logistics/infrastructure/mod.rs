//! Infrastructure Layer
//!
//! Configuration loading and logging setup.
//! This layer depends on the domain layer but not on the application layer.

pub mod config;
pub mod logging;

// Re-export config types
pub use config::{ConfigError, DatabaseConfig, PlannerConfig, RoutingConfig, DB_PATH_ENV};

pub use logging::init_tracing_with_level;
