//! BlackRoad Logistics Planner - Main Library
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (config loading, table output)
//! - **logistics**: Planner use cases, domain model and config (re-exported from workspace)
//! - **shipment_db**: SQLite persistence (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use blackroad_logistics::bin_common::{load_config_from_env, ConfigType};
//! use blackroad_logistics::logistics::LogisticsPlanner;
//! ```

// Re-export workspace libraries for convenience
pub use logistics;
pub use shipment_db;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod render;

    pub use cli::{load_config_from_env, load_planner_config, ConfigType};
    pub use render::{render_cities, render_shipment_table, NO_SHIPMENTS};
}
