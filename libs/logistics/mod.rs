//! BlackRoad Logistics Planner
//!
//! Shipment tracking, carrier assignment, route estimates, batch
//! consolidation and delivery analytics on top of a local SQLite store.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-export commonly used items
pub use application::LogisticsPlanner;
pub use domain::{
    BatchPlan, Carrier, CarrierPerformance, DeliveryStats, Priority, RouteInfo, Shipment,
    ShipmentStatus,
};
pub use error::{LogisticsError, Result};
pub use infrastructure::{init_tracing_with_level, ConfigError, PlannerConfig};
