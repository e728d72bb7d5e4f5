//! Application Layer
//!
//! Contains use cases and application services.
//! This layer depends on domain and infrastructure layers.

pub mod planner;

pub use planner::LogisticsPlanner;
