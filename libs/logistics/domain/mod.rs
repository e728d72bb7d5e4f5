//! Domain Layer
//!
//! Contains pure business entities and domain models.
//! This layer has no dependencies on the application or infrastructure layers.

pub mod analytics;
pub mod batch;
pub mod geo;
pub mod models;

// Re-export domain models
pub use models::{Carrier, ConversionError, InvalidValue, Priority, Shipment, ShipmentStatus};

// Re-export route estimation
pub use geo::{city_codes, haversine_km, lookup_city, Coordinates, RouteInfo, CITIES};

// Re-export planning summaries
pub use analytics::{CarrierPerformance, DeliveryStats};
pub use batch::BatchPlan;
