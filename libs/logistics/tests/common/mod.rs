//! Common test utilities for logistics integration tests

use logistics::domain::{Coordinates, CITIES};
use proptest::prelude::*;

/// Strategy yielding any valid coordinate
pub fn any_coordinates() -> impl Strategy<Value = Coordinates> {
    (-90.0..=90.0f64, -180.0..=180.0f64).prop_map(|(lat, lon)| Coordinates::new(lat, lon))
}

/// Strategy yielding an index into the city table
pub fn any_city_index() -> impl Strategy<Value = usize> {
    0..CITIES.len()
}
