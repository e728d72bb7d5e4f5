//! City table and great-circle route estimates

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average truck speed used for duration estimates
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 80.0;

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Major US cities the route estimator knows about
pub const CITIES: [(&str, Coordinates); 20] = [
    ("NYC", Coordinates::new(40.7128, -74.0060)),
    ("LAX", Coordinates::new(34.0522, -118.2437)),
    ("CHI", Coordinates::new(41.8781, -87.6298)),
    ("HOU", Coordinates::new(29.7604, -95.3698)),
    ("PHX", Coordinates::new(33.4484, -112.0742)),
    ("PHI", Coordinates::new(39.9526, -75.1652)),
    ("SAN", Coordinates::new(32.7157, -117.1611)),
    ("DAL", Coordinates::new(32.7767, -96.7970)),
    ("SJC", Coordinates::new(37.3382, -121.8863)),
    ("AUS", Coordinates::new(30.2672, -97.7431)),
    ("DEN", Coordinates::new(39.7392, -104.9903)),
    ("ATL", Coordinates::new(33.7490, -84.3880)),
    ("BOS", Coordinates::new(42.3601, -71.0589)),
    ("MIA", Coordinates::new(25.7617, -80.1918)),
    ("SEA", Coordinates::new(47.6062, -122.3321)),
    ("POR", Coordinates::new(45.5152, -122.6784)),
    ("MIN", Coordinates::new(44.9778, -93.2650)),
    ("DET", Coordinates::new(42.3314, -83.0458)),
    ("CLE", Coordinates::new(41.4993, -81.6944)),
    ("STL", Coordinates::new(38.6270, -90.1994)),
];

/// City codes in table order
pub fn city_codes() -> Vec<&'static str> {
    CITIES.iter().map(|(code, _)| *code).collect()
}

/// Look up a city code, ignoring case and surrounding whitespace.
///
/// Returns the canonical code alongside its coordinates.
pub fn lookup_city(code: &str) -> Option<(&'static str, Coordinates)> {
    let code = code.trim();
    CITIES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .copied()
}

/// Great-circle distance between two points (haversine formula)
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    // Rounding can push h a hair past 1.0 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Estimated route between two known cities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub duration_h: f64,
    pub stops: Vec<String>,
}

impl RouteInfo {
    /// Build a direct route estimate between two resolved cities
    pub fn direct(
        origin: (&str, Coordinates),
        destination: (&str, Coordinates),
        average_speed_kmh: f64,
    ) -> Self {
        let distance_km = haversine_km(origin.1, destination.1);
        let duration_h = distance_km / average_speed_kmh;

        Self {
            origin: origin.0.to_string(),
            destination: destination.0.to_string(),
            distance_km: round1(distance_km),
            duration_h: round1(duration_h),
            stops: vec![origin.0.to_string(), destination.0.to_string()],
        }
    }
}
