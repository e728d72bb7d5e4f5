//! Plain-text output for the planner CLI

use logistics::domain::CITIES;
use logistics::Shipment;
use std::fmt::Write;

/// Printed by `list` when no shipment matches
pub const NO_SHIPMENTS: &str = "No shipments found.";

/// Render shipments as a fixed-width table: a header, a 60-character rule, then one row each.
///
/// Returns [`NO_SHIPMENTS`] on its own line when `shipments` is empty.
pub fn render_shipment_table(shipments: &[Shipment]) -> String {
    if shipments.is_empty() {
        return format!("{NO_SHIPMENTS}\n");
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<8} {:<8} {:<18} {:<10}",
        "ID", "Origin", "Dest", "Status", "Priority"
    );
    let _ = writeln!(out, "{}", "-".repeat(60));
    for s in shipments {
        let _ = writeln!(
            out,
            "{:<10} {:<8} {:<8} {:<18} {:<10}",
            s.id,
            s.origin,
            s.destination,
            s.status.as_str(),
            s.priority.as_str()
        );
    }
    out
}

/// Render the known city codes with their coordinates
pub fn render_cities() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<6} {:>9} {:>10}", "Code", "Lat", "Lon");
    for (code, coords) in CITIES {
        let _ = writeln!(out, "{:<6} {:>9.4} {:>10.4}", code, coords.lat, coords.lon);
    }
    out
}
