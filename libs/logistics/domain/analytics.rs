//! Delivery performance statistics

use super::geo::round1;
use super::models::{Shipment, ShipmentStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarrierPerformance {
    /// Delivered share of the carrier's shipments, in percent
    pub delivery_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStats {
    pub total_shipments: usize,
    pub delivered: usize,
    pub in_exception: usize,
    pub on_time_rate_pct: f64,
    pub avg_transit_days: f64,
    pub by_carrier: BTreeMap<String, CarrierPerformance>,
}

#[derive(Default)]
struct CarrierTally {
    delivered: usize,
    total: usize,
}

impl DeliveryStats {
    pub fn from_shipments(shipments: &[Shipment]) -> Self {
        let delivered: Vec<&Shipment> = shipments.iter().filter(|s| s.is_delivered()).collect();
        let in_exception = shipments
            .iter()
            .filter(|s| s.status == ShipmentStatus::Exception)
            .count();

        // Without an ETA there is nothing to be on time against
        let on_time = delivered
            .iter()
            .filter(|s| match (s.delivered_at, s.eta) {
                (Some(at), Some(eta)) => at <= eta,
                _ => false,
            })
            .count();

        let on_time_rate_pct = if delivered.is_empty() {
            0.0
        } else {
            on_time as f64 / delivered.len() as f64 * 100.0
        };

        let transit_days: Vec<i64> = delivered
            .iter()
            .filter_map(|s| s.delivered_at.map(|at| (at - s.created_at).num_days()))
            .collect();

        let avg_transit_days = if transit_days.is_empty() {
            0.0
        } else {
            transit_days.iter().sum::<i64>() as f64 / transit_days.len() as f64
        };

        let mut tallies: BTreeMap<String, CarrierTally> = BTreeMap::new();
        for shipment in shipments {
            if let Some(carrier) = shipment.carrier {
                let tally = tallies.entry(carrier.to_string()).or_default();
                tally.total += 1;
                if shipment.is_delivered() {
                    tally.delivered += 1;
                }
            }
        }

        let by_carrier = tallies
            .into_iter()
            .map(|(carrier, tally)| {
                let rate = tally.delivered as f64 / tally.total as f64 * 100.0;
                (carrier, CarrierPerformance { delivery_rate: round1(rate) })
            })
            .collect();

        Self {
            total_shipments: shipments.len(),
            delivered: delivered.len(),
            in_exception,
            on_time_rate_pct: round1(on_time_rate_pct),
            avg_transit_days: round1(avg_transit_days),
            by_carrier,
        }
    }
}
