//! Batch consolidation summary

use super::models::Shipment;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// How a batch of shipments breaks down for consolidation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPlan {
    pub total_shipments: usize,
    /// Requested ids with no matching shipment
    pub missing: Vec<String>,
    /// Only shipments with an assigned carrier are counted
    pub by_carrier: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
    /// Keyed `ORIGIN->DESTINATION`
    pub by_lane: BTreeMap<String, usize>,
}

impl BatchPlan {
    /// Summarize `found` against the ids that were asked for.
    ///
    /// `found` holds one entry per requested id that exists, so repeats count again.
    pub fn from_shipments(requested: &[String], found: &[Shipment]) -> Self {
        let found_ids: HashSet<&str> = found.iter().map(|s| s.id.as_str()).collect();

        let mut missing = Vec::new();
        for id in requested {
            if !found_ids.contains(id.as_str()) && !missing.contains(id) {
                missing.push(id.clone());
            }
        }

        let mut plan = Self {
            total_shipments: found.len(),
            missing,
            ..Default::default()
        };

        for shipment in found {
            if let Some(carrier) = shipment.carrier {
                *plan.by_carrier.entry(carrier.to_string()).or_default() += 1;
            }
            *plan
                .by_priority
                .entry(shipment.priority.to_string())
                .or_default() += 1;
            *plan.by_lane.entry(shipment.lane()).or_default() += 1;
        }

        plan
    }
}
