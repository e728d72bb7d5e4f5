//! Shipment planning use cases

use chrono::{Duration, Utc};
use shipment_db::{DbShipment, ShipmentDatabase, ShipmentFilters};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    city_codes, lookup_city, BatchPlan, Carrier, DeliveryStats, Priority, RouteInfo, Shipment,
    ShipmentStatus,
};
use crate::error::{LogisticsError, Result};
use crate::infrastructure::{PlannerConfig, RoutingConfig};

/// Length of the short shipment ids handed out to users
const SHIPMENT_ID_LEN: usize = 8;

/// Logistics and route planning service
pub struct LogisticsPlanner {
    database: ShipmentDatabase,
    routing: RoutingConfig,
}

impl LogisticsPlanner {
    /// Wrap an already opened database
    pub fn new(database: ShipmentDatabase, routing: RoutingConfig) -> Self {
        Self { database, routing }
    }

    /// Open the database named in `config`
    pub async fn open(config: &PlannerConfig) -> Result<Self> {
        let database = ShipmentDatabase::open(&config.database.path).await?;
        Ok(Self::new(database, config.routing.clone()))
    }

    /// Planner over a throwaway in-memory database
    pub async fn in_memory() -> Result<Self> {
        let database = ShipmentDatabase::in_memory().await?;
        Ok(Self::new(database, RoutingConfig::default()))
    }

    // ==================== SHIPMENTS ====================

    /// Create a new `pending` shipment and return its id
    pub async fn create_shipment(
        &self,
        origin: &str,
        destination: &str,
        weight_kg: f64,
        priority: Priority,
    ) -> Result<String> {
        let origin = require_non_empty("origin", origin)?;
        let destination = require_non_empty("destination", destination)?;
        if !(weight_kg.is_finite() && weight_kg > 0.0) {
            return Err(LogisticsError::Validation(format!(
                "weight_kg must be a positive number, got {weight_kg}"
            )));
        }

        let id = self.unused_id().await?;
        let shipment = Shipment::new(&id, origin, destination, weight_kg, priority, Utc::now());
        self.database.insert_shipment(&shipment.to_db()).await?;

        info!(
            shipment_id = %id,
            origin = %origin,
            destination = %destination,
            priority = %priority,
            "Created shipment"
        );
        Ok(id)
    }

    async fn unused_id(&self) -> Result<String> {
        loop {
            let mut id = Uuid::new_v4().simple().to_string();
            id.truncate(SHIPMENT_ID_LEN);

            if self.database.find_shipment(&id).await?.is_none() {
                return Ok(id);
            }
            debug!("Shipment id {} already taken, drawing another", id);
        }
    }

    /// Hand a shipment to a carrier; ETA is `eta_days` from now
    pub async fn assign_carrier(
        &self,
        id: &str,
        carrier: Carrier,
        tracking_id: &str,
        eta_days: u32,
    ) -> Result<()> {
        let tracking_id = require_non_empty("tracking_id", tracking_id)?;

        let now = Utc::now();
        let eta = now
            .checked_add_signed(Duration::days(i64::from(eta_days)))
            .ok_or_else(|| {
                LogisticsError::Validation(format!("eta_days {eta_days} is out of range"))
            })?;

        self.database
            .assign_carrier(id, carrier.as_str(), tracking_id, eta, now)
            .await?;

        info!(shipment_id = %id, carrier = %carrier, eta = %eta.to_rfc3339(), "Assigned carrier");
        Ok(())
    }

    pub async fn update_status(&self, id: &str, status: ShipmentStatus) -> Result<()> {
        self.database
            .update_status(id, status.as_str(), Utc::now())
            .await?;

        info!(shipment_id = %id, status = %status, "Updated shipment status");
        Ok(())
    }

    pub async fn get_shipment(&self, id: &str) -> Result<Shipment> {
        let row = self.database.get_shipment(id).await?;
        Ok(Shipment::try_from(row)?)
    }

    /// Shipments, newest first, optionally filtered by status, priority and carrier
    pub async fn get_shipments(
        &self,
        status: Option<ShipmentStatus>,
        priority: Option<Priority>,
        carrier: Option<Carrier>,
    ) -> Result<Vec<Shipment>> {
        let filters = ShipmentFilters {
            status: status.map(|s| s.to_string()),
            priority: priority.map(|p| p.to_string()),
            carrier: carrier.map(|c| c.to_string()),
        };

        let rows = self.database.query_shipments(&filters).await?;
        to_shipments(rows)
    }

    // ==================== PLANNING ====================

    /// Direct route estimate between two known cities
    pub fn get_route(&self, origin: &str, destination: &str) -> Result<RouteInfo> {
        let from = resolve_city(origin)?;
        let to = resolve_city(destination)?;

        Ok(RouteInfo::direct(from, to, self.routing.average_speed_kmh))
    }

    /// Group a batch of shipments by carrier, priority and lane.
    ///
    /// Every requested id is counted, so an id listed twice counts twice.
    pub async fn optimize_batch(&self, ids: &[String]) -> Result<BatchPlan> {
        let rows = self.database.get_shipments(ids).await?;
        let shipments = to_shipments(rows)?;
        let plan = BatchPlan::from_shipments(ids, &shipments);

        if !plan.missing.is_empty() {
            warn!("Skipping unknown shipments: {}", plan.missing.join(", "));
        }
        Ok(plan)
    }

    /// Delivery performance over every stored shipment
    pub async fn delivery_stats(&self) -> Result<DeliveryStats> {
        let rows = self.database.all_shipments().await?;
        let shipments = to_shipments(rows)?;
        Ok(DeliveryStats::from_shipments(&shipments))
    }

    // ==================== UTILITY ====================

    pub fn database(&self) -> &ShipmentDatabase {
        &self.database
    }

    pub async fn close(self) {
        self.database.close().await;
    }
}

fn require_non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LogisticsError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

fn resolve_city(code: &str) -> Result<(&'static str, crate::domain::Coordinates)> {
    lookup_city(code).ok_or_else(|| LogisticsError::UnknownCity {
        city: code.to_string(),
        available: city_codes(),
    })
}

fn to_shipments(rows: Vec<DbShipment>) -> Result<Vec<Shipment>> {
    rows.into_iter()
        .map(|row| Shipment::try_from(row).map_err(LogisticsError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipment_db::DatabaseError;

    async fn planner() -> LogisticsPlanner {
        LogisticsPlanner::in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_shipment() {
        let planner = planner().await;

        let id = planner
            .create_shipment(" NYC ", "LAX", 12.0, Priority::Express)
            .await
            .unwrap();
        assert_eq!(id.len(), 8);

        let shipment = planner.get_shipment(&id).await.unwrap();
        assert_eq!(shipment.origin, "NYC");
        assert_eq!(shipment.status, ShipmentStatus::Pending);
        assert_eq!(shipment.priority, Priority::Express);
        assert!(shipment.carrier.is_none());
        assert!(shipment.eta.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let planner = planner().await;

        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = planner
                .create_shipment("NYC", "LAX", weight, Priority::Standard)
                .await
                .unwrap_err();
            assert!(matches!(err, LogisticsError::Validation(_)));
        }

        let err = planner
            .create_shipment("  ", "LAX", 1.0, Priority::Standard)
            .await
            .unwrap_err();
        assert!(matches!(err, LogisticsError::Validation(_)));
        assert_eq!(planner.database().shipment_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_assign_carrier_sets_eta() {
        let planner = planner().await;
        let id = planner
            .create_shipment("CHI", "DEN", 40.0, Priority::Standard)
            .await
            .unwrap();

        let before = Utc::now();
        planner
            .assign_carrier(&id, Carrier::BlackroadExpress, "BR-001", 4)
            .await
            .unwrap();

        let shipment = planner.get_shipment(&id).await.unwrap();
        assert_eq!(shipment.status, ShipmentStatus::PickedUp);
        assert_eq!(shipment.carrier, Some(Carrier::BlackroadExpress));
        assert_eq!(shipment.tracking_id.as_deref(), Some("BR-001"));

        let eta = shipment.eta.unwrap();
        assert!(eta >= before + Duration::days(4));
        assert!(eta <= Utc::now() + Duration::days(4));
    }

    #[tokio::test]
    async fn test_unknown_shipment_updates_fail() {
        let planner = planner().await;

        let err = planner
            .assign_carrier("ghost123", Carrier::Ups, "1Z", 1)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LogisticsError::Database(DatabaseError::ShipmentNotFound(_))
        ));

        let err = planner
            .update_status("ghost123", ShipmentStatus::Delivered)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LogisticsError::Database(DatabaseError::ShipmentNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_shipments_filters() {
        let planner = planner().await;
        let a = planner.create_shipment("NYC", "BOS", 1.0, Priority::Standard).await.unwrap();
        let b = planner.create_shipment("NYC", "PHI", 2.0, Priority::Overnight).await.unwrap();
        let c = planner.create_shipment("SEA", "POR", 3.0, Priority::Overnight).await.unwrap();
        planner.update_status(&b, ShipmentStatus::InTransit).await.unwrap();
        planner.assign_carrier(&c, Carrier::Usps, "9400", 2).await.unwrap();

        assert_eq!(planner.get_shipments(None, None, None).await.unwrap().len(), 3);

        let overnight = planner
            .get_shipments(None, Some(Priority::Overnight), None)
            .await
            .unwrap();
        assert_eq!(overnight.len(), 2);

        let pending_standard = planner
            .get_shipments(Some(ShipmentStatus::Pending), Some(Priority::Standard), None)
            .await
            .unwrap();
        assert_eq!(pending_standard.len(), 1);
        assert_eq!(pending_standard[0].id, a);

        let usps = planner
            .get_shipments(None, None, Some(Carrier::Usps))
            .await
            .unwrap();
        assert_eq!(usps.len(), 1);
        assert_eq!(usps[0].id, c);
        assert!(planner
            .get_shipments(None, None, Some(Carrier::Dhl))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_route() {
        let planner = planner().await;

        let route = planner.get_route("nyc", "lax").unwrap();
        assert_eq!(route.origin, "NYC");
        assert_eq!(route.destination, "LAX");
        assert_eq!(route.distance_km, 3935.7);
        assert_eq!(route.duration_h, 49.2);

        let err = planner.get_route("NYC", "Gotham").unwrap_err();
        match err {
            LogisticsError::UnknownCity { city, available } => {
                assert_eq!(city, "Gotham");
                assert_eq!(available.len(), 20);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_route_uses_configured_speed() {
        let database = ShipmentDatabase::in_memory().await.unwrap();
        let planner = LogisticsPlanner::new(
            database,
            RoutingConfig {
                average_speed_kmh: 100.0,
            },
        );

        let route = planner.get_route("NYC", "BOS").unwrap();
        assert_eq!(route.distance_km, 306.1);
        assert_eq!(route.duration_h, 3.1);
    }

    #[tokio::test]
    async fn test_optimize_batch() {
        let planner = planner().await;
        let a = planner.create_shipment("NYC", "LAX", 1.0, Priority::Express).await.unwrap();
        let b = planner.create_shipment("NYC", "LAX", 2.0, Priority::Standard).await.unwrap();
        let c = planner.create_shipment("ATL", "MIA", 3.0, Priority::Express).await.unwrap();
        planner.assign_carrier(&a, Carrier::Fedex, "FX1", 2).await.unwrap();
        planner.assign_carrier(&c, Carrier::Fedex, "FX2", 1).await.unwrap();

        let ids = vec![
            a.clone(),
            b,
            c,
            a,
            "nothere".to_string(),
            "nothere".to_string(),
        ];
        let plan = planner.optimize_batch(&ids).await.unwrap();

        // `a` is listed twice and counted twice
        assert_eq!(plan.total_shipments, 4);
        assert_eq!(plan.missing, vec!["nothere".to_string()]);
        assert_eq!(plan.by_carrier.get("fedex"), Some(&3));
        assert_eq!(plan.by_priority.get("express"), Some(&3));
        assert_eq!(plan.by_priority.get("standard"), Some(&1));
        assert_eq!(plan.by_lane.get("NYC->LAX"), Some(&3));
        assert_eq!(plan.by_lane.get("ATL->MIA"), Some(&1));
    }

    #[tokio::test]
    async fn test_delivery_stats() {
        let planner = planner().await;
        let a = planner.create_shipment("NYC", "LAX", 1.0, Priority::Express).await.unwrap();
        let b = planner.create_shipment("DAL", "HOU", 2.0, Priority::Standard).await.unwrap();
        let c = planner.create_shipment("DET", "CLE", 3.0, Priority::Standard).await.unwrap();

        planner.assign_carrier(&a, Carrier::Ups, "1Z1", 3).await.unwrap();
        planner.assign_carrier(&b, Carrier::Ups, "1Z2", 3).await.unwrap();
        planner.update_status(&a, ShipmentStatus::Delivered).await.unwrap();
        planner.update_status(&c, ShipmentStatus::Exception).await.unwrap();

        let stats = planner.delivery_stats().await.unwrap();
        assert_eq!(stats.total_shipments, 3);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.in_exception, 1);
        assert_eq!(stats.on_time_rate_pct, 100.0);
        assert_eq!(stats.avg_transit_days, 0.0);
        assert_eq!(stats.by_carrier["ups"].delivery_rate, 50.0);
    }
}
