//! Integration test: end-to-end shipment lifecycle against an on-disk database

use blackroad_logistics::logistics::{
    Carrier, LogisticsError, LogisticsPlanner, PlannerConfig, Priority, ShipmentStatus,
};
use blackroad_logistics::shipment_db::DatabaseError;

#[tokio::test]
async fn test_shipment_lifecycle_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlannerConfig::default().with_db_path(dir.path().join("data").join("logistics.db"));

    let planner = LogisticsPlanner::open(&config).await.unwrap();
    let fast = planner
        .create_shipment("NYC", "BOS", 4.0, Priority::Overnight)
        .await
        .unwrap();
    let slow = planner
        .create_shipment("SEA", "MIA", 250.0, Priority::Standard)
        .await
        .unwrap();

    planner.assign_carrier(&fast, Carrier::Fedex, "FX-42", 1).await.unwrap();
    planner.update_status(&fast, ShipmentStatus::InTransit).await.unwrap();
    planner.update_status(&fast, ShipmentStatus::Delivered).await.unwrap();
    planner.close().await;

    let planner = LogisticsPlanner::open(&config).await.unwrap();

    let delivered = planner
        .get_shipments(Some(ShipmentStatus::Delivered), None, None)
        .await
        .unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].id, fast);
    assert!(delivered[0].delivered_at.is_some());

    let pending = planner
        .get_shipments(Some(ShipmentStatus::Pending), None, None)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, slow);

    let stats = planner.delivery_stats().await.unwrap();
    assert_eq!(stats.total_shipments, 2);
    assert_eq!(stats.delivered, 1);
    assert_eq!(stats.on_time_rate_pct, 100.0);
    assert_eq!(stats.by_carrier["fedex"].delivery_rate, 100.0);

    let plan = planner
        .optimize_batch(&[fast.clone(), slow.clone()])
        .await
        .unwrap();
    assert_eq!(plan.total_shipments, 2);
    assert_eq!(plan.by_lane.get("SEA->MIA"), Some(&1));

    planner.close().await;
}

#[tokio::test]
async fn test_show_unknown_shipment() {
    let planner = LogisticsPlanner::in_memory().await.unwrap();

    let err = planner.get_shipment("deadbeef").await.unwrap_err();
    assert!(matches!(
        err,
        LogisticsError::Database(DatabaseError::ShipmentNotFound(ref id)) if id == "deadbeef"
    ));
}
