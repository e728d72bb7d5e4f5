pub mod models;
pub mod schema;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

// Re-export main types
pub use models::{DbShipment, ShipmentFilters};
pub use schema::{get_schema_version, initialize_schema, SCHEMA_VERSION};

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Schema error: {0}")]
    SchemaError(#[from] schema::SchemaError),

    #[error("Failed to prepare database directory: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Shipment not found: {0}")]
    ShipmentNotFound(String),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Status value written by `update_status` that also stamps `delivered_at`
const DELIVERED: &str = "delivered";

/// Status value a shipment moves to once a carrier is assigned
const PICKED_UP: &str = "picked_up";

/// Shipment database manager
pub struct ShipmentDatabase {
    pool: SqlitePool,
}

impl ShipmentDatabase {
    /// Open (or create) the database file at `path` and initialize schema
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening shipment database: {}", path.display());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    /// Open a private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` gets its own database, so the pool
    /// is pinned to one connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        schema::initialize_schema(&pool).await?;
        info!("Database initialized successfully");
        Ok(Self { pool })
    }

    // ==================== SHIPMENT WRITES ====================

    /// Insert a new shipment row
    pub async fn insert_shipment(&self, shipment: &DbShipment) -> Result<()> {
        debug!(
            shipment_id = %shipment.id,
            origin = %shipment.origin,
            destination = %shipment.destination,
            "Inserting shipment"
        );

        sqlx::query(
            r#"
            INSERT INTO shipments (
                id, origin, destination, weight_kg, priority, status,
                eta, carrier, tracking_id, created_at, updated_at, delivered_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&shipment.id)
        .bind(&shipment.origin)
        .bind(&shipment.destination)
        .bind(shipment.weight_kg)
        .bind(&shipment.priority)
        .bind(&shipment.status)
        .bind(&shipment.eta)
        .bind(&shipment.carrier)
        .bind(&shipment.tracking_id)
        .bind(&shipment.created_at)
        .bind(&shipment.updated_at)
        .bind(&shipment.delivered_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Assign a carrier, tracking id and ETA; the shipment moves to `picked_up`
    pub async fn assign_carrier(
        &self,
        id: &str,
        carrier: &str,
        tracking_id: &str,
        eta: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE shipments
            SET carrier = ?, tracking_id = ?, eta = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(carrier)
        .bind(tracking_id)
        .bind(eta.to_rfc3339())
        .bind(PICKED_UP)
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::ShipmentNotFound(id.to_string()));
        }

        debug!(shipment_id = %id, carrier = %carrier, "Carrier assigned");
        Ok(())
    }

    /// Update shipment status.
    ///
    /// `delivered_at` is stamped only on the transition into `delivered`;
    /// repeating `delivered` keeps the first stamp, and leaving `delivered`
    /// clears it.
    pub async fn update_status(&self, id: &str, status: &str, now: DateTime<Utc>) -> Result<()> {
        let now = now.to_rfc3339();

        // SET expressions see the row as it was before the update
        let result = sqlx::query(
            r#"
            UPDATE shipments
            SET delivered_at = CASE
                    WHEN ? <> ? THEN NULL
                    WHEN status = ? THEN delivered_at
                    ELSE ?
                END,
                status = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(status)
        .bind(DELIVERED)
        .bind(DELIVERED)
        .bind(&now)
        .bind(status)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::ShipmentNotFound(id.to_string()));
        }

        debug!(shipment_id = %id, status = %status, "Status updated");
        Ok(())
    }

    // ==================== SHIPMENT READS ====================

    /// Get shipment by ID
    pub async fn get_shipment(&self, id: &str) -> Result<DbShipment> {
        self.find_shipment(id)
            .await?
            .ok_or_else(|| DatabaseError::ShipmentNotFound(id.to_string()))
    }

    /// Get shipment by ID, `None` if absent
    pub async fn find_shipment(&self, id: &str) -> Result<Option<DbShipment>> {
        let shipment = sqlx::query_as::<_, DbShipment>("SELECT * FROM shipments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(shipment)
    }

    /// Fetch the given ids in request order, skipping unknown ones
    pub async fn get_shipments(&self, ids: &[String]) -> Result<Vec<DbShipment>> {
        let mut shipments = Vec::with_capacity(ids.len());

        for id in ids {
            if let Some(shipment) = self.find_shipment(id).await? {
                shipments.push(shipment);
            }
        }

        debug!("Fetched {} of {} requested shipments", shipments.len(), ids.len());
        Ok(shipments)
    }

    /// Query shipments with filters, newest first
    pub async fn query_shipments(&self, filters: &ShipmentFilters) -> Result<Vec<DbShipment>> {
        let (where_clause, params) = filters.build_where_clause();

        let query = format!(
            "SELECT * FROM shipments {} ORDER BY created_at DESC, rowid DESC",
            where_clause
        );

        let mut query_builder = sqlx::query_as::<_, DbShipment>(&query);

        for param in params {
            query_builder = query_builder.bind(param);
        }

        let shipments = query_builder.fetch_all(&self.pool).await?;

        Ok(shipments)
    }

    /// Get every shipment, newest first
    pub async fn all_shipments(&self) -> Result<Vec<DbShipment>> {
        self.query_shipments(&ShipmentFilters::default()).await
    }

    /// Get total number of shipments
    pub async fn shipment_count(&self) -> Result<i64> {
        let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM shipments")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Number of shipments per status, ordered by status name
    pub async fn count_by_status(&self) -> Result<Vec<(String, i64)>> {
        let counts = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM shipments GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    // ==================== UTILITY ====================

    /// Get database pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close database connection
    pub async fn close(self) {
        self.pool.close().await;
    }
}
