use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Database representation of a shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DbShipment {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub weight_kg: f64,
    pub priority: String,
    pub status: String,
    pub eta: Option<String>, // RFC 3339
    pub carrier: Option<String>,
    pub tracking_id: Option<String>,
    pub created_at: String,           // RFC 3339
    pub updated_at: String,           // RFC 3339
    pub delivered_at: Option<String>, // RFC 3339
}

fn parse_utc(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

impl DbShipment {
    pub fn created_datetime(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        parse_utc(&self.created_at)
    }

    pub fn updated_datetime(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        parse_utc(&self.updated_at)
    }

    pub fn eta_datetime(&self) -> Option<Result<DateTime<Utc>, chrono::ParseError>> {
        self.eta.as_deref().map(parse_utc)
    }

    pub fn delivered_datetime(&self) -> Option<Result<DateTime<Utc>, chrono::ParseError>> {
        self.delivered_at.as_deref().map(parse_utc)
    }
}

/// Filters for querying shipments
#[derive(Debug, Clone, Default)]
pub struct ShipmentFilters {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub carrier: Option<String>,
}

impl ShipmentFilters {
    /// Build SQL WHERE clause and its positional parameters
    pub fn build_where_clause(&self) -> (String, Vec<String>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(status) = &self.status {
            conditions.push("status = ?");
            params.push(status.clone());
        }

        if let Some(priority) = &self.priority {
            conditions.push("priority = ?");
            params.push(priority.clone());
        }

        if let Some(carrier) = &self.carrier {
            conditions.push("carrier = ?");
            params.push(carrier.clone());
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!("WHERE {}", conditions.join(" AND ")), params)
        }
    }
}
