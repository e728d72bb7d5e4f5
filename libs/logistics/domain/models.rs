use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shipment_db::DbShipment;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A text value that does not name any variant of a domain enum
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {kind} '{value}'. Must be one of: {}", .expected.join(", "))]
pub struct InvalidValue {
    pub kind: &'static str,
    pub value: String,
    pub expected: Vec<&'static str>,
}

impl InvalidValue {
    fn new(kind: &'static str, value: &str, expected: &[&'static str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.to_vec(),
        }
    }
}

/// Shipment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    PickedUp,
    InTransit,
    OutForDelivery,
    Delivered,
    Exception,
}

impl ShipmentStatus {
    pub const ALL: [ShipmentStatus; 6] = [
        ShipmentStatus::Pending,
        ShipmentStatus::PickedUp,
        ShipmentStatus::InTransit,
        ShipmentStatus::OutForDelivery,
        ShipmentStatus::Delivered,
        ShipmentStatus::Exception,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "pending",
            ShipmentStatus::PickedUp => "picked_up",
            ShipmentStatus::InTransit => "in_transit",
            ShipmentStatus::OutForDelivery => "out_for_delivery",
            ShipmentStatus::Delivered => "delivered",
            ShipmentStatus::Exception => "exception",
        }
    }

    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidValue::new("status", s, &Self::names()))
    }
}

/// Delivery priority
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Standard,
    Express,
    Overnight,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Standard, Priority::Express, Priority::Overnight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Standard => "standard",
            Priority::Express => "express",
            Priority::Overnight => "overnight",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|p| p.as_str()).collect();
                InvalidValue::new("priority", s, &names)
            })
    }
}

/// Supported carriers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Carrier {
    Fedex,
    Ups,
    Usps,
    Dhl,
    BlackroadExpress,
}

impl Carrier {
    pub const ALL: [Carrier; 5] = [
        Carrier::Fedex,
        Carrier::Ups,
        Carrier::Usps,
        Carrier::Dhl,
        Carrier::BlackroadExpress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Carrier::Fedex => "fedex",
            Carrier::Ups => "ups",
            Carrier::Usps => "usps",
            Carrier::Dhl => "dhl",
            Carrier::BlackroadExpress => "blackroad-express",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Carrier {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|carrier| carrier.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|c| c.as_str()).collect();
                InvalidValue::new("carrier", s, &names)
            })
    }
}

/// A stored row that cannot be turned into a [`Shipment`]
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error(transparent)]
    InvalidValue(#[from] InvalidValue),

    #[error("Invalid timestamp in field '{field}': {source}")]
    InvalidTimestamp {
        field: &'static str,
        #[source]
        source: chrono::ParseError,
    },
}

/// A shipment as the rest of the planner sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub weight_kg: f64,
    pub priority: Priority,
    pub status: ShipmentStatus,
    pub eta: Option<DateTime<Utc>>,
    pub carrier: Option<Carrier>,
    pub tracking_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl Shipment {
    /// A fresh `pending` shipment created at `now`
    pub fn new(
        id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        weight_kg: f64,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            origin: origin.into(),
            destination: destination.into(),
            weight_kg,
            priority,
            status: ShipmentStatus::Pending,
            eta: None,
            carrier: None,
            tracking_id: None,
            created_at: now,
            updated_at: now,
            delivered_at: None,
        }
    }

    /// Lane key used to group shipments travelling the same way
    pub fn lane(&self) -> String {
        format!("{}->{}", self.origin, self.destination)
    }

    pub fn is_delivered(&self) -> bool {
        self.status == ShipmentStatus::Delivered
    }

    pub fn to_db(&self) -> DbShipment {
        DbShipment {
            id: self.id.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            weight_kg: self.weight_kg,
            priority: self.priority.to_string(),
            status: self.status.to_string(),
            eta: self.eta.map(|t| t.to_rfc3339()),
            carrier: self.carrier.map(|c| c.to_string()),
            tracking_id: self.tracking_id.clone(),
            created_at: self.created_at.to_rfc3339(),
            updated_at: self.updated_at.to_rfc3339(),
            delivered_at: self.delivered_at.map(|t| t.to_rfc3339()),
        }
    }
}

fn timestamp(
    field: &'static str,
    value: Result<DateTime<Utc>, chrono::ParseError>,
) -> Result<DateTime<Utc>, ConversionError> {
    value.map_err(|source| ConversionError::InvalidTimestamp { field, source })
}

impl TryFrom<DbShipment> for Shipment {
    type Error = ConversionError;

    fn try_from(row: DbShipment) -> Result<Self, Self::Error> {
        let created_at = timestamp("created_at", row.created_datetime())?;
        let updated_at = timestamp("updated_at", row.updated_datetime())?;
        let eta = row.eta_datetime().map(|t| timestamp("eta", t)).transpose()?;
        let delivered_at = row
            .delivered_datetime()
            .map(|t| timestamp("delivered_at", t))
            .transpose()?;
        let carrier = row.carrier.as_deref().map(Carrier::from_str).transpose()?;

        Ok(Self {
            priority: row.priority.parse()?,
            status: row.status.parse()?,
            id: row.id,
            origin: row.origin,
            destination: row.destination,
            weight_kg: row.weight_kg,
            eta,
            carrier,
            tracking_id: row.tracking_id,
            created_at,
            updated_at,
            delivered_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_forms() {
        for status in ShipmentStatus::ALL {
            assert_eq!(status.as_str().parse::<ShipmentStatus>().unwrap(), status);
        }
        assert_eq!(ShipmentStatus::OutForDelivery.to_string(), "out_for_delivery");
    }

    #[test]
    fn test_invalid_priority_lists_choices() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid priority 'urgent'. Must be one of: standard, express, overnight"
        );
    }

    #[test]
    fn test_carrier_uses_kebab_case() {
        assert_eq!(
            "blackroad-express".parse::<Carrier>().unwrap(),
            Carrier::BlackroadExpress
        );
        assert_eq!(
            serde_json::to_string(&Carrier::BlackroadExpress).unwrap(),
            "\"blackroad-express\""
        );
        assert!("BlackRoad".parse::<Carrier>().is_err());
    }

    #[test]
    fn test_default_priority_is_standard() {
        assert_eq!(Priority::default(), Priority::Standard);
    }

    #[test]
    fn test_db_conversion() {
        let now = Utc::now();
        let mut shipment = Shipment::new("abc12345", "NYC", "LAX", 10.0, Priority::Express, now);
        shipment.carrier = Some(Carrier::Dhl);
        shipment.eta = Some(now + chrono::Duration::days(2));

        let row = shipment.to_db();
        assert_eq!(row.priority, "express");
        assert_eq!(row.carrier.as_deref(), Some("dhl"));

        let back = Shipment::try_from(row).unwrap();
        assert_eq!(back.carrier, Some(Carrier::Dhl));
        assert_eq!(back.status, ShipmentStatus::Pending);
        assert_eq!(back.lane(), "NYC->LAX");
    }

    #[test]
    fn test_bad_row_is_rejected() {
        let now = Utc::now();
        let mut row = Shipment::new("bad00001", "NYC", "LAX", 1.0, Priority::Standard, now).to_db();
        row.status = "lost".to_string();
        assert!(matches!(
            Shipment::try_from(row.clone()),
            Err(ConversionError::InvalidValue(_))
        ));

        row.status = "pending".to_string();
        row.created_at = "yesterday".to_string();
        assert!(matches!(
            Shipment::try_from(row),
            Err(ConversionError::InvalidTimestamp { field: "created_at", .. })
        ));
    }
}
