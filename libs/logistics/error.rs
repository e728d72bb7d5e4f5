use crate::domain::{ConversionError, InvalidValue};
use shipment_db::DatabaseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogisticsError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unknown city '{city}'. Available cities: {}", .available.join(", "))]
    UnknownCity {
        city: String,
        available: Vec<&'static str>,
    },

    #[error(transparent)]
    InvalidValue(#[from] InvalidValue),

    #[error("Corrupt shipment record: {0}")]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type Result<T> = std::result::Result<T, LogisticsError>;
