use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid party: {0}")]
    InvalidParty(String),
    #[error("Invalid transition for booking {booking}: {from} -> {to}")]
    InvalidTransition {
        booking: u32,
        from: crate::domain::booking::BookingStatus,
        to: crate::domain::booking::BookingStatus,
    },
    #[error("Stylist cancellation of booking {0} requires an admin override")]
    AdminOverrideRequired(u32),
    #[error("Event for booking {booking} is missing field `{field}`")]
    MissingField { booking: u32, field: &'static str },
    #[error("Invalid policy configuration: {0}")]
    InvalidConfig(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, PolicyError>;
