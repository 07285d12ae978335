//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Malformed slot '{0}': expected HH:MM-HH:MM")]
    MalformedSlot(String),

    #[error("Invalid business hours: start {start} must be before end {end} (end at most 24)")]
    InvalidBusinessHours { start: u32, end: u32 },

    #[error("Invalid extension hours for add-on '{addon_id}': {hours} (allowed 1-4)")]
    InvalidExtensionHours { addon_id: String, hours: u32 },

    #[error("Unknown package: {0}")]
    UnknownPackage(String),

    #[error("Unknown add-on: {0}")]
    UnknownAddon(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Booking draft incomplete: {0}")]
    IncompleteDraft(&'static str),

    #[error("Invalid customer details: {0}")]
    InvalidCustomer(String),

    #[error("Price overflow: {0}")]
    PriceOverflow(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
