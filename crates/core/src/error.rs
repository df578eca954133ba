//! Error types shared across the core crate.

use thiserror::Error;

/// Failures surfaced by domain operations and the data store.
#[derive(Debug, Error)]
pub enum FleetError {
    /// Malformed or out-of-range input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A container reached its fixed limit.
    #[error("{container} at capacity: {limit}")]
    CapacityExceeded {
        /// Which container hit the limit.
        container: &'static str,
        /// The fixed limit set at construction.
        limit: usize,
    },

    /// Lookup by id or name failed.
    #[error("{kind} not found: {name}")]
    NotFound {
        /// Which kind of entity was looked up.
        kind: &'static str,
        /// The id or name that matched nothing.
        name: String,
    },

    /// Structural mutation attempted while the airport is closed.
    #[error("airport is closed")]
    Closed,

    /// A flight would exhaust or exceed the remaining fuel.
    #[error("not enough fuel: need {needed:.1} L, have {available:.1} L")]
    InsufficientFuel {
        /// Fuel the flight would burn.
        needed: f64,
        /// Fuel left in the tank.
        available: f64,
    },

    /// Underlying file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FleetError>;
