#![warn(clippy::all, missing_docs)]

//! Core domain logic for the airfleet CLI.
//!
//! This crate hosts the airport/airline/airplane domain model, the
//! persisted document schema with its export sort orders, and the
//! data store used by the command-line frontend.

pub mod document;
pub mod error;
pub mod models;
pub mod store;

pub use document::{AirlineSort, AirportDocument, AirportSort, ExportOptions};
pub use error::{FleetError, Result};
pub use models::{Airline, Airplane, Airport, Manufacturer, Status};
pub use store::DataStore;
