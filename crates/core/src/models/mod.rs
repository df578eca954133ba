//! Domain model: the airport -> airline -> airplane ownership tree.

mod airline;
mod airplane;
mod airport;

pub use airline::Airline;
pub use airplane::{Airplane, Manufacturer};
pub use airport::{Airport, Status};

use crate::error::{FleetError, Result};

/// Shared non-empty check for airline and airport names.
pub(crate) fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(FleetError::InvalidArgument(
            "name cannot be empty".to_string(),
        ));
    }
    Ok(())
}
