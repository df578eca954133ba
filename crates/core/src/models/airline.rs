//! Airline: a capacity-bounded, insertion-ordered airplane fleet.

use std::fmt;

use crate::error::{FleetError, Result};

use super::airplane::Airplane;
use super::check_name;

/// A named airline holding at most `max_airplanes` airplanes.
#[derive(Debug, Clone)]
pub struct Airline {
    name: String,
    max_airplanes: usize,
    airplanes: Vec<Airplane>,
}

impl Airline {
    /// Create an empty airline with a fixed fleet capacity.
    pub fn new(name: impl Into<String>, max_airplanes: usize) -> Result<Self> {
        let name = name.into();
        check_name(&name)?;
        if max_airplanes == 0 {
            return Err(FleetError::InvalidArgument(
                "max airplanes must be positive".to_string(),
            ));
        }
        Ok(Self {
            name,
            max_airplanes,
            airplanes: Vec::new(),
        })
    }

    /// Append an airplane, preserving insertion order.
    pub fn add_airplane(&mut self, airplane: Airplane) -> Result<()> {
        if self.airplanes.len() >= self.max_airplanes {
            return Err(FleetError::CapacityExceeded {
                container: "airline",
                limit: self.max_airplanes,
            });
        }
        self.airplanes.push(airplane);
        Ok(())
    }

    /// Remove every airplane with the given id; absent ids are a no-op.
    pub fn remove_airplane(&mut self, id: &str) {
        self.airplanes.retain(|airplane| airplane.id() != id);
    }

    /// First airplane with the given id.
    pub fn find_airplane(&self, id: &str) -> Result<&Airplane> {
        self.airplanes
            .iter()
            .find(|airplane| airplane.id() == id)
            .ok_or_else(|| FleetError::NotFound {
                kind: "airplane",
                name: id.to_string(),
            })
    }

    /// Mutable variant of [`Airline::find_airplane`] for fly/refuel access.
    pub fn find_airplane_mut(&mut self, id: &str) -> Result<&mut Airplane> {
        self.airplanes
            .iter_mut()
            .find(|airplane| airplane.id() == id)
            .ok_or_else(|| FleetError::NotFound {
                kind: "airplane",
                name: id.to_string(),
            })
    }

    /// Rename the airline. Empty or whitespace-only names are rejected.
    pub fn update_name(&mut self, new_name: &str) -> Result<()> {
        check_name(new_name)?;
        self.name = new_name.to_string();
        Ok(())
    }

    /// An airline is operational while it has at least one airplane.
    pub fn is_operational(&self) -> bool {
        !self.airplanes.is_empty()
    }

    /// Read-only view of the fleet in insertion order.
    pub fn airplanes(&self) -> &[Airplane] {
        &self.airplanes
    }

    /// Airline name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fixed fleet capacity set at creation.
    pub fn max_airplanes(&self) -> usize {
        self.max_airplanes
    }
}

impl fmt::Display for Airline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Airline{{name='{}', airplanes={}/{}, operational={}}}",
            self.name,
            self.airplanes.len(),
            self.max_airplanes,
            self.is_operational()
        )
    }
}
