//! Airport: the root aggregate, gating structural mutation by status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, Result};

use super::airline::Airline;
use super::check_name;

/// Open/closed state of an airport.
///
/// The only public transition is [`Airport::toggle_status`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Structural mutation is allowed.
    #[default]
    Open,
    /// Adding or removing airlines is rejected.
    Closed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Open => f.write_str("OPEN"),
            Status::Closed => f.write_str("CLOSED"),
        }
    }
}

/// The airport owning a capacity-bounded collection of airlines.
#[derive(Debug, Clone)]
pub struct Airport {
    name: String,
    max_airlines: usize,
    airlines: Vec<Airline>,
    status: Status,
}

impl Airport {
    /// Create an open, empty airport with a fixed airline capacity.
    pub fn new(name: impl Into<String>, max_airlines: usize) -> Result<Self> {
        let name = name.into();
        check_name(&name)?;
        if max_airlines == 0 {
            return Err(FleetError::InvalidArgument(
                "max airlines must be positive".to_string(),
            ));
        }
        Ok(Self {
            name,
            max_airlines,
            airlines: Vec::new(),
            status: Status::Open,
        })
    }

    fn check_open(&self) -> Result<()> {
        match self.status {
            Status::Open => Ok(()),
            Status::Closed => Err(FleetError::Closed),
        }
    }

    /// Append an airline. Fails while closed or at capacity.
    pub fn add_airline(&mut self, airline: Airline) -> Result<()> {
        self.check_open()?;
        if self.airlines.len() >= self.max_airlines {
            return Err(FleetError::CapacityExceeded {
                container: "airport",
                limit: self.max_airlines,
            });
        }
        self.airlines.push(airline);
        Ok(())
    }

    /// Remove every airline with the given name; absent names are a no-op.
    ///
    /// Still gated by the open/closed status.
    pub fn remove_airline(&mut self, name: &str) -> Result<()> {
        self.check_open()?;
        self.airlines.retain(|airline| airline.name() != name);
        Ok(())
    }

    /// First airline with the given name.
    pub fn find_airline(&self, name: &str) -> Result<&Airline> {
        self.airlines
            .iter()
            .find(|airline| airline.name() == name)
            .ok_or_else(|| FleetError::NotFound {
                kind: "airline",
                name: name.to_string(),
            })
    }

    /// Mutable variant of [`Airport::find_airline`].
    pub fn find_airline_mut(&mut self, name: &str) -> Result<&mut Airline> {
        self.airlines
            .iter_mut()
            .find(|airline| airline.name() == name)
            .ok_or_else(|| FleetError::NotFound {
                kind: "airline",
                name: name.to_string(),
            })
    }

    /// Rename the airport. Allowed even while closed.
    pub fn update_name(&mut self, new_name: &str) -> Result<()> {
        check_name(new_name)?;
        self.name = new_name.to_string();
        Ok(())
    }

    /// Flip between open and closed, unconditionally.
    pub fn toggle_status(&mut self) {
        self.status = match self.status {
            Status::Open => Status::Closed,
            Status::Closed => Status::Open,
        };
    }

    // Import support: restore a persisted status without routing graph
    // reconstruction through the structural-mutation gate.
    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Current open/closed status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Read-only view of the airlines in insertion order.
    pub fn airlines(&self) -> &[Airline] {
        &self.airlines
    }

    /// Airport name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fixed airline capacity set at creation.
    pub fn max_airlines(&self) -> usize {
        self.max_airlines
    }
}

impl Default for Airport {
    /// The airport used before any data has been saved.
    fn default() -> Self {
        Self {
            name: "Global Airport".to_string(),
            max_airlines: 10,
            airlines: Vec::new(),
            status: Status::Open,
        }
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Airport{{name='{}', airlines={}/{}, status={}}}",
            self.name,
            self.airlines.len(),
            self.max_airlines,
            self.status
        )
    }
}
