//! Airplane and manufacturer domain types.

use std::fmt;

use crate::error::{FleetError, Result};

/// Immutable maker description attached to an airplane.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Manufacturer {
    name: String,
    country: String,
}

impl Manufacturer {
    /// Create a manufacturer from its name and country of origin.
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
        }
    }

    /// Manufacturer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Country of origin.
    pub fn country(&self) -> &str {
        &self.country
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.country)
    }
}

/// A single airplane with fixed fuel characteristics and mutable flight state.
///
/// `0 <= current_fuel <= fuel_capacity` holds after every operation, and
/// `kilometers_flown` never decreases.
#[derive(Debug, Clone)]
pub struct Airplane {
    id: String,
    model: String,
    manufacturer: Manufacturer,
    fuel_per_km: f64,
    fuel_capacity: f64,
    current_fuel: f64,
    kilometers_flown: f64,
}

impl Airplane {
    /// Create an airplane with a full tank and no distance flown.
    pub fn new(
        id: impl Into<String>,
        model: impl Into<String>,
        manufacturer: Manufacturer,
        fuel_per_km: f64,
        fuel_capacity: f64,
    ) -> Result<Self> {
        Self::with_state(
            id,
            model,
            manufacturer,
            fuel_per_km,
            fuel_capacity,
            fuel_capacity,
            0.0,
        )
    }

    /// Restore an airplane from an explicit fuel/distance snapshot.
    ///
    /// The snapshot must satisfy the same bounds the live object maintains.
    pub fn with_state(
        id: impl Into<String>,
        model: impl Into<String>,
        manufacturer: Manufacturer,
        fuel_per_km: f64,
        fuel_capacity: f64,
        current_fuel: f64,
        kilometers_flown: f64,
    ) -> Result<Self> {
        if fuel_per_km.is_nan() || fuel_per_km <= 0.0 {
            return Err(FleetError::InvalidArgument(
                "fuel per kilometer must be positive".to_string(),
            ));
        }
        if fuel_capacity.is_nan() || fuel_capacity <= 0.0 {
            return Err(FleetError::InvalidArgument(
                "fuel capacity must be positive".to_string(),
            ));
        }
        if !(0.0..=fuel_capacity).contains(&current_fuel) {
            return Err(FleetError::InvalidArgument(
                "current fuel must be between 0 and capacity".to_string(),
            ));
        }
        if kilometers_flown.is_nan() || kilometers_flown < 0.0 {
            return Err(FleetError::InvalidArgument(
                "kilometers flown cannot be negative".to_string(),
            ));
        }
        Ok(Self {
            id: id.into(),
            model: model.into(),
            manufacturer,
            fuel_per_km,
            fuel_capacity,
            current_fuel,
            kilometers_flown,
        })
    }

    /// Fuel required to cover `kilometers`. Pure, no side effect.
    pub fn fuel_needed(&self, kilometers: f64) -> f64 {
        kilometers * self.fuel_per_km
    }

    /// Fly `kilometers`, burning fuel and recording the distance.
    ///
    /// A flight needing at least the remaining fuel is rejected, so a plane
    /// never lands on an empty tank. Nothing changes on failure.
    pub fn fly(&mut self, kilometers: f64) -> Result<()> {
        if kilometers.is_nan() || kilometers < 0.0 {
            return Err(FleetError::InvalidArgument(
                "kilometers cannot be negative".to_string(),
            ));
        }
        let needed = self.fuel_needed(kilometers);
        if needed >= self.current_fuel {
            return Err(FleetError::InsufficientFuel {
                needed,
                available: self.current_fuel,
            });
        }
        self.current_fuel -= needed;
        self.kilometers_flown += kilometers;
        Ok(())
    }

    /// Add `amount` litres of fuel, clamping at capacity.
    ///
    /// Excess fuel is silently discarded; a negative amount is rejected.
    pub fn refuel(&mut self, amount: f64) -> Result<()> {
        if amount.is_nan() || amount < 0.0 {
            return Err(FleetError::InvalidArgument(
                "refuel amount cannot be negative".to_string(),
            ));
        }
        self.current_fuel = (self.current_fuel + amount).min(self.fuel_capacity);
        Ok(())
    }

    /// Identifier, unique within the owning airline.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Model designation.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The airplane's maker.
    pub fn manufacturer(&self) -> &Manufacturer {
        &self.manufacturer
    }

    /// Fuel burned per kilometer, in litres.
    pub fn fuel_per_km(&self) -> f64 {
        self.fuel_per_km
    }

    /// Tank capacity in litres.
    pub fn fuel_capacity(&self) -> f64 {
        self.fuel_capacity
    }

    /// Fuel currently in the tank.
    pub fn current_fuel(&self) -> f64 {
        self.current_fuel
    }

    /// Total distance flown so far.
    pub fn kilometers_flown(&self) -> f64 {
        self.kilometers_flown
    }
}

// Mutable fuel/distance state is excluded: a stored snapshot compares equal
// to its live counterpart mid-flight.
impl PartialEq for Airplane {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.model == other.model
            && self.manufacturer == other.manufacturer
            && self.fuel_per_km == other.fuel_per_km
            && self.fuel_capacity == other.fuel_capacity
    }
}

impl fmt::Display for Airplane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Airplane{{id='{}', model='{}', manufacturer={}, fuel={:.1}/{:.1}L, km={:.1}}}",
            self.id,
            self.model,
            self.manufacturer.name(),
            self.current_fuel,
            self.fuel_capacity,
            self.kilometers_flown
        )
    }
}
