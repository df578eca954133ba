//! On-disk document schema and the export/import mapping.
//!
//! The persisted JSON mirrors the domain tree field by field. Import
//! rebuilds the graph through the domain constructors, so every bound is
//! re-validated on the way in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, Result};
use crate::models::{Airline, Airplane, Airport, Manufacturer, Status};

/// Airline ordering applied to the exported airport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AirportSort {
    /// Lexicographic by airline name.
    ByName,
    /// Preserve the in-memory order.
    #[default]
    None,
}

/// Airplane ordering applied independently within each exported airline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AirlineSort {
    /// By model string.
    ByName,
    /// By kilometers flown, ascending.
    ByKm,
    /// By fuel capacity, ascending.
    ByCapacity,
    /// By current fuel, ascending.
    ByFuel,
    /// Preserve the in-memory order.
    #[default]
    None,
}

impl FromStr for AirportSort {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "BY_NAME" => Ok(Self::ByName),
            "NONE" => Ok(Self::None),
            other => Err(FleetError::InvalidArgument(format!(
                "unknown airport sort: {other}"
            ))),
        }
    }
}

impl FromStr for AirlineSort {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "BY_NAME" => Ok(Self::ByName),
            "BY_KM" => Ok(Self::ByKm),
            "BY_CAPACITY" => Ok(Self::ByCapacity),
            "BY_FUEL" => Ok(Self::ByFuel),
            "NONE" => Ok(Self::None),
            other => Err(FleetError::InvalidArgument(format!(
                "unknown airline sort: {other}"
            ))),
        }
    }
}

impl fmt::Display for AirportSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByName => f.write_str("BY_NAME"),
            Self::None => f.write_str("NONE"),
        }
    }
}

impl fmt::Display for AirlineSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByName => f.write_str("BY_NAME"),
            Self::ByKm => f.write_str("BY_KM"),
            Self::ByCapacity => f.write_str("BY_CAPACITY"),
            Self::ByFuel => f.write_str("BY_FUEL"),
            Self::None => f.write_str("NONE"),
        }
    }
}

/// Sort configuration for one export. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Airline ordering at the airport level.
    pub airport: AirportSort,
    /// Airplane ordering within each airline.
    pub airline: AirlineSort,
}

/// Top-level persisted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportDocument {
    name: String,
    max_airlines: usize,
    #[serde(default)]
    status: Status,
    #[serde(default)]
    airlines: Vec<AirlineRecord>,
}

// Unknown extra fields in a record are ignored by serde, which keeps the
// schema forward compatible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AirlineRecord {
    name: String,
    max_airplanes: usize,
    #[serde(default)]
    operational: bool,
    #[serde(default)]
    airplanes: Vec<AirplaneRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AirplaneRecord {
    id: String,
    model: String,
    manufacturer: ManufacturerRecord,
    fuel_for_kilometer: f64,
    fuel_capacity: f64,
    current_fuel: f64,
    kilometers_flown: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ManufacturerRecord {
    name: String,
    country: String,
}

impl AirportDocument {
    /// Build the persisted form of `airport` with the requested ordering.
    ///
    /// The source airport is left untouched; sorting happens on the records.
    pub fn from_airport(airport: &Airport, opts: &ExportOptions) -> Self {
        let mut airlines: Vec<AirlineRecord> = airport
            .airlines()
            .iter()
            .map(|airline| AirlineRecord::from_airline(airline, opts.airline))
            .collect();
        if opts.airport == AirportSort::ByName {
            airlines.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Self {
            name: airport.name().to_string(),
            max_airlines: airport.max_airlines(),
            status: airport.status(),
            airlines,
        }
    }

    /// Rebuild the domain graph, re-validating every bound on the way in.
    pub fn into_airport(self) -> Result<Airport> {
        let mut airport = Airport::new(self.name, self.max_airlines)?;
        for record in self.airlines {
            airport.add_airline(record.into_airline()?)?;
        }
        // Applied after the airlines are attached so a CLOSED document does
        // not trip the structural-mutation gate.
        airport.set_status(self.status);
        Ok(airport)
    }
}

impl AirlineRecord {
    fn from_airline(airline: &Airline, sort: AirlineSort) -> Self {
        let mut airplanes: Vec<&Airplane> = airline.airplanes().iter().collect();
        // Vec::sort_by is stable: ties keep their in-memory order.
        match sort {
            AirlineSort::ByName => airplanes.sort_by(|a, b| a.model().cmp(b.model())),
            AirlineSort::ByKm => {
                airplanes.sort_by(|a, b| a.kilometers_flown().total_cmp(&b.kilometers_flown()));
            }
            AirlineSort::ByCapacity => {
                airplanes.sort_by(|a, b| a.fuel_capacity().total_cmp(&b.fuel_capacity()));
            }
            AirlineSort::ByFuel => {
                airplanes.sort_by(|a, b| a.current_fuel().total_cmp(&b.current_fuel()));
            }
            AirlineSort::None => {}
        }
        Self {
            name: airline.name().to_string(),
            max_airplanes: airline.max_airplanes(),
            operational: airline.is_operational(),
            airplanes: airplanes
                .into_iter()
                .map(AirplaneRecord::from_airplane)
                .collect(),
        }
    }

    fn into_airline(self) -> Result<Airline> {
        // The persisted `operational` flag is derived state; it is ignored
        // here and re-derived from the rebuilt fleet.
        let mut airline = Airline::new(self.name, self.max_airplanes)?;
        for record in self.airplanes {
            airline.add_airplane(record.into_airplane()?)?;
        }
        Ok(airline)
    }
}

impl AirplaneRecord {
    fn from_airplane(airplane: &Airplane) -> Self {
        Self {
            id: airplane.id().to_string(),
            model: airplane.model().to_string(),
            manufacturer: ManufacturerRecord {
                name: airplane.manufacturer().name().to_string(),
                country: airplane.manufacturer().country().to_string(),
            },
            fuel_for_kilometer: airplane.fuel_per_km(),
            fuel_capacity: airplane.fuel_capacity(),
            current_fuel: airplane.current_fuel(),
            kilometers_flown: airplane.kilometers_flown(),
        }
    }

    fn into_airplane(self) -> Result<Airplane> {
        Airplane::with_state(
            self.id,
            self.model,
            Manufacturer::new(self.manufacturer.name, self.manufacturer.country),
            self.fuel_for_kilometer,
            self.fuel_capacity,
            self.current_fuel,
            self.kilometers_flown,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plane(id: &str, model: &str, km: f64, capacity: f64, fuel: f64) -> Airplane {
        Airplane::with_state(
            id,
            model,
            Manufacturer::new("Boeing", "USA"),
            5.0,
            capacity,
            fuel,
            km,
        )
        .unwrap()
    }

    fn sample_airport() -> Airport {
        let mut airport = Airport::new("Test Airport", 2).unwrap();
        let mut airline = Airline::new("Test Airline", 2).unwrap();
        airline
            .add_airplane(Airplane::new("A123", "737", Manufacturer::new("Boeing", "USA"), 5.0, 500.0).unwrap())
            .unwrap();
        airport.add_airline(airline).unwrap();
        airport
    }

    #[test]
    fn export_captures_every_field() {
        let doc = AirportDocument::from_airport(&sample_airport(), &ExportOptions::default());
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["name"], "Test Airport");
        assert_eq!(value["maxAirlines"], 2);
        assert_eq!(value["status"], "OPEN");

        let airline = &value["airlines"][0];
        assert_eq!(airline["name"], "Test Airline");
        assert_eq!(airline["maxAirplanes"], 2);
        assert_eq!(airline["operational"], true);

        let airplane = &airline["airplanes"][0];
        assert_eq!(airplane["id"], "A123");
        assert_eq!(airplane["model"], "737");
        assert_eq!(airplane["manufacturer"], json!({"name": "Boeing", "country": "USA"}));
        assert_eq!(airplane["fuelForKilometer"], 5.0);
        assert_eq!(airplane["fuelCapacity"], 500.0);
        assert_eq!(airplane["currentFuel"], 500.0);
        assert_eq!(airplane["kilometersFlown"], 0.0);
    }

    #[test]
    fn export_does_not_mutate_the_source() {
        let mut airport = Airport::new("Hub", 2).unwrap();
        let mut airline = Airline::new("Nordic", 3).unwrap();
        for id in ["C3", "A1", "B2"] {
            airline.add_airplane(plane(id, id, 0.0, 500.0, 500.0)).unwrap();
        }
        airport.add_airline(airline).unwrap();

        let opts = ExportOptions {
            airport: AirportSort::ByName,
            airline: AirlineSort::ByName,
        };
        let _ = AirportDocument::from_airport(&airport, &opts);

        let ids: Vec<&str> = airport.airlines()[0]
            .airplanes()
            .iter()
            .map(Airplane::id)
            .collect();
        assert_eq!(ids, ["C3", "A1", "B2"]);
    }

    #[test]
    fn airport_sort_by_name_orders_airlines() {
        let mut airport = Airport::new("Hub", 3).unwrap();
        for name in ["Zeta", "Alpha", "Mid"] {
            airport.add_airline(Airline::new(name, 1).unwrap()).unwrap();
        }

        let opts = ExportOptions {
            airport: AirportSort::ByName,
            airline: AirlineSort::None,
        };
        let doc = AirportDocument::from_airport(&airport, &opts);
        let names: Vec<&str> = doc.airlines.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Mid", "Zeta"]);

        let unsorted = AirportDocument::from_airport(&airport, &ExportOptions::default());
        let names: Vec<&str> = unsorted.airlines.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn airline_sort_by_km_is_ascending_and_stable() {
        let mut airport = Airport::new("Hub", 1).unwrap();
        let mut airline = Airline::new("Nordic", 4).unwrap();
        airline.add_airplane(plane("P1", "737", 300.0, 500.0, 500.0)).unwrap();
        airline.add_airplane(plane("P2", "747", 100.0, 500.0, 500.0)).unwrap();
        // P3 ties with P2 on distance and must stay behind it.
        airline.add_airplane(plane("P3", "757", 100.0, 500.0, 500.0)).unwrap();
        airline.add_airplane(plane("P4", "767", 200.0, 500.0, 500.0)).unwrap();
        airport.add_airline(airline).unwrap();

        let opts = ExportOptions {
            airport: AirportSort::None,
            airline: AirlineSort::ByKm,
        };
        let doc = AirportDocument::from_airport(&airport, &opts);
        let ids: Vec<&str> = doc.airlines[0]
            .airplanes
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["P2", "P3", "P4", "P1"]);
    }

    #[test]
    fn airline_sorts_by_capacity_fuel_and_model() {
        let mut airport = Airport::new("Hub", 1).unwrap();
        let mut airline = Airline::new("Nordic", 3).unwrap();
        airline.add_airplane(plane("P1", "757", 0.0, 900.0, 100.0)).unwrap();
        airline.add_airplane(plane("P2", "737", 0.0, 700.0, 300.0)).unwrap();
        airline.add_airplane(plane("P3", "747", 0.0, 800.0, 200.0)).unwrap();
        airport.add_airline(airline).unwrap();

        let by = |sort: AirlineSort| -> Vec<String> {
            let opts = ExportOptions {
                airport: AirportSort::None,
                airline: sort,
            };
            AirportDocument::from_airport(&airport, &opts).airlines[0]
                .airplanes
                .iter()
                .map(|p| p.id.clone())
                .collect()
        };

        assert_eq!(by(AirlineSort::ByCapacity), ["P2", "P3", "P1"]);
        assert_eq!(by(AirlineSort::ByFuel), ["P1", "P3", "P2"]);
        assert_eq!(by(AirlineSort::ByName), ["P2", "P3", "P1"]);
        assert_eq!(by(AirlineSort::None), ["P1", "P2", "P3"]);
    }

    #[test]
    fn round_trip_preserves_fields_and_order() {
        let mut airport = Airport::new("Hub", 3).unwrap();
        let mut airline = Airline::new("Nordic", 2).unwrap();
        let mut flown = plane("P1", "737", 0.0, 500.0, 500.0);
        flown.fly(50.0).unwrap();
        airline.add_airplane(flown).unwrap();
        airline.add_airplane(plane("P2", "747", 0.0, 600.0, 600.0)).unwrap();
        airport.add_airline(airline).unwrap();
        airport.toggle_status();

        let doc = AirportDocument::from_airport(&airport, &ExportOptions::default());
        let rebuilt = serde_json::from_str::<AirportDocument>(
            &serde_json::to_string(&doc).unwrap(),
        )
        .unwrap()
        .into_airport()
        .unwrap();

        assert_eq!(rebuilt.name(), "Hub");
        assert_eq!(rebuilt.max_airlines(), 3);
        assert_eq!(rebuilt.status(), Status::Closed);

        let airline = rebuilt.find_airline("Nordic").unwrap();
        assert_eq!(airline.max_airplanes(), 2);
        let ids: Vec<&str> = airline.airplanes().iter().map(Airplane::id).collect();
        assert_eq!(ids, ["P1", "P2"]);

        let p1 = airline.find_airplane("P1").unwrap();
        assert_eq!(p1.current_fuel(), 250.0);
        assert_eq!(p1.kilometers_flown(), 50.0);
        assert_eq!(p1.manufacturer().country(), "USA");
    }

    #[test]
    fn import_defaults_missing_status_to_open() {
        let doc: AirportDocument =
            serde_json::from_str(r#"{"name": "Hub", "maxAirlines": 3}"#).unwrap();
        let airport = doc.into_airport().unwrap();
        assert_eq!(airport.status(), Status::Open);
        assert!(airport.airlines().is_empty());
    }

    #[test]
    fn import_ignores_unknown_airline_fields() {
        let json = r#"{
            "name": "Hub",
            "maxAirlines": 3,
            "status": "OPEN",
            "airlines": [
                {"name": "Nordic", "maxAirplanes": 2, "operational": false,
                 "fleetValue": 123, "airplanes": []}
            ]
        }"#;
        let airport = serde_json::from_str::<AirportDocument>(json)
            .unwrap()
            .into_airport()
            .unwrap();
        assert_eq!(airport.find_airline("Nordic").unwrap().max_airplanes(), 2);
    }

    #[test]
    fn import_rejects_out_of_range_airplanes() {
        let json = r#"{
            "name": "Hub",
            "maxAirlines": 3,
            "airlines": [
                {"name": "Nordic", "maxAirplanes": 2, "airplanes": [
                    {"id": "P1", "model": "737",
                     "manufacturer": {"name": "Boeing", "country": "USA"},
                     "fuelForKilometer": 5.0, "fuelCapacity": 500.0,
                     "currentFuel": 900.0, "kilometersFlown": 0.0}
                ]}
            ]
        }"#;
        let err = serde_json::from_str::<AirportDocument>(json)
            .unwrap()
            .into_airport()
            .unwrap_err();
        assert!(matches!(err, FleetError::InvalidArgument(_)));
    }

    #[test]
    fn import_rejects_overfull_containers() {
        let json = r#"{
            "name": "Hub",
            "maxAirlines": 1,
            "airlines": [
                {"name": "One", "maxAirplanes": 1, "airplanes": []},
                {"name": "Two", "maxAirplanes": 1, "airplanes": []}
            ]
        }"#;
        let err = serde_json::from_str::<AirportDocument>(json)
            .unwrap()
            .into_airport()
            .unwrap_err();
        assert!(matches!(err, FleetError::CapacityExceeded { .. }));
    }

    #[test]
    fn sort_options_parse_case_insensitively() {
        assert_eq!("by_name".parse::<AirportSort>().unwrap(), AirportSort::ByName);
        assert_eq!("NONE".parse::<AirportSort>().unwrap(), AirportSort::None);
        assert_eq!("By_Km".parse::<AirlineSort>().unwrap(), AirlineSort::ByKm);
        assert_eq!("by_capacity".parse::<AirlineSort>().unwrap(), AirlineSort::ByCapacity);
        assert_eq!("BY_FUEL".parse::<AirlineSort>().unwrap(), AirlineSort::ByFuel);
        assert!("sideways".parse::<AirlineSort>().is_err());
        assert!("by_km".parse::<AirportSort>().is_err());
    }
}
