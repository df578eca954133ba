//! Data-file persistence for the airport graph.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::document::{AirportDocument, ExportOptions};
use crate::error::Result;
use crate::models::Airport;

/// Directory under the OS state directory holding the data file.
pub const APP_DIR: &str = "airfleet";

/// File name of the persisted airport document.
pub const DATA_FILE: &str = "airlines.json";

/// Loads and saves the airport document at a fixed path.
#[derive(Debug, Clone)]
pub struct DataStore {
    path: PathBuf,
}

impl DataStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default data file location under the user's state directory.
    ///
    /// Resolves to `$XDG_STATE_HOME/airfleet/airlines.json` (or the platform
    /// equivalent), falling back to the home directory and finally the
    /// current directory.
    pub fn default_path() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(DATA_FILE)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted airport, or the default one when nothing is saved.
    ///
    /// A missing file and an explicit `null` document both yield
    /// [`Airport::default`]; any other content must parse and satisfy the
    /// domain invariants.
    pub fn load(&self) -> Result<Airport> {
        if !self.path.exists() {
            debug!("no data file at {}, starting fresh", self.path.display());
            return Ok(Airport::default());
        }
        let content = fs::read_to_string(&self.path)?;
        let document: Option<AirportDocument> = serde_json::from_str(&content)?;
        match document {
            Some(document) => document.into_airport(),
            None => Ok(Airport::default()),
        }
    }

    /// Write `airport` to disk with the requested ordering.
    pub fn save(&self, airport: &Airport, opts: &ExportOptions) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let document = AirportDocument::from_airport(airport, opts);
        let serialised = serde_json::to_vec_pretty(&document)?;
        fs::write(&self.path, serialised)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{AirlineSort, AirportSort};
    use crate::models::{Airline, Airplane, Manufacturer, Status};
    use tempfile::tempdir;

    fn sample_airport() -> Airport {
        let mut airport = Airport::new("Hub", 3).unwrap();
        let mut airline = Airline::new("Nordic", 2).unwrap();
        let mut plane =
            Airplane::new("P1", "737", Manufacturer::new("Boeing", "USA"), 5.0, 500.0).unwrap();
        plane.fly(50.0).unwrap();
        airline.add_airplane(plane).unwrap();
        airport.add_airline(airline).unwrap();
        airport
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = DataStore::new(dir.path().join("nested").join("airlines.json"));

        store
            .save(&sample_airport(), &ExportOptions::default())
            .unwrap();
        assert!(store.path().exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded.name(), "Hub");
        assert_eq!(loaded.max_airlines(), 3);
        assert_eq!(loaded.status(), Status::Open);

        let plane = loaded
            .find_airline("Nordic")
            .unwrap()
            .find_airplane("P1")
            .unwrap();
        assert_eq!(plane.current_fuel(), 250.0);
        assert_eq!(plane.kilometers_flown(), 50.0);
    }

    #[test]
    fn missing_file_yields_the_default_airport() {
        let dir = tempdir().unwrap();
        let store = DataStore::new(dir.path().join("airlines.json"));

        let airport = store.load().unwrap();
        assert_eq!(airport.name(), "Global Airport");
        assert!(airport.airlines().is_empty());
    }

    #[test]
    fn null_document_yields_the_default_airport() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("airlines.json");
        fs::write(&path, "null").unwrap();

        let airport = DataStore::new(path).load().unwrap();
        assert_eq!(airport.name(), "Global Airport");
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("airlines.json");
        fs::write(&path, "{not json").unwrap();

        assert!(DataStore::new(path).load().is_err());
    }

    #[test]
    fn save_applies_the_requested_ordering() {
        let dir = tempdir().unwrap();
        let store = DataStore::new(dir.path().join("airlines.json"));

        let mut airport = Airport::new("Hub", 3).unwrap();
        for name in ["Zeta", "Alpha"] {
            airport.add_airline(Airline::new(name, 1).unwrap()).unwrap();
        }
        let opts = ExportOptions {
            airport: AirportSort::ByName,
            airline: AirlineSort::None,
        };
        store.save(&airport, &opts).unwrap();

        let loaded = store.load().unwrap();
        let names: Vec<&str> = loaded.airlines().iter().map(Airline::name).collect();
        assert_eq!(names, ["Alpha", "Zeta"]);
    }
}
