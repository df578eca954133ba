//! Command definitions and dispatch for the airfleet binary.
//!
//! The same clap grammar serves one-shot argv invocations and interactive
//! REPL lines; every mutating command persists the airport before reporting
//! success.

use clap::{Parser, Subcommand};

use airfleet_core::{
    Airline, Airplane, Airport, DataStore, ExportOptions, FleetError, Manufacturer, Status,
};

/// Command grammar shared by one-shot argv and REPL lines.
#[derive(Debug, Parser)]
#[command(
    name = "airfleet",
    about = "Airport fleet management CLI",
    after_help = "Data is automatically saved after each operation and loaded on start."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new airport, replacing the current one
    New {
        /// Airport name
        name: String,
        /// Maximum number of airlines
        max_airlines: usize,
    },
    /// Rename the airport or an airline, or toggle the airport status
    #[command(subcommand)]
    Update(UpdateCommand),
    /// Add an airline or an airplane
    #[command(subcommand)]
    Add(AddCommand),
    /// Remove an airline or an airplane
    #[command(subcommand)]
    Remove(RemoveCommand),
    /// Show details for an airline or an airplane
    #[command(subcommand)]
    Info(InfoCommand),
    /// Refuel an airplane, to a full tank when no amount is given
    Refuel {
        /// Airline owning the airplane
        airline: String,
        /// Airplane id
        id: String,
        /// Litres to add; omit to fill the tank
        amount: Option<f64>,
    },
    /// Fly an airplane a number of kilometers
    Fly {
        /// Airline owning the airplane
        airline: String,
        /// Airplane id
        id: String,
        /// Distance in kilometers
        kilometers: f64,
    },
    /// List airlines, or the airplanes of one airline
    List {
        /// Airline to list; omit for the whole airport
        airline: Option<String>,
    },
    /// Save with explicit sort orders
    Export {
        /// Airline ordering: BY_NAME or NONE
        airport_sort: String,
        /// Airplane ordering: BY_NAME, BY_KM, BY_CAPACITY, BY_FUEL or NONE
        airline_sort: String,
    },
}

#[derive(Debug, Subcommand)]
enum UpdateCommand {
    /// Rename the airport
    Airport {
        /// New airport name
        new_name: String,
    },
    /// Toggle the airport open/closed
    Status,
    /// Rename an airline
    Airline {
        /// Current airline name
        old_name: String,
        /// New airline name
        new_name: String,
    },
}

#[derive(Debug, Subcommand)]
enum AddCommand {
    /// Add an airline with a fleet capacity
    Airline {
        /// Airline name
        name: String,
        /// Maximum number of airplanes
        max_airplanes: usize,
    },
    /// Add an airplane with a full tank to an airline
    Airplane {
        /// Airline to add to
        airline: String,
        /// Airplane id
        id: String,
        /// Model designation
        model: String,
        /// Manufacturer name
        manufacturer: String,
        /// Manufacturer country
        country: String,
        /// Fuel burned per kilometer, in litres
        fuel_per_km: f64,
        /// Tank capacity in litres
        capacity: f64,
    },
}

#[derive(Debug, Subcommand)]
enum RemoveCommand {
    /// Remove an airline by name
    Airline {
        /// Airline name
        name: String,
    },
    /// Remove an airplane by id
    Airplane {
        /// Airline owning the airplane
        airline: String,
        /// Airplane id
        id: String,
    },
}

#[derive(Debug, Subcommand)]
enum InfoCommand {
    /// Show one airline
    Airline {
        /// Airline name
        name: String,
    },
    /// Show one airplane
    Airplane {
        /// Airline owning the airplane
        airline: String,
        /// Airplane id
        id: String,
    },
}

/// Mutable CLI state: the current airport and its persistence location.
pub struct AppContext {
    airport: Airport,
    store: DataStore,
}

impl AppContext {
    /// Bundle a loaded airport with the store it persists to.
    pub fn new(airport: Airport, store: DataStore) -> Self {
        Self { airport, store }
    }

    /// The airport currently held in memory.
    pub fn airport(&self) -> &Airport {
        &self.airport
    }

    /// Parse and run one command, printing its outcome.
    ///
    /// Returns false when parsing or the operation failed. Failed operations
    /// leave the in-memory airport unchanged.
    pub fn execute(&mut self, tokens: &[String]) -> bool {
        let parse = Cli::try_parse_from(
            std::iter::once("airfleet").chain(tokens.iter().map(String::as_str)),
        );
        let cli = match parse {
            Ok(cli) => cli,
            Err(err) => {
                // clap renders its own usage and help output.
                let _ = err.print();
                return !err.use_stderr();
            }
        };
        match self.dispatch(cli.command) {
            Ok(()) => true,
            Err(err) => {
                println!("Error: {err}");
                false
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::New { name, max_airlines } => {
                self.airport = Airport::new(name, max_airlines)?;
                self.save()?;
                println!(
                    "Created new airport: {} (max airlines: {})",
                    self.airport.name(),
                    self.airport.max_airlines()
                );
            }
            Command::Update(update) => self.update(update)?,
            Command::Add(add) => self.add(add)?,
            Command::Remove(remove) => self.remove(remove)?,
            Command::Info(info) => self.info(info)?,
            Command::Refuel {
                airline,
                id,
                amount,
            } => {
                let plane = self.airport.find_airline_mut(&airline)?.find_airplane_mut(&id)?;
                let amount = amount.unwrap_or_else(|| plane.fuel_capacity() - plane.current_fuel());
                plane.refuel(amount)?;
                self.save()?;
                println!("Refueled {id} in {airline} by {amount:.1}");
            }
            Command::Fly {
                airline,
                id,
                kilometers,
            } => {
                if self.airport.status() == Status::Closed {
                    return Err(FleetError::Closed.into());
                }
                let airline_ref = self.airport.find_airline_mut(&airline)?;
                if !airline_ref.is_operational() {
                    anyhow::bail!("airline {airline} is not operational (no airplanes)");
                }
                airline_ref.find_airplane_mut(&id)?.fly(kilometers)?;
                self.save()?;
                println!("Flew {id} in {airline} for {kilometers} km");
            }
            Command::List { airline } => self.list(airline.as_deref())?,
            Command::Export {
                airport_sort,
                airline_sort,
            } => {
                let opts = ExportOptions {
                    airport: airport_sort.parse()?,
                    airline: airline_sort.parse()?,
                };
                self.store.save(&self.airport, &opts)?;
                println!("Exported with sorting: {}, {}", opts.airport, opts.airline);
            }
        }
        Ok(())
    }

    fn update(&mut self, command: UpdateCommand) -> anyhow::Result<()> {
        match command {
            UpdateCommand::Airport { new_name } => {
                self.airport.update_name(&new_name)?;
                self.save()?;
                println!("Renamed airport to: {new_name}");
            }
            UpdateCommand::Status => {
                self.airport.toggle_status();
                self.save()?;
                println!("Airport status updated to: {}", self.airport.status());
            }
            UpdateCommand::Airline { old_name, new_name } => {
                self.airport.find_airline_mut(&old_name)?.update_name(&new_name)?;
                self.save()?;
                println!("Renamed airline {old_name} to {new_name}");
            }
        }
        Ok(())
    }

    fn add(&mut self, command: AddCommand) -> anyhow::Result<()> {
        match command {
            AddCommand::Airline {
                name,
                max_airplanes,
            } => {
                let airline = Airline::new(name.clone(), max_airplanes)?;
                self.airport.add_airline(airline)?;
                self.save()?;
                println!("Added airline: {name} (max airplanes: {max_airplanes})");
            }
            AddCommand::Airplane {
                airline,
                id,
                model,
                manufacturer,
                country,
                fuel_per_km,
                capacity,
            } => {
                let plane = Airplane::new(
                    id,
                    model,
                    Manufacturer::new(manufacturer, country),
                    fuel_per_km,
                    capacity,
                )?;
                let summary = plane.to_string();
                self.airport.find_airline_mut(&airline)?.add_airplane(plane)?;
                self.save()?;
                println!("Added to {airline}: {summary}");
            }
        }
        Ok(())
    }

    fn remove(&mut self, command: RemoveCommand) -> anyhow::Result<()> {
        match command {
            RemoveCommand::Airline { name } => {
                self.airport.remove_airline(&name)?;
                self.save()?;
                println!("Removed airline: {name}");
            }
            RemoveCommand::Airplane { airline, id } => {
                self.airport.find_airline_mut(&airline)?.remove_airplane(&id);
                self.save()?;
                println!("Removed airplane {id} from {airline}");
            }
        }
        Ok(())
    }

    fn info(&self, command: InfoCommand) -> anyhow::Result<()> {
        match command {
            InfoCommand::Airline { name } => {
                println!("{}", self.airport.find_airline(&name)?);
            }
            InfoCommand::Airplane { airline, id } => {
                println!("{}", self.airport.find_airline(&airline)?.find_airplane(&id)?);
            }
        }
        Ok(())
    }

    fn list(&self, airline: Option<&str>) -> anyhow::Result<()> {
        match airline {
            None => {
                let airlines = self.airport.airlines();
                if airlines.is_empty() {
                    println!("No airlines in the airport.");
                    return Ok(());
                }
                println!("{}", self.airport);
                for airline in airlines {
                    println!("  {airline}");
                }
            }
            Some(name) => {
                let airline = self.airport.find_airline(name)?;
                let airplanes = airline.airplanes();
                if airplanes.is_empty() {
                    println!("No airplanes in {name}.");
                    return Ok(());
                }
                println!("{airline}");
                for plane in airplanes {
                    println!("  {plane}");
                }
            }
        }
        Ok(())
    }

    fn save(&self) -> airfleet_core::Result<()> {
        self.store.save(&self.airport, &ExportOptions::default())
    }
}

/// Split a REPL line on whitespace, keeping double-quoted tokens intact.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in input.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
