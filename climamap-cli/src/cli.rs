use anyhow::Context;
use clap::{Parser, Subcommand};
use climamap_core::{Config, Units, WeatherProvider, approximate_location, provider_from_config};
use inquire::{CustomType, InquireError, Password, Select, Text};
use std::{fmt, io::IsTerminal};

use crate::{render, session::SessionState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "climamap", version, about = "Current weather and 5-day forecast for any city")]
pub struct Cli {
    /// Defaults to `interactive` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default units.
    Configure,

    /// Show weather for a city (or the IP-derived city when omitted).
    Show {
        /// City name, e.g. "Istanbul".
        city: Option<String>,

        /// Unit system: metric or imperial.
        #[arg(long, short)]
        units: Option<Units>,
    },

    /// Show weather for the place at the given coordinates.
    At {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        #[arg(long, short)]
        units: Option<Units>,
    },

    /// Prompt-driven session: search cities, pick coordinates, switch units.
    Interactive {
        #[arg(long, short)]
        units: Option<Units>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive { units: None }) {
            Command::Configure => configure()?,
            Command::Show { city, units } => {
                let (provider, default_units) = load_provider()?;
                let units = units.unwrap_or(default_units);
                let city = match city.as_deref().map(str::trim) {
                    Some("") => None,
                    Some(c) => Some(c.to_string()),
                    None => approximate_location().await,
                };

                match city {
                    Some(city) => {
                        show_city(provider.as_ref(), &city, units).await;
                    }
                    None => println!("Please enter at least one city."),
                }
            }
            Command::At { latitude, longitude, units } => {
                let (provider, default_units) = load_provider()?;
                let provider = provider.as_ref();
                let units = units.unwrap_or(default_units);
                if let Some(city) = pick_location(provider, latitude, longitude, units).await {
                    show_city(provider, &city, units).await;
                }
            }
            Command::Interactive { units } => {
                let (provider, default_units) = load_provider()?;
                let state = SessionState::new(units.unwrap_or(default_units));
                interactive(provider.as_ref(), state).await?;
            }
        }

        Ok(())
    }
}

/// Load config and build the provider. A missing API key is fatal here.
fn load_provider() -> anyhow::Result<(Box<dyn WeatherProvider>, Units)> {
    let config = Config::load().context("Failed to load configuration")?;
    let provider = provider_from_config(&config)?;
    tracing::debug!(units = %config.units(), "weather provider ready");
    Ok((provider, config.units()))
}

/// Render current weather and the forecast for `city`.
/// The forecast uses the name the provider returned.
async fn show_city(provider: &dyn WeatherProvider, city: &str, units: Units) {
    let reading = match provider.current_by_city(city, units).await {
        Ok(reading) => reading,
        Err(err) => {
            eprintln!("{city}: {err}");
            return;
        }
    };

    println!("{}", render::weather_card(&reading, units, std::io::stdout().is_terminal()));

    match provider.forecast(&reading.city, units).await {
        Ok(days) => println!("{}", render::forecast_strip(&reading.city, &days, units)),
        Err(err) => eprintln!("{err}"),
    }
}

/// Resolve a picked point to a city name.
async fn pick_location(
    provider: &dyn WeatherProvider,
    latitude: f64,
    longitude: f64,
    units: Units,
) -> Option<String> {
    match provider.current_by_coordinates(latitude, longitude, units).await {
        Ok(reading) => Some(reading.city),
        Err(err) => {
            eprintln!("Could not get weather for the clicked location: {err}");
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SearchCity,
    PickCoordinates,
    SwitchUnits,
    Quit,
}

impl Action {
    const ALL: [Action; 4] =
        [Action::SearchCity, Action::PickCoordinates, Action::SwitchUnits, Action::Quit];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::SearchCity => "Enter a city",
            Action::PickCoordinates => "Pick a point (latitude, longitude)",
            Action::SwitchUnits => "Switch temperature unit",
            Action::Quit => "Quit",
        })
    }
}

async fn interactive(
    provider: &dyn WeatherProvider,
    mut state: SessionState,
) -> anyhow::Result<()> {
    println!("ClimaMap - enter a city or pick a point on the map!\n");

    loop {
        if state.take_initial_load() {
            state.seed_city(approximate_location().await);
        }

        if let Some(city) = state.city.clone() {
            show_city(provider, &city, state.units).await;
        }

        let action = match prompt(Select::new("What next?", Action::ALL.to_vec()).prompt())? {
            Some(action) => action,
            None => return Ok(()),
        };

        match action {
            Action::SearchCity => {
                let Some(input) =
                    prompt(Text::new("Enter a city (e.g., Istanbul):").prompt())?
                else {
                    return Ok(());
                };
                if !state.submit_city(&input) {
                    println!("Please enter at least one city.");
                }
            }
            Action::PickCoordinates => {
                let Some(latitude) = prompt(
                    CustomType::<f64>::new("Latitude:")
                        .with_error_message("Please type a number, e.g. 41.01")
                        .prompt(),
                )?
                else {
                    return Ok(());
                };
                let Some(longitude) = prompt(
                    CustomType::<f64>::new("Longitude:")
                        .with_error_message("Please type a number, e.g. 28.95")
                        .prompt(),
                )?
                else {
                    return Ok(());
                };

                if let Some(city) = pick_location(provider, latitude, longitude, state.units).await
                {
                    state.resolve_city(city);
                }
            }
            Action::SwitchUnits => {
                state.set_units(state.units.toggled());
                println!("Temperature unit: {}", state.units.label());
            }
            Action::Quit => return Ok(()),
        }
    }
}

/// Map a cancelled prompt (Esc / Ctrl-C) to `None`.
fn prompt<T>(result: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file().context("Failed to load configuration")?;

    let Some(api_key) = prompt(
        Password::new("OpenWeather API key:")
            .without_confirmation()
            .with_help_message("Get one at https://openweathermap.org/api")
            .prompt(),
    )?
    else {
        return Ok(());
    };

    let current = config.units();
    let start = Units::all().iter().position(|u| *u == current).unwrap_or(0);
    let Some(units) = prompt(
        Select::new("Default temperature unit:", Units::all().to_vec())
            .with_starting_cursor(start)
            .prompt(),
    )?
    else {
        return Ok(());
    };

    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }
    config.set_default_units(units);

    let path = config.save().context("Failed to save configuration")?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
