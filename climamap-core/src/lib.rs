//! Core library for the `climamap` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider client (current conditions, forecast)
//! - Daily aggregation of 3-hour forecast samples
//! - Best-effort IP geolocation
//!
//! It is used by `climamap-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod error;
pub mod forecast;
pub mod geolocation;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::{ConfigError, NotFoundKind, WeatherError};
pub use forecast::{FORECAST_DAYS, aggregate_daily};
pub use geolocation::{IpLocator, approximate_location};
pub use model::{DailySummary, ErrorResult, ForecastSample, Units, WeatherReading, icon_url};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
