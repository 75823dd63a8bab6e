use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ConfigError, WeatherError};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Unit system requested from the provider. Values are never converted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the provider's `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Units::Metric => "Celsius",
            Units::Imperial => "Fahrenheit",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Units::Metric => Units::Imperial,
            Units::Imperial => Units::Metric,
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "metric" | "celsius" | "c" => Ok(Units::Metric),
            "imperial" | "fahrenheit" | "f" => Ok(Units::Imperial),
            _ => Err(ConfigError::InvalidUnits(value.to_string())),
        }
    }
}

impl std::str::FromStr for Units {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Units::try_from(s)
    }
}

/// Current conditions for one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Name as returned by the provider, not as typed by the user.
    pub city: String,
    pub temperature: f64,
    pub humidity: u8,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One raw 3-hour forecast entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub description: String,
    pub icon_id: String,
}

/// One day of forecast, aggregated from its samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temperature_min: f64,
    pub temperature_max: f64,
    /// Distinct descriptions of the day joined with ", ".
    pub description: String,
    pub icon_id: String,
}

impl DailySummary {
    /// Human-readable date, e.g. "Saturday, Jun 01".
    pub fn label(&self) -> String {
        self.date.format("%A, %b %d").to_string()
    }

    pub fn icon_url(&self) -> String {
        icon_url(&self.icon_id)
    }
}

/// Flat error record for callers that want a message instead of a typed error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub message: String,
}

impl From<&WeatherError> for ErrorResult {
    fn from(err: &WeatherError) -> Self {
        Self { message: err.to_string() }
    }
}

impl From<WeatherError> for ErrorResult {
    fn from(err: WeatherError) -> Self {
        Self::from(&err)
    }
}

/// URL of the provider's icon image for `icon_id`.
pub fn icon_url(icon_id: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_id}.png")
}

/// Upper-case the first character, lower-case the rest.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
