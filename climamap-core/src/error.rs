//! Error types shared by the weather client and configuration.

use thiserror::Error;

/// What a 404 from the provider was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    City,
    Location,
}

impl std::fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            NotFoundKind::City => "City not found.",
            NotFoundKind::Location => "Location not found.",
        })
    }
}

/// Every failure the weather client can surface.
///
/// The `Display` text is what the user sees.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("{0}")]
    NotFound(NotFoundKind),

    #[error("HTTP error occurred: {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("An error occurred during the request: {0}")]
    Network(String),

    #[error("Unexpected response from weather provider: {0}")]
    Parse(String),

    #[error("Could not retrieve forecast for {city}. Reason: {reason}")]
    Forecast { city: String, reason: String },
}

impl WeatherError {
    /// Wrap any failure on the forecast path with the city it was for.
    pub fn for_forecast(self, city: &str) -> Self {
        match self {
            Self::Forecast { .. } => self,
            other => Self::Forecast { city: city.to_string(), reason: other.to_string() },
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        Self::Network(error_chain(&err.without_url()))
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Render an error together with its sources, e.g. "error sending request: operation timed out".
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

/// Configuration problems. `MissingApiKey` is fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "OPENWEATHER_KEY environment variable not set.\n\
         Hint: export OPENWEATHER_KEY=<key> or run `climamap configure`."
    )]
    MissingApiKey,

    #[error("Unknown unit system '{0}'. Supported: metric, imperial.")]
    InvalidUnits(String),

    #[error("Could not determine platform config directory")]
    NoConfigDir,

    #[error("Config file I/O failed ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration to TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
