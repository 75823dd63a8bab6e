use crate::{
    Config,
    error::{ConfigError, WeatherError},
    model::{DailySummary, Units, WeatherReading},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions and daily forecasts.
///
/// Every method issues exactly one request and never retries.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_city(
        &self,
        city: &str,
        units: Units,
    ) -> Result<WeatherReading, WeatherError>;

    async fn current_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        units: Units,
    ) -> Result<WeatherReading, WeatherError>;

    /// Up to five daily summaries. All failures come back as `WeatherError::Forecast`.
    async fn forecast(&self, city: &str, units: Units) -> Result<Vec<DailySummary>, WeatherError>;
}

/// Construct the provider from config, failing fast when no API key is configured.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, ConfigError> {
    Ok(Box::new(OpenWeatherProvider::from_config(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn provider_from_config_works_when_key_is_set() {
        let cfg = Config::with_api_key("KEY");
        assert!(provider_from_config(&cfg).is_ok());
    }
}
