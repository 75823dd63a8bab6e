use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    Config,
    error::{ConfigError, NotFoundKind, WeatherError},
    forecast::aggregate_daily,
    model::{DailySummary, ForecastSample, Units, WeatherReading, capitalize},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Fixed timeout applied to every weather request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
    // Day boundaries for forecast grouping; `None` means the machine's local zone.
    day_offset: Option<FixedOffset>,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Result<Self, ConfigError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, ConfigError> {
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            day_offset: None,
        })
    }

    /// Group forecast samples into days at a fixed UTC offset instead of local time.
    pub fn with_time_zone(mut self, offset: FixedOffset) -> Self {
        self.day_offset = Some(offset);
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?.to_owned();
        let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Self::with_base_url(api_key, base_url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        units: Units,
        not_found: NotFoundKind,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::info!(endpoint, units = units.as_str(), "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", units.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(endpoint, "OpenWeather returned 404");
            return Err(WeatherError::NotFound(not_found));
        }

        if !status.is_success() {
            return Err(WeatherError::Http {
                status: status.as_u16(),
                detail: format!(
                    "{}: {}",
                    status.canonical_reason().unwrap_or("Unknown"),
                    truncate_body(&body)
                ),
            });
        }

        serde_json::from_str(&body).map_err(|err| {
            tracing::debug!(endpoint, error = %err, "unexpected OpenWeather payload");
            WeatherError::from(err)
        })
    }

    async fn fetch_forecast(
        &self,
        city: &str,
        units: Units,
    ) -> Result<Vec<DailySummary>, WeatherError> {
        let parsed: OwForecastResponse = self
            .get_json("forecast", &[("q", city.to_string())], units, NotFoundKind::City)
            .await?;

        let samples = parsed
            .list
            .into_iter()
            .map(OwForecastEntry::into_sample)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match &self.day_offset {
            Some(offset) => aggregate_daily(&samples, offset),
            None => aggregate_daily(&samples, &Local),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwCurrentMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwCurrentMain,
    weather: Vec<OwWeather>,
    coord: OwCoord,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl OwCurrentResponse {
    fn into_reading(self) -> Result<WeatherReading, WeatherError> {
        let condition = first_condition(self.weather)?;

        Ok(WeatherReading {
            city: self.name,
            temperature: self.main.temp,
            humidity: self.main.humidity,
            description: capitalize(&condition.description),
            latitude: self.coord.lat,
            longitude: self.coord.lon,
        })
    }
}

impl OwForecastEntry {
    fn into_sample(self) -> Result<ForecastSample, WeatherError> {
        let timestamp = unix_to_utc(self.dt)
            .ok_or_else(|| WeatherError::Parse(format!("invalid forecast timestamp {}", self.dt)))?;
        let condition = first_condition(self.weather)?;

        Ok(ForecastSample {
            timestamp,
            temperature: self.main.temp,
            description: capitalize(&condition.description),
            icon_id: condition.icon,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_by_city(
        &self,
        city: &str,
        units: Units,
    ) -> Result<WeatherReading, WeatherError> {
        let parsed: OwCurrentResponse = self
            .get_json("weather", &[("q", city.to_string())], units, NotFoundKind::City)
            .await?;

        parsed.into_reading()
    }

    async fn current_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        units: Units,
    ) -> Result<WeatherReading, WeatherError> {
        let parsed: OwCurrentResponse = self
            .get_json(
                "weather",
                &[("lat", latitude.to_string()), ("lon", longitude.to_string())],
                units,
                NotFoundKind::Location,
            )
            .await?;

        parsed.into_reading()
    }

    async fn forecast(&self, city: &str, units: Units) -> Result<Vec<DailySummary>, WeatherError> {
        self.fetch_forecast(city, units).await.map_err(|err| err.for_forecast(city))
    }
}

fn first_condition(weather: Vec<OwWeather>) -> Result<OwWeather, WeatherError> {
    weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Parse("response has no weather conditions".to_string()))
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
