use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{error::ConfigError, model::Units};

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_KEY";
/// Environment variable overriding the default unit system.
pub const UNITS_ENV: &str = "CLIMAMAP_UNITS";

/// Configuration stored on disk, with environment overrides applied on load.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_units = "imperial"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,

    pub default_units: Option<Units>,

    /// Override for the OpenWeather API root, mainly for testing.
    pub base_url: Option<String>,
}

impl Config {
    /// Config with only an API key set.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self { api_key: Some(api_key.into()), ..Self::default() }
    }

    /// Load config from disk (or defaults if absent), then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let cfg = Self::load_file()?;
        cfg.with_overrides(|name| std::env::var(name).ok())
    }

    /// Load only the on-disk config, without environment overrides.
    pub fn load_file() -> Result<Self, ConfigError> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file yet.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;

        toml::from_str(&contents)
            .map_err(|source| ConfigError::Toml { path: path.display().to_string(), source })
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }

        if let Some(units) = lookup(UNITS_ENV).filter(|u| !u.trim().is_empty()) {
            self.default_units = Some(Units::try_from(units.as_str())?);
        }

        Ok(self)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let toml = toml::to_string_pretty(self)?;

        fs::write(&path, toml)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let dirs =
            ProjectDirs::from("dev", "climamap", "climamap").ok_or(ConfigError::NoConfigDir)?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The API key, or `MissingApiKey` if none is configured.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    pub fn units(&self) -> Units {
        self.default_units.unwrap_or_default()
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_default_units(&mut self, units: Units) {
        self.default_units = Some(units);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn require_api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.require_api_key().unwrap_err();

        assert!(matches!(err, ConfigError::MissingApiKey));
        assert!(err.to_string().contains("OPENWEATHER_KEY"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = Config::with_api_key("   ");
        assert!(cfg.require_api_key().is_err());
    }

    #[test]
    fn env_key_overrides_file_key() {
        let cfg = Config::with_api_key("FROM_FILE")
            .with_overrides(env(&[(API_KEY_ENV, "FROM_ENV")]))
            .expect("overrides apply");

        assert_eq!(cfg.require_api_key().unwrap(), "FROM_ENV");
    }

    #[test]
    fn empty_env_key_does_not_clear_file_key() {
        let cfg = Config::with_api_key("FROM_FILE")
            .with_overrides(env(&[(API_KEY_ENV, "")]))
            .expect("overrides apply");

        assert_eq!(cfg.require_api_key().unwrap(), "FROM_FILE");
    }

    #[test]
    fn units_default_to_metric_and_can_be_overridden() {
        assert_eq!(Config::default().units(), Units::Metric);

        let cfg = Config::default()
            .with_overrides(env(&[(UNITS_ENV, "imperial")]))
            .expect("overrides apply");
        assert_eq!(cfg.units(), Units::Imperial);

        let err = Config::default().with_overrides(env(&[(UNITS_ENV, "kelvin")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUnits(_)));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut cfg = Config::with_api_key("KEY");
        cfg.set_default_units(Units::Imperial);

        let text = toml::to_string_pretty(&cfg).expect("serializes");
        assert!(text.contains("default_units = \"imperial\""));

        let parsed: Config = toml::from_str(&text).expect("parses");
        assert_eq!(parsed, cfg);
    }
}
