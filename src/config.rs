use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::forecast::{LocationDefaults, UpstreamConfig};

/// Legacy environment variable holding the WeatherAPI.com key
const LEGACY_API_KEY_VAR: &str = "WEATHER_API";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// WeatherAPI.com API key
    pub weatherapi_api_key: String,

    /// WeatherAPI.com base URL (without the `/forecast.json` suffix)
    #[serde(default = "default_weatherapi_base_url")]
    pub weatherapi_base_url: String,

    /// Base URL prepended to root-relative condition icon paths
    #[serde(default = "default_icon_cdn_base")]
    pub icon_cdn_base: String,

    /// City used when the user submits nothing
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Region code appended to bare place names
    #[serde(default = "default_region")]
    pub default_region: String,

    /// Number of forecast days requested upstream
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// Timeout for the single upstream call, in seconds
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_weatherapi_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_icon_cdn_base() -> String {
    "https://cdn.weatherapi.com".to_string()
}

fn default_city() -> String {
    "Delhi".to_string()
}

fn default_region() -> String {
    "IN".to_string()
}

fn default_forecast_days() -> u8 {
    7
}

fn default_upstream_timeout_secs() -> u64 {
    8
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = Config::builder()
            .set_default("host", default_host())?
            .set_default("port", default_port())?
            .set_default("weatherapi_base_url", default_weatherapi_base_url())?
            .set_default("icon_cdn_base", default_icon_cdn_base())?
            .set_default("default_city", default_city())?
            .set_default("default_region", default_region())?
            .set_default("forecast_days", default_forecast_days())?
            .set_default("upstream_timeout_secs", default_upstream_timeout_secs())?;

        // Older deployments only export WEATHER_API; SKYCAST_* still wins
        if let Ok(key) = std::env::var(LEGACY_API_KEY_VAR) {
            builder = builder.set_default("weatherapi_api_key", key)?;
        }

        let config = builder
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // Override with environment variables (prefixed with SKYCAST_)
            .add_source(
                Environment::with_prefix("SKYCAST")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Upstream settings handed to the forecast service
    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig {
            api_key: self.weatherapi_api_key.clone(),
            base_url: self.weatherapi_base_url.trim_end_matches('/').to_string(),
            icon_cdn_base: self.icon_cdn_base.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(self.upstream_timeout_secs),
        }
    }

    pub fn location_defaults(&self) -> LocationDefaults {
        LocationDefaults {
            city: self.default_city.clone(),
            region: self.default_region.clone(),
        }
    }
}

#[cfg(test)]
impl AppConfig {
    /// Configuration pointing at a mock upstream
    pub fn for_tests(base_url: &str) -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            weatherapi_api_key: "test_api_key".to_string(),
            weatherapi_base_url: base_url.to_string(),
            icon_cdn_base: default_icon_cdn_base(),
            default_city: default_city(),
            default_region: default_region(),
            forecast_days: default_forecast_days(),
            upstream_timeout_secs: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_trims_trailing_slashes() {
        let mut config = AppConfig::for_tests("http://localhost:1234/v1/");
        config.icon_cdn_base = "https://cdn.example.com/".to_string();

        let upstream = config.upstream();
        assert_eq!(upstream.base_url, "http://localhost:1234/v1");
        assert_eq!(upstream.icon_cdn_base, "https://cdn.example.com");
        assert_eq!(upstream.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_location_defaults_from_config() {
        let config = AppConfig::for_tests("http://localhost");
        let defaults = config.location_defaults();
        assert_eq!(defaults.city, "Delhi");
        assert_eq!(defaults.region, "IN");
    }
}
