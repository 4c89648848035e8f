use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use super::models::*;
use super::query::LocationQuery;
use crate::error::{error_response, HttpError};

/// Forecast days handed to the display layer, whatever upstream returns
pub const MAX_DAILY_ENTRIES: usize = 7;

/// Top-level sections a usable forecast.json body must carry
const REQUIRED_SECTIONS: [&str; 3] = ["location", "current", "forecast"];

/// Longest upstream error body kept for logging
const MAX_LOGGED_BODY: usize = 200;

/// Settings for the WeatherAPI.com forecast endpoint, fixed at startup
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub api_key: String,
    /// Base URL without trailing slash, e.g. "https://api.weatherapi.com/v1"
    pub base_url: String,
    /// Prepended to root-relative icon paths
    pub icon_cdn_base: String,
    /// Bound on the whole upstream call
    pub timeout: Duration,
}

impl UpstreamConfig {
    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url)
    }
}

#[derive(Error, Debug)]
pub enum ForecastError {
    /// Holds the error with its URL stripped; the URL carries the API key
    #[error("Failed to reach WeatherAPI: {0}")]
    Transport(reqwest::Error),

    #[error("WeatherAPI returned {status}: {message}")]
    UpstreamStatus { status: StatusCode, message: String },

    #[error("Invalid WeatherAPI response: {0}")]
    Schema(String),
}

impl From<reqwest::Error> for ForecastError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

impl HttpError for ForecastError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Transport(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Transport(_) | Self::UpstreamStatus { .. } | Self::Schema(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(e) if e.is_timeout() => "UPSTREAM_TIMEOUT",
            Self::Transport(_) => "REQUEST_ERROR",
            Self::UpstreamStatus { .. } => "UPSTREAM_ERROR",
            Self::Schema(_) => "INVALID_RESPONSE",
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            Self::Transport(e) if e.is_timeout() => "Weather provider did not answer in time",
            Self::Transport(_) => "Weather provider could not be reached",
            Self::UpstreamStatus { .. } => "Weather provider rejected the request",
            Self::Schema(_) => "Weather provider sent an unusable forecast",
        }
    }
}

impl IntoResponse for ForecastError {
    fn into_response(self) -> Response {
        error_response(&self)
    }
}

pub struct ForecastService {
    client: Client,
    upstream: UpstreamConfig,
}

impl ForecastService {
    pub fn new(client: Client, upstream: UpstreamConfig) -> Self {
        Self { client, upstream }
    }

    /// Fetch and reshape a forecast, collapsing every failure to `None`.
    ///
    /// The failure is logged here; callers only see that no forecast is
    /// available and render their fallback.
    pub async fn fetch_forecast(
        &self,
        query: &LocationQuery,
        days: u8,
    ) -> Option<ForecastResult> {
        match self.try_fetch_forecast(query, days).await {
            Ok(forecast) => Some(forecast),
            Err(e) => {
                tracing::warn!(query = %query, error = ?e, "Forecast unavailable");
                None
            }
        }
    }

    /// Single upstream call with no retry
    pub async fn try_fetch_forecast(
        &self,
        query: &LocationQuery,
        days: u8,
    ) -> Result<ForecastResult, ForecastError> {
        tracing::debug!(query = %query, days, "Fetching forecast");

        let days = days.to_string();
        let response = self
            .client
            .get(self.upstream.forecast_url())
            .query(&[
                ("key", self.upstream.api_key.as_str()),
                ("q", query.as_str()),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .timeout(self.upstream.timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received WeatherAPI response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ForecastError::UpstreamStatus {
                status,
                message: upstream_error_message(status, &body),
            });
        }

        let body = response.text().await?;
        let data: Value = serde_json::from_str(&body)
            .map_err(|e| ForecastError::Schema(format!("body is not JSON: {}", e)))?;

        let forecast = reshape(data, &self.upstream.icon_cdn_base)?;

        tracing::info!(
            city = %forecast.city,
            days = forecast.daily.len(),
            "Forecast fetched successfully"
        );

        Ok(forecast)
    }
}

/// Validate a forecast.json body and project it into a `ForecastResult`.
///
/// Pure: the same body always yields the same result.
pub fn reshape(data: Value, icon_cdn_base: &str) -> Result<ForecastResult, ForecastError> {
    let Value::Object(sections) = &data else {
        return Err(ForecastError::Schema(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    let missing: Vec<&str> = REQUIRED_SECTIONS
        .into_iter()
        .filter(|key| !sections.contains_key(*key))
        .collect();

    if !missing.is_empty() {
        let observed: Vec<&str> = sections.keys().map(String::as_str).collect();
        return Err(ForecastError::Schema(format!(
            "missing {} (observed keys: [{}])",
            missing.join(", "),
            observed.join(", ")
        )));
    }

    let data: UpstreamForecast =
        serde_json::from_value(data).map_err(|e| ForecastError::Schema(e.to_string()))?;

    Ok(project(data, icon_cdn_base))
}

fn project(data: UpstreamForecast, icon_cdn_base: &str) -> ForecastResult {
    let UpstreamForecast {
        location,
        current,
        forecast,
    } = data;

    // Missing numerics read as 0, missing text as ""
    let current = CurrentConditions {
        temp_c: current.temp_c.unwrap_or(0.0),
        feels_like_c: current.feelslike_c.unwrap_or(0.0),
        humidity: current.humidity.unwrap_or(0.0),
        pressure_mb: current.pressure_mb.unwrap_or(0.0),
        wind_kph: current.wind_kph.unwrap_or(0.0),
        condition_text: current.condition.text.unwrap_or_default(),
    };

    let mut days = forecast.forecastday;
    days.truncate(MAX_DAILY_ENTRIES);

    let astro = days.first().and_then(|day| day.astro.as_ref());
    let sunrise = astro
        .and_then(|a| a.sunrise.clone())
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let sunset = astro
        .and_then(|a| a.sunset.clone())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let daily: Vec<DayForecast> = days
        .into_iter()
        .map(|day| project_day(day, icon_cdn_base))
        .collect();

    let (today_day_temp, today_night_temp) = match daily.first() {
        Some(today) => (today.temp_day, today.temp_night),
        None => {
            let temp = round_one_decimal(current.temp_c);
            (temp, temp)
        }
    };

    ForecastResult {
        city: location.name.unwrap_or_default(),
        country: location.country.unwrap_or_default(),
        current,
        daily,
        today_day_temp,
        today_night_temp,
        sunrise,
        sunset,
    }
}

fn project_day(day: UpstreamForecastDay, icon_cdn_base: &str) -> DayForecast {
    let label = DayLabel::from_value(day.date);
    if let DayLabel::Raw(raw) = &label {
        tracing::debug!(date = %raw, "Unrecognised forecast date, using it verbatim");
    }

    let condition = day.day.condition;

    DayForecast {
        day: label.into_label(),
        temp_day: round_one_decimal(day.day.maxtemp_c.unwrap_or(0.0)),
        temp_night: round_one_decimal(day.day.mintemp_c.unwrap_or(0.0)),
        icon: absolute_icon_url(condition.icon.as_deref().unwrap_or_default(), icon_cdn_base),
        condition_text: condition.text.unwrap_or_default(),
    }
}

/// Round to one decimal place, halves away from zero
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Make an upstream icon path absolute.
///
/// "//host/a.png" gets "https:", "/a.png" gets the CDN base; anything else
/// (already absolute, or empty) is returned unchanged.
pub fn absolute_icon_url(icon: &str, icon_cdn_base: &str) -> String {
    if icon.starts_with("//") {
        format!("https:{}", icon)
    } else if icon.starts_with('/') {
        format!("{}{}", icon_cdn_base, icon)
    } else {
        icon.to_string()
    }
}

fn upstream_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<UpstreamErrorBody>(body) {
        return match parsed.error.code {
            Some(code) => format!("{} (code {})", parsed.error.message, code),
            None => parsed.error.message,
        };
    }

    if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        truncate_body(body)
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() > MAX_LOGGED_BODY {
        let head: String = body.chars().take(MAX_LOGGED_BODY).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}
