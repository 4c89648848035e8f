use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Placeholder shown when sunrise/sunset or country are unknown
pub const PLACEHOLDER: &str = "--";

// ============================================================================
// WeatherAPI.com forecast.json response (Internal)
// Every leaf is optional and a wrongly typed leaf reads as missing.
// Defaults are applied during projection.
// ============================================================================

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| v.as_f64()))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamForecast {
    #[serde(default)]
    pub location: UpstreamLocation,
    #[serde(default)]
    pub current: UpstreamCurrent,
    #[serde(default)]
    pub forecast: UpstreamForecastList,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamLocation {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamCurrent {
    #[serde(default, deserialize_with = "lenient_number")]
    pub temp_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub feelslike_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pressure_mb: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub wind_kph: Option<f64>,
    #[serde(default)]
    pub condition: UpstreamCondition,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamCondition {
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub icon: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamForecastList {
    #[serde(default)]
    pub forecastday: Vec<UpstreamForecastDay>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamForecastDay {
    /// Kept raw: a non-string date still labels its day
    pub date: Option<Value>,
    #[serde(default)]
    pub day: UpstreamDay,
    pub astro: Option<UpstreamAstro>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamDay {
    #[serde(default, deserialize_with = "lenient_number")]
    pub maxtemp_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub mintemp_c: Option<f64>,
    #[serde(default)]
    pub condition: UpstreamCondition,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamAstro {
    #[serde(default, deserialize_with = "lenient_text")]
    pub sunrise: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sunset: Option<String>,
}

/// Error body WeatherAPI.com sends with non-2xx responses
#[derive(Debug, Deserialize)]
pub struct UpstreamErrorBody {
    pub error: UpstreamErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamErrorDetail {
    pub code: Option<i64>,
    pub message: String,
}

// ============================================================================
// Display models (External)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ForecastResult {
    pub city: String,
    pub country: String,
    pub current: CurrentConditions,
    /// At most seven days, in upstream order
    pub daily: Vec<DayForecast>,
    pub today_day_temp: f64,
    pub today_night_temp: f64,
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub humidity: f64,
    pub pressure_mb: f64,
    pub wind_kph: f64,
    pub condition_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayForecast {
    /// Weekday abbreviation ("Mon"), or the raw upstream date if unparseable
    pub day: String,
    pub temp_day: f64,
    pub temp_night: f64,
    /// Absolute icon URL, empty when upstream sent none
    pub icon: String,
    pub condition_text: String,
}

/// Label for a forecast day: either a parsed weekday or the raw date string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayLabel {
    Weekday(Weekday),
    Raw(String),
}

impl DayLabel {
    /// Parse a `YYYY-MM-DD` date. Never fails; unparseable input is kept as-is.
    pub fn parse(date: &str) -> Self {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed) => Self::Weekday(parsed.weekday()),
            Err(_) => Self::Raw(date.to_string()),
        }
    }

    /// Label an upstream `date` value of any JSON type
    pub fn from_value(date: Option<Value>) -> Self {
        match date {
            Some(Value::String(date)) => Self::parse(&date),
            None | Some(Value::Null) => Self::Raw(String::new()),
            Some(other) => Self::Raw(other.to_string()),
        }
    }

    pub fn into_label(self) -> String {
        match self {
            Self::Weekday(weekday) => weekday.to_string(),
            Self::Raw(raw) => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_label_parses_weekday() {
        assert_eq!(DayLabel::parse("2024-06-03"), DayLabel::Weekday(Weekday::Mon));
        assert_eq!(DayLabel::parse("2024-06-09").into_label(), "Sun");
    }

    #[test]
    fn test_day_label_keeps_raw_date() {
        assert_eq!(
            DayLabel::parse("tomorrow"),
            DayLabel::Raw("tomorrow".to_string())
        );
        assert_eq!(DayLabel::parse("2024-13-40").into_label(), "2024-13-40");
        assert_eq!(DayLabel::parse("").into_label(), "");
    }

    #[test]
    fn test_day_label_from_non_string_value() {
        assert_eq!(
            DayLabel::from_value(Some(serde_json::json!(20240603))),
            DayLabel::Raw("20240603".to_string())
        );
        assert_eq!(
            DayLabel::from_value(Some(serde_json::json!("2024-06-04"))),
            DayLabel::Weekday(Weekday::Tue)
        );
        assert_eq!(DayLabel::from_value(None).into_label(), "");
        assert_eq!(DayLabel::from_value(Some(Value::Null)).into_label(), "");
    }

    #[test]
    fn test_upstream_forecast_reads_mistyped_leaves_as_missing() {
        let data: UpstreamForecast = serde_json::from_value(serde_json::json!({
            "location": {"name": 42, "country": "India"},
            "current": {"temp_c": "hot", "humidity": null, "wind_kph": 12},
            "forecast": {"forecastday": [{"date": true, "day": {"maxtemp_c": [1]}}]}
        }))
        .unwrap();

        assert!(data.location.name.is_none());
        assert_eq!(data.location.country.as_deref(), Some("India"));
        assert!(data.current.temp_c.is_none());
        assert!(data.current.humidity.is_none());
        assert_eq!(data.current.wind_kph, Some(12.0));
        assert!(data.forecast.forecastday[0].day.maxtemp_c.is_none());
    }

    #[test]
    fn test_upstream_forecast_tolerates_missing_fields() {
        let data: UpstreamForecast = serde_json::from_value(serde_json::json!({
            "location": {},
            "current": {"temp_c": 21.5},
            "forecast": {}
        }))
        .unwrap();

        assert!(data.location.name.is_none());
        assert_eq!(data.current.temp_c, Some(21.5));
        assert!(data.current.condition.text.is_none());
        assert!(data.forecast.forecastday.is_empty());
    }
}
