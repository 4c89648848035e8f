use serde::Serialize;
use utoipa::ToSchema;

use super::models::{DayForecast, ForecastResult, PLACEHOLDER};
use super::query::LocationDefaults;

/// What the front page renders: a real forecast or the safe fallback
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ForecastView {
    /// False when upstream failed and this is the fallback
    pub available: bool,
    pub city: String,
    pub country: String,
    /// Today's high
    pub day_temp: f64,
    /// Today's low
    pub night_temp: f64,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind: f64,
    pub condition: String,
    pub sunrise: String,
    pub sunset: String,
    pub daily: Vec<DayForecast>,
}

impl ForecastView {
    pub fn from_result(forecast: ForecastResult) -> Self {
        Self {
            available: true,
            city: forecast.city,
            country: forecast.country,
            day_temp: forecast.today_day_temp,
            night_temp: forecast.today_night_temp,
            temperature: forecast.current.temp_c,
            feels_like: forecast.current.feels_like_c,
            humidity: forecast.current.humidity,
            pressure: forecast.current.pressure_mb,
            wind: forecast.current.wind_kph,
            condition: forecast.current.condition_text,
            sunrise: forecast.sunrise,
            sunset: forecast.sunset,
            daily: forecast.daily,
        }
    }

    /// Zeroed view that keeps what the user typed as the city name
    pub fn fallback(raw_input: Option<&str>, defaults: &LocationDefaults) -> Self {
        let typed = raw_input.map(str::trim).unwrap_or_default();
        let source = if typed.is_empty() {
            defaults.default_query().to_string()
        } else {
            typed.to_string()
        };
        let city = source.split(',').next().unwrap_or_default().to_string();

        Self {
            available: false,
            city,
            country: PLACEHOLDER.to_string(),
            day_temp: 0.0,
            night_temp: 0.0,
            temperature: 0.0,
            feels_like: 0.0,
            humidity: 0.0,
            pressure: 0.0,
            wind: 0.0,
            condition: String::new(),
            sunrise: PLACEHOLDER.to_string(),
            sunset: PLACEHOLDER.to_string(),
            daily: Vec::new(),
        }
    }

    /// View for a fetch outcome
    pub fn from_outcome(
        outcome: Option<ForecastResult>,
        raw_input: Option<&str>,
        defaults: &LocationDefaults,
    ) -> Self {
        match outcome {
            Some(forecast) => Self::from_result(forecast),
            None => Self::fallback(raw_input, defaults),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::models::CurrentConditions;

    fn defaults() -> LocationDefaults {
        LocationDefaults {
            city: "Delhi".to_string(),
            region: "IN".to_string(),
        }
    }

    fn sample_result() -> ForecastResult {
        ForecastResult {
            city: "Mumbai".to_string(),
            country: "India".to_string(),
            current: CurrentConditions {
                temp_c: 31.0,
                feels_like_c: 36.2,
                humidity: 74.0,
                pressure_mb: 1004.0,
                wind_kph: 19.1,
                condition_text: "Mist".to_string(),
            },
            daily: vec![DayForecast {
                day: "Tue".to_string(),
                temp_day: 32.4,
                temp_night: 27.9,
                icon: "https://cdn.weatherapi.com/weather/64x64/day/143.png".to_string(),
                condition_text: "Mist".to_string(),
            }],
            today_day_temp: 32.4,
            today_night_temp: 27.9,
            sunrise: "06:12 AM".to_string(),
            sunset: "07:09 PM".to_string(),
        }
    }

    #[test]
    fn test_view_from_result() {
        let view = ForecastView::from_result(sample_result());

        assert!(view.available);
        assert_eq!(view.city, "Mumbai");
        assert_eq!(view.day_temp, 32.4);
        assert_eq!(view.night_temp, 27.9);
        assert_eq!(view.humidity, 74.0);
        assert_eq!(view.pressure, 1004.0);
        assert_eq!(view.wind, 19.1);
        assert_eq!(view.sunrise, "06:12 AM");
        assert_eq!(view.daily.len(), 1);
    }

    #[test]
    fn test_fallback_keeps_first_segment_of_input() {
        let view = ForecastView::fallback(Some("  Paris, FR "), &defaults());

        assert!(!view.available);
        assert_eq!(view.city, "Paris");
        assert_eq!(view.country, "--");
        assert_eq!(view.day_temp, 0.0);
        assert_eq!(view.humidity, 0.0);
        assert_eq!(view.sunrise, "--");
        assert_eq!(view.sunset, "--");
        assert!(view.daily.is_empty());
    }

    #[test]
    fn test_fallback_without_input_uses_default_city() {
        assert_eq!(ForecastView::fallback(None, &defaults()).city, "Delhi");
        assert_eq!(ForecastView::fallback(Some(""), &defaults()).city, "Delhi");
    }

    #[test]
    fn test_from_outcome() {
        let real = ForecastView::from_outcome(Some(sample_result()), Some("Mumbai"), &defaults());
        assert!(real.available);

        let fallback = ForecastView::from_outcome(None, Some("Atlantis"), &defaults());
        assert!(!fallback.available);
        assert_eq!(fallback.city, "Atlantis");
    }
}
