use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use super::models::ForecastResult;
use super::query::normalize;
use super::service::ForecastError;
use super::view::ForecastView;
use crate::error::ErrorResponse;
use crate::extractors::CityParam;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn forecast_view(state: &AppState, city: CityParam) -> ForecastView {
    let defaults = &state.location_defaults;
    let query = normalize(city.as_deref(), defaults);

    let outcome = state
        .forecast_service
        .fetch_forecast(&query, state.config.forecast_days)
        .await;

    ForecastView::from_outcome(outcome, city.as_deref(), defaults)
}

async fn forecast_report(
    state: &AppState,
    city: CityParam,
) -> Result<ForecastResult, ForecastError> {
    let query = normalize(city.as_deref(), &state.location_defaults);

    state
        .forecast_service
        .try_fetch_forecast(&query, state.config.forecast_days)
        .await
}

/// Forecast view for the front page; never fails
///
/// GET /?city=Paris
/// GET /api/v1/forecast?city=Paris
#[utoipa::path(
    get,
    path = "/api/v1/forecast",
    tag = "forecast",
    params(crate::extractors::ForecastQuery),
    responses(
        (status = 200, description = "Forecast, or the zeroed fallback when the provider fails", body = ForecastView)
    )
)]
pub async fn get_forecast_view(
    State(state): State<AppState>,
    city: CityParam,
) -> Json<ForecastView> {
    Json(forecast_view(&state, city).await)
}

/// Forecast view by city path parameter
///
/// GET /api/v1/forecast/{city}
#[utoipa::path(
    get,
    path = "/api/v1/forecast/{city}",
    tag = "forecast",
    params(("city" = String, Path, description = "Place name, \"place, region\" pair or coordinates")),
    responses(
        (status = 200, description = "Forecast, or the zeroed fallback when the provider fails", body = ForecastView)
    )
)]
pub async fn get_forecast_view_by_city(
    State(state): State<AppState>,
    city: CityParam,
) -> Json<ForecastView> {
    Json(forecast_view(&state, city).await)
}

/// Reshaped forecast, or an error status when upstream fails
///
/// GET /api/v1/report?city=Paris
#[utoipa::path(
    get,
    path = "/api/v1/report",
    tag = "forecast",
    params(crate::extractors::ForecastQuery),
    responses(
        (status = 200, description = "Reshaped forecast", body = ForecastResult),
        (status = 502, description = "Provider unreachable, rejected the call or sent an unusable body", body = ErrorResponse),
        (status = 504, description = "Provider timed out", body = ErrorResponse)
    )
)]
pub async fn get_forecast_report(
    State(state): State<AppState>,
    city: CityParam,
) -> Result<Json<ForecastResult>, ForecastError> {
    Ok(Json(forecast_report(&state, city).await?))
}

/// Reshaped forecast by city path parameter
///
/// GET /api/v1/report/{city}
#[utoipa::path(
    get,
    path = "/api/v1/report/{city}",
    tag = "forecast",
    params(("city" = String, Path, description = "Place name, \"place, region\" pair or coordinates")),
    responses(
        (status = 200, description = "Reshaped forecast", body = ForecastResult),
        (status = 502, description = "Provider unreachable, rejected the call or sent an unusable body", body = ErrorResponse),
        (status = 504, description = "Provider timed out", body = ErrorResponse)
    )
)]
pub async fn get_forecast_report_by_city(
    State(state): State<AppState>,
    city: CityParam,
) -> Result<Json<ForecastResult>, ForecastError> {
    Ok(Json(forecast_report(&state, city).await?))
}
