use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ErrorResponse;
use crate::forecast::handlers::{self, HealthResponse};
use crate::forecast::{CurrentConditions, DayForecast, ForecastResult, ForecastView};

/// OpenAPI documentation for the skycast API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "skycast API",
        version = "0.1.0",
        description = "Seven-day forecasts from WeatherAPI.com, reshaped for display."
    ),
    paths(
        handlers::health,
        handlers::get_forecast_view,
        handlers::get_forecast_view_by_city,
        handlers::get_forecast_report,
        handlers::get_forecast_report_by_city,
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "forecast", description = "Display-ready forecasts and strict reports")
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            ForecastView,
            ForecastResult,
            CurrentConditions,
            DayForecast,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
