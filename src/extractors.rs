use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::Deserialize;
use std::convert::Infallible;
use utoipa::IntoParams;

/// Query parameters accepted by the forecast endpoints
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ForecastQuery {
    /// Free-text location as typed by the user
    pub city: Option<String>,
}

/// Raw city input from either the path or the `city` query parameter.
///
/// The path wins when both are present. `None` means the user gave nothing
/// and the configured default location applies.
#[derive(Debug)]
pub struct CityParam(pub Option<String>);

impl CityParam {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for CityParam
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Ok(Path(city)) = Path::<String>::from_request_parts(parts, state).await {
            if !city.trim().is_empty() {
                return Ok(CityParam(Some(city)));
            }
        }

        // A malformed query string is treated like a missing one
        if let Ok(Query(query)) = Query::<ForecastQuery>::from_request_parts(parts, state).await {
            return Ok(CityParam(query.city));
        }

        Ok(CityParam(None))
    }
}
