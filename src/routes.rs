use axum::{routing::get, Router};

use crate::forecast::handlers as forecast_handlers;
use crate::openapi::swagger_ui;
use crate::AppState;

/// Forecast API routes; the path segment, if present, is the city
fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/forecast", get(forecast_handlers::get_forecast_view))
        .route(
            "/forecast/{city}",
            get(forecast_handlers::get_forecast_view_by_city),
        )
        .route("/report", get(forecast_handlers::get_forecast_report))
        .route(
            "/report/{city}",
            get(forecast_handlers::get_forecast_report_by_city),
        )
}

/// Build the complete application router
pub fn build_router() -> Router<AppState> {
    Router::new()
        // Front page: ?city= form submission
        .route("/", get(forecast_handlers::get_forecast_view))
        .route("/health", get(forecast_handlers::health))
        .nest("/api/v1", forecast_routes())
        .merge(swagger_ui())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn status_of(app: Router, uri: &str) -> StatusCode {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    async fn body_of(app: Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    fn app_for(base_url: &str) -> Router {
        let state = AppState::new(AppConfig::for_tests(base_url), reqwest::Client::new());
        build_router().with_state(state)
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = app_for("http://127.0.0.1:1");
        assert_eq!(status_of(app, "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_view_routes_succeed_even_when_upstream_is_down() {
        for uri in ["/", "/?city=Paris", "/api/v1/forecast", "/api/v1/forecast/Paris"] {
            let app = app_for("http://127.0.0.1:1");
            assert_eq!(status_of(app, uri).await, StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_report_route_uses_path_city() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("q", "Lyon, FR"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&mock_server)
            .await;

        let app = app_for(&mock_server.uri());
        assert_eq!(
            status_of(app, "/api/v1/report/Lyon,%20FR").await,
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_report_error_body_never_contains_api_key() {
        let app = app_for("http://127.0.0.1:1");
        let (status, body) = body_of(app, "/api/v1/report?city=Paris").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("REQUEST_ERROR"));
        assert!(!body.contains("test_api_key"));
        assert!(!body.contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn test_openapi_document_lists_endpoints() {
        let app = app_for("http://127.0.0.1:1");
        let (status, body) = body_of(app, "/api-docs/openapi.json").await;

        assert_eq!(status, StatusCode::OK);
        let doc: serde_json::Value = serde_json::from_str(&body).unwrap();
        for path in [
            "/health",
            "/api/v1/forecast",
            "/api/v1/forecast/{city}",
            "/api/v1/report",
            "/api/v1/report/{city}",
        ] {
            assert!(doc["paths"].get(path).is_some(), "{}", path);
        }
    }
}
