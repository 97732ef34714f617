mod search;

use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use cartscan_scraper::Orchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An error response: a status code plus a single `{"error": "..."}` body.
/// The caller always gets either a product list or one of these, never both.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/search", post(search::search_products))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

/// Liveness probe only; no dependency checks.
async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use cartscan_scraper::session::{RenderSession, SessionFactory};
    use cartscan_scraper::{platform_specs, ScraperError};

    use super::*;

    /// Stands in for a browser that cannot be started at all.
    struct FailingFactory;

    #[async_trait]
    impl SessionFactory for FailingFactory {
        async fn create(&self) -> Result<Box<dyn RenderSession>, ScraperError> {
            Err(ScraperError::Session {
                reason: "chrome binary not found".to_string(),
            })
        }
    }

    fn test_app() -> Router {
        let orchestrator = Arc::new(Orchestrator::with_specs(
            Arc::new(FailingFactory),
            platform_specs(),
            Duration::from_millis(10),
            Duration::from_millis(100),
        ));
        build_app(AppState { orchestrator })
    }

    fn search_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("failed to build request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        serde_json::from_slice(&bytes).expect("body was not JSON")
    }

    #[tokio::test]
    async fn health_returns_ok_unconditionally() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"status": "ok"})
        );
    }

    #[tokio::test]
    async fn search_rejects_empty_query() {
        let response = test_app()
            .oneshot(search_request(r#"{"query": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "no query provided");
    }

    #[tokio::test]
    async fn search_rejects_missing_query_field() {
        let response = test_app()
            .oneshot(search_request(r"{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_rejects_malformed_body() {
        let response = test_app()
            .oneshot(search_request("milk please"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(
            body["error"].as_str().is_some_and(|s| !s.is_empty()),
            "expected a non-empty error message, got: {body}"
        );
    }

    #[tokio::test]
    async fn search_maps_pipeline_failure_to_500_with_message() {
        let response = test_app()
            .oneshot(search_request(r#"{"query": "milk"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(
            body["error"]
                .as_str()
                .is_some_and(|s| s.contains("chrome binary not found")),
            "expected the session failure message, got: {body}"
        );
    }
}
