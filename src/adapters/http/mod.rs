//! HTTP adapters - REST API implementations.
//!
//! The poll endpoints live under `/api/polls`. Every request passes through
//! the auth middleware, which attaches the caller (if any) for the
//! `RequireAuth` / `OptionalAuth` extractors.

pub mod middleware;
pub mod poll;

pub use poll::{poll_routes, PollHandlers};

use axum::{http::HeaderValue, http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use middleware::{auth_middleware, AuthState};

/// Builds the API router: poll routes plus the health check, behind auth.
pub fn api_router(handlers: PollHandlers, validator: AuthState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/polls", poll_routes(handlers))
        .layer(axum::middleware::from_fn_with_state(
            validator,
            auth_middleware,
        ))
}

/// Builds the full application router with tracing, timeout and CORS layers.
pub fn build_router(handlers: PollHandlers, validator: AuthState, server: &ServerConfig) -> Router {
    api_router(handlers, validator)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::memory::InMemoryPollStore;
    use axum::body::Body;
    use axum::http::{header, Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router() -> Router {
        router_with(&ServerConfig::default())
    }

    fn router_with(server: &ServerConfig) -> Router {
        let store = Arc::new(InMemoryPollStore::new());
        let handlers = PollHandlers::from_ports(store.clone(), store.clone(), store);
        build_router(handlers, Arc::new(MockSessionValidator::new()), server)
    }

    async fn allowed_origin(router: Router, origin: &str) -> Option<String> {
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|value| value.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = router()
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_cors_origins_are_skipped() {
        let server = ServerConfig {
            cors_origins: Some("https://polls.example.com,\u{7f}bad".to_string()),
            ..ServerConfig::default()
        };

        let allowed = allowed_origin(router_with(&server), "https://polls.example.com").await;
        assert_eq!(allowed.as_deref(), Some("https://polls.example.com"));

        let other = allowed_origin(router_with(&server), "https://evil.example.com").await;
        assert_eq!(other, None);
    }

    #[tokio::test]
    async fn missing_cors_origins_allow_any_origin() {
        let allowed = allowed_origin(router(), "https://polls.example.com").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }
}
