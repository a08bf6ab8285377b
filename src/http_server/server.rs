//! # HTTP Server
//!
//! Combines the `/api` router and the health route behind CORS, request
//! tracing and error-envelope normalization.

use std::io;

use axum::http::header::{ALLOW, AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{api_routes, ApiError, ErrorResponse};
use crate::query::QueryEngine;
use crate::store::TriviaStore;

use super::config::HttpServerConfig;
use super::observability_routes::health_routes;

/// HTTP server for the trivia API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server answering from `engine`
    pub fn with_config<S: TriviaStore>(config: HttpServerConfig, engine: QueryEngine<S>) -> Self {
        let router = build_router(&config, engine);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the listener fails
    pub async fn start(self) -> Result<(), io::Error> {
        let addr = self.config.bind_addr()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "trivia API listening");

        axum::serve(listener, self.router).await
    }
}

/// Build the full router: `/api/*`, `/health`, JSON 404 fallback, CORS and
/// request tracing.
pub fn build_router<S: TriviaStore>(config: &HttpServerConfig, engine: QueryEngine<S>) -> Router {
    Router::new()
        .merge(health_routes())
        .nest("/api", api_routes(engine))
        .fallback(route_not_found)
        .layer(middleware::map_response(envelope_bare_errors))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    if config.allows_any_origin() {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("no such route")
}

/// Rewrite error responses produced by axum itself (wrong method, path or
/// query rejections) into the error envelope. JSON bodies pass through.
async fn envelope_bare_errors(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));
    if is_json {
        return response;
    }

    let mut enveloped = (status, Json(ErrorResponse::for_status(status))).into_response();
    if let Some(allow) = response.headers().get(ALLOW) {
        enveloped.headers_mut().insert(ALLOW, allow.clone());
    }
    enveloped
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::InMemoryStore;

    fn engine() -> QueryEngine<InMemoryStore> {
        QueryEngine::new(Arc::new(InMemoryStore::new()))
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::with_config(HttpServerConfig::default(), engine());
        assert_eq!(server.socket_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(8080);
        let server = HttpServer::with_config(config, engine());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_with_origin_list() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:3000".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::with_config(config, engine()).router();
    }

    #[tokio::test]
    async fn test_bare_405_gets_envelope() {
        let bare = (
            axum::http::StatusCode::METHOD_NOT_ALLOWED,
            [(ALLOW, "DELETE")],
        )
            .into_response();

        let response = envelope_bare_errors(bare).await;
        assert_eq!(response.status(), 405);
        assert_eq!(response.headers().get(ALLOW).unwrap(), "DELETE");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, 405);
        assert_eq!(body.message, "method not allowed");
        assert!(!body.success);
    }
}
