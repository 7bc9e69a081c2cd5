//! Sessiongate Web Server
//!
//! HTTP binding for the session pipeline: decodes path parameters into requests, runs them
//! through the session middleware and encodes the endpoint's response as JSON.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use server::SessionGateServer;
pub use state::AppState;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use sessiongate_core::SessionConfig;
use std::str::FromStr;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(axum::middleware::from_fn(
            middleware::request_context_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Session store policy
    pub session: SessionConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6502,
            session: SessionConfig::default(),
        }
    }
}

impl WebConfig {
    /// Override fields from `SESSIONGATE_*` environment variables; unparsable values are
    /// logged and ignored
    pub fn with_env(self) -> Self {
        fn var<T: FromStr>(name: &str) -> Option<T> {
            parse_env_value(name, std::env::var(name).ok())
        }

        Self {
            host: std::env::var("SESSIONGATE_HOST").unwrap_or(self.host),
            port: var("SESSIONGATE_PORT").unwrap_or(self.port),
            session: SessionConfig {
                ttl_ms: var("SESSIONGATE_SESSION_TTL_MS").unwrap_or(self.session.ttl_ms),
                refresh_on_access: var("SESSIONGATE_SESSION_REFRESH")
                    .unwrap_or(self.session.refresh_on_access),
            },
        }
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a raw environment value, warning when it is present but not a valid `T`
fn parse_env_value<T: FromStr>(name: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, value = %raw, "Ignoring unparsable environment value");
            None
        }
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::Server(_) | WebError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = handlers::ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
