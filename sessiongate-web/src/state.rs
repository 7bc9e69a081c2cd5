//! Application state shared by all handlers

use crate::{handlers::StatusEndpoint, WebConfig, WebError, WebResult};
use sessiongate_core::{SessionMiddleware, SessionStore, WithSession};
use std::sync::Arc;
use tracing::info;

/// Shared handles built once at startup
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// Process-wide session table
    pub sessions: Arc<SessionStore>,
    /// Status endpoint wrapped in the session middleware
    pub endpoint: Arc<WithSession<StatusEndpoint>>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: WebConfig) -> WebResult<Self> {
        let sessions = Arc::new(SessionStore::new(config.session.clone()));
        Self::with_store(config, sessions)
    }

    /// Build state around an existing store
    pub fn with_store(config: WebConfig, sessions: Arc<SessionStore>) -> WebResult<Self> {
        sessions.config().validate().map_err(|e| {
            e.log();
            WebError::Config(e.to_string())
        })?;

        info!(
            ttl_ms = sessions.config().ttl_ms,
            refresh_on_access = sessions.refresh_on_access(),
            "Session store initialized"
        );

        let endpoint = SessionMiddleware::new(Arc::clone(&sessions)).wrap(StatusEndpoint);

        Ok(Self {
            config,
            sessions,
            endpoint: Arc::new(endpoint),
        })
    }
}
