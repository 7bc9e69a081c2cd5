//! Sessiongate Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use sessiongate_core::SessionConfig;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Main sessiongate web server
pub struct SessionGateServer {
    config: WebConfig,
    state: AppState,
}

impl SessionGateServer {
    /// Create a new server; the session store is built here and lives as long as the server
    pub fn new(config: WebConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Bind the configured address and serve until a shutdown signal arrives
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> WebResult<()> {
        let address = listener.local_addr().map_err(WebError::Server)?;

        info!(
            %address,
            ttl_ms = self.config.session.ttl_ms,
            refresh_on_access = self.config.session.refresh_on_access,
            "Server listening"
        );

        let app = create_app(self.state.clone());

        if let Err(e) = serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
        {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        info!("Server shut down");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Resolves on Ctrl-C or SIGTERM, logging which one arrived
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(signal = "interrupt", "Shutdown signal received"),
        _ = terminate => info!(signal = "terminated", "Shutdown signal received"),
    }
}

/// Builder for SessionGateServer
pub struct SessionGateServerBuilder {
    config: WebConfig,
}

impl SessionGateServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: WebConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: WebConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the session time-to-live
    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.config.session = SessionConfig::new(ttl, self.config.session.refresh_on_access);
        self
    }

    /// Enable or disable refresh-on-access
    pub fn refresh_on_access(mut self, refresh: bool) -> Self {
        self.config.session.refresh_on_access = refresh;
        self
    }

    /// Build the server
    pub fn build(self) -> WebResult<SessionGateServer> {
        SessionGateServer::new(self.config)
    }
}

impl Default for SessionGateServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
