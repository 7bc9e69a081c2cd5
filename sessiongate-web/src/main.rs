//! Sessiongate Web Server
//!
//! Serves `GET /{param}/{value}` with per-key server-side sessions.

use clap::Parser;
use sessiongate_core::{init_logging, LoggingConfig, SessionGateConfig};
use sessiongate_web::server::SessionGateServerBuilder;
use sessiongate_web::WebConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// Sessiongate Web Server - session-aware request pipeline
#[derive(Parser)]
#[command(name = "sessiongate-web")]
#[command(about = "HTTP listener attaching server-side sessions to requests")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session time-to-live in milliseconds
    #[arg(long)]
    ttl_ms: Option<u64>,

    /// Do not extend a session's expiry when it is accessed
    #[arg(long)]
    no_refresh: bool,

    /// Log level (error, warn, info, debug, trace); the config file's level when unset
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    /// The config file's logging section, with `--log-level` applied when given
    fn logging_config(&self, file: &SessionGateConfig) -> LoggingConfig {
        match &self.log_level {
            Some(level) => file.logging.clone().with_level(level),
            None => file.logging.clone(),
        }
    }

    /// Defaults, then the config file, then environment, then flags
    fn web_config(&self, file: &SessionGateConfig) -> WebConfig {
        let mut config = WebConfig {
            session: file.session.clone(),
            ..WebConfig::default()
        }
        .with_env();

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(ttl_ms) = self.ttl_ms {
            config.session.ttl_ms = ttl_ms;
        }
        if self.no_refresh {
            config.session.refresh_on_access = false;
        }
        config
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let file_config = match &args.config {
        Some(path) => match SessionGateConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SessionGateConfig::default(),
    };

    let logging = args.logging_config(&file_config);
    if let Err(e) = init_logging(&logging) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let config = args.web_config(&file_config);
    info!(
        address = %config.address(),
        ttl = ?Duration::from_millis(config.session.ttl_ms),
        refresh_on_access = config.session.refresh_on_access,
        "Starting sessiongate"
    );

    let server = match SessionGateServerBuilder::new().config(config).build() {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to build server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}
