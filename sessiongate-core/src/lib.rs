//! Sessiongate Core - session store, TTL policy and endpoint middleware
//!
//! This crate holds the stateful part of the request pipeline: a shared table mapping
//! session keys to records with an expiry instant, and the middleware that consults it
//! before handing a request to the next endpoint.

pub mod clock;
pub mod config;
pub mod context;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod session;

pub use clock::*;
pub use config::*;
pub use context::*;
pub use endpoint::*;
pub use error::*;
pub use logging::*;
pub use middleware::*;
pub use session::*;

// Re-export commonly used external types
pub use async_trait::async_trait;
pub use tokio;
pub use tracing;
