//! Request-scoped context threaded through endpoints

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Session attached to a context by the session store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// Session key the context was resolved for
    pub id: String,
    /// Instant after which the session is considered dead
    pub expires_at: Instant,
    /// Whether this resolution created the session
    pub is_new: bool,
}

impl SessionInfo {
    /// Time left before expiry, zero once expired
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

/// Values carried by one request through the pipeline
///
/// A session record keeps a copy of the context of the request that created it; later
/// requests for the same key receive that copy with refreshed session details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub received_at: DateTime<Utc>,
    pub method: Option<String>,
    pub path: Option<String>,
    pub user_agent: Option<String>,
    pub session: Option<SessionInfo>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            received_at: Utc::now(),
            method: None,
            path: None,
            user_agent: None,
            session: None,
        }
    }

    pub fn with_method<S: Into<String>>(mut self, method: S) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_path<S: Into<String>>(mut self, path: S) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Session key of the attached session, if any
    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.id.as_str())
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
