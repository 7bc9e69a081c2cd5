//! Request and response types of the HTTP binding

use serde::{Deserialize, Serialize};
use sessiongate_core::{SessionKeyed, StoreStats};
use std::collections::HashMap;

/// Path parameter name whose value is the session key
pub const SESSION_PARAM: &str = "id";

/// Request decoded from `/{param}/{value}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamRequest {
    pub params: HashMap<String, String>,
}

impl ParamRequest {
    pub fn new<K: Into<String>, V: Into<String>>(param: K, value: V) -> Self {
        Self {
            params: HashMap::from([(param.into(), value.into())]),
        }
    }
}

// Every decoded request belongs to a session; without an `id` parameter it is the one
// keyed by the empty string.
impl SessionKeyed for ParamRequest {
    fn session_key(&self) -> Option<&str> {
        Some(self.params.get(SESSION_PARAM).map_or("", String::as_str))
    }
}

/// Status endpoint response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(rename = "Status")]
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub sessions: StoreStats,
}

/// Error body returned for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
