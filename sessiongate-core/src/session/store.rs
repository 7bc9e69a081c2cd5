//! Shared session table with lazy TTL expiry
//!
//! Every lookup, insert, refresh and delete happens under one exclusive lock. The lock is
//! never held across an `.await` or a downstream call, and log output is emitted only after
//! it has been released.

use super::record::{SessionKey, SessionRecord};
use crate::clock::{Clock, SystemClock};
use crate::config::SessionConfig;
use crate::context::RequestContext;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of resolving a session key
#[derive(Debug, Clone)]
pub struct Resolution {
    pub context: RequestContext,
    pub is_new: bool,
}

/// Point-in-time view of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Records physically present, dead or alive
    pub total_records: usize,
    /// Records past their expiry that have not been looked up since
    pub expired_records: usize,
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Created,
    Refreshed,
    Kept,
    Replaced,
}

/// Mapping from session key to session record
#[derive(Debug)]
pub struct SessionStore {
    table: Mutex<HashMap<SessionKey, SessionRecord>>,
    config: SessionConfig,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: SessionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Mutex::new(HashMap::new()),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl()
    }

    pub fn refresh_on_access(&self) -> bool {
        self.config.refresh_on_access
    }

    /// Attach the session for `key` to a context derived from `base`
    ///
    /// Unknown or expired keys get a fresh record built from `base`. A live record is
    /// returned as stored, with its expiry pushed to `now + ttl` when refresh is enabled.
    pub fn resolve(&self, key: &str, base: &RequestContext) -> Resolution {
        let (resolution, outcome, now) = {
            let mut table = self.lock();
            let now = self.clock.now();
            let (resolution, outcome) = self.resolve_locked(&mut table, key, base, now);
            (resolution, outcome, now)
        };

        let expires_in_ms = resolution
            .context
            .session
            .as_ref()
            .map(|s| s.remaining(now).as_millis() as u64)
            .unwrap_or_default();

        match outcome {
            Outcome::Created => debug!(session_id = %key, expires_in_ms, "init session"),
            Outcome::Refreshed => debug!(session_id = %key, expires_in_ms, "touching session"),
            Outcome::Kept => debug!(session_id = %key, expires_in_ms, "have session context"),
            Outcome::Replaced => {
                debug!(session_id = %key, expires_in_ms, "session expired, init session")
            }
        }

        resolution
    }

    fn resolve_locked(
        &self,
        table: &mut HashMap<SessionKey, SessionRecord>,
        key: &str,
        base: &RequestContext,
        now: Instant,
    ) -> (Resolution, Outcome) {
        let ttl = self.config.ttl();

        if let Some(record) = table.get_mut(key) {
            if !record.is_expired(now) {
                let outcome = if self.config.refresh_on_access {
                    record.touch(now, ttl);
                    Outcome::Refreshed
                } else {
                    Outcome::Kept
                };
                let resolution = Resolution {
                    context: record.context(false),
                    is_new: false,
                };
                return (resolution, outcome);
            }
        }

        let outcome = match table.remove(key) {
            Some(_) => Outcome::Replaced,
            None => Outcome::Created,
        };

        let record = SessionRecord::new(SessionKey::from(key), base, now + ttl);
        let resolution = Resolution {
            context: record.context(true),
            is_new: true,
        };
        table.insert(record.id.clone(), record);

        (resolution, outcome)
    }

    /// Snapshot of the stored record for `key`, without any expiry handling
    pub fn peek(&self, key: &str) -> Option<SessionRecord> {
        self.lock().get(key).cloned()
    }

    /// Number of records physically present, including dead ones
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        let table = self.lock();
        let now = self.clock.now();
        StoreStats {
            total_records: table.len(),
            expired_records: table.values().filter(|r| r.is_expired(now)).count(),
        }
    }

    // A panic elsewhere cannot leave a half-written record: every mutation is a single
    // insert, remove or field store.
    fn lock(&self) -> MutexGuard<'_, HashMap<SessionKey, SessionRecord>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
