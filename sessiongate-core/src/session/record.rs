use crate::context::{RequestContext, SessionInfo};
use std::borrow::Borrow;
use std::fmt;
use std::time::{Duration, Instant};

/// Opaque caller-supplied session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SessionKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for SessionKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One stored session: its key, expiry and the context it was created from
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: SessionKey,
    pub expires_at: Instant,
    values: RequestContext,
}

impl SessionRecord {
    /// Create a record inheriting `base`; any session already attached to `base` is dropped
    pub fn new(id: SessionKey, base: &RequestContext, expires_at: Instant) -> Self {
        let mut values = base.clone();
        values.session = None;
        Self {
            id,
            expires_at,
            values,
        }
    }

    /// Dead once `now` is strictly past the expiry instant
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at < now
    }

    pub fn touch(&mut self, now: Instant, ttl: Duration) {
        self.expires_at = now + ttl;
    }

    /// Inherited request values, without session details
    pub fn values(&self) -> &RequestContext {
        &self.values
    }

    /// Context handed to downstream endpoints
    pub fn context(&self, is_new: bool) -> RequestContext {
        let mut context = self.values.clone();
        context.session = Some(SessionInfo {
            id: self.id.to_string(),
            expires_at: self.expires_at,
            is_new,
        });
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary_is_still_live() {
        let now = Instant::now();
        let record = SessionRecord::new("a".into(), &RequestContext::new(), now);
        assert!(!record.is_expired(now));
        assert!(record.is_expired(now + Duration::from_nanos(1)));
    }

    #[test]
    fn test_context_carries_session_and_inherited_values() {
        let now = Instant::now();
        let base = RequestContext::new().with_path("/id/7");
        let record = SessionRecord::new("7".into(), &base, now + Duration::from_secs(5));

        let context = record.context(true);
        assert_eq!(context.request_id, base.request_id);
        assert_eq!(context.path.as_deref(), Some("/id/7"));

        let session = context.session.unwrap();
        assert_eq!(session.id, "7");
        assert_eq!(session.expires_at, now + Duration::from_secs(5));
        assert!(session.is_new);
    }

    #[test]
    fn test_new_record_drops_inherited_session() {
        let now = Instant::now();
        let stale = SessionRecord::new("old".into(), &RequestContext::new(), now).context(false);
        let record = SessionRecord::new("new".into(), &stale, now);
        assert!(record.values().session.is_none());
        assert_eq!(record.context(true).session_id(), Some("new"));
    }
}
