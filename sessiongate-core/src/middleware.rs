//! Session middleware for endpoints
//!
//! Wraps an [`Endpoint`] so that requests exposing a session key reach it with the session
//! context from the [`SessionStore`]. Everything else passes straight through.

use crate::context::RequestContext;
use crate::endpoint::Endpoint;
use crate::session::SessionStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::trace;

/// Optional capability of a request to name the session it belongs to
pub trait SessionKeyed {
    /// Session key carried by the request; `None` bypasses the session store
    fn session_key(&self) -> Option<&str> {
        None
    }
}

/// Builds [`WithSession`] endpoints sharing one store
#[derive(Debug, Clone)]
pub struct SessionMiddleware {
    store: Arc<SessionStore>,
}

impl SessionMiddleware {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn wrap<E>(&self, next: E) -> WithSession<E> {
        WithSession {
            next,
            store: Arc::clone(&self.store),
        }
    }
}

/// Endpoint resolving the request's session before calling `next`
#[derive(Debug, Clone)]
pub struct WithSession<E> {
    next: E,
    store: Arc<SessionStore>,
}

impl<E> WithSession<E> {
    pub fn inner(&self) -> &E {
        &self.next
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }
}

#[async_trait]
impl<Req, E> Endpoint<Req> for WithSession<E>
where
    Req: SessionKeyed + Send + 'static,
    E: Endpoint<Req>,
{
    type Response = E::Response;
    type Error = E::Error;

    async fn call(
        &self,
        ctx: RequestContext,
        request: Req,
    ) -> Result<Self::Response, Self::Error> {
        let ctx = match request.session_key() {
            Some(key) => {
                trace!(session_id = %key, "have session id");
                self.store.resolve(key, &ctx).context
            }
            None => ctx,
        };

        self.next.call(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::endpoint::endpoint_fn;

    struct Keyed(&'static str);

    impl SessionKeyed for Keyed {
        fn session_key(&self) -> Option<&str> {
            Some(self.0)
        }
    }

    struct Anonymous;

    impl SessionKeyed for Anonymous {}

    fn middleware() -> SessionMiddleware {
        SessionMiddleware::new(Arc::new(SessionStore::new(SessionConfig::default())))
    }

    #[tokio::test]
    async fn test_keyed_request_gets_session_context() {
        let middleware = middleware();
        let endpoint = middleware.wrap(endpoint_fn(|ctx: RequestContext, _req: Keyed| async move {
            Ok::<_, ()>(ctx.session)
        }));

        let first = endpoint.call(RequestContext::new(), Keyed("s1")).await.unwrap();
        let second = endpoint.call(RequestContext::new(), Keyed("s1")).await.unwrap();

        let first = first.expect("session attached");
        let second = second.expect("session attached");
        assert_eq!(first.id, "s1");
        assert!(first.is_new);
        assert!(!second.is_new);
        assert_eq!(middleware.store().len(), 1);
    }

    #[tokio::test]
    async fn test_request_without_key_passes_through() {
        let middleware = middleware();
        let endpoint = middleware.wrap(endpoint_fn(
            |ctx: RequestContext, _req: Anonymous| async move { Ok::<_, ()>(ctx) },
        ));

        let original = RequestContext::new().with_path("/plain");
        let seen = endpoint.call(original.clone(), Anonymous).await.unwrap();

        assert_eq!(seen, original);
        assert!(middleware.store().is_empty());
    }

    #[tokio::test]
    async fn test_handler_error_is_returned_unchanged() {
        let middleware = middleware();
        let endpoint = middleware.wrap(endpoint_fn(|_ctx: RequestContext, _req: Keyed| async move {
            Err::<(), _>("downstream failed")
        }));

        let error = endpoint.call(RequestContext::new(), Keyed("s2")).await.unwrap_err();
        assert_eq!(error, "downstream failed");
        // the session write is not rolled back
        assert!(middleware.store().peek("s2").is_some());
    }
}
