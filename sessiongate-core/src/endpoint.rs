//! Endpoint abstraction: an async call taking a context and a decoded request

use crate::context::RequestContext;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Business logic invoked with a request context and a decoded request
#[async_trait]
pub trait Endpoint<Req>: Send + Sync
where
    Req: Send + 'static,
{
    type Response: Send;
    type Error: Send;

    async fn call(&self, ctx: RequestContext, request: Req)
        -> Result<Self::Response, Self::Error>;
}

#[async_trait]
impl<Req, E> Endpoint<Req> for Arc<E>
where
    Req: Send + 'static,
    E: Endpoint<Req> + ?Sized,
{
    type Response = E::Response;
    type Error = E::Error;

    async fn call(
        &self,
        ctx: RequestContext,
        request: Req,
    ) -> Result<Self::Response, Self::Error> {
        (**self).call(ctx, request).await
    }
}

/// Endpoint backed by an async closure, see [`endpoint_fn`]
#[derive(Clone)]
pub struct FnEndpoint<F> {
    f: F,
}

/// Wrap an async closure `(RequestContext, Req) -> Result<T, E>` as an [`Endpoint`]
pub fn endpoint_fn<F>(f: F) -> FnEndpoint<F> {
    FnEndpoint { f }
}

#[async_trait]
impl<Req, F, Fut, T, E> Endpoint<Req> for FnEndpoint<F>
where
    Req: Send + 'static,
    F: Fn(RequestContext, Req) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Response = T;
    type Error = E;

    async fn call(&self, ctx: RequestContext, request: Req) -> Result<T, E> {
        (self.f)(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_endpoint_fn_forwards_arguments() {
        let endpoint = endpoint_fn(|ctx: RequestContext, request: u32| async move {
            Ok::<_, String>((ctx.path, request * 2))
        });

        let ctx = RequestContext::new().with_path("/double");
        let (path, doubled) = endpoint.call(ctx, 21).await.unwrap();
        assert_eq!(path.as_deref(), Some("/double"));
        assert_eq!(doubled, 42);
    }

    #[tokio::test]
    async fn test_arc_endpoint_delegates() {
        let endpoint = Arc::new(endpoint_fn(|_ctx: RequestContext, request: &'static str| {
            async move { Err::<(), _>(request.to_string()) }
        }));

        let error = endpoint.call(RequestContext::new(), "boom").await.unwrap_err();
        assert_eq!(error, "boom");
    }
}
