//! Request context middleware
//!
//! Builds the [`RequestContext`] for every inbound request and stores it in the request
//! extensions, where handlers pick it up.

use axum::{
    extract::Request,
    http::{header::USER_AGENT, HeaderMap, Method, Uri},
    middleware::Next,
    response::Response,
};
use sessiongate_core::RequestContext;

/// Derive a fresh context from the request line and headers
pub fn request_context(method: &Method, uri: &Uri, headers: &HeaderMap) -> RequestContext {
    let context = RequestContext::new()
        .with_method(method.as_str())
        .with_path(uri.path());

    match headers.get(USER_AGENT).and_then(|v| v.to_str().ok()) {
        Some(agent) => context.with_user_agent(agent),
        None => context,
    }
}

pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
    let context = request_context(request.method(), request.uri(), request.headers());
    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Context stored by [`request_context_middleware`], or a fresh one
pub fn get_request_context(request: &Request) -> RequestContext {
    request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default()
}
