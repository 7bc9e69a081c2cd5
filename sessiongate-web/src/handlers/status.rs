//! Status endpoint: decode, run through the session middleware, encode

use super::types::{ParamRequest, StatusResponse};
use crate::{middleware::get_request_context, AppState, WebError, WebResult};
use async_trait::async_trait;
use axum::{
    extract::{Path, Request, State},
    response::Json,
};
use sessiongate_core::{Endpoint, RequestContext};
use std::collections::HashMap;
use tracing::debug;

/// Business endpoint behind the session middleware
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusEndpoint;

#[async_trait]
impl Endpoint<ParamRequest> for StatusEndpoint {
    type Response = StatusResponse;
    type Error = WebError;

    async fn call(
        &self,
        ctx: RequestContext,
        request: ParamRequest,
    ) -> WebResult<StatusResponse> {
        match &ctx.session {
            Some(session) => debug!(
                request_id = %ctx.request_id,
                session_id = %session.id,
                new_session = session.is_new,
                params = ?request.params,
                "status request"
            ),
            None => debug!(
                request_id = %ctx.request_id,
                params = ?request.params,
                "status request"
            ),
        }
        Ok(StatusResponse::ok())
    }
}

/// Turn the `{param}` and `{value}` path segments into a [`ParamRequest`]
pub fn decode_request(mut path: HashMap<String, String>) -> WebResult<ParamRequest> {
    let param = path
        .remove("param")
        .ok_or_else(|| WebError::BadRequest("No param in request".to_string()))?;
    let value = path
        .remove("value")
        .ok_or_else(|| WebError::BadRequest("No value in request".to_string()))?;
    Ok(ParamRequest::new(param, value))
}

/// `GET /{param}/{value}`
pub async fn run_status(
    State(state): State<AppState>,
    Path(path): Path<HashMap<String, String>>,
    request: Request,
) -> WebResult<Json<StatusResponse>> {
    let ctx = get_request_context(&request);
    let decoded = decode_request(path)?;
    let response = state.endpoint.call(ctx, decoded).await?;
    Ok(Json(response))
}
