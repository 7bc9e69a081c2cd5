//! Route definitions for the sessiongate web server

use crate::{handlers, AppState};
use axum::{routing::get, Router};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/{param}/{value}", get(handlers::run_status))
}

#[cfg(test)]
mod tests {
    use crate::{create_app, AppState, WebConfig};
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_status_route_creates_session() {
        let state = AppState::new(WebConfig::default()).unwrap();
        let app = create_app(state.clone());

        let response = app.oneshot(get("/id/1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"Status":"OK"}"#);

        let record = state.sessions.peek("1").expect("session stored");
        assert_eq!(record.values().path.as_deref(), Some("/id/1"));
    }

    #[tokio::test]
    async fn test_other_params_share_empty_key_session() {
        let state = AppState::new(WebConfig::default()).unwrap();
        let app = create_app(state.clone());

        let response = app.clone().oneshot(get("/colour/blue")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let response = app.oneshot(get("/shape/round")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert_eq!(state.sessions.len(), 1);
        let record = state.sessions.peek("").expect("empty-key session stored");
        assert_eq!(record.values().path.as_deref(), Some("/colour/blue"));
    }

    #[tokio::test]
    async fn test_health_reports_session_stats() {
        let state = AppState::new(WebConfig::default()).unwrap();
        let app = create_app(state);

        let response = app.clone().oneshot(get("/id/a")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["sessions"]["total_records"], 1);
        assert_eq!(body["sessions"]["expired_records"], 0);
    }

    #[tokio::test]
    async fn test_unknown_shape_is_not_found() {
        let app = create_app(AppState::new(WebConfig::default()).unwrap());
        let response = app.oneshot(get("/a/b/c")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
