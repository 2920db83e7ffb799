//! Helpers for driving the real router in tests.

use crate::extractors::authenticated_user::USER_ID_SESSION_KEY;
use crate::{router, session_layer, AppState};
use axum::body::Body;
use axum::extract::Path;
use axum::http::{
    header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    Request, StatusCode,
};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use clap::Parser;
use http_body_util::BodyExt;
use serde_json::Value;
use service::config::Config;
use ::sse::Manager;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tower::ServiceExt;
use tower_sessions::Session;

pub(crate) fn test_config() -> Config {
    config_from(&[])
}

/// Defaults plus the given command line flags.
pub(crate) fn config_from(args: &[&str]) -> Config {
    Config::parse_from(std::iter::once("content_platform_rs").chain(args.iter().copied()))
}

/// The full router behind a session layer, plus a sign-in route standing in for
/// the platform's login flow.
pub(crate) fn test_app(manager: &Arc<Manager>) -> Router {
    test_app_with_config(manager, test_config())
}

pub(crate) fn test_app_with_config(manager: &Arc<Manager>, config: Config) -> Router {
    let app_state = AppState::new(config, manager);
    let sessions = session_layer(&app_state.config);

    router::define_routes(app_state)
        .route("/test/sign_in/{user_id}", post(sign_in))
        .layer(sessions)
}

async fn sign_in(session: Session, Path(user_id): Path<String>) -> StatusCode {
    match session.insert(USER_ID_SESSION_KEY, user_id).await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Signs `user_id` in and returns the `name=value` cookie pair to send back.
pub(crate) async fn sign_in_cookie(app: &Router, user_id: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::post(format!("/test/sign_in/{user_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|cookie| cookie.to_str().ok())
        .and_then(|cookie| cookie.split(';').next())
        .expect("sign in should return a session cookie")
        .to_string()
}

pub(crate) async fn open_stream(app: &Router, cookie: &str) -> Response {
    app.clone()
        .oneshot(
            Request::get("/api/notifications/stream")
                .header(COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub(crate) fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Reads the next chunk of a streaming body as text, failing after a short wait.
pub(crate) async fn next_frame(body: &mut Body) -> String {
    let frame = timeout(Duration::from_secs(2), body.frame())
        .await
        .expect("stream should produce a frame")
        .expect("stream should still be open")
        .expect("frame should not be an error");
    let data = frame.into_data().expect("frame should carry data");

    String::from_utf8(data.to_vec()).unwrap()
}

pub(crate) async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
