use crate::extractors::authenticated_user::AuthenticatedUser;
use crate::{AppState, Error};
use async_stream::stream;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use log::*;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::mpsc;

/// GET open the caller's notification stream
#[utoipa::path(
    get,
    path = "/api/notifications/stream",
    responses(
        (status = 200, description = "Event stream: a `connected` event, then one `notification` event per delivery",
            body = String, content_type = "text/event-stream"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal Server Error")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub(crate) async fn notification_stream(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    debug!("Establishing notification stream for user {user_id}");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let guard = app_state
        .sse_manager_ref()
        .register_connection(user_id, tx)?;

    // The guard lives inside the stream: when the client aborts, axum drops the
    // body and the connection is unregistered with it.
    let stream = stream! {
        let _guard = guard;
        while let Some(frame) = rx.recv().await {
            yield Ok::<Event, Infallible>(frame.into_sse_event());
        }
    };

    let keep_alive =
        KeepAlive::new().interval(Duration::from_secs(app_state.config.sse_keep_alive_secs));

    Ok((
        [("x-accel-buffering", "no")],
        Sse::new(stream).keep_alive(keep_alive),
    ))
}
