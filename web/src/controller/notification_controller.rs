use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use domain::error::Error as DomainError;
use log::*;
use serde_json::{json, Value};

use crate::params::notification::{broadcast_draft, SendParams};
use crate::{AppState, Error};

fn bad_body(rejection: JsonRejection) -> DomainError {
    DomainError::invalid(rejection.body_text())
}

/// POST push a notification to every open stream of one user
#[utoipa::path(
    post,
    path = "/api/notifications/send",
    request_body = SendParams,
    responses(
        (status = 200, description = "Notification delivered to at least one open stream of the user"),
        (status = 400, description = "userId or notification missing or invalid"),
        (status = 404, description = "User has no open notification stream"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn send(
    State(app_state): State<AppState>,
    payload: Result<Json<SendParams>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(params) = payload.map_err(bad_body)?;
    let (user_id, draft) = params.into_parts()?;
    let notification = draft.validate()?;

    debug!(
        "POST send {:?} notification to user {user_id}",
        notification.kind()
    );

    if !app_state
        .sse_manager_ref()
        .send_to_user(&user_id, notification)?
    {
        info!("Notification for user {user_id} not delivered: no open stream");
        return Err(DomainError::recipient_not_connected().into());
    }

    Ok(Json(json!({ "message": "Notification sent successfully" })))
}

/// POST push a notification to every connected user
#[utoipa::path(
    post,
    path = "/api/notifications/broadcast",
    request_body = domain::notification::NotificationDraft,
    responses(
        (status = 200, description = "Broadcast attempted; sentTo is the number of users reached (may be 0)"),
        (status = 400, description = "Body is not a valid notification object"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn broadcast(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(body) = payload.map_err(bad_body)?;
    let notification = broadcast_draft(body)?.validate()?;

    debug!("POST broadcast {:?} notification", notification.kind());

    let sent_to = app_state.sse_manager_ref().broadcast(notification)?;

    Ok(Json(json!({
        "message": "Notification broadcast successfully",
        "sentTo": sent_to
    })))
}
