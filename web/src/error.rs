use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::error::{DomainErrorKind, Error as DomainError, NotificationErrorKind};

use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let DomainError { source, error_kind } = self.0;

        match error_kind {
            DomainErrorKind::Notification(notification_error_kind) => {
                match notification_error_kind {
                    NotificationErrorKind::Invalid(message) => {
                        error_body(StatusCode::BAD_REQUEST, message)
                    }
                    NotificationErrorKind::RecipientNotConnected => {
                        error_body(StatusCode::NOT_FOUND, "User not connected")
                    }
                }
            }
            // Details stay in the server log, the client only gets a generic message.
            DomainErrorKind::Internal(internal_error_kind) => {
                error!("Internal error ({internal_error_kind:?}): {source:?}");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
