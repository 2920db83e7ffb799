//! Error types for the `domain` layer.
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur while validating or
/// delivering notifications. The `source` field holds the original error that caused
/// the domain error, if any. `sse` and `web` both depend on `domain`, and `web`
/// uses the `error_kind` tree to pick HTTP status codes and messages for the client.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    Notification(NotificationErrorKind),
}

/// Failures that are never the caller's fault.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Serialization,
}

/// Failures tied to a specific notification request. These are expected and
/// surfaced to the caller as client-visible conditions.
#[derive(Debug, PartialEq)]
pub enum NotificationErrorKind {
    /// The inbound payload was missing fields or failed validation.
    Invalid(String),
    /// Unicast target has no open stream.
    RecipientNotConnected,
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Notification(NotificationErrorKind::Invalid(
                message.into(),
            )),
        }
    }

    pub fn recipient_not_connected() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Notification(NotificationErrorKind::RecipientNotConnected),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Serialization),
        }
    }
}
