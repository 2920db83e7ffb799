use domain::error::Error;
use domain::notification::NotificationDraft;
use domain::UserId;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Request body for a unicast dispatch.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendParams {
    /// User whose open streams receive the notification.
    pub user_id: Option<String>,
    pub notification: Option<NotificationDraft>,
}

impl SendParams {
    /// Both fields are required; a blank `userId` counts as missing.
    pub fn into_parts(self) -> Result<(UserId, NotificationDraft), Error> {
        match (self.user_id, self.notification) {
            (Some(user_id), Some(notification)) if !user_id.trim().is_empty() => {
                Ok((user_id, notification))
            }
            _ => Err(Error::invalid("userId and notification are required")),
        }
    }
}

/// A broadcast body is the notification object itself.
pub(crate) fn broadcast_draft(body: Value) -> Result<NotificationDraft, Error> {
    if !body.is_object() {
        return Err(Error::invalid("Invalid notification data"));
    }

    serde_json::from_value(body)
        .map_err(|e| Error::invalid(format!("Invalid notification data: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::error::{DomainErrorKind, NotificationErrorKind};
    use serde_json::json;

    fn is_invalid(err: &Error) -> bool {
        matches!(
            err.error_kind,
            DomainErrorKind::Notification(NotificationErrorKind::Invalid(_))
        )
    }

    fn send_params(value: Value) -> SendParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn send_params_require_both_fields() {
        for body in [
            json!({ "notification": { "title": "Hi" } }),
            json!({ "userId": "u1" }),
            json!({ "userId": "  ", "notification": { "title": "Hi" } }),
            json!({ "userId": "u1", "notification": null }),
        ] {
            let err = send_params(body).into_parts().unwrap_err();
            assert!(is_invalid(&err));
        }
    }

    #[test]
    fn send_params_split_into_recipient_and_draft() {
        let (user_id, draft) = send_params(json!({
            "userId": "u1",
            "notification": { "title": "Hi" }
        }))
        .into_parts()
        .unwrap();

        assert_eq!(user_id, "u1");
        assert!(draft.title.is_some());
    }

    #[test]
    fn broadcast_body_must_be_an_object() {
        for body in [json!([{ "title": "Hi" }]), json!("Hi"), json!(42), Value::Null] {
            assert!(is_invalid(&broadcast_draft(body).unwrap_err()));
        }
    }

    #[test]
    fn broadcast_body_with_bad_field_types_is_invalid() {
        let err = broadcast_draft(json!({ "title": "Hi", "type": "shout" })).unwrap_err();
        assert!(is_invalid(&err));
    }

    #[test]
    fn broadcast_body_accepts_optional_identifier() {
        let draft = broadcast_draft(json!({ "id": "n-1", "title": "Maintenance" })).unwrap();
        assert_eq!(draft.id.as_deref(), Some("n-1"));
    }
}
