use crate::error::Error;
use chrono::{DateTime, Utc};
use log::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Severity of a notification. Rendered by clients as the toast/badge style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Text that is either a single string or an English/Arabic pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Bilingual {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        en: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ar: Option<String>,
    },
}

impl LocalizedText {
    /// True when no language carries any visible text.
    pub fn is_blank(&self) -> bool {
        fn blank(text: &Option<String>) -> bool {
            text.as_deref().is_none_or(|t| t.trim().is_empty())
        }

        match self {
            LocalizedText::Plain(text) => text.trim().is_empty(),
            LocalizedText::Bilingual { en, ar } => blank(en) && blank(ar),
        }
    }
}

/// Reference to the platform entity a notification is about (an episode, an article...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatedEntity {
    pub entity_type: String,
    pub entity_id: String,
}

/// Notification as submitted by an admin or system caller. Every field except
/// `title` may be omitted; identifiers and timestamps are filled in at delivery.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<LocalizedText>,
    #[serde(default)]
    pub message: Option<LocalizedText>,
    #[serde(default, rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub related_entity: Option<RelatedEntity>,
    #[serde(default)]
    pub action_url: Option<String>,
}

impl NotificationDraft {
    /// Checks the draft and turns it into a [`Notification`] ready for delivery.
    pub fn validate(self) -> Result<Notification, Error> {
        let title = match self.title {
            Some(title) if !title.is_blank() => title,
            Some(_) => return Err(Error::invalid("Notification title must not be empty")),
            None => return Err(Error::invalid("Notification title is required")),
        };

        if self.message.as_ref().is_some_and(LocalizedText::is_blank) {
            return Err(Error::invalid("Notification message must not be empty"));
        }

        if self
            .action_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            return Err(Error::invalid("Notification actionUrl must not be empty"));
        }

        if let Some(related) = &self.related_entity {
            if related.entity_type.trim().is_empty() || related.entity_id.trim().is_empty() {
                return Err(Error::invalid(
                    "Notification relatedEntity requires entityType and entityId",
                ));
            }
        }

        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        Ok(Notification {
            id,
            title,
            message: self.message,
            kind: self.kind,
            created_at: self.created_at,
            updated_at: self.updated_at,
            related_entity: self.related_entity,
            action_url: self.action_url,
        })
    }
}

/// A validated notification. Only obtainable through [`NotificationDraft::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    id: Option<String>,
    title: LocalizedText,
    message: Option<LocalizedText>,
    kind: NotificationKind,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    related_entity: Option<RelatedEntity>,
    action_url: Option<String>,
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Fills in whatever the caller left out and produces the outbound event.
    /// `now` stands in for both timestamps when they are absent.
    pub fn into_event(self, now: DateTime<Utc>) -> NotificationEvent {
        let id = self.id.unwrap_or_else(|| {
            let generated = Uuid::new_v4().to_string();
            trace!("Generated notification id {generated}");
            generated
        });

        NotificationEvent {
            id,
            title: self.title,
            message: self.message,
            kind: self.kind,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
            related_entity: self.related_entity,
            action_url: self.action_url,
        }
    }
}

/// The payload pushed to clients. `id`, `createdAt` and `updatedAt` are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub id: String,
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<LocalizedText>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_entity: Option<RelatedEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, NotificationErrorKind};
    use chrono::TimeZone;
    use serde_json::json;

    fn draft(value: serde_json::Value) -> NotificationDraft {
        serde_json::from_value(value).unwrap()
    }

    fn invalid_message(err: Error) -> String {
        match err.error_kind {
            DomainErrorKind::Notification(NotificationErrorKind::Invalid(msg)) => msg,
            other => panic!("expected an Invalid error, got {other:?}"),
        }
    }

    #[test]
    fn draft_accepts_plain_title_and_defaults_to_info() {
        let draft = draft(json!({ "title": "Hi" }));

        assert_eq!(draft.title, Some(LocalizedText::Plain("Hi".to_string())));
        assert_eq!(draft.kind, NotificationKind::Info);
        assert!(draft.id.is_none());
        assert!(draft.created_at.is_none());
    }

    #[test]
    fn draft_accepts_bilingual_text_and_mongo_style_id() {
        let draft = draft(json!({
            "_id": "abc123",
            "title": { "en": "New episode", "ar": "حلقة جديدة" },
            "message": { "ar": "شاهد الآن" },
            "type": "success",
            "relatedEntity": { "entityType": "episode", "entityId": "ep-7" },
            "actionUrl": "/episodes/ep-7"
        }));

        assert_eq!(draft.id.as_deref(), Some("abc123"));
        assert_eq!(
            draft.title,
            Some(LocalizedText::Bilingual {
                en: Some("New episode".to_string()),
                ar: Some("حلقة جديدة".to_string()),
            })
        );
        assert_eq!(draft.kind, NotificationKind::Success);
        assert_eq!(
            draft.related_entity,
            Some(RelatedEntity {
                entity_type: "episode".to_string(),
                entity_id: "ep-7".to_string(),
            })
        );
    }

    #[test]
    fn draft_rejects_unknown_kind() {
        let result = serde_json::from_value::<NotificationDraft>(json!({
            "title": "Hi",
            "type": "critical"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn validate_requires_a_title() {
        let err = NotificationDraft::default().validate().unwrap_err();
        assert_eq!(invalid_message(err), "Notification title is required");
    }

    #[test]
    fn validate_rejects_blank_titles_in_every_shape() {
        for title in [json!("   "), json!({}), json!({ "en": "", "ar": " " })] {
            let err = draft(json!({ "title": title })).validate().unwrap_err();
            assert_eq!(invalid_message(err), "Notification title must not be empty");
        }
    }

    #[test]
    fn validate_accepts_arabic_only_title() {
        let result = draft(json!({ "title": { "ar": "صيانة" } })).validate();
        assert!(result.is_ok());
    }

    #[test]
    fn validate_rejects_blank_optional_fields() {
        let err = draft(json!({ "title": "Hi", "message": "" }))
            .validate()
            .unwrap_err();
        assert_eq!(invalid_message(err), "Notification message must not be empty");

        let err = draft(json!({ "title": "Hi", "actionUrl": " " }))
            .validate()
            .unwrap_err();
        assert_eq!(invalid_message(err), "Notification actionUrl must not be empty");

        let err = draft(json!({
            "title": "Hi",
            "relatedEntity": { "entityType": "article", "entityId": "" }
        }))
        .validate()
        .unwrap_err();
        assert_eq!(
            invalid_message(err),
            "Notification relatedEntity requires entityType and entityId"
        );
    }

    #[test]
    fn into_event_generates_id_and_timestamps_when_absent() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let event = draft(json!({ "title": "Hi" }))
            .validate()
            .unwrap()
            .into_event(now);

        assert!(!event.id.is_empty());
        assert_eq!(event.created_at, now);
        assert_eq!(event.updated_at, now);
    }

    #[test]
    fn into_event_treats_blank_id_as_absent() {
        let event = draft(json!({ "id": "  ", "title": "Hi" }))
            .validate()
            .unwrap()
            .into_event(Utc::now());

        assert!(!event.id.trim().is_empty());
    }

    #[test]
    fn into_event_keeps_caller_supplied_values() {
        let created = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let event = draft(json!({
            "id": "n-1",
            "title": "Hi",
            "createdAt": "2025-12-31T23:59:00Z"
        }))
        .validate()
        .unwrap()
        .into_event(now);

        assert_eq!(event.id, "n-1");
        assert_eq!(event.created_at, created);
        assert_eq!(event.updated_at, now);
    }

    #[test]
    fn event_serializes_with_wire_field_names() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let event = draft(json!({ "id": "n-1", "title": "Hi", "type": "warning" }))
            .validate()
            .unwrap()
            .into_event(now);

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "n-1",
                "title": "Hi",
                "type": "warning",
                "createdAt": "2026-01-01T00:00:00Z",
                "updatedAt": "2026-01-01T00:00:00Z"
            })
        );
    }
}
