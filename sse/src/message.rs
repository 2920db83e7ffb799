use axum::response::sse::Event as SseEvent;
use domain::notification::NotificationEvent;
use serde::Serialize;

/// Confirmation text carried by the first frame of every stream.
pub const CONNECTED_MESSAGE: &str = "Connected to notification stream";

/// Trait for getting the SSE event type name
pub trait EventType {
    fn event_type(&self) -> &'static str;
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// Synthetic confirmation written before any notification can arrive.
    #[serde(rename = "connected")]
    Connected { message: String },

    #[serde(rename = "notification")]
    Notification(NotificationEvent),
}

impl Event {
    pub fn connected() -> Self {
        Event::Connected {
            message: CONNECTED_MESSAGE.to_string(),
        }
    }
}

impl EventType for Event {
    fn event_type(&self) -> &'static str {
        match self {
            Event::Connected { .. } => "connected",
            Event::Notification(_) => "notification",
        }
    }
}

/// One serialized event as it travels through a connection's channel.
/// The web layer turns it into an SSE `event:`/`data:` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub event_type: &'static str,
    pub data: String,
}

impl Frame {
    pub fn encode(event: &Event) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_type: event.event_type(),
            data: serde_json::to_string(event)?,
        })
    }

    pub fn into_sse_event(self) -> SseEvent {
        SseEvent::default().event(self.event_type).data(self.data)
    }
}
