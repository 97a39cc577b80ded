//! Frame and envelope types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use voxdial_core::error::DataError;
use voxdial_core::models::parse_timestamp;
use voxdial_core::notice::Notice;

/// Fallback text for notifications without a `message` field.
pub const DEFAULT_NOTIFICATION_TEXT: &str = "Notification received";

/// A WebSocket frame as seen by the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebSocketMessage {
    /// Text frame.
    Text(String),
    /// Binary frame.
    Binary(Vec<u8>),
    /// Ping frame.
    Ping(Vec<u8>),
    /// Pong frame.
    Pong(Vec<u8>),
    /// Close frame.
    Close(Option<CloseReason>),
}

/// Close frame reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseReason {
    /// Close code.
    pub code: u16,
    /// Close reason text.
    pub reason: String,
}

impl WebSocketMessage {
    /// Creates a text frame.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Creates a close frame.
    #[must_use]
    pub fn close(code: u16, reason: impl Into<String>) -> Self {
        Self::Close(Some(CloseReason {
            code,
            reason: reason.into(),
        }))
    }

    /// Returns the text content if this is a text frame.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Known envelope kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnvelopeKind {
    /// `campaign_update`
    CampaignUpdate,
    /// `call_update`
    CallUpdate,
    /// `notification`
    Notification,
    /// Anything else, dispatched unfiltered.
    Other(String),
}

impl From<&str> for EnvelopeKind {
    fn from(kind: &str) -> Self {
        match kind {
            "campaign_update" => Self::CampaignUpdate,
            "call_update" => Self::CallUpdate,
            "notification" => Self::Notification,
            other => Self::Other(other.to_string()),
        }
    }
}

/// One inbound server message.
///
/// Wire shape: `{ "type": string, "data": any, "timestamp": string }`.
/// `type` is required; the other fields are optional.
///
/// ```
/// use voxdial_gateway::ws::{EnvelopeKind, InboundEnvelope};
///
/// let envelope: InboundEnvelope =
///     serde_json::from_str(r#"{"type":"call_update","data":{"id":7}}"#).unwrap();
/// assert_eq!(envelope.category(), EnvelopeKind::CallUpdate);
/// assert_eq!(envelope.payload["id"], 7);
/// assert!(envelope.emitted_at.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEnvelope {
    /// Message type.
    #[serde(rename = "type")]
    pub kind: String,

    /// Message body.
    #[serde(rename = "data", default)]
    pub payload: Value,

    /// Server timestamp, as sent.
    #[serde(rename = "timestamp", default)]
    pub emitted_at: String,
}

impl InboundEnvelope {
    /// Parses a text or binary frame.
    pub fn decode(message: &WebSocketMessage) -> Result<Self, DataError> {
        let parsed = match message {
            WebSocketMessage::Text(text) => serde_json::from_str(text),
            WebSocketMessage::Binary(data) => serde_json::from_slice(data),
            _ => {
                return Err(DataError::ParseFailed {
                    field: "envelope".to_string(),
                    reason: "control frames carry no envelope".to_string(),
                });
            }
        };
        parsed.map_err(|e| DataError::ParseFailed {
            field: "envelope".to_string(),
            reason: e.to_string(),
        })
    }

    /// Classifies the `type` field.
    #[must_use]
    pub fn category(&self) -> EnvelopeKind {
        EnvelopeKind::from(self.kind.as_str())
    }

    /// Parses `timestamp`, if present and well-formed.
    #[must_use]
    pub fn emitted_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.emitted_at)
    }

    /// The notice a `notification` envelope raises.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        if self.category() != EnvelopeKind::Notification {
            return None;
        }
        let text = self
            .payload
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_NOTIFICATION_TEXT);
        Some(Notice::success(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxdial_core::notice::NoticeLevel;

    #[test]
    fn test_decode_text_frame() {
        let frame = WebSocketMessage::text(
            r#"{"type":"campaign_update","data":{"id":3,"status":"running"},"timestamp":"2024-05-01T10:00:00Z"}"#,
        );
        let envelope = InboundEnvelope::decode(&frame).unwrap();
        assert_eq!(envelope.category(), EnvelopeKind::CampaignUpdate);
        assert_eq!(envelope.payload["status"], "running");
        assert!(envelope.emitted_at_utc().is_some());
    }

    #[test]
    fn test_decode_binary_frame() {
        let frame = WebSocketMessage::Binary(br#"{"type":"heartbeat"}"#.to_vec());
        let envelope = InboundEnvelope::decode(&frame).unwrap();
        assert_eq!(envelope.category(), EnvelopeKind::Other("heartbeat".to_string()));
        assert_eq!(envelope.payload, Value::Null);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(InboundEnvelope::decode(&WebSocketMessage::text("not json")).is_err());
        assert!(InboundEnvelope::decode(&WebSocketMessage::text(r#"{"data":{}}"#)).is_err());
        assert!(InboundEnvelope::decode(&WebSocketMessage::Ping(vec![])).is_err());
    }

    #[test]
    fn test_notification_notice() {
        let envelope: InboundEnvelope = serde_json::from_str(
            r#"{"type":"notification","data":{"message":"Campaign finished"}}"#,
        )
        .unwrap();
        let notice = envelope.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Campaign finished");
        assert!(!notice.persistent);
    }

    #[test]
    fn test_notification_notice_fallback() {
        let envelope: InboundEnvelope =
            serde_json::from_str(r#"{"type":"notification","data":{"message":""}}"#).unwrap();
        assert_eq!(envelope.notice().unwrap().message, DEFAULT_NOTIFICATION_TEXT);

        let envelope: InboundEnvelope = serde_json::from_str(r#"{"type":"notification"}"#).unwrap();
        assert_eq!(envelope.notice().unwrap().message, DEFAULT_NOTIFICATION_TEXT);

        let envelope: InboundEnvelope = serde_json::from_str(r#"{"type":"call_update"}"#).unwrap();
        assert!(envelope.notice().is_none());
    }
}
