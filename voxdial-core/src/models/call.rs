//! Call history and call processing models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// Dialed, not finished.
    Initiated,
    /// Finished normally.
    Completed,
    /// Did not connect.
    Failed,
}

impl CallStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initiated => "initiated",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "initiated" => Ok(Self::Initiated),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown call status '{other}'")),
        }
    }
}

/// One row of `GET /v1/calls/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallHistoryRecord {
    /// Identifier.
    pub id: i64,
    /// Contact name.
    pub contact_name: String,
    /// Dialed number.
    pub contact_number: String,
    /// Owning campaign.
    pub campaign_name: String,
    /// Region.
    pub region: String,
    /// Telephony provider.
    pub provider: String,
    /// Outcome.
    pub status: CallStatus,
    /// Recording location.
    #[serde(default)]
    pub recording_url: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    /// AI generated summary.
    #[serde(default)]
    pub ai_summary: Option<String>,
    /// When the call happened.
    pub timestamp: String,
}

/// Query filters for the call history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallHistoryFilters {
    /// Only calls of this campaign.
    pub campaign_name: Option<String>,
    /// Only calls with this status.
    pub status: Option<CallStatus>,
    /// Only calls in this region.
    pub region: Option<String>,
    /// Maximum number of rows.
    pub limit: Option<u32>,
}

impl CallHistoryFilters {
    /// Returns the query pairs for the set filters. Empty strings and a
    /// zero limit are omitted.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(name) = self.campaign_name.as_deref().filter(|s| !s.is_empty()) {
            query.push(("campaign_name", name.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(region) = self.region.as_deref().filter(|s| !s.is_empty()) {
            query.push(("region", region.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}

/// Response of `POST /v1/calls/inbound`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundCallResponse {
    /// Result message.
    pub message: String,
    /// TwiML document for the telephony provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twiml: Option<String>,
}

/// Body of `POST /v1/calls/process-ai`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessAiRequest {
    /// Call to process.
    pub call_id: i64,
    /// Recording to transcribe.
    pub audio_url: String,
}

/// Sentiment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Positive.
    Positive,
    /// Negative.
    Negative,
    /// Neutral.
    Neutral,
}

/// Response of `POST /v1/calls/process-ai`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessAiResponse {
    /// Result message.
    pub message: String,
    /// Transcript text.
    #[serde(default)]
    pub transcript: Option<String>,
    /// Summary text.
    #[serde(default)]
    pub summary: Option<String>,
    /// Detected sentiment.
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    /// Processing job identifier.
    #[serde(default)]
    pub processing_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_query_order_and_omissions() {
        let filters = CallHistoryFilters {
            campaign_name: Some("Holiday".to_string()),
            status: Some(CallStatus::Failed),
            region: Some(String::new()),
            limit: Some(0),
        };
        assert_eq!(
            filters.to_query(),
            vec![
                ("campaign_name", "Holiday".to_string()),
                ("status", "failed".to_string()),
            ]
        );
        assert!(CallHistoryFilters::default().to_query().is_empty());
    }

    #[test]
    fn test_history_record_nullable_fields() {
        let json = r#"{
            "id": 7,
            "contact_name": "Asha",
            "contact_number": "+911234567890",
            "campaign_name": "Holiday",
            "region": "india",
            "provider": "twilio",
            "status": "completed",
            "recording_url": null,
            "duration": 42.5,
            "ai_summary": null,
            "timestamp": "2024-12-01T09:30:00"
        }"#;
        let record: CallHistoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, CallStatus::Completed);
        assert!(record.recording_url.is_none());
        assert_eq!(record.duration, Some(42.5));
    }

    #[test]
    fn test_call_status_from_str() {
        assert_eq!("FAILED".parse::<CallStatus>(), Ok(CallStatus::Failed));
        assert!("ringing".parse::<CallStatus>().is_err());
    }
}
