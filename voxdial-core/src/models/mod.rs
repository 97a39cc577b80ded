//! Domain models exchanged with the calling platform backend.
//!
//! Field names follow the backend's JSON schemas, so most types are plain
//! serde structs. Timestamps stay as the strings the backend sends; use
//! [`parse_timestamp`] when ordering or comparing them.

mod analytics;
mod auth;
mod call;
mod campaign;
mod contact;
mod health;
mod knowledge;
mod response;

pub use analytics::{
    CampaignPerformanceStats, CampaignStats, CampaignTrend, PlatformSummary, RegionalStats,
    TopCampaign, TopPerformingCampaign,
};
pub use auth::{LoginCredentials, RefreshedToken, Token, User, UserRole};
pub use call::{
    CallHistoryFilters, CallHistoryRecord, CallStatus, InboundCallResponse, ProcessAiRequest,
    ProcessAiResponse, Sentiment,
};
pub use campaign::{
    Campaign, CampaignAction, CampaignCreate, CampaignFilter, CampaignScheduleRequest,
    CampaignStartRequest, CampaignStatus, CampaignStatusCounts,
};
pub use contact::{Contact, ContactCreate, ContactFilters, ContactSummary};
pub use health::{HealthReport, HealthStatus};
pub use knowledge::{
    KnowledgeDocument, KnowledgeDocumentPage, KnowledgeDocumentStatus, KnowledgeFileType,
    KnowledgeStats,
};
pub use response::{HttpValidationError, MessageResponse, ValidationErrorDetail};

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses a backend timestamp.
///
/// Accepts RFC 3339 and the offset-less ISO 8601 form the backend emits
/// for naive datetimes (read as UTC). Returns `None` for anything else.
///
/// ```
/// use voxdial_core::models::parse_timestamp;
///
/// assert!(parse_timestamp("2024-12-01T09:30:00Z").is_some());
/// assert!(parse_timestamp("2024-12-01T09:30:00.123456").is_some());
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_with_offset() {
        let ts = parse_timestamp("2024-12-01T10:30:00+01:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 12, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_naive_is_utc() {
        let ts = parse_timestamp("2024-12-01 09:30:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 12, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_empty() {
        assert!(parse_timestamp("").is_none());
    }
}
