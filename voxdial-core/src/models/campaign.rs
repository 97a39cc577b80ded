//! Campaign models and the client-side campaign queries.

use super::contact::ContactSummary;
use super::parse_timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    /// Waiting for its start time.
    Scheduled,
    /// Dialing.
    Running,
    /// Paused by an operator.
    Paused,
    /// Stopped by an operator.
    Stopped,
    /// All contacts dialed.
    Completed,
}

impl CampaignStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Completed => "completed",
        }
    }

    /// Running and paused campaigns are considered active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "running" => Ok(Self::Running),
            "paused" => Ok(Self::Paused),
            "stopped" => Ok(Self::Stopped),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown campaign status '{other}'")),
        }
    }
}

/// Stored campaign (`/v1/campaigns/db/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Identifier.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Script spoken to contacts.
    pub message: String,
    /// Target region.
    pub region: String,
    /// Lifecycle state.
    pub status: CampaignStatus,
    /// Creation time.
    pub created_at: String,
}

/// Body for creating or updating a stored campaign.
///
/// Creation only transmits `name`, `message` and `region`; the backend
/// assigns the rest. Updates send every set field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignCreate {
    /// Identifier, ignored on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Name.
    pub name: String,
    /// Script.
    pub message: String,
    /// Target region.
    pub region: String,
    /// Requested state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    /// Creation time, ignored on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl CampaignCreate {
    /// Creates a body with only the required fields set.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            message: message.into(),
            region: region.into(),
            status: None,
            created_at: None,
        }
    }

    /// Copy of this body stripped to the fields accepted on create.
    #[must_use]
    pub fn for_creation(&self) -> Self {
        Self::new(&*self.name, &*self.message, &*self.region)
    }
}

/// Body of `POST /v1/campaigns/start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignStartRequest {
    /// Campaign name.
    pub campaign_name: String,
    /// Script.
    pub message: String,
    /// Target region, `global` by default.
    pub region: String,
    /// Contacts to dial.
    pub contact_list: Vec<ContactSummary>,
}

/// Parameters of `POST /v1/campaigns/schedule`, sent as a query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignScheduleRequest {
    /// Campaign name.
    pub name: String,
    /// Script.
    pub message: String,
    /// Target region.
    pub region: String,
    /// Start time, ISO 8601.
    pub start_time: String,
}

/// Operator action on a running campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignAction {
    /// Pause dialing.
    Pause,
    /// Resume dialing.
    Resume,
    /// Stop for good.
    Stop,
}

impl CampaignAction {
    /// Path segment of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for CampaignAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Campaign count per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CampaignStatusCounts {
    /// All campaigns.
    pub total: usize,
    /// Scheduled.
    pub scheduled: usize,
    /// Running.
    pub running: usize,
    /// Paused.
    pub paused: usize,
    /// Stopped.
    pub stopped: usize,
    /// Completed.
    pub completed: usize,
}

impl CampaignStatusCounts {
    /// Tallies a campaign list.
    #[must_use]
    pub fn from_campaigns(campaigns: &[Campaign]) -> Self {
        campaigns.iter().fold(
            Self {
                total: campaigns.len(),
                ..Self::default()
            },
            |mut counts, campaign| {
                match campaign.status {
                    CampaignStatus::Scheduled => counts.scheduled += 1,
                    CampaignStatus::Running => counts.running += 1,
                    CampaignStatus::Paused => counts.paused += 1,
                    CampaignStatus::Stopped => counts.stopped += 1,
                    CampaignStatus::Completed => counts.completed += 1,
                }
                counts
            },
        )
    }
}

/// Client-side campaign filter.
///
/// ```
/// use voxdial_core::models::{CampaignFilter, CampaignStatus};
///
/// let filter = CampaignFilter::default()
///     .with_status(CampaignStatus::Running)
///     .with_search("holiday");
/// assert!(filter.apply(Vec::new()).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignFilter {
    /// Exact status match.
    pub status: Option<CampaignStatus>,
    /// Case-insensitive substring of name, message or region.
    pub search: Option<String>,
}

impl CampaignFilter {
    /// Restricts to one status.
    #[must_use]
    pub fn with_status(mut self, status: CampaignStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to campaigns mentioning `search`.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Returns true if the campaign passes the filter.
    #[must_use]
    pub fn matches(&self, campaign: &Campaign) -> bool {
        if let Some(status) = self.status
            && campaign.status != status
        {
            return false;
        }
        match self.search.as_deref().map(str::to_lowercase) {
            Some(needle) if !needle.is_empty() => [&campaign.name, &campaign.message, &campaign.region]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle)),
            _ => true,
        }
    }

    /// Filters the list and sorts it newest first. Campaigns with an
    /// unparseable `created_at` sort last.
    #[must_use]
    pub fn apply(&self, campaigns: Vec<Campaign>) -> Vec<Campaign> {
        let mut filtered: Vec<Campaign> =
            campaigns.into_iter().filter(|c| self.matches(c)).collect();
        filtered.sort_by_key(|c| std::cmp::Reverse(parse_timestamp(&c.created_at)));
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(id: i64, name: &str, status: CampaignStatus, created_at: &str) -> Campaign {
        Campaign {
            id,
            name: name.to_string(),
            message: format!("Hello from {name}"),
            region: "global".to_string(),
            status,
            created_at: created_at.to_string(),
        }
    }

    fn sample() -> Vec<Campaign> {
        vec![
            campaign(1, "Spring Sale", CampaignStatus::Completed, "2024-03-01T10:00:00"),
            campaign(2, "Holiday Promo", CampaignStatus::Running, "2024-12-01T10:00:00"),
            campaign(3, "Renewals", CampaignStatus::Paused, "2024-06-01T10:00:00"),
            campaign(4, "Holiday Recap", CampaignStatus::Scheduled, "not a date"),
        ]
    }

    #[test]
    fn test_filter_sorts_newest_first() {
        let ids: Vec<i64> = CampaignFilter::default()
            .apply(sample())
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_filter_search_is_case_insensitive() {
        let result = CampaignFilter::default().with_search("HOLIDAY").apply(sample());
        let ids: Vec<i64> = result.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_filter_search_covers_region() {
        let result = CampaignFilter::default().with_search("glob").apply(sample());
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_filter_status_and_search_combine() {
        let result = CampaignFilter::default()
            .with_status(CampaignStatus::Scheduled)
            .with_search("holiday")
            .apply(sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 4);
    }

    #[test]
    fn test_status_counts() {
        let counts = CampaignStatusCounts::from_campaigns(&sample());
        assert_eq!(counts.total, 4);
        assert_eq!(counts.running, 1);
        assert_eq!(counts.paused, 1);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.scheduled, 1);
        assert_eq!(counts.stopped, 0);
    }

    #[test]
    fn test_active_statuses() {
        assert!(CampaignStatus::Running.is_active());
        assert!(CampaignStatus::Paused.is_active());
        assert!(!CampaignStatus::Stopped.is_active());
    }

    #[test]
    fn test_creation_body_drops_server_fields() {
        let mut body = CampaignCreate::new("Promo", "Hi", "global");
        body.id = Some(9);
        body.status = Some(CampaignStatus::Running);
        body.created_at = Some("2024-01-01T00:00:00".to_string());

        let json = serde_json::to_value(body.for_creation()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Promo", "message": "Hi", "region": "global"})
        );
    }
}
