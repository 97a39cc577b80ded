//! Analytics models. Computation happens on the backend; these only
//! describe its responses.

use serde::{Deserialize, Serialize};

/// Best campaign in the platform summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TopPerformingCampaign {
    /// Campaign name.
    pub name: String,
    /// Success ratio in `0.0..=1.0`.
    pub success_rate: f64,
    /// Calls placed.
    pub total_calls: u64,
}

/// Response of `GET /v1/analytics/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformSummary {
    /// Registered users.
    pub total_users: u64,
    /// Calls placed.
    pub total_calls: u64,
    /// Campaigns created.
    pub total_campaigns: u64,
    /// Contacts stored.
    pub total_contacts: u64,
    /// Success ratio in `0.0..=1.0`.
    pub success_rate: f64,
    /// Mean call duration in seconds.
    pub average_call_duration: f64,
    /// Billed minutes.
    pub total_minutes_used: f64,
    /// Spend in the current month.
    pub cost_this_month: f64,
    /// Regions with traffic.
    pub active_regions: Vec<String>,
    /// Best campaign.
    pub top_performing_campaign: TopPerformingCampaign,
}

/// Per-campaign performance row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignPerformanceStats {
    /// Campaign identifier.
    pub campaign_id: String,
    /// Campaign name.
    pub campaign_name: String,
    /// Reported state (`active`, `completed`, `paused`, `scheduled`).
    pub status: String,
    /// Calls placed.
    pub total_calls: u64,
    /// Successful calls.
    pub successful_calls: u64,
    /// Failed calls.
    pub failed_calls: u64,
    /// Success ratio.
    pub success_rate: f64,
    /// Mean duration in seconds.
    pub average_duration: f64,
    /// Spend.
    pub total_cost: f64,
    /// Region.
    pub region: String,
    /// First day.
    pub start_date: String,
    /// Last day, if finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Per-region aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionalStats {
    /// Region.
    pub region: String,
    /// Calls placed.
    pub total_calls: u64,
    /// Successful calls.
    pub successful_calls: u64,
    /// Mean duration in seconds.
    pub average_duration: f64,
    /// Success ratio.
    pub success_rate: f64,
}

/// Ranked campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TopCampaign {
    /// Campaign name.
    pub campaign_name: String,
    /// Success ratio.
    pub success_rate: f64,
    /// Calls placed.
    pub total_calls: u64,
    /// Region.
    pub region: String,
}

/// Daily campaign trend point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignTrend {
    /// Day, `YYYY-MM-DD`.
    pub date: String,
    /// Campaigns existing that day.
    pub total_campaigns: u64,
    /// Campaigns dialing that day.
    pub active_campaigns: u64,
    /// Calls completed that day.
    pub completed_calls: u64,
    /// Success ratio.
    pub success_rate: f64,
}

/// Response of `GET /v1/analytics/campaign-stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignStats {
    /// All campaigns.
    pub total_campaigns: u64,
    /// Dialing now.
    pub active_campaigns: u64,
    /// Finished.
    pub completed_campaigns: u64,
    /// Paused.
    pub paused_campaigns: u64,
    /// Per-campaign rows.
    pub campaign_performance: Vec<CampaignPerformanceStats>,
    /// Per-region rows.
    pub regional_stats: Vec<RegionalStats>,
    /// Ranking.
    pub top_campaigns: Vec<TopCampaign>,
    /// Daily trend.
    pub campaign_trends: Vec<CampaignTrend>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_backend_json() {
        let json = r#"{
            "totalUsers": 125,
            "totalCalls": 1247,
            "totalCampaigns": 8,
            "totalContacts": 5432,
            "successRate": 0.867,
            "averageCallDuration": 185,
            "totalMinutesUsed": 38952,
            "costThisMonth": 1245.67,
            "activeRegions": ["North America", "Europe"],
            "topPerformingCampaign": {"name": "Holiday", "successRate": 0.924, "totalCalls": 567}
        }"#;
        let summary: PlatformSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_calls, 1247);
        assert_eq!(summary.active_regions.len(), 2);
        assert_eq!(summary.top_performing_campaign.total_calls, 567);
    }

    #[test]
    fn test_campaign_stats_partial() {
        let stats: CampaignStats =
            serde_json::from_str(r#"{"totalCampaigns": 2, "regionalStats": []}"#).unwrap();
        assert_eq!(stats.total_campaigns, 2);
        assert!(stats.campaign_performance.is_empty());
    }
}
