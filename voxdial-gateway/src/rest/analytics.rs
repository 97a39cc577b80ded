//! Analytics endpoints.

use serde::{Deserialize, Serialize};
use tracing::info;
use voxdial_core::error::{Result, VoxdialError};
use voxdial_core::models::{CampaignStats, PlatformSummary};

use super::client::ApiClient;

/// Platform summary together with campaign statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// Platform-wide totals.
    pub summary: PlatformSummary,
    /// Per-campaign statistics.
    pub campaign_stats: CampaignStats,
}

impl ApiClient {
    /// `GET /v1/analytics/summary`.
    pub async fn platform_summary(&self) -> Result<PlatformSummary> {
        self.get("/v1/analytics/summary").send_json().await
    }

    /// `GET /v1/analytics/campaign-stats`.
    pub async fn campaign_stats(&self) -> Result<CampaignStats> {
        self.get("/v1/analytics/campaign-stats").send_json().await
    }

    /// Fetches the summary and the campaign statistics concurrently.
    pub async fn analytics_report(&self) -> Result<AnalyticsReport> {
        let (summary, campaign_stats) =
            tokio::try_join!(self.platform_summary(), self.campaign_stats())?;
        Ok(AnalyticsReport {
            summary,
            campaign_stats,
        })
    }

    /// Report restricted to `start_date..end_date`.
    ///
    /// Falls back to the unrestricted report when the backend rejects the
    /// range parameters with 400 or 404.
    pub async fn analytics_for_range(&self, start_date: &str, end_date: &str) -> Result<AnalyticsReport> {
        let range = [
            ("start_date", start_date.to_string()),
            ("end_date", end_date.to_string()),
        ];
        let result = tokio::try_join!(
            self.get("/v1/analytics/summary")
                .queries(range.clone())
                .send_json::<PlatformSummary>(),
            self.get("/v1/analytics/campaign-stats")
                .queries(range)
                .send_json::<CampaignStats>(),
        );

        match result {
            Ok((summary, campaign_stats)) => Ok(AnalyticsReport {
                summary,
                campaign_stats,
            }),
            Err(VoxdialError::Api(e)) if matches!(e.status_code(), Some(400 | 404)) => {
                info!("Date range filtering not supported, fetching full report");
                self.analytics_report().await
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::rest::testing::stub;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use voxdial_core::error::ApiError;

    fn summary() -> serde_json::Value {
        json!({
            "totalUsers": 3,
            "totalCalls": 120,
            "totalCampaigns": 4,
            "totalContacts": 300,
            "successRate": 0.8,
            "averageCallDuration": 61.5,
            "totalMinutesUsed": 123.0,
            "costThisMonth": 12.5,
            "activeRegions": ["eu"],
            "topPerformingCampaign": {"name": "Spring", "successRate": 0.9, "totalCalls": 40}
        })
    }

    #[tokio::test]
    async fn test_analytics_report() {
        let router = Router::new()
            .route("/v1/analytics/summary", get(|| async { Json(summary()) }))
            .route(
                "/v1/analytics/campaign-stats",
                get(|| async { Json(json!({"totalCampaigns": 4, "activeCampaigns": 2})) }),
            );
        let (client, _) = stub(router).await;

        let report = client.analytics_report().await.unwrap();
        assert_eq!(report.summary.total_calls, 120);
        assert_eq!(report.summary.top_performing_campaign.name, "Spring");
        assert_eq!(report.campaign_stats.active_campaigns, 2);
        assert!(report.campaign_stats.campaign_performance.is_empty());
    }

    #[tokio::test]
    async fn test_missing_summary_is_an_error() {
        let (client, _) = stub(Router::new()).await;
        let err = client.platform_summary().await.unwrap_err();
        assert!(matches!(err.as_api_error(), Some(ApiError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_range_falls_back_when_unsupported() {
        async fn summary_handler(Query(params): Query<HashMap<String, String>>) -> Response {
            if params.contains_key("start_date") {
                StatusCode::BAD_REQUEST.into_response()
            } else {
                Json(summary()).into_response()
            }
        }

        let router = Router::new()
            .route("/v1/analytics/summary", get(summary_handler))
            .route(
                "/v1/analytics/campaign-stats",
                get(|| async { Json(json!({"totalCampaigns": 1})) }),
            );
        let (client, _) = stub(router).await;

        let report = client
            .analytics_for_range("2024-01-01", "2024-02-01")
            .await
            .unwrap();
        assert_eq!(report.summary.total_users, 3);
        assert_eq!(report.campaign_stats.total_campaigns, 1);
    }
}
