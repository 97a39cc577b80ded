//! Campaign endpoints and client-side campaign queries.

use tracing::{debug, info};
use voxdial_core::error::Result;
use voxdial_core::models::{
    Campaign, CampaignAction, CampaignCreate, CampaignFilter, CampaignScheduleRequest,
    CampaignStartRequest, CampaignStatusCounts, MessageResponse,
};

use super::client::ApiClient;

const CAMPAIGNS_PATH: &str = "/v1/campaigns/db/";

fn campaign_path(id: i64) -> String {
    format!("/v1/campaigns/db/{id}")
}

impl ApiClient {
    /// `GET /v1/campaigns/db/`: every stored campaign.
    pub async fn campaigns(&self) -> Result<Vec<Campaign>> {
        let campaigns: Vec<Campaign> = self.get(CAMPAIGNS_PATH).send_json().await?;
        debug!(count = campaigns.len(), "Fetched campaigns");
        Ok(campaigns)
    }

    /// Creates a campaign. Only `name`, `message` and `region` are sent.
    pub async fn create_campaign(&self, campaign: &CampaignCreate) -> Result<Campaign> {
        let created: Campaign = self
            .post(CAMPAIGNS_PATH)
            .json(&campaign.for_creation())
            .send_json()
            .await?;
        info!(id = created.id, name = %created.name, "Campaign created");
        Ok(created)
    }

    /// Fetches one campaign.
    pub async fn campaign(&self, id: i64) -> Result<Campaign> {
        self.get(&campaign_path(id)).send_json().await
    }

    /// Replaces a campaign.
    pub async fn update_campaign(&self, id: i64, campaign: &CampaignCreate) -> Result<Campaign> {
        self.put(&campaign_path(id))
            .json(campaign)
            .send_json()
            .await
    }

    /// Deletes a campaign and returns the backend's acknowledgement.
    pub async fn delete_campaign(&self, id: i64) -> Result<String> {
        let message = self.delete(&campaign_path(id)).send_message().await?;
        info!(id, "Campaign deleted");
        Ok(message)
    }

    /// `POST /v1/campaigns/start`: dial a contact list now.
    pub async fn start_campaign(&self, request: &CampaignStartRequest) -> Result<MessageResponse> {
        let response: MessageResponse = self
            .post("/v1/campaigns/start")
            .json(request)
            .send_json()
            .await?;
        info!(
            campaign = %request.campaign_name,
            contacts = request.contact_list.len(),
            "Campaign started"
        );
        Ok(response)
    }

    /// `POST /v1/campaigns/schedule`. Parameters travel in the query string.
    pub async fn schedule_campaign(&self, request: &CampaignScheduleRequest) -> Result<String> {
        self.post("/v1/campaigns/schedule")
            .query("name", &*request.name)
            .query("message", &*request.message)
            .query("region", &*request.region)
            .query("start_time", &*request.start_time)
            .send_message()
            .await
    }

    /// `POST /v1/campaigns/control/{id}/{action}`.
    pub async fn control_campaign(&self, id: i64, action: CampaignAction) -> Result<String> {
        let message = self
            .post(&format!("/v1/campaigns/control/{id}/{action}"))
            .send_message()
            .await?;
        info!(id, %action, "Campaign control applied");
        Ok(message)
    }

    /// Pauses a campaign.
    pub async fn pause_campaign(&self, id: i64) -> Result<String> {
        self.control_campaign(id, CampaignAction::Pause).await
    }

    /// Resumes a paused campaign.
    pub async fn resume_campaign(&self, id: i64) -> Result<String> {
        self.control_campaign(id, CampaignAction::Resume).await
    }

    /// Stops a campaign.
    pub async fn stop_campaign(&self, id: i64) -> Result<String> {
        self.control_campaign(id, CampaignAction::Stop).await
    }

    /// Campaigns passing `filter`, newest first.
    pub async fn filtered_campaigns(&self, filter: &CampaignFilter) -> Result<Vec<Campaign>> {
        Ok(filter.apply(self.campaigns().await?))
    }

    /// Running and paused campaigns.
    pub async fn active_campaigns(&self) -> Result<Vec<Campaign>> {
        Ok(self
            .campaigns()
            .await?
            .into_iter()
            .filter(|c| c.status.is_active())
            .collect())
    }

    /// Campaign count per status.
    pub async fn campaign_status_counts(&self) -> Result<CampaignStatusCounts> {
        Ok(CampaignStatusCounts::from_campaigns(&self.campaigns().await?))
    }
}
