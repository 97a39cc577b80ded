//! Call history and call processing endpoints.

use serde_json::{Value, json};
use tracing::debug;
use voxdial_core::error::Result;
use voxdial_core::models::{
    CallHistoryFilters, CallHistoryRecord, CallStatus, InboundCallResponse, ProcessAiRequest,
    ProcessAiResponse,
};

use super::client::ApiClient;

/// Row limit of the filtered history shortcuts.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

impl ApiClient {
    /// `GET /v1/calls/history` with the set filters.
    pub async fn call_history(&self, filters: &CallHistoryFilters) -> Result<Vec<CallHistoryRecord>> {
        let records: Vec<CallHistoryRecord> = self
            .get("/v1/calls/history")
            .queries(filters.to_query())
            .send_json()
            .await?;
        debug!(count = records.len(), "Fetched call history");
        Ok(records)
    }

    /// History of one campaign.
    pub async fn call_history_by_campaign(
        &self,
        campaign_name: &str,
        limit: Option<u32>,
    ) -> Result<Vec<CallHistoryRecord>> {
        self.call_history(&CallHistoryFilters {
            campaign_name: Some(campaign_name.to_string()),
            limit: Some(limit.unwrap_or(DEFAULT_HISTORY_LIMIT)),
            ..CallHistoryFilters::default()
        })
        .await
    }

    /// History of calls with one status.
    pub async fn call_history_by_status(
        &self,
        status: CallStatus,
        limit: Option<u32>,
    ) -> Result<Vec<CallHistoryRecord>> {
        self.call_history(&CallHistoryFilters {
            status: Some(status),
            limit: Some(limit.unwrap_or(DEFAULT_HISTORY_LIMIT)),
            ..CallHistoryFilters::default()
        })
        .await
    }

    /// History of one region.
    pub async fn call_history_by_region(
        &self,
        region: &str,
        limit: Option<u32>,
    ) -> Result<Vec<CallHistoryRecord>> {
        self.call_history(&CallHistoryFilters {
            region: Some(region.to_string()),
            limit: Some(limit.unwrap_or(DEFAULT_HISTORY_LIMIT)),
            ..CallHistoryFilters::default()
        })
        .await
    }

    /// `POST /v1/calls/inbound`. Sends `{}` when there is no call data.
    pub async fn handle_inbound_call(&self, call_data: Option<&Value>) -> Result<InboundCallResponse> {
        let empty = json!({});
        self.post("/v1/calls/inbound")
            .json(call_data.unwrap_or(&empty))
            .send_json()
            .await
    }

    /// `POST /v1/calls/process-ai`: transcribe and summarize a recording.
    pub async fn process_ai(&self, call_id: i64, audio_url: &str) -> Result<ProcessAiResponse> {
        let request = ProcessAiRequest {
            call_id,
            audio_url: audio_url.to_string(),
        };
        self.post("/v1/calls/process-ai")
            .json(&request)
            .send_json()
            .await
    }
}
