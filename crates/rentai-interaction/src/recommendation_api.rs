//! Recommendation service endpoints.

use rentai_core::Result;
use rentai_core::config::strip_api_prefix;
use rentai_core::preference::TenantPreference;
use rentai_core::recommendation::{
    FeedbackRequest, RecommendationBatch, RecommendationResponse,
};
use serde_json::Value;

use crate::api_client::{ApiClient, ClientContext};

#[derive(Clone)]
pub struct RecommendationApi {
    client: ApiClient,
}

impl RecommendationApi {
    pub fn new(base_url: impl Into<String>, context: ClientContext) -> Self {
        Self {
            client: ApiClient::new("RecommendationApi", base_url, context),
        }
    }

    /// `POST /recommendations`.
    pub async fn submit(&self, preference: &TenantPreference) -> Result<RecommendationBatch> {
        let response: RecommendationResponse =
            self.client.post("recommendations", preference).await?;
        let batch = response.into_batch();
        tracing::info!(
            count = batch.recommendations.len(),
            preference_id = ?batch.tenant_preference_id,
            "[RecommendationApi] Recommendations received"
        );
        Ok(batch)
    }

    /// `GET /recommendations/mine`: every batch for the signed-in user.
    pub async fn mine(&self) -> Result<Vec<RecommendationBatch>> {
        let batches: Option<Vec<RecommendationBatch>> =
            self.client.get("recommendations/mine").await?;
        Ok(batches.unwrap_or_default())
    }

    /// `GET /recommendations/latest`. `None` when the service has nothing yet.
    pub async fn latest(&self) -> Result<Option<RecommendationBatch>> {
        self.client.get("recommendations/latest").await
    }

    /// `GET /recommendations/{id}`.
    pub async fn get(&self, tenant_preference_id: &str) -> Result<Option<RecommendationBatch>> {
        let url = self.client.resource_url("recommendations", tenant_preference_id)?;
        self.client.get_absolute(&url).await
    }

    /// `POST /recommendations/feedback`.
    pub async fn submit_feedback(&self, feedback: &FeedbackRequest) -> Result<Value> {
        self.client.post("recommendations/feedback", feedback).await
    }

    /// Root-level `GET /health`, outside the `/api/v1` prefix.
    pub async fn health(&self) -> Result<Value> {
        let url = format!("{}/health", strip_api_prefix(self.client.base_url()));
        self.client.get_absolute(&url).await
    }
}
