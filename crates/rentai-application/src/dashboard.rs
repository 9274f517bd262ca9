//! Authenticated history view.

use std::sync::Arc;

use rentai_core::property::{SavedSearchRequest, SearchQuery};
use rentai_core::recommendation::RecommendationBatch;
use rentai_core::session::SessionStore;
use rentai_core::{RentaiError, Result};
use rentai_interaction::{RecommendationApi, SearchApi};
use serde_json::Value;

pub struct Dashboard {
    session: Arc<dyn SessionStore>,
    recommendation: RecommendationApi,
    search: Option<SearchApi>,
}

impl Dashboard {
    pub fn new(
        session: Arc<dyn SessionStore>,
        recommendation: RecommendationApi,
        search: Option<SearchApi>,
    ) -> Self {
        Self {
            session,
            recommendation,
            search,
        }
    }

    /// Signed-out callers get `Unauthorized` without a request being made.
    fn ensure_signed_in(&self) -> Result<()> {
        if self.session.get().is_authenticated() {
            Ok(())
        } else {
            Err(RentaiError::Unauthorized)
        }
    }

    pub async fn history(&self) -> Result<Vec<RecommendationBatch>> {
        self.ensure_signed_in()?;
        self.recommendation.mine().await
    }

    pub async fn latest(&self) -> Result<Option<RecommendationBatch>> {
        self.ensure_signed_in()?;
        self.recommendation.latest().await
    }

    pub async fn batch(&self, tenant_preference_id: &str) -> Result<RecommendationBatch> {
        self.ensure_signed_in()?;
        self.recommendation
            .get(tenant_preference_id)
            .await?
            .ok_or_else(|| RentaiError::not_found("RecommendationBatch", tenant_preference_id))
    }

    pub fn saved_searches_enabled(&self) -> bool {
        self.search.is_some()
    }

    pub async fn save_search(&self, name: &str, query: &SearchQuery) -> Result<Value> {
        self.ensure_signed_in()?;
        let Some(search) = &self.search else {
            return Err(RentaiError::config("search service is not configured"));
        };
        if name.trim().is_empty() {
            return Err(RentaiError::validation("a saved search needs a name"));
        }
        search
            .save_search(&SavedSearchRequest::new(name.trim(), query))
            .await
    }
}
