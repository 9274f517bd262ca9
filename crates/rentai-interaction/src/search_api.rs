//! Property search service endpoints.

use rentai_core::Result;
use rentai_core::property::{
    PropertyListing, SavedSearchRequest, SearchQuery, SearchResults, normalize_search_response,
};
use serde_json::Value;

use crate::api_client::{ApiClient, ClientContext};

#[derive(Clone)]
pub struct SearchApi {
    client: ApiClient,
}

impl SearchApi {
    pub fn new(base_url: impl Into<String>, context: ClientContext) -> Self {
        Self {
            client: ApiClient::new("SearchApi", base_url, context),
        }
    }

    /// `GET /search?...`. The raw payload is normalized so a bare array comes
    /// back as `{"results": [...]}`.
    pub async fn search_raw(&self, query: &SearchQuery) -> Result<Value> {
        let value: Value = self
            .client
            .get_with_query("search", query.params().to_vec())
            .await?;
        Ok(normalize_search_response(value))
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        let results = SearchResults::from_value(self.search_raw(query).await?)?;
        tracing::debug!(count = results.results.len(), "[SearchApi] Search complete");
        Ok(results)
    }

    /// `GET /property/{id}`. A `null` body means the property does not exist.
    pub async fn property(&self, id: &str) -> Result<Option<PropertyListing>> {
        let url = self.client.resource_url("property", id)?;
        self.client.get_absolute(&url).await
    }

    /// `POST /saved-searches`.
    pub async fn save_search(&self, request: &SavedSearchRequest) -> Result<Value> {
        tracing::info!("[SearchApi] Saving search '{}'", request.name);
        self.client.post("saved-searches", request).await
    }

    /// `GET /health` under the search base.
    pub async fn health(&self) -> Result<Value> {
        self.client.get("health").await
    }
}
