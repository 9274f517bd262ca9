//! HTTP clients for the RentAI recommendation and search services.

pub mod api_client;
pub mod recommendation_api;
pub mod search_api;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod transport;

use std::sync::Arc;
use std::time::Duration;

use rentai_core::config::AppConfig;

pub use crate::api_client::{ApiClient, ClientContext};
pub use crate::recommendation_api::RecommendationApi;
pub use crate::search_api::SearchApi;
pub use crate::transport::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, ReqwestTransport};

/// Both service clients, built from one configuration.
///
/// `search` is `None` when no search base URL is configured; every search
/// surface keys off that.
#[derive(Clone)]
pub struct ApiClients {
    pub recommendation: RecommendationApi,
    pub search: Option<SearchApi>,
}

impl ApiClients {
    pub fn from_config(config: &AppConfig, context: ClientContext) -> Self {
        let search = config
            .search_api_url
            .as_deref()
            .filter(|_| config.search_enabled())
            .map(|url| SearchApi::new(url, context.clone()));
        Self {
            recommendation: RecommendationApi::new(&config.recommendation_api_url, context),
            search,
        }
    }

    pub fn search_enabled(&self) -> bool {
        self.search.is_some()
    }
}

/// Production transport honoring `request_timeout_secs`.
pub fn default_transport(config: &AppConfig) -> Arc<dyn HttpTransport> {
    Arc::new(ReqwestTransport::new(Duration::from_secs(
        config.request_timeout_secs,
    )))
}
