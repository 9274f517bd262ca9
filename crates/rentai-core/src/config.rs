//! Client configuration model.

use serde::{Deserialize, Serialize};

pub const DEFAULT_RECOMMENDATION_API_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAP_READY_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_QUERY_RETRIES: u32 = 1;
const API_PREFIX: &str = "/api/v1";

/// Root of `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Recommendation service base, ending in `/api/v1`.
    pub recommendation_api_url: String,
    /// Search service base. Absent means browsing is switched off.
    pub search_api_url: Option<String>,
    /// Map provider key. Absent means the map panel is a static card.
    pub map_api_key: Option<String>,
    /// Directory for durable storage; defaults to the platform config dir.
    pub storage_dir: Option<String>,
    pub request_timeout_secs: u64,
    pub map_ready_timeout_secs: u64,
    /// Automatic retries for listing queries.
    pub query_retries: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recommendation_api_url: DEFAULT_RECOMMENDATION_API_URL.to_string(),
            search_api_url: None,
            map_api_key: None,
            storage_dir: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            map_ready_timeout_secs: DEFAULT_MAP_READY_TIMEOUT_SECS,
            query_retries: DEFAULT_QUERY_RETRIES,
        }
    }
}

impl AppConfig {
    /// Feature flag: the search service is configured.
    pub fn search_enabled(&self) -> bool {
        self.search_api_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Feature flag: a map provider key is configured.
    pub fn map_enabled(&self) -> bool {
        self.map_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

/// Removes a trailing slash and a trailing `/api/v1`.
pub fn strip_api_prefix(base: &str) -> &str {
    let base = base.trim_end_matches('/');
    base.strip_suffix(API_PREFIX).unwrap_or(base)
}
