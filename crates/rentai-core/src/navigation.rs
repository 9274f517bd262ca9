//! Routes and the navigation seam.

use serde::{Deserialize, Serialize};
use url::Url;

/// Application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// `/`: landing, recommendation, listing and contact sections.
    Landing,
    /// `/auth/callback`: token handoff.
    AuthCallback,
    /// `/dashboard`: authenticated browse/history view.
    Dashboard,
    NotFound,
}

impl Route {
    pub const ROOT: &'static str = "/";
    pub const AUTH_CALLBACK: &'static str = "/auth/callback";
    pub const DASHBOARD: &'static str = "/dashboard";

    /// Resolves a path, ignoring a single trailing slash.
    pub fn from_path(path: &str) -> Self {
        let trimmed = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        match trimmed {
            "" | Self::ROOT => Route::Landing,
            Self::AUTH_CALLBACK => Route::AuthCallback,
            Self::DASHBOARD => Route::Dashboard,
            _ => Route::NotFound,
        }
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_path(url.path())
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing | Route::NotFound => Self::ROOT,
            Route::AuthCallback => Self::AUTH_CALLBACK,
            Route::Dashboard => Self::DASHBOARD,
        }
    }

    /// Whether token ingestion runs when this route is opened.
    pub fn ingests_token(&self) -> bool {
        matches!(self, Route::Landing | Route::AuthCallback)
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

/// Controls the visible location.
pub trait Navigator: Send + Sync {
    /// Rewrites the visible URL without a navigation (history replace).
    fn replace_url(&self, url: &str);

    /// Forces navigation to an application path.
    fn navigate(&self, path: &str);
}
