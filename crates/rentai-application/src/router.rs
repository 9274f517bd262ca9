//! Route resolution with token ingestion and dashboard gating.

use std::sync::Arc;

use rentai_core::navigation::{Navigator, Route};
use rentai_core::session::SessionStore;
use url::Url;

use crate::token_ingestion::{IngestionOutcome, TokenIngestion};

/// Result of opening a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    /// Route the user ends up on after redirects.
    pub route: Route,
    /// Present when the route ran token ingestion.
    pub ingestion: Option<IngestionOutcome>,
}

pub struct Router {
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    ingestion: TokenIngestion,
}

impl Router {
    pub fn new(
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        ingestion: TokenIngestion,
    ) -> Self {
        Self {
            session,
            navigator,
            ingestion,
        }
    }

    pub fn open(&self, url: &Url) -> RouteOutcome {
        let requested = Route::from_url(url);
        tracing::debug!("[Router] Opening {:?} ({})", requested, url.path());

        if requested.ingests_token() {
            let outcome = self.ingestion.ingest(url);
            let route = match (&outcome, requested) {
                // A signed-in callback lands on the dashboard.
                (IngestionOutcome::Ingested { .. }, Route::AuthCallback) => {
                    self.navigator.navigate(Route::DASHBOARD);
                    Route::Dashboard
                }
                (IngestionOutcome::CallbackFailed, _) => Route::Landing,
                _ => requested,
            };
            return RouteOutcome {
                route,
                ingestion: Some(outcome),
            };
        }

        if requested.requires_auth() && !self.session.get().is_authenticated() {
            tracing::info!("[Router] {} requires sign-in, redirecting", requested.path());
            self.navigator.navigate(Route::ROOT);
            return RouteOutcome {
                route: Route::Landing,
                ingestion: None,
            };
        }

        RouteOutcome {
            route: requested,
            ingestion: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentai_core::session::UserProfile;
    use rentai_core::testing::{RecordingNavigator, RecordingNotifier};
    use rentai_infrastructure::{MemoryStorage, SessionStoreImpl};

    fn router() -> (Router, Arc<SessionStoreImpl>, Arc<RecordingNavigator>) {
        let session = Arc::new(SessionStoreImpl::new(Arc::new(MemoryStorage::new())));
        let navigator = Arc::new(RecordingNavigator::new());
        let ingestion = TokenIngestion::new(
            session.clone(),
            navigator.clone(),
            Arc::new(RecordingNotifier::new()),
        );
        (
            Router::new(session.clone(), navigator.clone(), ingestion),
            session,
            navigator,
        )
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_dashboard_requires_session() {
        let (router, _, navigator) = router();
        let outcome = router.open(&url("https://rentai.et/dashboard"));
        assert_eq!(outcome.route, Route::Landing);
        assert!(navigator.navigated_to("/"));
    }

    #[test]
    fn test_dashboard_open_when_signed_in() {
        let (router, session, navigator) = router();
        session
            .login(
                UserProfile {
                    id: "1".to_string(),
                    email: None,
                    name: None,
                },
                "t".to_string(),
            )
            .unwrap();

        let outcome = router.open(&url("https://rentai.et/dashboard"));
        assert_eq!(outcome.route, Route::Dashboard);
        assert!(navigator.records().is_empty());
    }

    #[test]
    fn test_callback_with_token_lands_on_dashboard() {
        let (router, session, navigator) = router();
        let outcome = router.open(&url("https://rentai.et/auth/callback?token=abc"));

        assert_eq!(outcome.route, Route::Dashboard);
        assert!(session.get().is_authenticated());
        assert!(navigator.navigated_to("/dashboard"));
    }

    #[test]
    fn test_reopening_sign_in_link_after_logout() {
        let (router, session, _) = router();
        let link = url("https://rentai.et/auth/callback?token=T1");

        router.open(&link);
        session.logout().unwrap();
        let outcome = router.open(&link);

        assert_eq!(
            outcome.ingestion,
            Some(IngestionOutcome::Ingested { persisted: true })
        );
        assert_eq!(outcome.route, Route::Dashboard);
        assert!(session.get().is_authenticated());
    }

    #[test]
    fn test_landing_runs_ingestion() {
        let (router, session, _) = router();
        let outcome = router.open(&url("https://rentai.et/#token=xyz"));

        assert_eq!(outcome.route, Route::Landing);
        assert_eq!(
            outcome.ingestion,
            Some(IngestionOutcome::Ingested { persisted: true })
        );
        assert_eq!(session.get().token(), Some("xyz"));
    }

    #[test]
    fn test_unknown_path() {
        let (router, _, _) = router();
        let outcome = router.open(&url("https://rentai.et/pricing"));
        assert_eq!(outcome.route, Route::NotFound);
        assert!(outcome.ingestion.is_none());
    }
}
