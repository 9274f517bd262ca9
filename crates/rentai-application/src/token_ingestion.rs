//! URL-based session handoff.

use std::sync::{Arc, Mutex};

use rentai_core::ingestion::{extract_token, scrub_url};
use rentai_core::navigation::{Navigator, Route};
use rentai_core::notification::{Notification, Notifier, messages};
use rentai_core::session::SessionStore;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestionOutcome {
    /// A token was found and the visible URL was scrubbed.
    /// `persisted` is false when durable storage rejected the token.
    Ingested { persisted: bool },
    /// No token and nothing to report (landing page).
    NoToken,
    /// No token on the callback route; the user was sent back to `/`.
    CallbackFailed,
    /// The URL is the scrubbed address this ingestion just wrote back.
    AlreadyHandled,
}

/// Runs token ingestion once per navigation.
///
/// Only the scrubbed URL written by the previous ingestion is skipped, and
/// only once, so reopening a sign-in link after a logout ingests again.
pub struct TokenIngestion {
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    scrubbed: Mutex<Option<String>>,
}

impl TokenIngestion {
    pub fn new(
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            navigator,
            notifier,
            scrubbed: Mutex::new(None),
        }
    }

    pub fn ingest(&self, url: &Url) -> IngestionOutcome {
        let echoed = self
            .scrubbed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if echoed.as_deref() == Some(url.as_str()) {
            tracing::debug!("[TokenIngestion] {} already handled", url.path());
            return IngestionOutcome::AlreadyHandled;
        }

        let Some(token) = extract_token(url) else {
            if Route::from_url(url) == Route::AuthCallback {
                tracing::warn!("[TokenIngestion] Callback reached without a token");
                self.notifier
                    .notify(Notification::error(messages::SIGN_IN_FAILED));
                self.navigator.navigate(Route::ROOT);
                return IngestionOutcome::CallbackFailed;
            }
            return IngestionOutcome::NoToken;
        };

        let persisted = match self.session.set_token(token) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("[TokenIngestion] Failed to store token: {}", e);
                false
            }
        };
        self.notifier.notify(Notification::success(messages::SIGNED_IN));

        // Runs regardless of the storage result.
        let clean = scrub_url(url);
        self.navigator.replace_url(&clean);
        *self
            .scrubbed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(clean);

        IngestionOutcome::Ingested { persisted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentai_core::notification::NotificationLevel;
    use rentai_core::testing::{NavigationRecord, RecordingNavigator, RecordingNotifier};
    use rentai_core::storage::DurableStorage;
    use rentai_core::{RentaiError, Result};
    use rentai_infrastructure::{MemoryStorage, SessionStoreImpl};

    struct ReadOnlyStorage;

    impl DurableStorage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
            Err(RentaiError::storage("disk full"))
        }

        fn remove_item(&self, _key: &str) -> Result<()> {
            Err(RentaiError::storage("disk full"))
        }
    }

    struct Fixture {
        session: Arc<SessionStoreImpl>,
        navigator: Arc<RecordingNavigator>,
        notifier: Arc<RecordingNotifier>,
        ingestion: TokenIngestion,
    }

    fn fixture() -> Fixture {
        let session = Arc::new(SessionStoreImpl::new(Arc::new(MemoryStorage::new())));
        let navigator = Arc::new(RecordingNavigator::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let ingestion = TokenIngestion::new(session.clone(), navigator.clone(), notifier.clone());
        Fixture {
            session,
            navigator,
            notifier,
            ingestion,
        }
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_query_token_is_ingested_and_scrubbed() {
        let f = fixture();
        let outcome = f
            .ingestion
            .ingest(&url("https://rentai.et/?token=T1&utm=x"));

        assert_eq!(outcome, IngestionOutcome::Ingested { persisted: true });
        assert!(f.session.get().is_authenticated());
        assert_eq!(f.session.stored_token().as_deref(), Some("T1"));
        assert_eq!(f.navigator.current_url().as_deref(), Some("https://rentai.et/"));
        assert_eq!(
            f.notifier.messages(NotificationLevel::Success),
            vec![messages::SIGNED_IN.to_string()]
        );
    }

    #[test]
    fn test_fragment_token_on_callback() {
        let f = fixture();
        f.ingestion
            .ingest(&url("https://rentai.et/auth/callback#access_token=F1"));

        assert_eq!(f.session.get().token(), Some("F1"));
        assert_eq!(
            f.navigator.current_url().as_deref(),
            Some("https://rentai.et/auth/callback")
        );
    }

    #[test]
    fn test_callback_without_token_fails_back_to_root() {
        let f = fixture();
        let outcome = f.ingestion.ingest(&url("https://rentai.et/auth/callback"));

        assert_eq!(outcome, IngestionOutcome::CallbackFailed);
        assert!(!f.session.get().is_authenticated());
        assert!(f.navigator.navigated_to("/"));
        assert_eq!(
            f.notifier.messages(NotificationLevel::Error),
            vec![messages::SIGN_IN_FAILED.to_string()]
        );
    }

    #[test]
    fn test_landing_without_token_is_silent() {
        let f = fixture();
        assert_eq!(
            f.ingestion.ingest(&url("https://rentai.et/")),
            IngestionOutcome::NoToken
        );
        assert!(f.notifier.notifications().is_empty());
        assert!(f.navigator.records().is_empty());
    }

    #[test]
    fn test_scrubbed_url_is_not_ingested_again() {
        let f = fixture();
        f.ingestion.ingest(&url("https://rentai.et/?token=T1"));
        assert_eq!(
            f.ingestion.ingest(&url("https://rentai.et/")),
            IngestionOutcome::AlreadyHandled
        );

        assert_eq!(f.notifier.notifications().len(), 1);
        assert_eq!(
            f.navigator.records(),
            vec![NavigationRecord::Replaced("https://rentai.et/".to_string())]
        );

        // The skip applies to the next navigation only.
        assert_eq!(
            f.ingestion.ingest(&url("https://rentai.et/")),
            IngestionOutcome::NoToken
        );
    }

    #[test]
    fn test_same_link_after_logout_signs_in_again() {
        let f = fixture();
        let link = url("https://rentai.et/auth/callback?token=T1");
        f.ingestion.ingest(&link);
        f.session.logout().unwrap();

        assert_eq!(
            f.ingestion.ingest(&link),
            IngestionOutcome::Ingested { persisted: true }
        );
        assert_eq!(f.session.get().token(), Some("T1"));
        assert_eq!(f.notifier.messages(NotificationLevel::Success).len(), 2);
    }

    #[test]
    fn test_repeated_bare_callback_reports_each_time() {
        let f = fixture();
        let callback = url("https://rentai.et/auth/callback");

        assert_eq!(f.ingestion.ingest(&callback), IngestionOutcome::CallbackFailed);
        assert_eq!(f.ingestion.ingest(&callback), IngestionOutcome::CallbackFailed);
        assert_eq!(f.notifier.messages(NotificationLevel::Error).len(), 2);
    }

    #[test]
    fn test_storage_failure_still_scrubs_url() {
        let session = Arc::new(SessionStoreImpl::new(Arc::new(ReadOnlyStorage)));
        let navigator = Arc::new(RecordingNavigator::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let ingestion = TokenIngestion::new(session.clone(), navigator.clone(), notifier);

        let outcome = ingestion.ingest(&url("https://rentai.et/?access_token=A1"));

        assert_eq!(outcome, IngestionOutcome::Ingested { persisted: false });
        assert!(session.get().is_authenticated());
        assert_eq!(navigator.current_url().as_deref(), Some("https://rentai.et/"));
    }
}
