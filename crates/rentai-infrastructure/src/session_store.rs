//! Session store backed by durable storage.

use std::sync::Arc;

use rentai_core::{RentaiError, Result};
use rentai_core::session::token::profile_from_token;
use rentai_core::session::{AuthSnapshot, Session, SessionStore, UserProfile};
use rentai_core::storage::{DurableStorage, keys};
use tokio::sync::watch;

/// Session store that echoes every change to durable storage.
///
/// State is seeded synchronously in [`SessionStoreImpl::new`], so the first
/// `get()` already reflects a token persisted by a previous run.
pub struct SessionStoreImpl {
    storage: Arc<dyn DurableStorage>,
    state: watch::Sender<Session>,
}

impl SessionStoreImpl {
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        let initial = Self::load_session(storage.as_ref());
        tracing::debug!(
            authenticated = initial.is_authenticated(),
            "[SessionStore] Seeded from durable storage"
        );
        let (state, _) = watch::channel(initial);
        Self { storage, state }
    }

    fn load_session(storage: &dyn DurableStorage) -> Session {
        let token = match storage.get_item(keys::TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("[SessionStore] Failed to read stored token: {}", e);
                None
            }
        };
        let Some(token) = token else {
            return Session::anonymous();
        };

        let snapshot = storage
            .get_item(keys::AUTH_SNAPSHOT)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str::<AuthSnapshot>(&raw).ok());

        // A snapshot written for a different token describes someone else.
        let user = match snapshot {
            Some(snapshot) if snapshot.token.as_deref() == Some(token.as_str()) => snapshot.user,
            _ => profile_from_token(&token),
        };

        Session::authenticated(token, user)
    }

    /// Writes the token and the snapshot, attempting both even when the
    /// first write fails. Returns the first error.
    ///
    /// A signed-out session whose token cannot be removed overwrites it with
    /// an empty value, which loads as anonymous. Storage that rejects every
    /// write leaves the previous run's token on disk.
    fn persist(&self, session: &Session) -> Result<()> {
        let token_result = match session.token() {
            Some(token) => self.storage.set_item(keys::TOKEN, token),
            None => self.storage.remove_item(keys::TOKEN).or_else(|e| {
                tracing::warn!("[SessionStore] Failed to remove token ({}), blanking it", e);
                self.storage.set_item(keys::TOKEN, "").map_err(|_| e)
            }),
        };
        let snapshot_result = serde_json::to_string(&session.to_snapshot())
            .map_err(RentaiError::from)
            .and_then(|snapshot| self.storage.set_item(keys::AUTH_SNAPSHOT, &snapshot));
        token_result.and(snapshot_result)
    }

    /// Publishes `session` in memory, then persists it.
    ///
    /// The in-memory state changes even when persisting fails; the failure is
    /// still returned.
    fn replace(&self, session: Session) -> Result<()> {
        let result = self.persist(&session);
        self.state.send_replace(session);
        if let Err(e) = &result {
            tracing::warn!("[SessionStore] Failed to persist session: {}", e);
        }
        result
    }
}

impl SessionStore for SessionStoreImpl {
    fn get(&self) -> Session {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    fn login(&self, user: UserProfile, token: String) -> Result<()> {
        tracing::info!("[SessionStore] Login as {}", user.display_name());
        self.replace(Session::authenticated(token, Some(user)))
    }

    fn logout(&self) -> Result<()> {
        tracing::info!("[SessionStore] Logout");
        self.replace(Session::anonymous())
    }

    fn set_token(&self, token: String) -> Result<()> {
        let user = profile_from_token(&token);
        tracing::info!(
            has_profile = user.is_some(),
            "[SessionStore] Token received"
        );
        self.replace(Session::authenticated(token, user))
    }

    fn stored_token(&self) -> Option<String> {
        match self.storage.get_item(keys::TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("[SessionStore] Failed to read stored token: {}", e);
                None
            }
        }
    }
}
