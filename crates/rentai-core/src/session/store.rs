//! Session store trait.

use tokio::sync::watch;

use super::model::{Session, UserProfile};
use crate::error::Result;

/// Single owner of the authentication state.
///
/// Implementations seed themselves from durable storage at construction and
/// are the only component allowed to write the token key.
pub trait SessionStore: Send + Sync {
    /// Current snapshot.
    fn get(&self) -> Session;

    /// Receiver that observes every change made through the mutators.
    fn subscribe(&self) -> watch::Receiver<Session>;

    /// Signs in with a known profile.
    fn login(&self, user: UserProfile, token: String) -> Result<()>;

    /// Signs out and removes the token from durable storage.
    fn logout(&self) -> Result<()>;

    /// Signs in from a bare token (URL handoff). The profile, if any, is
    /// decoded from the token for display only.
    fn set_token(&self, token: String) -> Result<()>;

    /// Token as currently held in durable storage.
    ///
    /// The request interceptor reads this rather than the in-memory copy.
    fn stored_token(&self) -> Option<String>;
}
