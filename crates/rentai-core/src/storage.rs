//! Durable key/value storage abstraction.
//!
//! Mirrors the small surface of browser local storage: string keys, string
//! values. Only the session and language stores write through this trait.

use crate::error::Result;

/// Keys used in durable storage.
pub mod keys {
    /// Raw bearer token.
    pub const TOKEN: &str = "token";
    /// JSON snapshot of the authentication store.
    pub const AUTH_SNAPSHOT: &str = "auth-storage";
    /// JSON snapshot of the language store.
    pub const LANGUAGE_SNAPSHOT: &str = "language-storage";
}

/// Synchronous string key/value storage that survives restarts.
///
/// Reads are synchronous so stores can seed their state during construction.
pub trait DurableStorage: Send + Sync {
    /// Returns the value for `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
