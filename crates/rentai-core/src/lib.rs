//! Domain layer of the RentAI client.
//!
//! Holds the models exchanged with the recommendation and search services,
//! the session and language store contracts, the tenant preference form and
//! the seams (storage, navigation, notifications) the outer layers implement.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod language;
pub mod navigation;
pub mod notification;
pub mod preference;
pub mod presentation;
pub mod property;
pub mod recommendation;
pub mod session;
pub mod storage;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod wire;

// Re-export common error type
pub use error::{RentaiError, Result};
