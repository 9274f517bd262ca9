//! Infrastructure layer of the RentAI client: file paths, durable storage,
//! configuration and the persisted session/language stores.

pub mod config_service;
pub mod language_store;
pub mod paths;
pub mod session_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::language_store::LanguageStoreImpl;
pub use crate::session_store::SessionStoreImpl;
pub use crate::storage::{FileStorage, MemoryStorage};
