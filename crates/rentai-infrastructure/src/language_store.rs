//! Language store backed by durable storage.

use std::sync::Arc;

use rentai_core::Result;
use rentai_core::language::{Language, LanguageSnapshot, LanguageStore};
use rentai_core::storage::{DurableStorage, keys};
use tokio::sync::watch;

pub struct LanguageStoreImpl {
    storage: Arc<dyn DurableStorage>,
    state: watch::Sender<Language>,
}

impl LanguageStoreImpl {
    /// Seeds from `language-storage`; anything unreadable falls back to the
    /// default language.
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        let initial = storage
            .get_item(keys::LANGUAGE_SNAPSHOT)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str::<LanguageSnapshot>(&raw).ok())
            .map(|snapshot| snapshot.language)
            .unwrap_or_default();
        let (state, _) = watch::channel(initial);
        Self { storage, state }
    }
}

impl LanguageStore for LanguageStoreImpl {
    fn get(&self) -> Language {
        *self.state.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Language> {
        self.state.subscribe()
    }

    fn set_language(&self, language: Language) -> Result<()> {
        let snapshot = serde_json::to_string(&LanguageSnapshot { language })?;
        self.storage.set_item(keys::LANGUAGE_SNAPSHOT, &snapshot)?;
        self.state.send_replace(language);
        tracing::info!("[LanguageStore] Language set to {}", language);
        Ok(())
    }
}
