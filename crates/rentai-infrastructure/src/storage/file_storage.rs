//! File-backed durable storage.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rentai_core::Result;
use rentai_core::storage::DurableStorage;

use super::atomic_json::AtomicJsonFile;
use crate::paths::RentaiPaths;

type Entries = BTreeMap<String, String>;

/// Stores every key in one JSON object file (`storage.json`).
///
/// Reads go to disk each time so a value written by another process is seen;
/// writes are read-modify-write under a lock.
pub struct FileStorage {
    file: AtomicJsonFile<Entries>,
}

impl FileStorage {
    /// Storage at the default location (`~/.config/rentai/storage.json`).
    pub fn new_default() -> Result<Self> {
        let path = RentaiPaths::default().storage_file()?;
        Ok(Self::with_path(path))
    }

    /// Storage at a custom path (for testing or `storage_dir`).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl DurableStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let entries = self.file.load()?.unwrap_or_default();
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.file.update(Entries::new(), |entries| {
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        })?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if !self.file.path().exists() {
            return Ok(());
        }
        self.file.update(Entries::new(), |entries| {
            entries.remove(key);
            Ok(())
        })?;
        Ok(())
    }
}
