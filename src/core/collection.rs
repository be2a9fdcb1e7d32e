use crate::domain::model::{StorageKey, WaitlistEntry};
use crate::domain::ports::{EntryStore, Storage};
use crate::utils::error::{Result, WaitlistError};
use async_trait::async_trait;

/// Keeps the collection as one JSON array under a single storage key.
pub struct JsonEntryStore<S: Storage> {
    storage: S,
    key: StorageKey,
}

impl<S: Storage> JsonEntryStore<S> {
    pub fn new(storage: S, key: StorageKey) -> Self {
        Self { storage, key }
    }

    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[async_trait]
impl<S: Storage> EntryStore for JsonEntryStore<S> {
    async fn read(&self) -> Result<Vec<WaitlistEntry>> {
        let Some(raw) = self.storage.get(self.key.as_str()).await? else {
            return Ok(Vec::new());
        };

        serde_json::from_slice(&raw).map_err(|e| {
            WaitlistError::storage(format!(
                "stored value under `{}` is not a valid entry list: {}",
                self.key, e
            ))
        })
    }

    async fn write(&self, entries: &[WaitlistEntry]) -> Result<()> {
        let data = serde_json::to_vec(entries)?;
        self.storage.set(self.key.as_str(), &data).await
    }
}
