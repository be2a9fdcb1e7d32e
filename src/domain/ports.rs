use crate::domain::model::WaitlistEntry;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Raw key-value persistence, the shape of a browser's local storage.
/// A missing key reads as `None`.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn set(&self, key: &str, data: &[u8]) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// The whole waitlist collection, read and written in one piece.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn read(&self) -> Result<Vec<WaitlistEntry>>;
    async fn write(&self, entries: &[WaitlistEntry]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn storage_path(&self) -> &str;
    fn storage_key(&self) -> &str;
    fn default_source(&self) -> &str;
    fn success_reset(&self) -> Duration;
}
