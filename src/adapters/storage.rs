use crate::domain::ports::Storage;
use crate::utils::error::{Result, WaitlistError};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// File-backed key-value storage: each key lives in `<base_path>/<key>.json`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl Storage for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let full_path = self.path_for(key);
        match tokio::fs::read(&full_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No stored value at {}", full_path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, data: &[u8]) -> Result<()> {
        let full_path = self.path_for(key);
        tokio::fs::create_dir_all(&self.base_path).await?;

        // 先寫暫存檔再 rename，避免寫到一半留下壞掉的 JSON
        let tmp_path = self.base_path.join(format!(".{}.json.tmp", key));
        let written = match tokio::fs::write(&tmp_path, data).await {
            Ok(()) => tokio::fs::rename(&tmp_path, &full_path).await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!("Could not remove {}: {}", tmp_path.display(), cleanup);
                }
            }
            return Err(e.into());
        }

        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }
}

/// In-memory storage for tests and embedding. Reads and writes can be made
/// to fail to exercise the storage error path.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, data: impl Into<Vec<u8>>) -> Self {
        let storage = Self::default();
        if let Ok(mut values) = storage.values.lock() {
            values.insert(key.to_string(), data.into());
        }
        storage
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.values
            .lock()
            .map_err(|_| WaitlistError::storage("memory storage lock poisoned"))
    }
}

impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(WaitlistError::storage("simulated read failure"));
        }
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, data: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(WaitlistError::storage("simulated write failure (quota exceeded)"));
        }
        self.lock()?.insert(key.to_string(), data.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_storage_missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        assert!(storage.get("waitlist").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_local_storage_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested"));

        storage.set("waitlist", b"[]").await.unwrap();
        assert_eq!(storage.get("waitlist").await.unwrap(), Some(b"[]".to_vec()));
        assert!(storage.path_for("waitlist").exists());
        assert!(!temp_dir.path().join("nested/.waitlist.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_local_storage_failed_rename_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        // 目標路徑是目錄時 rename 會失敗
        std::fs::create_dir(storage.path_for("waitlist")).unwrap();
        std::fs::write(storage.path_for("waitlist").join("keep"), b"x").unwrap();

        let err = storage.set("waitlist", b"[]").await.unwrap_err();
        assert_eq!(err.category(), crate::utils::error::ErrorCategory::Storage);
        assert!(!temp_dir.path().join(".waitlist.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_memory_storage_failure_injection() {
        let storage = MemoryStorage::with_value("waitlist", "[]");
        storage.fail_writes(true);

        assert!(storage.set("waitlist", b"[1]").await.is_err());
        assert_eq!(storage.write_count(), 0);
        assert_eq!(storage.raw("waitlist"), Some(b"[]".to_vec()));

        storage.fail_reads(true);
        assert!(storage.get("waitlist").await.is_err());
    }
}
