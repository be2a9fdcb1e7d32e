use crate::domain::model::{SourceTag, Submission, WaitlistEntry};
use crate::domain::ports::EntryStore;
use crate::utils::error::{Result, WaitlistError};
use crate::utils::id::{generate_id, ENTRY_ID_PREFIX};
use crate::utils::validation::validate_email;
use chrono::Utc;
use tokio::sync::Mutex;

/// Validates, de-duplicates and records waitlist signups.
///
/// Submissions through one flow run one at a time, so the read-modify-write
/// of the collection is not interleaved in-process. Two processes sharing the
/// same storage can still both pass the duplicate check and both append.
pub struct WaitlistFlow<E: EntryStore> {
    store: E,
    default_source: SourceTag,
    in_flight: Mutex<()>,
}

impl<E: EntryStore> WaitlistFlow<E> {
    pub fn new(store: E) -> Self {
        Self::with_default_source(store, SourceTag::default())
    }

    pub fn with_default_source(store: E, default_source: SourceTag) -> Self {
        Self {
            store,
            default_source,
            in_flight: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &E {
        &self.store
    }

    pub fn default_source(&self) -> &SourceTag {
        &self.default_source
    }

    /// `source` of `None` uses the flow's default tag; `Some("")` is kept
    /// as an empty tag.
    pub async fn submit(&self, email: &str, source: Option<&str>) -> Result<Submission> {
        let source = match source {
            Some(tag) => SourceTag::new(tag),
            None => self.default_source.clone(),
        };

        if let Err(e) = validate_email("email", email) {
            tracing::warn!("Rejected waitlist signup from {}: {}", source, e);
            return Err(e);
        }

        let _guard = self.in_flight.lock().await;

        let mut entries = self.store.read().await.map_err(|e| {
            tracing::error!("Failed to load waitlist: {}", e);
            e
        })?;
        tracing::debug!("Loaded {} existing waitlist entries", entries.len());

        // 大小寫敏感的完全比對
        if entries.iter().any(|existing| existing.email == email) {
            tracing::warn!("Duplicate waitlist signup from {}", source);
            return Err(WaitlistError::DuplicateError {
                email: email.to_string(),
            });
        }

        let entry = WaitlistEntry::new(
            generate_id(Some(ENTRY_ID_PREFIX)),
            email.to_string(),
            &source,
            Utc::now(),
        );
        entries.push(entry.clone());

        self.store.write(&entries).await.map_err(|e| {
            tracing::error!("Failed to persist waitlist: {}", e);
            e
        })?;

        tracing::info!("✅ Added {} to the waitlist (source: {})", entry.id, source);

        Ok(Submission {
            entry,
            position: entries.len(),
        })
    }

    pub async fn entries(&self) -> Result<Vec<WaitlistEntry>> {
        self.store.read().await
    }

    pub async fn count(&self) -> Result<usize> {
        Ok(self.store.read().await?.len())
    }
}
