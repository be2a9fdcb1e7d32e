use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_SOURCE: &str = "landing";
pub const DEFAULT_STORAGE_KEY: &str = "waitlist";

/// One signup as it is persisted. Keys are camelCase on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    #[serde(default)]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub source: String,
    pub created_at: String,
    /// Keys written by other producers survive a full rewrite.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl WaitlistEntry {
    pub fn new(id: String, email: String, source: &SourceTag, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            source: source.as_str().to_string(),
            created_at: format_timestamp(created_at),
            extra: serde_json::Map::new(),
        }
    }
}

/// ISO-8601, UTC, millisecond precision with a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Label of the page surface that produced a signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceTag(String);

impl SourceTag {
    /// Stored as given; an empty tag stays empty. Only an absent tag gets
    /// a default.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SourceTag {
    fn default() -> Self {
        Self(DEFAULT_SOURCE.to_string())
    }
}

impl From<&str> for SourceTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<Option<&str>> for SourceTag {
    fn from(tag: Option<&str>) -> Self {
        tag.map(Self::new).unwrap_or_default()
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named handle of the stored collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StorageKey {
    fn default() -> Self {
        Self(DEFAULT_STORAGE_KEY.to_string())
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Success signal returned by a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub entry: WaitlistEntry,
    pub position: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_serializes_with_camel_case_keys() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 30).unwrap();
        let entry = WaitlistEntry::new(
            "waitlist-abc-1234567".to_string(),
            "a@example.com".to_string(),
            &SourceTag::new("hero"),
            at,
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["createdAt"], "2026-10-19T08:15:30.000Z");
        assert_eq!(value["source"], "hero");
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_entry_tolerates_missing_optional_keys_and_keeps_extra() {
        let raw = r#"{"email":"a@example.com","createdAt":"2025-01-01T00:00:00.000Z","referrer":"x"}"#;
        let entry: WaitlistEntry = serde_json::from_str(raw).unwrap();

        assert_eq!(entry.id, "");
        assert_eq!(entry.source, "");
        assert_eq!(entry.extra["referrer"], "x");

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["referrer"], "x");
    }

    #[test]
    fn test_source_tag_defaults() {
        assert_eq!(SourceTag::default().as_str(), "landing");
        assert_eq!(SourceTag::new("").as_str(), "");
        assert_eq!(SourceTag::from(None).as_str(), "landing");
        assert_eq!(SourceTag::from(Some("hero")).as_str(), "hero");
    }
}
