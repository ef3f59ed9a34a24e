//! Per-paper library metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::folder::FolderId;

/// Read progress for a saved paper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    #[default]
    Unread,
    Reading,
    Finished,
}

impl ReadStatus {
    /// All statuses, in progression order.
    pub fn all() -> [ReadStatus; 3] {
        [Self::Unread, Self::Reading, Self::Finished]
    }

    /// Display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Unread => "Unread",
            Self::Reading => "Reading",
            Self::Finished => "Finished",
        }
    }
}

/// User-owned metadata for one saved paper.
///
/// Exactly one of these exists per currently-saved paper id; the sole
/// creation and deletion path is the meta store's saved-id reconciliation.
/// Field names serialize in camelCase so snapshots written by earlier app
/// builds load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItemMeta {
    pub paper_id: String,
    /// Normalized tag list: trimmed, duplicates removed, insertion order kept.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Containing folder; `None` means unfiled (root).
    #[serde(default)]
    pub folder_id: Option<FolderId>,
    #[serde(default)]
    pub status: ReadStatus,
    #[serde(default)]
    pub note: String,
    pub saved_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LibraryItemMeta {
    /// Fresh metadata with defaults, timestamped now.
    pub fn new(paper_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            paper_id: paper_id.into(),
            tags: Vec::new(),
            folder_id: None,
            status: ReadStatus::Unread,
            note: String::new(),
            saved_at: now,
            updated_at: now,
        }
    }
}

/// Normalize a raw tag list: trim whitespace, drop empties, dedupe while
/// preserving first-occurrence order. Comparison is case-sensitive.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result: Vec<String> = Vec::new();
    for tag in tags {
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if !result.iter().any(|t| t == trimmed) {
            result.push(trimmed.to_string());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn status_defaults_to_unread() {
        let meta = LibraryItemMeta::new("p1");
        assert_eq!(meta.status, ReadStatus::Unread);
        assert!(meta.tags.is_empty());
        assert!(meta.folder_id.is_none());
        assert_eq!(meta.saved_at, meta.updated_at);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReadStatus::Finished).unwrap(),
            "\"finished\""
        );
        let back: ReadStatus = serde_json::from_str("\"reading\"").unwrap();
        assert_eq!(back, ReadStatus::Reading);
    }

    #[rstest]
    #[case(vec!["a", "", " a ", "b"], vec!["a", "b"])]
    #[case(vec!["  ", "\t"], vec![])]
    #[case(vec!["B", "b"], vec!["B", "b"])]
    #[case(vec!["x", "y", "x"], vec!["x", "y"])]
    fn tag_normalization(#[case] input: Vec<&str>, #[case] expected: Vec<&str>) {
        assert_eq!(normalize_tags(input), expected);
    }

    #[test]
    fn meta_round_trips_camel_case() {
        let meta = LibraryItemMeta::new("p1");
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"paperId\""));
        assert!(json.contains("\"savedAt\""));
        let back: LibraryItemMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }
}
