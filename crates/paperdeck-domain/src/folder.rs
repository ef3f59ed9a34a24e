//! Library folders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unique folder identifier (UUID string).
pub type FolderId = String;

/// A folder for organizing saved papers.
///
/// Folders are stored flat; nesting is expressed through `parent_id` and the
/// tree is reconstructed by query. `parent_id == None` means top level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Create a top-level folder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            parent_id: None,
            created_at: Utc::now(),
        }
    }

    /// Create a subfolder under a parent.
    pub fn with_parent(mut self, parent_id: impl Into<FolderId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}
