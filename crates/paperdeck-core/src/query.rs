//! Search, filter, sort, and grouping over library items.
//!
//! Everything here is pure derivation: queries take owned item vectors and
//! return them rearranged, never touching store state.

use std::cmp::Ordering;
use std::collections::HashMap;

use paperdeck_domain::{FolderId, LibraryItemView, ReadStatus};
use paperdeck_library::LibraryMetaStore;

/// Group label for papers not filed in any folder.
pub const UNFILED_GROUP: &str = "Unfiled";

/// Group label for papers without tags.
pub const UNTAGGED_GROUP: &str = "Untagged";

/// Sort orders for library lists. Date orders are newest-first; string
/// orders are case-insensitive ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    RecentSaved,
    RecentUpdated,
    Title,
    Source,
}

/// Which slice of the library a query covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Scope {
    #[default]
    All,
    /// Papers filed in exactly this folder; `None` selects unfiled papers.
    Folder(Option<FolderId>),
    /// Papers carrying this tag (exact, case-sensitive).
    Tag(String),
}

/// A declarative query over the saved-paper collection.
///
/// Stages apply in order: free-text search, status filter, scope filter,
/// sort.
#[derive(Debug, Clone, Default)]
pub struct LibraryQuery {
    /// Case-insensitive substring match over title, intro summary, and tags.
    pub search: String,
    pub status: Option<ReadStatus>,
    pub scope: Scope,
    pub sort: SortOrder,
}

impl LibraryQuery {
    pub fn apply(&self, mut items: Vec<LibraryItemView>) -> Vec<LibraryItemView> {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            items.retain(|item| {
                item.paper.display_title().to_lowercase().contains(&needle)
                    || item.paper.summary_text().to_lowercase().contains(&needle)
                    || item.meta.tags.join(" ").to_lowercase().contains(&needle)
            });
        }

        if let Some(status) = self.status {
            items.retain(|item| item.meta.status == status);
        }

        match &self.scope {
            Scope::All => {}
            Scope::Folder(folder_id) => items.retain(|item| item.meta.folder_id == *folder_id),
            Scope::Tag(tag) => items.retain(|item| item.meta.tags.iter().any(|t| t == tag)),
        }

        match self.sort {
            SortOrder::RecentSaved => {
                items.sort_by(|a, b| b.meta.saved_at.cmp(&a.meta.saved_at))
            }
            SortOrder::RecentUpdated => {
                items.sort_by(|a, b| b.meta.updated_at.cmp(&a.meta.updated_at))
            }
            SortOrder::Title => items.sort_by(|a, b| {
                compare_names(a.paper.display_title(), b.paper.display_title())
            }),
            SortOrder::Source => {
                items.sort_by(|a, b| compare_names(&a.paper.source, &b.paper.source))
            }
        }
        items
    }
}

/// Group items by resolved folder name, unfiled papers under
/// [`UNFILED_GROUP`]. Group keys come back sorted ascending; item order
/// within a group is preserved.
pub fn group_by_folder(
    items: Vec<LibraryItemView>,
    store: &LibraryMetaStore,
) -> Vec<(String, Vec<LibraryItemView>)> {
    let mut groups: HashMap<String, Vec<LibraryItemView>> = HashMap::new();
    for item in items {
        let key = store
            .folder_name(item.meta.folder_id.as_deref())
            .unwrap_or(UNFILED_GROUP)
            .to_string();
        groups.entry(key).or_default().push(item);
    }
    into_sorted_groups(groups)
}

/// Group items by tag. An item with N tags appears in N groups; items
/// without tags land under [`UNTAGGED_GROUP`].
pub fn group_by_tag(items: Vec<LibraryItemView>) -> Vec<(String, Vec<LibraryItemView>)> {
    let mut groups: HashMap<String, Vec<LibraryItemView>> = HashMap::new();
    for item in items {
        if item.meta.tags.is_empty() {
            groups
                .entry(UNTAGGED_GROUP.to_string())
                .or_default()
                .push(item);
        } else {
            for tag in item.meta.tags.clone() {
                groups.entry(tag).or_default().push(item.clone());
            }
        }
    }
    into_sorted_groups(groups)
}

fn into_sorted_groups(
    groups: HashMap<String, Vec<LibraryItemView>>,
) -> Vec<(String, Vec<LibraryItemView>)> {
    let mut result: Vec<(String, Vec<LibraryItemView>)> = groups.into_iter().collect();
    result.sort_by(|(a, _), (b, _)| compare_names(a, b));
    result
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
