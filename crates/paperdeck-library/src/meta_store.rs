//! The library metadata store: per-paper metadata and the folder forest.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;

use chrono::Utc;
use paperdeck_domain::{
    normalize_tags, Folder, FolderId, LibraryItemMeta, LibraryItemView, Paper, ReadStatus,
};
use tracing::{debug, warn};

use crate::snapshot::{read_snapshot, write_snapshot, LibrarySnapshot, SNAPSHOT_VERSION};

/// Owns saved-paper metadata and the folder hierarchy.
///
/// Folders live in a flat arena keyed by id; parent/child/descendant
/// relationships are derived by query. Folder counts stay small (tens, not
/// millions), so the tree is reconstructed per query instead of being kept
/// as an owned nested structure.
///
/// All mutations are synchronous and persist a full snapshot on success.
/// Mutating methods assume a single logical owner; there is no internal
/// locking.
#[derive(Debug, Default)]
pub struct LibraryMetaStore {
    metas: HashMap<String, LibraryItemMeta>,
    folders: HashMap<FolderId, Folder>,
    /// Folder context newly saved papers default into.
    active_folder_id: Option<FolderId>,
    storage_path: Option<PathBuf>,
}

impl LibraryMetaStore {
    /// An unpersisted store, for tests and previews.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store backed by a snapshot file. A missing or corrupt snapshot
    /// yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut store = Self {
            storage_path: Some(path.clone()),
            ..Self::default()
        };
        if let Some(snapshot) = read_snapshot::<LibrarySnapshot>(&path) {
            store.metas = snapshot
                .metas
                .into_iter()
                .map(|m| (m.paper_id.clone(), m))
                .collect();
            store.folders = snapshot
                .folders
                .into_iter()
                .map(|f| (f.id.clone(), f))
                .collect();
        }
        store
    }

    // MARK: - Saved-set reconciliation

    /// Reconcile metadata against the authoritative saved-id set.
    ///
    /// Newly saved ids get fresh metadata defaulted into the active folder
    /// context; ids no longer saved lose their metadata. This is the sole
    /// creation and deletion path for [`LibraryItemMeta`]. Idempotent: an
    /// empty diff does not persist and touches no timestamps.
    pub fn sync_saved_ids(&mut self, saved_ids: &HashSet<String>) {
        let mut added = 0usize;
        for id in saved_ids {
            if !self.metas.contains_key(id) {
                let mut meta = LibraryItemMeta::new(id.clone());
                meta.folder_id = self.active_folder_id.clone();
                self.metas.insert(id.clone(), meta);
                added += 1;
            }
        }

        let stale: Vec<String> = self
            .metas
            .keys()
            .filter(|id| !saved_ids.contains(*id))
            .cloned()
            .collect();
        for id in &stale {
            self.metas.remove(id);
        }

        if added > 0 || !stale.is_empty() {
            debug!(added, removed = stale.len(), "library metas reconciled");
            self.persist();
        }
    }

    // MARK: - Metadata reads

    pub fn meta(&self, paper_id: &str) -> Option<&LibraryItemMeta> {
        self.metas.get(paper_id)
    }

    /// Join papers with their metadata. Papers without persisted metadata get
    /// a defaulted meta that is not written back.
    pub fn items(&self, papers: &[Paper]) -> Vec<LibraryItemView> {
        papers
            .iter()
            .map(|paper| {
                let meta = self
                    .metas
                    .get(&paper.id)
                    .cloned()
                    .unwrap_or_else(|| LibraryItemMeta::new(paper.id.clone()));
                LibraryItemView::new(paper.clone(), meta)
            })
            .collect()
    }

    /// Distinct tag vocabulary across all metadata, sorted ascending.
    pub fn all_tags(&self) -> Vec<String> {
        let distinct: HashSet<&String> = self.metas.values().flat_map(|m| &m.tags).collect();
        let mut tags: Vec<String> = distinct.into_iter().cloned().collect();
        tags.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(b)));
        tags
    }

    // MARK: - Metadata mutations

    /// Replace a paper's tags with the normalized form of `tags`.
    pub fn update_tags<I, S>(&mut self, paper_id: &str, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = normalize_tags(tags);
        self.upsert(paper_id, |meta| meta.tags = tags);
    }

    pub fn update_status(&mut self, paper_id: &str, status: ReadStatus) {
        self.upsert(paper_id, |meta| meta.status = status);
    }

    /// Move a paper into a folder (`None` = unfiled). An unknown folder id is
    /// ignored so metadata never points at a folder that does not exist.
    pub fn update_folder(&mut self, paper_id: &str, folder_id: Option<&str>) {
        if let Some(id) = folder_id {
            if !self.folders.contains_key(id) {
                return;
            }
        }
        let folder_id = folder_id.map(String::from);
        self.upsert(paper_id, |meta| meta.folder_id = folder_id);
    }

    pub fn update_note(&mut self, paper_id: &str, note: impl Into<String>) {
        let note = note.into();
        self.upsert(paper_id, |meta| meta.note = note);
    }

    /// Move several papers into a folder in one step (one persist).
    pub fn move_papers(&mut self, paper_ids: &[String], folder_id: Option<&str>) {
        if let Some(id) = folder_id {
            if !self.folders.contains_key(id) {
                return;
            }
        }
        let now = Utc::now();
        for paper_id in paper_ids {
            let meta = self
                .metas
                .entry(paper_id.clone())
                .or_insert_with(|| LibraryItemMeta::new(paper_id.clone()));
            meta.folder_id = folder_id.map(String::from);
            meta.updated_at = now;
        }
        if !paper_ids.is_empty() {
            self.persist();
        }
    }

    fn upsert(&mut self, paper_id: &str, mutate: impl FnOnce(&mut LibraryItemMeta)) {
        let meta = self
            .metas
            .entry(paper_id.to_string())
            .or_insert_with(|| LibraryItemMeta::new(paper_id));
        mutate(meta);
        meta.updated_at = Utc::now();
        self.persist();
    }

    // MARK: - Folder mutations

    /// Create a folder under `parent_id` (`None` = top level).
    ///
    /// The name is trimmed; a blank name or unknown parent creates nothing.
    /// A case-insensitive name collision among siblings returns the existing
    /// folder instead of creating a duplicate.
    pub fn add_folder(&mut self, name: &str, parent_id: Option<&str>) -> Option<Folder> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(parent) = parent_id {
            if !self.folders.contains_key(parent) {
                return None;
            }
        }
        if let Some(existing) = self
            .folders
            .values()
            .find(|f| f.parent_id.as_deref() == parent_id && f.name.eq_ignore_ascii_case(trimmed))
        {
            return Some(existing.clone());
        }

        let mut folder = Folder::new(trimmed);
        folder.parent_id = parent_id.map(String::from);
        self.folders.insert(folder.id.clone(), folder.clone());
        self.persist();
        Some(folder)
    }

    /// Delete a folder and its entire subtree.
    ///
    /// Papers filed anywhere under the removed subtree collapse one level up,
    /// to the parent of the removed folder. The active folder context follows
    /// if it pointed into the subtree. Unknown ids are ignored.
    pub fn remove_folder(&mut self, id: &str) {
        let Some(folder) = self.folders.get(id) else {
            return;
        };
        let target = folder.parent_id.clone();

        let mut removed = self.descendant_ids(id);
        removed.insert(id.to_string());
        for folder_id in &removed {
            self.folders.remove(folder_id);
        }

        let now = Utc::now();
        for meta in self.metas.values_mut() {
            if meta.folder_id.as_ref().is_some_and(|f| removed.contains(f)) {
                meta.folder_id = target.clone();
                meta.updated_at = now;
            }
        }
        if self
            .active_folder_id
            .as_ref()
            .is_some_and(|f| removed.contains(f))
        {
            self.active_folder_id = target.clone();
        }

        debug!(removed = removed.len(), "folder subtree removed");
        self.persist();
    }

    /// Reparent a folder (`None` = top level).
    ///
    /// Silently ignored when the folder is unknown, when the move would create
    /// a cycle (the target is the folder itself or one of its descendants),
    /// when the target parent does not exist, or when a sibling under the new
    /// parent already carries the same name case-insensitively.
    pub fn move_folder(&mut self, id: &str, new_parent: Option<&str>) {
        let Some(folder) = self.folders.get(id) else {
            return;
        };
        let name = folder.name.clone();

        if let Some(parent) = new_parent {
            if parent == id || !self.folders.contains_key(parent) || self.is_descendant(parent, id)
            {
                return;
            }
        }
        if self.folders.values().any(|f| {
            f.id != id && f.parent_id.as_deref() == new_parent && f.name.eq_ignore_ascii_case(&name)
        }) {
            return;
        }

        if let Some(folder) = self.folders.get_mut(id) {
            folder.parent_id = new_parent.map(String::from);
        }
        self.persist();
    }

    // MARK: - Folder queries

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.get(id)
    }

    /// Resolve a folder id to its name.
    pub fn folder_name(&self, id: Option<&str>) -> Option<&str> {
        self.folders.get(id?).map(|f| f.name.as_str())
    }

    /// All folders, in no particular order. Presentation-time ordering is a
    /// query concern; see [`Self::child_folders`].
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// Direct children of `parent` (`None` = top level), sorted by name.
    pub fn child_folders(&self, parent: Option<&str>) -> Vec<&Folder> {
        let mut children: Vec<&Folder> = self
            .folders
            .values()
            .filter(|f| f.parent_id.as_deref() == parent)
            .collect();
        children.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        children
    }

    /// Papers filed directly in this folder.
    pub fn direct_paper_count(&self, folder_id: &str) -> usize {
        self.metas
            .values()
            .filter(|m| m.folder_id.as_deref() == Some(folder_id))
            .count()
    }

    /// Papers filed in this folder or anywhere under it.
    pub fn total_paper_count(&self, folder_id: &str) -> usize {
        let mut subtree = self.descendant_ids(folder_id);
        subtree.insert(folder_id.to_string());
        self.metas
            .values()
            .filter(|m| m.folder_id.as_ref().is_some_and(|f| subtree.contains(f)))
            .count()
    }

    /// Whether `candidate` lies strictly below `ancestor` in the forest.
    /// A folder is not its own descendant.
    pub fn is_descendant(&self, candidate: &str, ancestor: &str) -> bool {
        self.descendant_ids(ancestor).contains(candidate)
    }

    /// Pre-order traversal of the whole forest as `(folder, depth)` rows,
    /// siblings name-sorted. `excluding` skips that folder and its entire
    /// subtree, which lets move pickers rule out cycles.
    pub fn flat_folder_tree(&self, excluding: Option<&str>) -> Vec<(Folder, usize)> {
        let mut rows = Vec::new();
        let mut stack: Vec<(FolderId, usize)> = self
            .child_folders(None)
            .into_iter()
            .rev()
            .map(|f| (f.id.clone(), 0))
            .collect();

        while let Some((id, depth)) = stack.pop() {
            if excluding == Some(id.as_str()) {
                continue;
            }
            let Some(folder) = self.folders.get(&id) else {
                continue;
            };
            rows.push((folder.clone(), depth));
            for child in self.child_folders(Some(id.as_str())).into_iter().rev() {
                stack.push((child.id.clone(), depth + 1));
            }
        }
        rows
    }

    /// Root-to-node breadcrumb for a folder. Empty for unknown ids.
    pub fn folder_path(&self, folder_id: &str) -> Vec<Folder> {
        let mut path = Vec::new();
        let mut current = self.folders.get(folder_id);
        while let Some(folder) = current {
            path.push(folder.clone());
            current = folder.parent_id.as_ref().and_then(|p| self.folders.get(p));
        }
        path.reverse();
        path
    }

    /// Breadth-first walk of the parent index. Iterative, so arbitrarily deep
    /// trees cannot overflow the stack.
    fn descendant_ids(&self, ancestor: &str) -> HashSet<FolderId> {
        let mut result = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([ancestor]);
        while let Some(current) = queue.pop_front() {
            for folder in self
                .folders
                .values()
                .filter(|f| f.parent_id.as_deref() == Some(current))
            {
                if result.insert(folder.id.clone()) {
                    queue.push_back(folder.id.as_str());
                }
            }
        }
        result
    }

    // MARK: - Active folder context

    /// The folder newly saved papers default into.
    pub fn active_folder_id(&self) -> Option<&str> {
        self.active_folder_id.as_deref()
    }

    /// Set the active folder context. Unknown ids clear it.
    pub fn set_active_folder(&mut self, folder_id: Option<&str>) {
        self.active_folder_id = folder_id
            .filter(|id| self.folders.contains_key(*id))
            .map(String::from);
    }

    // MARK: - Persistence

    fn persist(&self) {
        let Some(path) = &self.storage_path else {
            return;
        };
        let mut metas: Vec<LibraryItemMeta> = self.metas.values().cloned().collect();
        metas.sort_by(|a, b| a.paper_id.cmp(&b.paper_id));
        let mut folders: Vec<Folder> = self.folders.values().cloned().collect();
        folders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        let snapshot = LibrarySnapshot {
            version: SNAPSHOT_VERSION,
            metas,
            folders,
        };
        if let Err(err) = write_snapshot(path, &snapshot) {
            warn!(path = %path.display(), error = %err, "library snapshot write failed; in-memory state kept");
        }
    }
}
