//! The swipe ledger: saved/disliked sets and the append-only event log.

use std::collections::HashSet;
use std::path::PathBuf;

use paperdeck_domain::{SwipeAction, SwipeEvent};
use tracing::warn;

use crate::snapshot::{read_snapshot, write_snapshot, SwipeSnapshot};

/// Owns the saved and disliked paper id sets plus the swipe event log.
///
/// The two sets are mutually exclusive: saving removes a dislike and vice
/// versa. Feed membership for a paper is "in neither set". Events are
/// append-only and kept for audit; state is never re-derived from them.
#[derive(Debug, Default)]
pub struct SwipeLedger {
    saved: HashSet<String>,
    disliked: HashSet<String>,
    events: Vec<SwipeEvent>,
    storage_path: Option<PathBuf>,
}

impl SwipeLedger {
    /// An unpersisted ledger, for tests and previews.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a ledger backed by a snapshot file. A missing or corrupt snapshot
    /// yields an empty ledger.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut ledger = Self {
            storage_path: Some(path.clone()),
            ..Self::default()
        };
        if let Some(snapshot) = read_snapshot::<SwipeSnapshot>(&path) {
            ledger.saved = snapshot.saved_ids.into_iter().collect();
            ledger.disliked = snapshot.disliked_ids.into_iter().collect();
            ledger.events = snapshot.events;
        }
        ledger
    }

    /// Add a paper to the saved set, clearing any dislike.
    pub fn save(&mut self, id: &str) {
        self.saved.insert(id.to_string());
        self.disliked.remove(id);
        self.persist();
    }

    /// Add a paper to the disliked set, clearing any save.
    pub fn dislike(&mut self, id: &str) {
        self.disliked.insert(id.to_string());
        self.saved.remove(id);
        self.persist();
    }

    /// Drop a paper from the saved set without disliking it, so it may
    /// reappear in the feed.
    pub fn remove_saved(&mut self, id: &str) {
        self.saved.remove(id);
        self.persist();
    }

    /// Append a swipe event, timestamped now.
    pub fn record_event(&mut self, paper_id: &str, action: SwipeAction) {
        self.events.push(SwipeEvent::now(paper_id, action));
        self.persist();
    }

    pub fn saved_ids(&self) -> &HashSet<String> {
        &self.saved
    }

    pub fn disliked_ids(&self) -> &HashSet<String> {
        &self.disliked
    }

    pub fn events(&self) -> &[SwipeEvent] {
        &self.events
    }

    /// Whether a paper should still show up in the swipe feed.
    pub fn is_feed_eligible(&self, id: &str) -> bool {
        !self.saved.contains(id) && !self.disliked.contains(id)
    }

    fn persist(&self) {
        let Some(path) = &self.storage_path else {
            return;
        };
        let mut saved_ids: Vec<String> = self.saved.iter().cloned().collect();
        saved_ids.sort();
        let mut disliked_ids: Vec<String> = self.disliked.iter().cloned().collect();
        disliked_ids.sort();

        let snapshot = SwipeSnapshot {
            saved_ids,
            disliked_ids,
            events: self.events.clone(),
        };
        if let Err(err) = write_snapshot(path, &snapshot) {
            warn!(path = %path.display(), error = %err, "swipe snapshot write failed; in-memory state kept");
        }
    }
}
