//! The application facade consumed by presentation code.

use paperdeck_catalog::PaperCatalog;
use paperdeck_domain::{LibraryItemView, Paper, SwipeAction};
use paperdeck_library::{LibraryMetaStore, SwipeLedger};
use tracing::debug;

/// Wires the immutable catalog, the swipe ledger, and the library meta store
/// together.
///
/// Stores are injected explicitly; nothing here is a global. After every
/// ledger mutation the facade reconciles the meta store against the saved-id
/// set with a direct call, so the two stores never drift apart within a
/// session.
#[derive(Debug)]
pub struct AppCore {
    catalog: PaperCatalog,
    ledger: SwipeLedger,
    library: LibraryMetaStore,
}

impl AppCore {
    /// Assemble the core and reconcile metadata against whatever the ledger
    /// loaded from disk.
    pub fn new(catalog: PaperCatalog, ledger: SwipeLedger, library: LibraryMetaStore) -> Self {
        let mut core = Self {
            catalog,
            ledger,
            library,
        };
        core.library.sync_saved_ids(core.ledger.saved_ids());
        debug!(
            papers = core.catalog.len(),
            saved = core.ledger.saved_ids().len(),
            "app core assembled"
        );
        core
    }

    // MARK: - Reads

    /// Papers still eligible for the swipe feed: neither saved nor disliked.
    pub fn feed_papers(&self) -> Vec<&Paper> {
        self.catalog
            .papers()
            .iter()
            .filter(|p| self.ledger.is_feed_eligible(&p.id))
            .collect()
    }

    /// Saved papers, in corpus order.
    pub fn saved_papers(&self) -> Vec<&Paper> {
        self.catalog
            .papers()
            .iter()
            .filter(|p| self.ledger.saved_ids().contains(&p.id))
            .collect()
    }

    /// Saved papers joined with their library metadata.
    pub fn library_items(&self) -> Vec<LibraryItemView> {
        let papers: Vec<Paper> = self.saved_papers().into_iter().cloned().collect();
        self.library.items(&papers)
    }

    pub fn catalog(&self) -> &PaperCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &SwipeLedger {
        &self.ledger
    }

    pub fn library(&self) -> &LibraryMetaStore {
        &self.library
    }

    /// Mutable access to the library store for tag, folder, status, and note
    /// edits.
    pub fn library_mut(&mut self) -> &mut LibraryMetaStore {
        &mut self.library
    }

    // MARK: - Swipe mutations

    /// Save a paper (right swipe). Unknown ids are ignored.
    pub fn like(&mut self, paper_id: &str) {
        if self.catalog.get(paper_id).is_none() {
            return;
        }
        self.ledger.save(paper_id);
        self.ledger.record_event(paper_id, SwipeAction::Like);
        self.library.sync_saved_ids(self.ledger.saved_ids());
    }

    /// Dismiss a paper (left swipe). Unknown ids are ignored.
    pub fn dislike(&mut self, paper_id: &str) {
        if self.catalog.get(paper_id).is_none() {
            return;
        }
        self.ledger.dislike(paper_id);
        self.ledger.record_event(paper_id, SwipeAction::Dislike);
        self.library.sync_saved_ids(self.ledger.saved_ids());
    }

    /// Drop a paper from the library. It becomes feed-eligible again and its
    /// metadata is destroyed; no event is recorded.
    pub fn remove_saved(&mut self, paper_id: &str) {
        self.ledger.remove_saved(paper_id);
        self.library.sync_saved_ids(self.ledger.saved_ids());
    }
}
