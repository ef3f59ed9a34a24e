//! paperdeck-library: The saved-paper metadata store and swipe ledger.
//!
//! Two independently persisted stores:
//!
//! - [`LibraryMetaStore`] owns per-paper metadata (tags, folder placement,
//!   read status, notes) and the folder forest. The folder tree is stored
//!   flat with parent pointers and reconstructed by query.
//! - [`SwipeLedger`] owns the saved/disliked id sets and the append-only
//!   swipe event log that drives feed eligibility.
//!
//! Both follow the same durability policy: the in-memory state is the source
//! of truth, every successful mutation serializes a full snapshot to disk via
//! an atomic temp-file replace, and a failed write is logged and absorbed
//! rather than rolled back.

pub mod error;
pub mod ledger;
pub mod meta_store;
pub mod snapshot;

pub use error::*;
pub use ledger::*;
pub use meta_store::*;
pub use snapshot::*;
