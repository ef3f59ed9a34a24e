//! paperdeck-domain: Shared data models for the paperdeck reading-list apps.
//!
//! Papers are immutable summary records supplied by the bundled corpus.
//! Everything the user layers on top of a paper (tags, folder placement,
//! read status, notes) lives in [`LibraryItemMeta`], keyed by paper id.
//! Folders form a forest stored flat with parent pointers.

pub mod folder;
pub mod meta;
pub mod paper;
pub mod swipe;
pub mod view;

pub use folder::*;
pub use meta::*;
pub use paper::*;
pub use swipe::*;
pub use view::*;
