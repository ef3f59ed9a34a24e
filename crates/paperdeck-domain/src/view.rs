//! Joined paper + metadata view for presentation.

use crate::meta::LibraryItemMeta;
use crate::paper::Paper;

/// A paper joined with its library metadata.
///
/// Papers that have no persisted metadata yet are represented with a
/// freshly-defaulted meta; the default is not written back until an explicit
/// mutation happens.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryItemView {
    pub paper: Paper,
    pub meta: LibraryItemMeta,
}

impl LibraryItemView {
    pub fn new(paper: Paper, meta: LibraryItemMeta) -> Self {
        Self { paper, meta }
    }

    /// The paper id, which keys the view.
    pub fn id(&self) -> &str {
        &self.paper.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_id_is_paper_id() {
        let paper = Paper {
            id: "p1".into(),
            ..Paper::default()
        };
        let view = LibraryItemView::new(paper, LibraryItemMeta::new("p1"));
        assert_eq!(view.id(), "p1");
    }
}
