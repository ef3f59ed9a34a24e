//! paperdeck-catalog: Read-only loader for the bundled paper corpus.
//!
//! The catalog is loaded once at startup and immutable afterwards. All
//! cross-component joins happen by paper id lookup against it.

use std::collections::HashMap;
use std::path::Path;

use paperdeck_domain::Paper;
use thiserror::Error;
use tracing::debug;

/// Errors from loading the corpus.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse corpus JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The immutable paper corpus, keyed by paper id.
#[derive(Debug, Clone, Default)]
pub struct PaperCatalog {
    papers: Vec<Paper>,
    index: HashMap<String, usize>,
}

impl PaperCatalog {
    /// Build a catalog from an already-loaded corpus.
    ///
    /// The corpus is assumed deduplicated; if duplicate ids do appear, the
    /// first occurrence wins for lookups.
    pub fn from_papers(papers: Vec<Paper>) -> Self {
        let mut index = HashMap::with_capacity(papers.len());
        for (i, paper) in papers.iter().enumerate() {
            index.entry(paper.id.clone()).or_insert(i);
        }
        debug!(count = papers.len(), "paper catalog built");
        Self { papers, index }
    }

    /// Parse a corpus from its bundled JSON representation (an array of
    /// paper records).
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let papers: Vec<Paper> = serde_json::from_str(json)?;
        Ok(Self::from_papers(papers))
    }

    /// Load a corpus from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Look up a paper by id.
    pub fn get(&self, id: &str) -> Option<&Paper> {
        self.index.get(id).map(|&i| &self.papers[i])
    }

    /// All papers, in corpus order.
    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Paper> {
        ["p1", "p2", "p3"]
            .iter()
            .map(|id| Paper {
                id: id.to_string(),
                title: format!("Paper {id}"),
                ..Paper::default()
            })
            .collect()
    }

    #[test]
    fn lookup_by_id() {
        let catalog = PaperCatalog::from_papers(corpus());
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("p2").unwrap().title, "Paper p2");
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn first_occurrence_wins_on_duplicate_ids() {
        let mut papers = corpus();
        papers.push(Paper {
            id: "p1".into(),
            title: "Duplicate".into(),
            ..Paper::default()
        });
        let catalog = PaperCatalog::from_papers(papers);
        assert_eq!(catalog.get("p1").unwrap().title, "Paper p1");
    }

    #[test]
    fn parses_corpus_json() {
        let json = r#"[
            {"paper_id": "2602.05877", "📖标题": "T1", "🌐来源": "arxiv"},
            {"paper_id": "2602.09999"}
        ]"#;
        let catalog = PaperCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("2602.05877").unwrap().title, "T1");
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(PaperCatalog::from_json_str("not json").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("papers.json");
        std::fs::write(&path, r#"[{"paper_id": "p1"}]"#).unwrap();
        let catalog = PaperCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);

        assert!(PaperCatalog::load(dir.path().join("missing.json")).is_err());
    }
}
