//! Paper summary records from the bundled corpus.

use serde::{Deserialize, Serialize};

/// Introductory summary attached to a paper.
///
/// The corpus JSON uses decorated Chinese field names; they are preserved
/// here so the bundled data files load unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaperIntro {
    #[serde(rename = "🔸研究问题", default)]
    pub problem: String,
    #[serde(rename = "🔸主要贡献", default)]
    pub contributions: String,
}

/// A single paper summary.
///
/// Immutable once loaded; only `id` is required in the corpus JSON, every
/// other field defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Paper {
    #[serde(rename = "paper_id")]
    pub id: String,
    #[serde(rename = "📖标题", default)]
    pub title: String,
    #[serde(rename = "short_title", default)]
    pub short_title: String,
    #[serde(rename = "🌐来源", default)]
    pub source: String,
    #[serde(default)]
    pub institution: String,
    #[serde(rename = "🛎️文章简介", default)]
    pub intro: Option<PaperIntro>,
    #[serde(rename = "📝重点思路", default)]
    pub key_points: Vec<String>,
    #[serde(rename = "🔎分析总结", default)]
    pub analysis: Vec<String>,
    #[serde(rename = "💡个人观点", default)]
    pub personal_view: String,
}

impl Paper {
    /// Title for display, falling back to the short title.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.short_title
        } else {
            &self.title
        }
    }

    /// Short title when it adds information beyond the main title.
    pub fn subtitle(&self) -> Option<&str> {
        if self.short_title.is_empty() || self.short_title == self.title {
            None
        } else {
            Some(&self.short_title)
        }
    }

    /// Joined intro text (problem and contributions), used for list rows
    /// and free-text search.
    pub fn summary_text(&self) -> String {
        let Some(intro) = &self.intro else {
            return String::new();
        };
        [intro.problem.as_str(), intro.contributions.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Corpus-supplied display tags (source and institution).
    pub fn display_tags(&self) -> Vec<&str> {
        [self.source.as_str(), self.institution.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// e.g. "BMW: threat modeling that separates assets from attack paths"
    pub fn header_line(&self) -> String {
        match (self.institution.is_empty(), self.short_title.is_empty()) {
            (false, false) => format!("{}：{}", self.institution, self.short_title),
            (false, true) => self.institution.clone(),
            (true, false) => self.short_title.clone(),
            (true, true) => self.display_title().to_string(),
        }
    }

    /// e.g. "arxiv, 2602.05877"
    pub fn source_line(&self) -> String {
        [self.source.as_str(), self.id.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Landing page URL. Only arXiv ids resolve to a link.
    pub fn link_url(&self) -> Option<String> {
        if self.id.is_empty() || !self.source.eq_ignore_ascii_case("arxiv") {
            return None;
        }
        Some(format!("https://arxiv.org/abs/{}", self.id))
    }
}
