use serde::{Deserialize, Serialize};

/// A normalized paper suggestion, ready for ranking and display.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SuggestionRecord {
    pub title: String,
    /// First three author names joined with ", ", with an " et al." marker
    /// when the source listed more.
    pub authors: String,
    pub year: i32,
    /// Synthesized when the source exposes no citation data.
    pub citation_count: u32,
    /// Always within [0, 1].
    pub relevance_score: f64,
    pub abstract_snippet: String,
    pub source_url: String,
    pub source_name: String,
}

impl SuggestionRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        authors: String,
        year: i32,
        citation_count: u32,
        relevance_score: f64,
        abstract_snippet: String,
        source_url: String,
        source_name: String,
    ) -> SuggestionRecord {
        SuggestionRecord {
            title,
            authors,
            year,
            citation_count,
            relevance_score: relevance_score.clamp(0.0, 1.0),
            abstract_snippet,
            source_url,
            source_name,
        }
    }
}

/// Raw response body from one search source. Owned transiently by the
/// pipeline and discarded after parsing.
#[derive(Debug, Clone)]
pub struct RawSearchResult {
    pub source_name: String,
    pub body: String,
    /// Keywords the query was built from; the parser scores against these.
    pub keywords: Vec<String>,
}

/// Settings snapshot handed in by the caller. The flags are accepted and
/// carried but not applied to scoring or filtering; ranking ties are broken
/// deterministically instead.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct AnalysisSettings {
    #[serde(default = "default_true")]
    pub recent_papers: bool,
    #[serde(default = "default_true")]
    pub high_citations: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            recent_papers: true,
            high_citations: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// How the suggestions in a report were obtained.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    /// Parsed from a live search response.
    Success,
    /// Synthesized placeholders; the real path yielded nothing.
    Mock,
    /// Nothing could be produced at all (no usable keywords).
    Error,
}

/// Result of one analysis run.
#[derive(Serialize, Debug, Clone)]
pub struct AnalysisReport {
    pub status: AnalysisStatus,
    pub keywords: Vec<String>,
    pub suggestions: Vec<SuggestionRecord>,
    /// Best-effort AI summary of the analyzed page; never blocks the run.
    pub insight: Option<String>,
}
