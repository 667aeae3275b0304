use std::sync::atomic::{AtomicBool, Ordering};

use crate::ai::AiClient;
use crate::arxiv::ArxivClient;
use crate::data_models::{AnalysisReport, AnalysisSettings, AnalysisStatus, SuggestionRecord};
use crate::error::Result;
use crate::extractor;
use crate::parser;
use crate::scorer;
use crate::text::stable_hash;

/// Suggestions kept after ranking.
const MAX_SUGGESTIONS: usize = 10;
/// Mock records synthesized when the real path comes up empty.
const MAX_MOCK_RECORDS: usize = 3;
/// Floor for mock relevance so placeholders still render as plausible.
const MOCK_MIN_RELEVANCE: f64 = 0.6;

const MOCK_TEMPLATES: &[(&str, &str)] = &[
    (
        "Deep Learning Approaches for {keyword1} and {keyword2}",
        "This paper presents novel approaches for {keyword1} using state-of-the-art methods",
    ),
    (
        "A Comprehensive Survey of {keyword1} in {keyword2} Applications",
        "We provide an extensive review of {keyword1} techniques applied to {keyword2}",
    ),
    (
        "{keyword1}-Based Methods for {keyword2}: Recent Advances",
        "Recent advances in {keyword1} have shown promising results for {keyword2} tasks",
    ),
];
const MOCK_YEARS: &[i32] = &[2024, 2023, 2022];
const MOCK_SOURCES: &[&str] = &["arXiv", "Nature", "Science", "IEEE"];

/// Phases of one analysis request, in order. `Failed` routes to the mock
/// branch instead of surfacing an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Extracting,
    Fetching,
    Parsing,
    Ranking,
    Done,
    Failed,
}

/// Orchestrates one analysis: extract keywords, query the source, parse,
/// score, rank. Public contract: never fails, may return placeholder data.
pub struct Pipeline {
    arxiv: ArxivClient,
    ai: Option<AiClient>,
    analyzing: AtomicBool,
}

/// Clears the busy flag however the analysis ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Pipeline {
    pub fn new(arxiv: ArxivClient, ai: Option<AiClient>) -> Pipeline {
        Pipeline {
            arxiv,
            ai,
            analyzing: AtomicBool::new(false),
        }
    }

    pub fn from_config() -> Result<Pipeline> {
        let arxiv = ArxivClient::new()?;
        let ai = match AiClient::from_config() {
            Ok(client) => Some(client),
            Err(e) => {
                log::debug!("AI enhancement disabled: {e:#}");
                None
            }
        };
        Ok(Pipeline::new(arxiv, ai))
    }

    /// Runs one analysis over extracted page text.
    ///
    /// Returns `None` when an analysis is already in flight; the second
    /// trigger is a no-op. Otherwise always produces a report.
    pub async fn analyze(&self, text: &str, settings: &AnalysisSettings) -> Option<AnalysisReport> {
        if self
            .analyzing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::info!("analysis already in flight, ignoring trigger");
            return None;
        }
        let _guard = BusyGuard(&self.analyzing);
        Some(self.run(text, settings).await)
    }

    async fn run(&self, text: &str, settings: &AnalysisSettings) -> AnalysisReport {
        if settings.recent_papers || settings.high_citations {
            // Accepted but reserved; ranking stays relevance-first with
            // deterministic tie-breaks.
            log::debug!(
                "preference flags present (recent_papers={}, high_citations={})",
                settings.recent_papers,
                settings.high_citations
            );
        }

        let insight = match &self.ai {
            Some(ai) => match ai.summarize_insight(text).await {
                Ok(summary) => Some(summary),
                Err(e) => {
                    log::debug!("insight generation failed: {e:#}");
                    None
                }
            },
            None => None,
        };

        self.trace(Phase::Extracting);
        let keywords = self.extract_keywords(text).await;
        if keywords.is_empty() {
            self.trace(Phase::Failed);
            log::warn!("no keywords extracted, nothing to search or synthesize");
            return AnalysisReport {
                status: AnalysisStatus::Error,
                keywords,
                suggestions: Vec::new(),
                insight,
            };
        }

        self.trace(Phase::Fetching);
        let raw = match self.arxiv.search(&keywords).await {
            Ok(raw) => Some(raw),
            Err(e) => {
                log::warn!("paper search failed: {e:#}");
                None
            }
        };

        self.trace(Phase::Parsing);
        let mut suggestions = match raw {
            Some(raw) => match parser::parse_arxiv_feed(&raw.body, &raw.keywords) {
                Ok(records) => records,
                Err(e) => {
                    log::warn!("response parsing failed: {e:#}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        if suggestions.is_empty() {
            self.trace(Phase::Failed);
            log::info!("no live results, falling back to mock suggestions");
            return AnalysisReport {
                status: AnalysisStatus::Mock,
                suggestions: mock_suggestions(&keywords),
                keywords,
                insight,
            };
        }

        if let Some(ai) = &self.ai {
            for record in &mut suggestions {
                let text = format!("{} {}", record.title, record.abstract_snippet);
                record.relevance_score =
                    scorer::relevance_with_ai(ai, &text, &keywords, record.relevance_score).await;
            }
        }

        self.trace(Phase::Ranking);
        rank_suggestions(&mut suggestions);
        suggestions.truncate(MAX_SUGGESTIONS);

        self.trace(Phase::Done);
        AnalysisReport {
            status: AnalysisStatus::Success,
            keywords,
            suggestions,
            insight,
        }
    }

    /// AI keyword extraction when enabled, frequency extraction otherwise.
    async fn extract_keywords(&self, text: &str) -> Vec<String> {
        if let Some(ai) = &self.ai {
            match ai.extract_keywords(text).await {
                Ok(keywords) => return keywords,
                Err(e) => {
                    log::debug!("ai keyword extraction failed, falling back: {e:#}");
                }
            }
        }
        extractor::extract_keywords(text)
    }

    fn trace(&self, phase: Phase) {
        log::debug!("analysis phase: {phase:?}");
    }
}

/// Relevance descending; ties broken by citation count descending, then
/// title, so equal-scored batches come out in a stable order.
pub fn rank_suggestions(suggestions: &mut [SuggestionRecord]) {
    suggestions.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.citation_count.cmp(&a.citation_count))
            .then_with(|| a.title.cmp(&b.title))
    });
}

/// Synthesizes placeholder records from the leading keywords so a degraded
/// run still returns something to show. One record per keyword, capped at
/// [`MAX_MOCK_RECORDS`].
pub fn mock_suggestions(keywords: &[String]) -> Vec<SuggestionRecord> {
    let keyword1 = keywords.first().map(String::as_str).unwrap_or("machine learning");
    let keyword2 = keywords.get(1).map(String::as_str).unwrap_or("data analysis");

    keywords
        .iter()
        .take(MAX_MOCK_RECORDS)
        .enumerate()
        .map(|(i, seed)| {
            let (title_template, abstract_template) = MOCK_TEMPLATES[i % MOCK_TEMPLATES.len()];
            let fill = |template: &str| {
                template
                    .replace("{keyword1}", keyword1)
                    .replace("{keyword2}", keyword2)
            };
            let hash = stable_hash(&format!("{seed}:{i}"));

            SuggestionRecord::new(
                fill(title_template),
                format!("Researcher {}, A. et al.", i + 1),
                MOCK_YEARS[i % MOCK_YEARS.len()],
                50 + (hash % 300) as u32,
                MOCK_MIN_RELEVANCE + (hash % 400) as f64 / 1000.0,
                format!("{}...", fill(abstract_template)),
                format!("https://example.com/paper{}", i + 1),
                MOCK_SOURCES[i % MOCK_SOURCES.len()].to_string(),
            )
        })
        .collect()
}
