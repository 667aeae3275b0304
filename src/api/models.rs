use serde::{Deserialize, Serialize};

use crate::data_models::{AnalysisSettings, AnalysisStatus, SuggestionRecord};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Extracted page text to analyze.
    pub text: String,
    #[serde(default)]
    pub settings: AnalysisSettings,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: AnalysisStatus,
    pub keywords: Vec<String>,
    pub suggestions: Vec<SuggestionRecord>,
    pub insight: Option<String>,
    pub total_suggestions: usize,
    pub processing_time_ms: u128,
}
