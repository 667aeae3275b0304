use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use crate::pipeline::Pipeline;

use super::models::{AnalyzeRequest, AnalyzeResponse};

pub async fn analyze_handler(
    State(pipeline): State<Arc<Pipeline>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, String)> {
    let start = Instant::now();

    if request.text.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Text cannot be empty".to_string()));
    }

    let report = pipeline
        .analyze(&request.text, &request.settings)
        .await
        .ok_or((
            StatusCode::TOO_MANY_REQUESTS,
            "Analysis already in flight".to_string(),
        ))?;

    Ok(Json(AnalyzeResponse {
        status: report.status,
        total_suggestions: report.suggestions.len(),
        keywords: report.keywords,
        suggestions: report.suggestions,
        insight: report.insight,
        processing_time_ms: start.elapsed().as_millis(),
    }))
}
