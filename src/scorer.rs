use crate::ai::AiClient;

/// Normalization constant of the scoring heuristic: the weighted occurrence
/// total is divided by this before clamping. Changing it changes every
/// relevance score in the system.
const SCORE_DIVISOR: f64 = 5.0;

/// Scores `text` against `keywords`, returning a value in [0, 1].
///
/// Each case-insensitive, non-overlapping occurrence of a keyword
/// contributes 1/|keywords|; the sum is divided by [`SCORE_DIVISOR`] and
/// clamped. This is a heuristic, not a probability.
pub fn relevance_simple(text: &str, keywords: &[String]) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    let lower = text.to_lowercase();
    let weight = 1.0 / keywords.len() as f64;

    let mut score = 0.0;
    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        if keyword.is_empty() {
            continue;
        }
        score += lower.matches(keyword.as_str()).count() as f64 * weight;
    }

    (score / SCORE_DIVISOR).clamp(0.0, 1.0)
}

/// AI-delegated variant. Any failure or unparsable reply falls back to
/// `fallback` (normally the simple-path score), so enhancement can never
/// surface an error.
pub async fn relevance_with_ai(
    ai: &AiClient,
    text: &str,
    keywords: &[String],
    fallback: f64,
) -> f64 {
    match ai.rate_relevance(text, keywords).await {
        Ok(score) => score.clamp(0.0, 1.0),
        Err(e) => {
            log::debug!("ai relevance scoring failed, using simple method: {e:#}");
            fallback
        }
    }
}
