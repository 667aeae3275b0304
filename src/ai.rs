use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::CONFIG;
use crate::error::{Error, Result};
use crate::text::truncate_chars;

/// Caps on how much page text rides along in each prompt.
const INSIGHT_CONTENT_LEN: usize = 1000;
const KEYWORD_CONTENT_LEN: usize = 1500;
const RELEVANCE_TEXT_LEN: usize = 500;

const INSIGHT_SYSTEM: &str = "You are a research assistant. Provide a brief, insightful summary \
     of the key research contribution and its significance. Keep it under 50 words.";
const KEYWORD_SYSTEM: &str = "You are a research assistant that extracts key academic terms and \
     concepts from research papers. Return only the most important keywords/phrases separated by \
     commas, no explanations.";
const RELEVANCE_SYSTEM: &str = "You are a research assistant that scores paper relevance. Return \
     only a number between 0 and 1 indicating how relevant a paper is to given keywords. Higher \
     scores mean more relevant.";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Chat-completion client behind the optional AI enhancement paths.
///
/// Every method is best-effort: callers swallow the error and fall back to
/// the deterministic simple path, so a broken endpoint or key can never
/// surface to the user.
pub struct AiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AiClient {
    /// Fails with [`Error::Config`] when no API key is configured; the
    /// pipeline treats that as "AI disabled".
    pub fn from_config() -> Result<AiClient> {
        let api_key = CONFIG
            .openai_api_key
            .clone()
            .ok_or(Error::Config("OPENAI_API_KEY"))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(CONFIG.http_timeout_secs))
            .build()?;
        Ok(AiClient {
            client,
            api_key,
            base_url: CONFIG.openai_api_base.trim_end_matches('/').to_string(),
            model: CONFIG.openai_model.clone(),
        })
    }

    /// One-paragraph summary of the page's key contribution.
    pub async fn summarize_insight(&self, content: &str) -> Result<String> {
        let prompt = format!(
            "Summarize the key contribution of this research paper:\n\n{}",
            truncate_chars(content, INSIGHT_CONTENT_LEN)
        );
        self.complete(INSIGHT_SYSTEM, prompt, 80, 0.7).await
    }

    /// Comma-separated keyword extraction. Unusable replies are an error so
    /// the caller falls back to the frequency-based extractor.
    pub async fn extract_keywords(&self, content: &str) -> Result<Vec<String>> {
        let prompt = format!(
            "Extract the 10 most important academic keywords and concepts from this research \
             paper content:\n\n{}",
            truncate_chars(content, KEYWORD_CONTENT_LEN)
        );
        let reply = self.complete(KEYWORD_SYSTEM, prompt, 100, 0.3).await?;

        let keywords: Vec<String> = reply
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| k.chars().count() > 2)
            .take(10)
            .collect();
        if keywords.is_empty() {
            return Err(Error::Parse("no usable keywords in completion".to_string()));
        }
        Ok(keywords)
    }

    /// Numeric relevance rating in [0, 1]. Non-numeric replies are an error
    /// so the caller keeps the simple-path score.
    pub async fn rate_relevance(&self, text: &str, keywords: &[String]) -> Result<f64> {
        let prompt = format!(
            "Rate the relevance (0-1) of this paper to keywords [{}]:\n\nTitle and Abstract: {}",
            keywords.join(", "),
            truncate_chars(text, RELEVANCE_TEXT_LEN)
        );
        let reply = self.complete(RELEVANCE_SYSTEM, prompt, 10, 0.1).await?;
        reply
            .trim()
            .parse::<f64>()
            .map(|score| score.clamp(0.0, 1.0))
            .map_err(|_| Error::Parse(format!("non-numeric relevance reply: {reply}")))
    }

    async fn complete(
        &self,
        system: &str,
        user: String,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens,
            temperature,
        };

        log::debug!("requesting completion from {} ({})", self.base_url, self.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let completion: ChatResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| Error::Parse("empty completion".to_string()))
    }
}
