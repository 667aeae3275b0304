use std::time::Duration;

use crate::config::CONFIG;
use crate::data_models::RawSearchResult;
use crate::error::Result;

/// Source tag attached to every raw result and parsed record.
pub const SOURCE_NAME: &str = "arXiv";

/// At most this many keywords build the boolean query.
const MAX_QUERY_KEYWORDS: usize = 5;
/// Results requested per search; the parser considers fewer.
const MAX_RESULTS: usize = 10;

/// Client for the arXiv query endpoint. Fetches raw Atom bodies only;
/// parsing happens elsewhere.
pub struct ArxivClient {
    client: reqwest::Client,
    base_url: String,
}

impl ArxivClient {
    pub fn new() -> Result<ArxivClient> {
        Self::with_base(
            &CONFIG.arxiv_api_base,
            Duration::from_secs(CONFIG.http_timeout_secs),
        )
    }

    /// Build against an explicit endpoint, mainly for tests and mirrors.
    pub fn with_base(base_url: &str, timeout: Duration) -> Result<ArxivClient> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("paperscout/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ArxivClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// One search round trip. The body comes back unparsed, tagged with the
    /// source name and the keywords that produced it. Retries exactly once
    /// on transport failure before giving up.
    pub async fn search(&self, keywords: &[String]) -> Result<RawSearchResult> {
        let query = keywords
            .iter()
            .take(MAX_QUERY_KEYWORDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" OR ");

        let body = match self.fetch(&query).await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("arxiv fetch failed, retrying once: {e:#}");
                self.fetch(&query).await?
            }
        };

        Ok(RawSearchResult {
            source_name: SOURCE_NAME.to_string(),
            body,
            keywords: keywords.to_vec(),
        })
    }

    async fn fetch(&self, query: &str) -> Result<String> {
        let response = self
            .client
            .get(self.base_url.as_str())
            .query(&[
                ("search_query", format!("all:{query}")),
                ("start", "0".to_string()),
                ("max_results", MAX_RESULTS.to_string()),
                ("sortBy", "relevance".to_string()),
                ("sortOrder", "descending".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}
