use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        arxiv_api_base: get_env_or_default("ARXIV_API_BASE", "https://export.arxiv.org/api/query"),
        openai_api_key: env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty()),
        openai_api_base: get_env_or_default("OPENAI_API_BASE", "https://api.openai.com/v1"),
        openai_model: get_env_or_default("OPENAI_MODEL", "gpt-3.5-turbo"),
        http_timeout_secs: get_env_or_default("HTTP_TIMEOUT_SECS", "10")
            .parse()
            .unwrap_or(10),
        bind_addr: get_env_or_default("BIND_ADDR", "127.0.0.1:8080"),
    }
});

pub struct Config {
    pub arxiv_api_base: String,
    /// Presence of the key is the feature flag for every AI path.
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub openai_model: String,
    pub http_timeout_secs: u64,
    pub bind_addr: String,
}

impl Config {
    pub fn ai_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
