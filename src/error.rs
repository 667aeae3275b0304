use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy for the suggestion pipeline.
///
/// Errors in the optional AI paths are always swallowed by callers and
/// replaced with the simple-path result. Transport and parse failures in
/// the core search path degrade to the mock-suggestion fallback.
#[derive(Error, Debug)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("missing configuration: {0}")]
    Config(&'static str),
}
