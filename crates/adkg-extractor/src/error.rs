//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during a single extraction attempt
///
/// All of these are retryable. The extractor logs them and, once the retry
/// budget is spent, returns an empty result instead of propagating.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Request exceeded the configured timeout
    #[error("Extraction timeout")]
    Timeout,

    /// Response was not a JSON array
    #[error("Invalid triple format: {0}")]
    InvalidFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::InvalidFormat(format!("JSON parse error: {}", e))
    }
}
