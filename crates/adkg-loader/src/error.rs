//! Error types for the Loader

use thiserror::Error;

/// Errors that abort a load
///
/// Malformed triples are not errors; they are skipped and reported in the
/// `LoadReport`.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Graph store error, with the store's own error as the source
    #[error("Store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
