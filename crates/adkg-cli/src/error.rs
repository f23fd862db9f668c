//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
///
/// Every variant ends the process with exit status 1.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Graph store or file error
    #[error(transparent)]
    Store(#[from] adkg_store::StoreError),

    /// Extractor setup error
    #[error(transparent)]
    Extractor(#[from] adkg_extractor::ExtractorError),

    /// Loader error
    #[error(transparent)]
    Loader(adkg_loader::LoaderError),

    /// Completion service error
    #[error(transparent)]
    Llm(#[from] adkg_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<adkg_loader::LoaderError> for CliError {
    /// Store failures surface as `Store` so connection and query errors stay
    /// distinguishable.
    fn from(e: adkg_loader::LoaderError) -> Self {
        match e {
            adkg_loader::LoaderError::Store(source) => {
                match source.downcast::<adkg_store::StoreError>() {
                    Ok(store) => CliError::Store(*store),
                    Err(other) => CliError::Loader(adkg_loader::LoaderError::Store(other)),
                }
            }
            other => CliError::Loader(other),
        }
    }
}
