//! Configuration management for the CLI.
//!
//! Settings come from `~/.adkg/config.toml` (or `--config`); every section
//! and field is optional. Secrets and connection parameters are read from
//! the environment by the argument parser and override the file.

use crate::error::{CliError, Result};
use adkg_extractor::ExtractorConfig;
use adkg_llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use adkg_loader::LoaderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Model `ask` uses unless configured otherwise
pub const DEFAULT_ASK_MODEL: &str = "gpt-4";

/// Sampling temperature `ask` uses unless configured otherwise
pub const DEFAULT_ASK_TEMPERATURE: f32 = 0.2;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion service
    pub llm: LlmSection,

    /// Graph store
    pub store: StoreSection,

    /// Extraction tuning
    pub extractor: ExtractorConfig,

    /// Load tuning
    pub loader: LoaderConfig,

    /// Default file locations
    pub paths: Paths,

    /// Global settings
    pub settings: Settings,
}

/// Completion service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    /// Model name
    pub model: String,

    /// API base URL
    pub base_url: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Request timeout (seconds)
    pub timeout_secs: u64,

    /// Model used by `ask`
    pub ask_model: String,

    /// Sampling temperature used by `ask`
    pub ask_temperature: f32,
}

/// Graph backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Local SQLite database
    Sqlite,
    /// Neo4j over bolt
    Neo4j,
}

/// Graph store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Which backend to use
    pub backend: Backend,

    /// SQLite database path
    pub sqlite_path: PathBuf,

    /// Neo4j bolt URI (bolt://, neo4j://, neo4j+s://)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neo4j_uri: Option<String>,

    /// Neo4j user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neo4j_user: Option<String>,

    /// Neo4j database name
    pub neo4j_database: String,

    /// Neo4j request timeout (seconds)
    pub neo4j_timeout_secs: u64,
}

/// Default file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    /// Corpus file
    pub corpus: PathBuf,

    /// Triple batch file
    pub triples: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enable colored output
    pub color: bool,

    /// Default output format
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Location of the config file under a home directory.
    fn path_in(home: &Path) -> PathBuf {
        home.join(".adkg").join("config.toml")
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default path is optional; when it is
    /// absent, or there is no home directory, the built-in defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_toml(&fs::read_to_string(path)?)?
            }
            None => Self::load_from_home(dirs::home_dir().as_deref())?,
        };

        config.validate()?;
        Ok(config)
    }

    fn load_from_home(home: Option<&Path>) -> Result<Self> {
        let Some(home) = home else {
            debug!("No home directory; using built-in configuration");
            return Ok(Self::default());
        };

        let path = Self::path_in(home);
        if path.exists() {
            Self::from_toml(&fs::read_to_string(&path)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Serialize configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;
        self.loader
            .validate()
            .map_err(|e| CliError::Config(format!("[loader] {}", e)))?;
        if self.llm.timeout_secs == 0 {
            return Err(CliError::Config("[llm] timeout_secs must be greater than 0".into()));
        }
        if self.store.neo4j_timeout_secs == 0 {
            return Err(CliError::Config(
                "[store] neo4j_timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.0,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            ask_model: DEFAULT_ASK_MODEL.to_string(),
            ask_temperature: DEFAULT_ASK_TEMPERATURE,
        }
    }
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: Backend::Sqlite,
            sqlite_path: PathBuf::from("adkg.db"),
            neo4j_uri: None,
            neo4j_user: None,
            neo4j_database: adkg_store::neo4j::DEFAULT_DATABASE.to_string(),
            neo4j_timeout_secs: adkg_store::neo4j::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            corpus: PathBuf::from("pubmed_corpus.txt"),
            triples: PathBuf::from("extracted_triples.json"),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}
