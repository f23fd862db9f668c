//! Command implementations.

pub mod ask;
pub mod extract;
pub mod load;
pub mod stats;

pub use self::ask::execute_ask;
pub use self::extract::execute_extract;
pub use self::load::execute_load;
pub use self::stats::execute_stats;

use crate::cli::{LlmArgs, StoreArgs};
use crate::config::{Backend, Config};
use crate::error::{CliError, Result};
use adkg_llm::{OpenAiConfig, OpenAiProvider};
use adkg_store::{AnyGraphStore, Neo4jConfig, Neo4jStore, SqliteGraphStore};
use tracing::info;

/// Open the configured graph store, command-line options first.
pub(crate) fn open_store(args: &StoreArgs, config: &Config) -> Result<AnyGraphStore> {
    let backend = args.backend.map(Into::into).unwrap_or(config.store.backend);

    match backend {
        Backend::Sqlite => {
            let path = args.db.as_ref().unwrap_or(&config.store.sqlite_path);
            info!("Opening SQLite graph at {}", path.display());
            Ok(SqliteGraphStore::open(path)?.into())
        }
        Backend::Neo4j => {
            let uri = args
                .neo4j_uri
                .clone()
                .or_else(|| config.store.neo4j_uri.clone())
                .ok_or_else(|| {
                    CliError::Config("Neo4j URI is not set (NEO4J_URI or [store] neo4j_uri)".into())
                })?;
            let user = args
                .neo4j_user
                .clone()
                .or_else(|| config.store.neo4j_user.clone())
                .unwrap_or_else(|| "neo4j".to_string());
            let password = args
                .neo4j_password
                .clone()
                .ok_or_else(|| CliError::Config("NEO4J_PASSWORD is not set".into()))?;

            let neo4j = Neo4jConfig {
                database: config.store.neo4j_database.clone(),
                timeout_secs: config.store.neo4j_timeout_secs,
                ..Neo4jConfig::new(uri, user, password)
            };
            Ok(Neo4jStore::connect(neo4j)?.into())
        }
    }
}

/// What the completion service is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LlmTask {
    /// Triple extraction (`[llm] model`, `temperature`)
    Extract,
    /// Question answering (`[llm] ask_model`, `ask_temperature`)
    Ask,
}

/// Build the completion provider for a task; `--model` overrides either.
pub(crate) fn llm_provider(args: &LlmArgs, config: &Config, task: LlmTask) -> Result<OpenAiProvider> {
    let api_key = args
        .api_key
        .clone()
        .ok_or_else(|| CliError::Config("OPENAI_API_KEY is not set".into()))?;

    let (model, temperature) = match task {
        LlmTask::Extract => (&config.llm.model, config.llm.temperature),
        LlmTask::Ask => (&config.llm.ask_model, config.llm.ask_temperature),
    };

    let openai = OpenAiConfig {
        base_url: config.llm.base_url.clone(),
        model: args.model.clone().unwrap_or_else(|| model.clone()),
        temperature,
        timeout_secs: config.llm.timeout_secs,
        ..OpenAiConfig::new(api_key)
    };
    Ok(OpenAiProvider::new(openai)?)
}

/// Runtime for the commands that call the completion service.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
