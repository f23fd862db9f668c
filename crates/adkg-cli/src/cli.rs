//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// ADKG - Build and query an Alzheimer's disease knowledge graph.
#[derive(Debug, Parser)]
#[command(name = "adkg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.adkg/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (counts only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract triples from the corpus with the LLM
    Extract(ExtractArgs),

    /// Load a triple batch into the graph store
    Load(LoadArgs),

    /// Answer a question from the facts in the graph
    Ask(AskArgs),

    /// Show graph size and the most central entities
    Stats(StatsArgs),
}

/// Text-completion service options.
#[derive(Debug, Clone, Args)]
pub struct LlmArgs {
    /// API key for the completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name
    #[arg(long)]
    pub model: Option<String>,
}

/// Graph backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendArg {
    /// Local SQLite database
    Sqlite,
    /// Neo4j over bolt
    Neo4j,
}

/// Graph store options.
#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// Graph backend
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Neo4j bolt URI (bolt://, neo4j://, neo4j+s://)
    #[arg(long, env = "NEO4J_URI")]
    pub neo4j_uri: Option<String>,

    /// Neo4j user
    #[arg(long, env = "NEO4J_USER")]
    pub neo4j_user: Option<String>,

    /// Neo4j password
    #[arg(long, env = "NEO4J_PASSWORD", hide_env_values = true)]
    pub neo4j_password: Option<String>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Corpus file, one abstract per line
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Output batch file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Rewrite the batch file after every record
    #[arg(long)]
    pub checkpoint: bool,

    #[command(flatten)]
    pub llm: LlmArgs,
}

/// Arguments for the load command.
#[derive(Debug, Parser)]
pub struct LoadArgs {
    /// Triple batch file
    #[arg(short, long)]
    pub batch: Option<PathBuf>,

    /// Corpus file used for evidence when a triple has none
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Merge into the existing graph instead of clearing it first
    #[arg(long)]
    pub no_reset: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Question to answer
    pub question: String,

    /// Maximum number of facts given to the model
    #[arg(short, long, default_value = "200")]
    pub limit: usize,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub llm: LlmArgs,
}

/// Arguments for the stats command.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Maximum number of relations fetched for centrality analysis
    #[arg(short, long, default_value = "75")]
    pub limit: usize,

    /// Number of most central entities to list
    #[arg(short, long, default_value = "10")]
    pub top: usize,

    #[command(flatten)]
    pub store: StoreArgs,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<BackendArg> for crate::config::Backend {
    fn from(backend: BackendArg) -> Self {
        match backend {
            BackendArg::Sqlite => crate::config::Backend::Sqlite,
            BackendArg::Neo4j => crate::config::Backend::Neo4j,
        }
    }
}
