//! ADKG Storage Layer
//!
//! Everything the pipeline persists:
//!
//! - the corpus file (one cleaned abstract per line)
//! - the triple batch file (JSON array written by extraction, read by loading)
//! - the graph store, behind the `GraphStore` trait from `adkg-domain`
//!
//! # Graph backends
//!
//! - `SqliteGraphStore`: labeled property graph in SQLite (`:memory:` for tests)
//! - `Neo4jStore`: Neo4j over bolt (`bolt://`, `neo4j://`, `neo4j+s://`)
//! - `AnyGraphStore`: whichever of the two the configuration selects
//!
//! # Examples
//!
//! ```
//! use adkg_domain::traits::GraphStore;
//! use adkg_store::SqliteGraphStore;
//!
//! let store = SqliteGraphStore::in_memory().unwrap();
//! assert_eq!(store.counts().unwrap().entities, 0);
//! ```

#![warn(missing_docs)]

pub mod any;
pub mod batch;
pub mod corpus;
pub mod neo4j;
pub mod sqlite;

use std::path::PathBuf;
use thiserror::Error;

pub use any::AnyGraphStore;
pub use batch::{read_batch, write_batch, BatchRecord};
pub use corpus::read_corpus;
pub use neo4j::{Neo4jConfig, Neo4jStore};
pub use sqlite::SqliteGraphStore;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Graph store cannot be reached or refused the credentials
    #[error("Connection error: {0}")]
    Connection(String),

    /// Graph store rejected a query
    #[error("Query error: {0}")]
    Query(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required input file does not exist
    #[error("Input file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
