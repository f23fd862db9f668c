//! Runtime choice of graph backend

use crate::{Neo4jStore, Result, SqliteGraphStore, StoreError};
use adkg_domain::traits::GraphStore;
use adkg_domain::{GraphCounts, GraphFact, RelationRecord};

/// A graph store selected by configuration
pub enum AnyGraphStore {
    /// Local SQLite database
    Sqlite(SqliteGraphStore),
    /// Remote Neo4j server
    Neo4j(Neo4jStore),
}

impl AnyGraphStore {
    /// Short backend name for display
    pub fn backend_name(&self) -> &'static str {
        match self {
            AnyGraphStore::Sqlite(_) => "sqlite",
            AnyGraphStore::Neo4j(_) => "neo4j",
        }
    }
}

impl From<SqliteGraphStore> for AnyGraphStore {
    fn from(store: SqliteGraphStore) -> Self {
        AnyGraphStore::Sqlite(store)
    }
}

impl From<Neo4jStore> for AnyGraphStore {
    fn from(store: Neo4jStore) -> Self {
        AnyGraphStore::Neo4j(store)
    }
}

impl GraphStore for AnyGraphStore {
    type Error = StoreError;

    fn reset(&mut self) -> Result<()> {
        match self {
            AnyGraphStore::Sqlite(s) => s.reset(),
            AnyGraphStore::Neo4j(s) => s.reset(),
        }
    }

    fn upsert_fact(&mut self, fact: &GraphFact) -> Result<()> {
        match self {
            AnyGraphStore::Sqlite(s) => s.upsert_fact(fact),
            AnyGraphStore::Neo4j(s) => s.upsert_fact(fact),
        }
    }

    fn counts(&self) -> Result<GraphCounts> {
        match self {
            AnyGraphStore::Sqlite(s) => s.counts(),
            AnyGraphStore::Neo4j(s) => s.counts(),
        }
    }

    fn relations(&self, limit: usize) -> Result<Vec<RelationRecord>> {
        match self {
            AnyGraphStore::Sqlite(s) => s.relations(limit),
            AnyGraphStore::Neo4j(s) => s.relations(limit),
        }
    }
}
