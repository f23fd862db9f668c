//! SQLite-backed graph store

use crate::{Result, StoreError};
use adkg_domain::traits::GraphStore;
use adkg_domain::{EntityLabel, GraphCounts, GraphFact, RelationRecord};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// SQLite implementation of `GraphStore`
///
/// Entities live in `entities(name, label)` and edges in
/// `relations(subject, relation_type, object, evidence)`. Uniqueness
/// constraints on the entity name and the edge identity make every write a
/// merge.
///
/// When a name is merged again under a different label the first label is
/// kept.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own store.
pub struct SqliteGraphStore {
    conn: Connection,
}

impl SqliteGraphStore {
    /// Open (or create) a store at the given database path
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use adkg_store::SqliteGraphStore;
    ///
    /// let store = SqliteGraphStore::open("adkg.db").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| StoreError::Connection(e.to_string()))?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create a throwaway in-memory store
    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Label stored for an entity, if the entity exists
    pub fn entity_label(&self, name: &str) -> Result<Option<EntityLabel>> {
        let label: Option<String> = self
            .conn
            .query_row(
                "SELECT label FROM entities WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        label.map(|l| parse_label(&l)).transpose()
    }

    /// Evidence stored on an edge, if the edge exists
    pub fn evidence(&self, subject: &str, relation_type: &str, object: &str) -> Result<Option<String>> {
        let evidence = self
            .conn
            .query_row(
                "SELECT evidence FROM relations
                 WHERE subject = ?1 AND relation_type = ?2 AND object = ?3",
                params![subject, relation_type, object],
                |row| row.get(0),
            )
            .optional()?;
        Ok(evidence)
    }

    fn count(&self, table_sql: &str) -> Result<usize> {
        let n: i64 = self.conn.query_row(table_sql, [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

fn parse_label(label: &str) -> Result<EntityLabel> {
    EntityLabel::parse(label)
        .ok_or_else(|| StoreError::InvalidData(format!("Unknown entity label: {}", label)))
}

fn to_sql_error(e: StoreError, column: usize) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
}

impl GraphStore for SqliteGraphStore {
    type Error = StoreError;

    fn reset(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "DELETE FROM relations;
             DELETE FROM entities;",
        )?;
        debug!("Cleared all entities and relations");
        Ok(())
    }

    fn upsert_fact(&mut self, fact: &GraphFact) -> Result<()> {
        let tx = self.conn.transaction()?;

        for entity in [&fact.subject, &fact.object] {
            tx.execute(
                "INSERT INTO entities (name, label) VALUES (?1, ?2)
                 ON CONFLICT(name) DO NOTHING",
                params![&entity.name, entity.label.as_str()],
            )?;
        }

        tx.execute(
            "INSERT INTO relations (subject, relation_type, object, evidence)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(subject, relation_type, object) DO UPDATE SET
             evidence = excluded.evidence",
            params![
                &fact.edge.subject,
                &fact.edge.relation_type,
                &fact.edge.object,
                &fact.edge.evidence,
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn counts(&self) -> Result<GraphCounts> {
        let entities = self.count("SELECT COUNT(*) FROM entities")?;
        let relations = self.count("SELECT COUNT(*) FROM relations")?;

        let mut stmt = self
            .conn
            .prepare("SELECT label, COUNT(*) FROM entities GROUP BY label")?;
        let rows = stmt
            .query_map([], |row| {
                let label: String = row.get(0)?;
                let n: i64 = row.get(1)?;
                Ok((label, n as usize))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut by_label = BTreeMap::new();
        for (label, n) in rows {
            by_label.insert(parse_label(&label)?, n);
        }

        Ok(GraphCounts {
            entities,
            relations,
            by_label,
        })
    }

    fn relations(&self, limit: usize) -> Result<Vec<RelationRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT r.subject, s.label, r.relation_type, r.object, o.label, r.evidence
             FROM relations r
             JOIN entities s ON s.name = r.subject
             JOIN entities o ON o.name = r.object
             ORDER BY r.rowid
             LIMIT ?1",
        )?;

        let records = stmt
            .query_map(params![limit as i64], |row| {
                let subject_label: String = row.get(1)?;
                let object_label: String = row.get(4)?;
                Ok(RelationRecord {
                    subject: row.get(0)?,
                    subject_label: parse_label(&subject_label).map_err(|e| to_sql_error(e, 1))?,
                    relation_type: row.get(2)?,
                    object: row.get(3)?,
                    object_label: parse_label(&object_label).map_err(|e| to_sql_error(e, 4))?,
                    evidence: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }
}
