//! Neo4j graph store over the bolt protocol
//!
//! Every statement is parameterized. The only text ever placed into a query
//! is an `EntityLabel` name, which comes from a closed enum. Relation types
//! are free text derived from extraction, so they are stored as the `type`
//! property of a `RELATION` edge rather than as a relationship type.
//!
//! Nodes carry the base label `Entity` (the merge key is its `name`) plus
//! one coarse label that is set only when the node is created.
//!
//! The driver is async; the store owns a current-thread runtime and blocks
//! on it, so it must not be used from inside another async context.

use crate::{Result, StoreError};
use adkg_domain::traits::GraphStore;
use adkg_domain::{EntityLabel, GraphCounts, GraphFact, RelationRecord};
use neo4rs::{ConfigBuilder, Graph, Row};
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// Default database name
pub const DEFAULT_DATABASE: &str = "neo4j";

/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// URI schemes the driver understands
pub const SUPPORTED_SCHEMES: [&str; 6] = ["bolt", "bolt+s", "bolt+ssc", "neo4j", "neo4j+s", "neo4j+ssc"];

/// Connection parameters
#[derive(Clone)]
pub struct Neo4jConfig {
    /// Server URI, e.g. `bolt://localhost:7687` or `neo4j+s://<id>.databases.neo4j.io`
    pub uri: String,
    /// User name
    pub user: String,
    /// Password
    pub password: String,
    /// Database name
    pub database: String,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
}

impl Neo4jConfig {
    /// Parameters for the default database
    pub fn new(uri: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            user: user.into(),
            password: password.into(),
            database: DEFAULT_DATABASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for Neo4jConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neo4jConfig")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Check that the URI names a scheme the driver can open
pub fn check_uri(uri: &str) -> Result<()> {
    let scheme = uri.split_once("://").map(|(scheme, _)| scheme);
    match scheme {
        Some(scheme) if SUPPORTED_SCHEMES.contains(&scheme) => Ok(()),
        _ => Err(StoreError::Connection(format!(
            "Neo4j URI must use one of {}:// schemes, got '{}'",
            SUPPORTED_SCHEMES.join("://, "),
            uri
        ))),
    }
}

/// A statement parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Param {
    Text(String),
    Int(i64),
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

/// A Cypher statement with its parameters
#[derive(Debug, Clone)]
pub(crate) struct Statement {
    text: String,
    params: Vec<(&'static str, Param)>,
}

impl Statement {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    fn param(mut self, key: &'static str, value: impl Into<Param>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    #[cfg(test)]
    fn get(&self, key: &str) -> Option<&Param> {
        self.params.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    fn to_query(&self) -> neo4rs::Query {
        self.params
            .iter()
            .fold(neo4rs::query(&self.text), |query, (key, value)| match value {
                Param::Text(text) => query.param(key, text.clone()),
                Param::Int(n) => query.param(key, *n),
            })
    }
}

/// Neo4j implementation of `GraphStore`
pub struct Neo4jStore {
    // Declared before the runtime so connections close while it still runs
    graph: Graph,
    runtime: Runtime,
    timeout: Duration,
}

impl Neo4jStore {
    /// Connect and verify that the database answers
    ///
    /// # Errors
    ///
    /// `StoreError::Connection` if the URI scheme is not a bolt scheme, the
    /// server is unreachable or does not answer in time, or the credentials
    /// are rejected.
    pub fn connect(config: Neo4jConfig) -> Result<Self> {
        check_uri(&config.uri)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let timeout = Duration::from_secs(config.timeout_secs);

        let driver_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .db(config.database.as_str())
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let graph = runtime
            .block_on(async { tokio::time::timeout(timeout, Graph::connect(driver_config)).await })
            .map_err(|_| timed_out(timeout))?
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let store = Self {
            graph,
            runtime,
            timeout,
        };

        // Any failure here means the server is not usable
        store
            .execute(Statement::new("RETURN 1 AS ok"))
            .map_err(|e| match e {
                StoreError::Query(msg) | StoreError::InvalidData(msg) => StoreError::Connection(msg),
                other => other,
            })?;
        info!("Connected to Neo4j at {}", config.uri);
        Ok(store)
    }

    fn block_on<T>(&self, work: impl Future<Output = Result<T>>) -> Result<T> {
        let timeout = self.timeout;
        self.runtime.block_on(async move {
            tokio::time::timeout(timeout, work)
                .await
                .map_err(|_| timed_out(timeout))?
        })
    }

    /// Run a statement that returns nothing
    fn run(&self, statement: Statement) -> Result<()> {
        debug!("Cypher: {}", statement.text);
        let graph = &self.graph;
        self.block_on(async move { graph.run(statement.to_query()).await.map_err(driver_error) })
    }

    /// Run a statement and collect its rows
    fn execute(&self, statement: Statement) -> Result<Vec<Row>> {
        debug!("Cypher: {}", statement.text);
        let graph = &self.graph;
        self.block_on(async move {
            let mut stream = graph.execute(statement.to_query()).await.map_err(driver_error)?;
            let mut rows = Vec::new();
            while let Some(row) = stream.next().await.map_err(driver_error)? {
                rows.push(row);
            }
            Ok(rows)
        })
    }
}

fn timed_out(timeout: Duration) -> StoreError {
    StoreError::Connection(format!("Neo4j did not answer within {}s", timeout.as_secs()))
}

/// Transport and authentication failures are connection errors; anything
/// the server reports about a statement is a query error
pub(crate) fn driver_error(e: neo4rs::Error) -> StoreError {
    match e {
        neo4rs::Error::IOError { .. }
        | neo4rs::Error::ConnectionError
        | neo4rs::Error::AuthenticationError(_) => StoreError::Connection(e.to_string()),
        other => StoreError::Query(other.to_string()),
    }
}

/// Build the merge statement for one fact
pub(crate) fn upsert_statement(fact: &GraphFact) -> Statement {
    let cypher = format!(
        "MERGE (a:Entity {{name: $subject}}) ON CREATE SET a:{subject_label}
         MERGE (b:Entity {{name: $object}}) ON CREATE SET b:{object_label}
         MERGE (a)-[r:RELATION {{type: $relation}}]->(b)
         SET r.evidence = $evidence",
        subject_label = fact.subject.label.as_str(),
        object_label = fact.object.label.as_str(),
    );

    Statement::new(cypher)
        .param("subject", fact.subject.name.as_str())
        .param("object", fact.object.name.as_str())
        .param("relation", fact.edge.relation_type.as_str())
        .param("evidence", fact.edge.evidence.as_str())
}

pub(crate) fn relations_statement(limit: usize) -> Statement {
    Statement::new(
        "MATCH (a:Entity)-[r:RELATION]->(b:Entity)
         RETURN a.name AS subject,
                [l IN labels(a) WHERE l <> 'Entity'][0] AS subject_label,
                r.type AS relation,
                b.name AS object,
                [l IN labels(b) WHERE l <> 'Entity'][0] AS object_label,
                r.evidence AS evidence
         LIMIT $limit",
    )
    .param("limit", i64::try_from(limit).unwrap_or(i64::MAX))
}

fn column<T>(row: &Row, key: &str) -> Result<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    row.get::<T>(key)
        .map_err(|e| StoreError::InvalidData(format!("Column '{}': {}", key, e)))
}

fn count(row: Option<&Row>, key: &str) -> Result<usize> {
    let row = row.ok_or_else(|| StoreError::InvalidData("Expected a count row".to_string()))?;
    let n: i64 = column(row, key)?;
    usize::try_from(n).map_err(|_| StoreError::InvalidData(format!("Negative count: {}", n)))
}

pub(crate) fn parse_label(label: Option<String>) -> Result<EntityLabel> {
    match label {
        Some(label) => EntityLabel::parse(&label)
            .ok_or_else(|| StoreError::InvalidData(format!("Unknown entity label: {}", label))),
        None => Ok(EntityLabel::Other),
    }
}

impl GraphStore for Neo4jStore {
    type Error = StoreError;

    fn reset(&mut self) -> Result<()> {
        self.run(Statement::new("MATCH (n) DETACH DELETE n"))?;
        debug!("Cleared all nodes and relationships");
        Ok(())
    }

    fn upsert_fact(&mut self, fact: &GraphFact) -> Result<()> {
        self.run(upsert_statement(fact))
    }

    fn counts(&self) -> Result<GraphCounts> {
        let entities = self.execute(Statement::new("MATCH (n:Entity) RETURN count(n) AS n"))?;
        let relations = self.execute(Statement::new("MATCH ()-[r:RELATION]->() RETURN count(r) AS n"))?;
        let labels = self.execute(Statement::new(
            "MATCH (n:Entity) UNWIND labels(n) AS label
             WITH label WHERE label <> 'Entity'
             RETURN label, count(*) AS n",
        ))?;

        let mut by_label = BTreeMap::new();
        for row in &labels {
            let label = parse_label(column::<Option<String>>(row, "label")?)?;
            by_label.insert(label, count(Some(row), "n")?);
        }

        Ok(GraphCounts {
            entities: count(entities.first(), "n")?,
            relations: count(relations.first(), "n")?,
            by_label,
        })
    }

    fn relations(&self, limit: usize) -> Result<Vec<RelationRecord>> {
        let rows = self.execute(relations_statement(limit))?;

        rows.iter()
            .map(|row| {
                Ok(RelationRecord {
                    subject: column(row, "subject")?,
                    subject_label: parse_label(column(row, "subject_label")?)?,
                    relation_type: column(row, "relation")?,
                    object: column(row, "object")?,
                    object_label: parse_label(column(row, "object_label")?)?,
                    evidence: column::<Option<String>>(row, "evidence")?.unwrap_or_default(),
                })
            })
            .collect()
    }
}
