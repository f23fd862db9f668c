//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{GraphCounts, GraphFact, RelationRecord};
use std::future::Future;

/// Trait for a labeled property graph store
///
/// Implemented by the infrastructure layer (adkg-store). Every write is a
/// merge keyed by entity name or edge identity, so repeated upserts of the
/// same fact never duplicate nodes or edges.
pub trait GraphStore {
    /// Error type for store operations
    type Error;

    /// Delete every node and edge
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Merge both entities and the edge between them, overwriting the
    /// edge's evidence
    fn upsert_fact(&mut self, fact: &GraphFact) -> Result<(), Self::Error>;

    /// Count nodes and edges
    fn counts(&self) -> Result<GraphCounts, Self::Error>;

    /// Read up to `limit` relations with their endpoint labels
    fn relations(&self, limit: usize) -> Result<Vec<RelationRecord>, Self::Error>;
}

/// Trait for a text-completion service
///
/// Implemented by the infrastructure layer (adkg-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a completion for the prompt
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Name of the model answering requests
    fn model_name(&self) -> &str;
}
