//! Graph module - entities, relation edges, and the unit of upsert

use crate::evidence::truncate_evidence;
use crate::label::{guess_label, EntityLabel};
use crate::relation::canonicalize_relation;
use crate::triple::Triple;
use std::collections::BTreeMap;

/// A graph node keyed by its exact name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entity {
    /// Entity name (case-sensitive, whitespace preserved)
    pub name: String,

    /// Coarse type
    pub label: EntityLabel,
}

impl Entity {
    /// Create an entity, guessing its label from the name
    pub fn classify(name: impl Into<String>) -> Self {
        let name = name.into();
        let label = guess_label(&name);
        Self { name, label }
    }
}

/// A directed, typed edge between two entities
///
/// Identity is `(subject, relation_type, object)`; evidence is an attribute
/// that a later upsert may overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationEdge {
    /// Subject entity name
    pub subject: String,

    /// Canonical relation type
    pub relation_type: String,

    /// Object entity name
    pub object: String,

    /// Truncated provenance text
    pub evidence: String,
}

/// Everything a store needs to upsert one triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphFact {
    /// Subject node
    pub subject: Entity,

    /// Object node
    pub object: Entity,

    /// Edge from subject to object
    pub edge: RelationEdge,
}

impl GraphFact {
    /// Build a fact from a validated triple and the evidence chosen for it
    ///
    /// Both entities are classified, the relation is canonicalized, and the
    /// evidence is truncated to `max_evidence_len` characters.
    pub fn from_triple(triple: &Triple, evidence: &str, max_evidence_len: usize) -> Self {
        let subject = Entity::classify(triple.subject.clone());
        let object = Entity::classify(triple.object.clone());
        let edge = RelationEdge {
            subject: subject.name.clone(),
            relation_type: canonicalize_relation(&triple.relation),
            object: object.name.clone(),
            evidence: truncate_evidence(evidence, max_evidence_len),
        };

        Self { subject, object, edge }
    }
}

/// A relation as read back from the store, joined with node labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRecord {
    /// Subject entity name
    pub subject: String,
    /// Subject label
    pub subject_label: EntityLabel,
    /// Canonical relation type
    pub relation_type: String,
    /// Object entity name
    pub object: String,
    /// Object label
    pub object_label: EntityLabel,
    /// Stored evidence
    pub evidence: String,
}

/// Size of the loaded graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphCounts {
    /// Number of entity nodes
    pub entities: usize,

    /// Number of relation edges
    pub relations: usize,

    /// Entity count per label (labels with no entities are omitted)
    pub by_label: BTreeMap<EntityLabel, usize>,
}
