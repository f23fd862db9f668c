//! ADKG Domain Layer
//!
//! Core model of the Alzheimer's disease knowledge graph pipeline. Like any
//! domain layer here it has ZERO external dependencies: it defines the value
//! objects that flow from extraction to loading and the trait boundaries that
//! infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **Triple**: a `(subject, relation, object)` fact extracted from an abstract
//! - **Entity label**: coarse type guessed from an entity name
//! - **Canonical relation**: upper-case, underscore-separated relation type
//! - **Evidence**: truncated source snippet attached to every relation edge
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure functions for classification and normalization
//! - Trait definitions (`GraphStore`, `LlmProvider`) for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod evidence;
pub mod graph;
pub mod label;
pub mod relation;
pub mod traits;
pub mod triple;

// Re-exports for convenience
pub use evidence::{truncate_evidence, DEFAULT_EVIDENCE_LEN, MAX_EVIDENCE_LEN, NO_EVIDENCE};
pub use graph::{Entity, GraphCounts, GraphFact, RelationEdge, RelationRecord};
pub use label::{guess_label, EntityLabel};
pub use relation::canonicalize_relation;
pub use triple::{MalformedTriple, RawTriple, Triple, TripleField};
