//! Types for load results

use adkg_domain::MalformedTriple;

/// A batch entry that was not loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTriple {
    /// Zero-based position in the batch
    pub position: usize,

    /// Why it was rejected
    pub reason: MalformedTriple,
}

/// Outcome of one load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Triples merged into the store
    pub loaded: usize,

    /// Malformed entries, in batch order
    pub skipped: Vec<SkippedTriple>,
}

impl LoadReport {
    /// Total entries seen
    pub fn total(&self) -> usize {
        self.loaded + self.skipped.len()
    }
}
