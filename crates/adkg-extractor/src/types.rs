//! Types for extraction results

use adkg_domain::Triple;

/// Outcome of extracting a whole corpus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// All triples, in record order
    pub triples: Vec<Triple>,

    /// Records sent to the LLM
    pub records_processed: usize,

    /// Records skipped for being shorter than the minimum length
    pub records_skipped_short: usize,

    /// Records whose every attempt failed
    pub records_failed: usize,

    /// LLM requests made across all records
    pub total_attempts: usize,
}

impl ExtractionReport {
    /// Total records seen
    pub fn records_total(&self) -> usize {
        self.records_processed + self.records_skipped_short
    }
}

/// Outcome of extracting one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RecordOutcome {
    /// Too short; no request was made
    SkippedShort,
    /// An attempt succeeded (possibly with zero triples)
    Extracted { triples: Vec<Triple>, attempts: usize },
    /// Every attempt failed
    Exhausted { attempts: usize },
}
