//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use crate::types::{ExtractionReport, RecordOutcome};
use adkg_domain::traits::LlmProvider;
use adkg_domain::Triple;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

/// The Extractor turns abstracts into `(subject, relation, object)` triples
///
/// Records are processed strictly one at a time. A failed attempt is retried
/// after a fixed delay; a record whose attempts are all spent yields no
/// triples and extraction moves on.
pub struct Extractor<L: LlmProvider> {
    llm_provider: L,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a new Extractor
    ///
    /// # Errors
    ///
    /// `ExtractorError::Config` if the configuration does not validate.
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            llm_provider,
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract triples from one record with up to `max_retries` attempts
    ///
    /// Returns an empty list when the record is too short, when the model
    /// finds nothing, or when every attempt fails. Each triple carries the
    /// record text as its evidence.
    pub async fn extract(&self, text: &str, max_retries: u32) -> Vec<Triple> {
        match self.run_record(text, max_retries).await {
            RecordOutcome::Extracted { triples, .. } => triples,
            RecordOutcome::SkippedShort | RecordOutcome::Exhausted { .. } => Vec::new(),
        }
    }

    /// Extract triples from one record using the configured retry budget
    pub async fn extract_record(&self, text: &str) -> Vec<Triple> {
        self.extract(text, self.config.max_retries).await
    }

    /// Extract every record in order
    ///
    /// After each record that was sent to the LLM the extractor pauses for
    /// the inter-record delay, whether or not the record succeeded.
    /// `on_progress` receives the record index and all triples so far.
    pub async fn extract_corpus<F>(&self, records: &[String], mut on_progress: F) -> ExtractionReport
    where
        F: FnMut(usize, &[Triple]),
    {
        let mut report = ExtractionReport::default();
        info!("Extracting triples from {} records", records.len());

        for (idx, record) in records.iter().enumerate() {
            let sent = match self.run_record(record, self.config.max_retries).await {
                RecordOutcome::SkippedShort => {
                    debug!("Record {} is too short, skipping", idx);
                    report.records_skipped_short += 1;
                    false
                }
                RecordOutcome::Extracted { triples, attempts } => {
                    info!("Record {}/{}: {} triples", idx + 1, records.len(), triples.len());
                    report.records_processed += 1;
                    report.total_attempts += attempts;
                    report.triples.extend(triples);
                    true
                }
                RecordOutcome::Exhausted { attempts } => {
                    report.records_processed += 1;
                    report.records_failed += 1;
                    report.total_attempts += attempts;
                    true
                }
            };

            if sent {
                sleep(self.config.inter_record_delay()).await;
            }
            on_progress(idx, &report.triples);
        }

        info!(
            "Extraction complete: {} triples from {} records ({} short, {} failed)",
            report.triples.len(),
            report.records_processed,
            report.records_skipped_short,
            report.records_failed
        );
        report
    }

    async fn run_record(&self, text: &str, max_retries: u32) -> RecordOutcome {
        if text.trim().chars().count() < self.config.min_text_length {
            return RecordOutcome::SkippedShort;
        }

        let prompt = PromptBuilder::new(text).build();
        debug!("Prompt length: {} chars", prompt.len());

        for attempt in 1..=max_retries {
            match self.try_once(&prompt).await {
                Ok(triples) => {
                    let triples = triples
                        .into_iter()
                        .map(|t| t.with_evidence(text))
                        .collect();
                    return RecordOutcome::Extracted {
                        triples,
                        attempts: attempt as usize,
                    };
                }
                Err(e) => {
                    warn!("Attempt {}/{} failed: {}", attempt, max_retries, e);
                    if attempt < max_retries {
                        sleep(self.config.retry_delay()).await;
                    }
                }
            }
        }

        warn!("Giving up on record after {} attempts", max_retries);
        RecordOutcome::Exhausted {
            attempts: max_retries as usize,
        }
    }

    async fn try_once(&self, prompt: &str) -> Result<Vec<Triple>, ExtractorError> {
        let response = timeout(self.config.request_timeout(), self.llm_provider.generate(prompt))
            .await
            .map_err(|_| ExtractorError::Timeout)?
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());
        parse_llm_response(&response)
    }
}
