//! ADKG Extractor
//!
//! Turns PubMed abstracts into `(subject, relation, object)` triples with an
//! LLM.
//!
//! # Architecture
//!
//! ```text
//! Corpus records → Extractor → LLM → Triples → batch file
//! ```
//!
//! # Behavior
//!
//! - Records shorter than `min_text_length` are skipped without a request
//! - Markdown code fences around the JSON answer are stripped
//! - Failed attempts (transport error, timeout, unparseable answer) are
//!   retried after `retry_delay_secs`; a record that exhausts its attempts
//!   contributes nothing
//! - Records are processed one at a time with `inter_record_delay_ms`
//!   between them
//!
//! # Example Usage
//!
//! ```no_run
//! use adkg_extractor::{Extractor, ExtractorConfig};
//! use adkg_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new("[]");
//! let extractor = Extractor::new(llm, ExtractorConfig::default())?;
//!
//! let records = vec!["An abstract about APOE4 and amyloid-beta...".to_string()];
//! let report = extractor.extract_corpus(&records, |_, _| {}).await;
//!
//! println!("Extracted {} triples", report.triples.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::parse_llm_response;
pub use prompt::PromptBuilder;
pub use types::ExtractionReport;
