//! ADKG Loader
//!
//! Merges extracted triples into a labeled property graph.
//!
//! # Architecture
//!
//! ```text
//! batch file → RawTriple → validate → GraphFact → GraphStore
//! ```
//!
//! Each valid triple becomes two entities (labeled by `guess_label`) and one
//! edge whose type is the canonicalized relation and whose evidence is a
//! truncated snippet of source text. Writes are merges, so loading the same
//! batch twice leaves the graph unchanged.
//!
//! # Example Usage
//!
//! ```
//! use adkg_domain::{RawTriple, Triple};
//! use adkg_loader::{Loader, LoaderConfig};
//! use adkg_store::SqliteGraphStore;
//!
//! let store = SqliteGraphStore::in_memory().unwrap();
//! let mut loader = Loader::new(store, LoaderConfig::default()).unwrap();
//!
//! let batch: Vec<RawTriple> = vec![Triple::new("APOE4", "impairs", "amyloid clearance").into()];
//! let report = loader.run(&batch, &[]).unwrap();
//! assert_eq!(report.loaded, 1);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod types;

pub use config::LoaderConfig;
pub use error::LoaderError;
pub use loader::Loader;
pub use types::{LoadReport, SkippedTriple};
