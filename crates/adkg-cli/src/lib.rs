//! ADKG CLI library.
//!
//! Command-line front end for the pipeline: `extract` turns the corpus into
//! a triple batch, `load` merges a batch into the graph store, `ask` answers
//! a question from the stored facts and `stats` reports graph size and
//! centrality.

pub mod analytics;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
