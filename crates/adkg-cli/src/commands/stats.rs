//! Stats command implementation.

use crate::analytics::GraphAnalytics;
use crate::cli::StatsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use adkg_domain::traits::GraphStore;
use tracing::info;

/// Execute the stats command.
pub fn execute_stats(args: StatsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = super::open_store(&args.store, config)?;
    let counts = store.counts()?;

    let relations = store.relations(args.limit)?;
    info!("Analyzing {} relations", relations.len());
    let analytics = GraphAnalytics::from_relations(&relations);

    println!(
        "{}",
        formatter.stats(&counts, &analytics, args.top, store.backend_name())?
    );
    Ok(())
}
