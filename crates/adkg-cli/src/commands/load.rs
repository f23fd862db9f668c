//! Load command implementation.

use crate::cli::LoadArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use adkg_loader::Loader;
use adkg_store::{read_batch, read_corpus};

/// Execute the load command.
pub fn execute_load(args: LoadArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let batch_path = args.batch.unwrap_or_else(|| config.paths.triples.clone());
    let corpus_path = args.corpus.unwrap_or_else(|| config.paths.corpus.clone());

    // Both inputs must exist before the store is touched
    let triples = read_batch(&batch_path)?;
    let corpus = read_corpus(&corpus_path)?;

    let store = super::open_store(&args.store, config)?;
    let mut loader = Loader::new(store, config.loader.clone())?;

    let report = if args.no_reset {
        loader.load(&triples, &corpus)?
    } else {
        loader.run(&triples, &corpus)?
    };

    println!("{}", formatter.load_report(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::StoreArgs;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use adkg_domain::traits::GraphStore;
    use adkg_domain::Triple;
    use adkg_store::{write_batch, SqliteGraphStore, StoreError};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn args(dir: &Path, no_reset: bool) -> LoadArgs {
        LoadArgs {
            batch: Some(dir.join("triples.json")),
            corpus: Some(dir.join("corpus.txt")),
            no_reset,
            store: StoreArgs {
                backend: None,
                db: Some(dir.join("adkg.db")),
                neo4j_uri: None,
                neo4j_user: None,
                neo4j_password: None,
            },
        }
    }

    fn formatter() -> Formatter {
        Formatter::new(OutputFormat::Quiet, false)
    }

    #[test]
    fn test_load_into_sqlite() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("corpus.txt"), "APOE4 abstract\n").unwrap();
        write_batch(
            dir.path().join("triples.json"),
            &[Triple::new("APOE4", "impairs", "amyloid clearance")],
        )
        .unwrap();

        execute_load(args(dir.path(), false), &Config::default(), &formatter()).unwrap();
        execute_load(args(dir.path(), false), &Config::default(), &formatter()).unwrap();

        let store = SqliteGraphStore::open(dir.path().join("adkg.db")).unwrap();
        let counts = store.counts().unwrap();
        assert_eq!(counts.entities, 2);
        assert_eq!(counts.relations, 1);
        assert_eq!(
            store.evidence("APOE4", "IMPAIRS", "amyloid clearance").unwrap().as_deref(),
            Some("APOE4 abstract")
        );
    }

    #[test]
    fn test_no_reset_keeps_existing_graph() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("corpus.txt"), "").unwrap();

        write_batch(dir.path().join("triples.json"), &[Triple::new("a", "r", "b")]).unwrap();
        execute_load(args(dir.path(), false), &Config::default(), &formatter()).unwrap();

        write_batch(dir.path().join("triples.json"), &[Triple::new("c", "r", "d")]).unwrap();
        execute_load(args(dir.path(), true), &Config::default(), &formatter()).unwrap();

        let store = SqliteGraphStore::open(dir.path().join("adkg.db")).unwrap();
        assert_eq!(store.counts().unwrap().relations, 2);
    }

    #[test]
    fn test_missing_batch_fails_before_opening_store() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("corpus.txt"), "x\n").unwrap();

        let result = execute_load(args(dir.path(), false), &Config::default(), &formatter());

        assert!(matches!(result, Err(CliError::Store(StoreError::MissingFile(_)))));
        assert!(!dir.path().join("adkg.db").exists());
    }
}
