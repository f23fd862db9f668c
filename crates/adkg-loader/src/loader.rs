//! Core Loader implementation

use crate::config::LoaderConfig;
use crate::error::LoaderError;
use crate::types::{LoadReport, SkippedTriple};
use adkg_domain::traits::GraphStore;
use adkg_domain::{GraphFact, RawTriple, NO_EVIDENCE};
use tracing::{debug, info, warn};

/// The Loader merges triples into a graph store
///
/// The Loader owns its store for the whole run. Loading never clears the
/// store; `reset_store` does, and `run` calls it exactly once before
/// loading.
pub struct Loader<S: GraphStore> {
    store: S,
    config: LoaderConfig,
}

impl<S> Loader<S>
where
    S: GraphStore,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    /// Create a new Loader
    ///
    /// # Errors
    ///
    /// `LoaderError::Config` if the configuration does not validate.
    pub fn new(store: S, config: LoaderConfig) -> Result<Self, LoaderError> {
        config.validate().map_err(LoaderError::Config)?;
        Ok(Self { store, config })
    }

    /// Borrow the store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Delete every node and edge in the store
    pub fn reset_store(&mut self) -> Result<(), LoaderError> {
        self.store.reset().map_err(store_error)?;
        info!("Graph store cleared");
        Ok(())
    }

    /// Merge triples into the store
    ///
    /// Malformed entries are skipped with a warning. Evidence for each edge
    /// is the triple's own evidence if it has any, otherwise the corpus
    /// record at `position % corpus.len()`, otherwise a placeholder. Store
    /// errors abort the load.
    pub fn load(
        &mut self,
        triples: &[RawTriple],
        evidence_corpus: &[String],
    ) -> Result<LoadReport, LoaderError> {
        let mut report = LoadReport::default();
        info!("Loading {} triples", triples.len());

        for (position, raw) in triples.iter().enumerate() {
            let triple = match raw.validate() {
                Ok(triple) => triple,
                Err(reason) => {
                    warn!("Skipping triple {}: {}", position, reason);
                    report.skipped.push(SkippedTriple { position, reason });
                    continue;
                }
            };

            let evidence = triple
                .evidence
                .as_deref()
                .or_else(|| corpus_evidence(evidence_corpus, position))
                .unwrap_or(NO_EVIDENCE);

            let fact = GraphFact::from_triple(&triple, evidence, self.config.max_evidence_len);
            debug!(
                "Merging ({}:{})-[{}]->({}:{})",
                fact.subject.name,
                fact.subject.label,
                fact.edge.relation_type,
                fact.object.name,
                fact.object.label
            );
            self.store.upsert_fact(&fact).map_err(store_error)?;
            report.loaded += 1;
        }

        info!(
            "Loaded {} triples, skipped {} malformed",
            report.loaded,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Clear the store, then load
    pub fn run(
        &mut self,
        triples: &[RawTriple],
        evidence_corpus: &[String],
    ) -> Result<LoadReport, LoaderError> {
        self.reset_store()?;
        self.load(triples, evidence_corpus)
    }
}

fn corpus_evidence(corpus: &[String], position: usize) -> Option<&str> {
    if corpus.is_empty() {
        None
    } else {
        Some(corpus[position % corpus.len()].as_str())
    }
}

fn store_error<E>(e: E) -> LoaderError
where
    E: std::error::Error + Send + Sync + 'static,
{
    LoaderError::Store(Box::new(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adkg_domain::{EntityLabel, Triple, TripleField};
    use adkg_store::SqliteGraphStore;

    fn loader() -> Loader<SqliteGraphStore> {
        Loader::new(SqliteGraphStore::in_memory().unwrap(), LoaderConfig::default()).unwrap()
    }

    fn raw(subject: &str, relation: &str, object: &str) -> RawTriple {
        Triple::new(subject, relation, object).into()
    }

    fn corpus(records: &[&str]) -> Vec<String> {
        records.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_single_triple_creates_labeled_nodes() {
        let mut loader = loader();
        let report = loader
            .load(
                &[raw("APOE4 allele", "impairs", "clearance of amyloid-beta")],
                &corpus(&["X"]),
            )
            .unwrap();

        assert_eq!(report.loaded, 1);
        let store = loader.store();
        assert_eq!(store.entity_label("APOE4 allele").unwrap(), Some(EntityLabel::Gene));
        assert_eq!(
            store.entity_label("clearance of amyloid-beta").unwrap(),
            Some(EntityLabel::Pathology)
        );
        assert_eq!(
            store
                .evidence("APOE4 allele", "IMPAIRS", "clearance of amyloid-beta")
                .unwrap()
                .as_deref(),
            Some("X")
        );
    }

    #[test]
    fn test_loading_twice_is_idempotent() {
        let mut loader = loader();
        let batch = vec![
            raw("APOE4", "raises risk of", "Alzheimer's disease"),
            raw("amyloid plaques", "precede", "memory loss"),
        ];

        loader.load(&batch, &[]).unwrap();
        let first = loader.store().counts().unwrap();
        loader.load(&batch, &[]).unwrap();
        let second = loader.store().counts().unwrap();

        assert_eq!(first, second);
        assert_eq!(second.entities, 4);
        assert_eq!(second.relations, 2);
    }

    #[test]
    fn test_malformed_triple_is_skipped() {
        let mut loader = loader();
        let batch = vec![
            raw("APOE4", "impairs", "clearance"),
            RawTriple {
                subject: Some("APOE4".into()),
                relation: Some("impairs".into()),
                ..Default::default()
            },
            raw("tau", "spreads to", "cortex"),
        ];

        let report = loader.load(&batch, &[]).unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(report.total(), 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].position, 1);
        assert_eq!(report.skipped[0].reason.missing, TripleField::Object);
    }

    #[test]
    fn test_evidence_is_truncated() {
        let mut loader = loader();
        let long = "A".repeat(1000);
        loader.load(&[raw("a", "r", "b")], &[long]).unwrap();

        let evidence = loader.store().evidence("a", "R", "b").unwrap().unwrap();
        assert_eq!(evidence.chars().count(), 180);
    }

    #[test]
    fn test_configured_evidence_length() {
        let config = LoaderConfig { max_evidence_len: 250 };
        let mut loader = Loader::new(SqliteGraphStore::in_memory().unwrap(), config).unwrap();
        loader.load(&[raw("a", "r", "b")], &["é".repeat(400)]).unwrap();

        let evidence = loader.store().evidence("a", "R", "b").unwrap().unwrap();
        assert_eq!(evidence.chars().count(), 250);
    }

    #[test]
    fn test_evidence_wraps_around_corpus() {
        let mut loader = loader();
        let batch = vec![raw("a", "r", "b"), raw("c", "r", "d"), raw("e", "r", "f")];
        loader.load(&batch, &corpus(&["first", "second"])).unwrap();

        let store = loader.store();
        assert_eq!(store.evidence("a", "R", "b").unwrap().as_deref(), Some("first"));
        assert_eq!(store.evidence("c", "R", "d").unwrap().as_deref(), Some("second"));
        assert_eq!(store.evidence("e", "R", "f").unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_corpus_uses_placeholder() {
        let mut loader = loader();
        loader.load(&[raw("a", "r", "b")], &[]).unwrap();

        assert_eq!(
            loader.store().evidence("a", "R", "b").unwrap().as_deref(),
            Some(NO_EVIDENCE)
        );
    }

    #[test]
    fn test_own_evidence_preferred() {
        let mut loader = loader();
        let batch: Vec<RawTriple> =
            vec![Triple::new("a", "r", "b").with_evidence("from the abstract").into()];
        loader.load(&batch, &corpus(&["unrelated"])).unwrap();

        assert_eq!(
            loader.store().evidence("a", "R", "b").unwrap().as_deref(),
            Some("from the abstract")
        );
    }

    #[test]
    fn test_relation_is_canonicalized() {
        let mut loader = loader();
        loader.load(&[raw("APOE4", "is a risk-factor for", "AD")], &[]).unwrap();

        let records = loader.store().relations(10).unwrap();
        assert_eq!(records[0].relation_type, "IS_A_RISK_FACTOR_FOR");
    }

    #[test]
    fn test_run_resets_once_then_loads() {
        let mut loader = loader();
        loader.load(&[raw("old", "r", "fact")], &[]).unwrap();

        let report = loader.run(&[raw("new", "r", "fact")], &[]).unwrap();

        assert_eq!(report.loaded, 1);
        let counts = loader.store().counts().unwrap();
        assert_eq!(counts.entities, 2);
        assert_eq!(counts.relations, 1);
        assert_eq!(loader.store().entity_label("old").unwrap(), None);
    }

    #[test]
    fn test_load_does_not_clear() {
        let mut loader = loader();
        loader.load(&[raw("a", "r", "b")], &[]).unwrap();
        loader.load(&[raw("c", "r", "d")], &[]).unwrap();

        assert_eq!(loader.store().counts().unwrap().relations, 2);
    }

    #[test]
    fn test_empty_batch() {
        let mut loader = loader();
        let report = loader.run(&[], &corpus(&["x"])).unwrap();
        assert_eq!(report, LoadReport::default());
    }

    /// A store whose writes always fail with an I/O error
    struct BrokenStore;

    impl GraphStore for BrokenStore {
        type Error = std::io::Error;

        fn reset(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn upsert_fact(&mut self, _fact: &GraphFact) -> Result<(), Self::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "link down"))
        }

        fn counts(&self) -> Result<adkg_domain::GraphCounts, Self::Error> {
            Ok(Default::default())
        }

        fn relations(&self, _limit: usize) -> Result<Vec<adkg_domain::RelationRecord>, Self::Error> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_store_error_keeps_its_type() {
        let mut loader = Loader::new(BrokenStore, LoaderConfig::default()).unwrap();

        match loader.load(&[raw("a", "r", "b")], &[]) {
            Err(LoaderError::Store(source)) => {
                let io = source.downcast_ref::<std::io::Error>().unwrap();
                assert_eq!(io.kind(), std::io::ErrorKind::ConnectionReset);
            }
            other => panic!("Expected Store error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LoaderConfig { max_evidence_len: 251 };
        let result = Loader::new(SqliteGraphStore::in_memory().unwrap(), config);
        assert!(matches!(result, Err(LoaderError::Config(_))));
    }
}
