//! Extract command implementation.

use super::LlmTask;
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use adkg_domain::traits::LlmProvider;
use adkg_extractor::Extractor;
use adkg_store::{read_corpus, write_batch};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let corpus_path = args.corpus.unwrap_or_else(|| config.paths.corpus.clone());
    let output_path = args.output.unwrap_or_else(|| config.paths.triples.clone());

    // Fail on a missing corpus before touching the service
    let records = read_corpus(&corpus_path)?;
    info!("Read {} records from {}", records.len(), corpus_path.display());

    let pb = progress_bar(records.len(), formatter);

    let runtime = super::runtime()?;
    let report = runtime.block_on(async {
        let provider = super::llm_provider(&args.llm, config, LlmTask::Extract)?;
        info!("Extracting with model {}", provider.model_name());
        let extractor = Extractor::new(provider, config.extractor.clone())?;

        let checkpoint = args.checkpoint;
        let report = extractor
            .extract_corpus(&records, |idx, triples| {
                pb.set_position(idx as u64 + 1);
                pb.set_message(format!("{} triples", triples.len()));
                if checkpoint {
                    if let Err(e) = write_batch(&output_path, triples) {
                        warn!("Checkpoint after record {} failed: {}", idx, e);
                    }
                }
            })
            .await;
        Ok::<_, crate::error::CliError>(report)
    });
    pb.finish_and_clear();
    let report = report?;

    write_batch(&output_path, &report.triples)?;
    println!("{}", formatter.extraction_report(&report, &output_path)?);

    Ok(())
}

fn progress_bar(len: usize, formatter: &Formatter) -> ProgressBar {
    if !formatter.is_interactive() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    match ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} {msg}")
    {
        Ok(style) => pb.set_style(style.progress_chars("##-")),
        Err(e) => warn!("Progress bar template rejected: {}", e),
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::LlmArgs;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use adkg_store::{read_batch, StoreError};
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    const ABSTRACT: &str = "The APOE4 allele impairs astrocytic clearance of amyloid-beta, \
        increasing plaque deposition in the hippocampus of aged transgenic mice.";

    fn args(dir: &Path, checkpoint: bool) -> ExtractArgs {
        ExtractArgs {
            corpus: Some(dir.join("corpus.txt")),
            output: Some(dir.join("out.json")),
            checkpoint,
            llm: LlmArgs {
                api_key: Some("sk-test".into()),
                model: None,
            },
        }
    }

    fn config_for(server: &mockito::ServerGuard) -> Config {
        let mut config = Config::default();
        config.llm.base_url = server.url();
        config.extractor.inter_record_delay_ms = 0;
        config.extractor.retry_delay_secs = 0;
        config
    }

    /// Serve one triple per request and note how many triples the batch
    /// file held when each request arrived.
    fn serve_triples(
        server: &mut mockito::ServerGuard,
        batch: &Path,
    ) -> (mockito::Mock, Arc<Mutex<Vec<Option<usize>>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let body = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": r#"[{"subject": "APOE4 allele", "relation": "impairs", "object": "amyloid clearance"}]"#
                }
            }]
        })
        .to_string();

        let recorder = Arc::clone(&seen);
        let batch = batch.to_path_buf();
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |_| {
                let on_disk = read_batch(&batch).ok().map(|b| b.len());
                recorder.lock().unwrap().push(on_disk);
                body.clone().into_bytes()
            })
            .expect(2)
            .create();
        (mock, seen)
    }

    #[test]
    fn test_missing_corpus_fails_before_any_request() {
        let dir = tempdir().unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let result = execute_extract(args(dir.path(), false), &Config::default(), &formatter);

        assert!(matches!(result, Err(CliError::Store(StoreError::MissingFile(_)))));
        assert!(!dir.path().join("out.json").exists());
    }

    #[test]
    fn test_checkpoint_writes_batch_after_each_record() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("corpus.txt"), format!("{}\n{}\n", ABSTRACT, ABSTRACT)).unwrap();
        let mut server = mockito::Server::new();
        let (mock, seen) = serve_triples(&mut server, &dir.path().join("out.json"));
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_extract(args(dir.path(), true), &config_for(&server), &formatter).unwrap();

        mock.assert();
        assert_eq!(*seen.lock().unwrap(), vec![None, Some(1)]);
        let batch = read_batch(dir.path().join("out.json")).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].evidence.as_deref(), Some(ABSTRACT));
    }

    #[test]
    fn test_without_checkpoint_batch_is_written_once() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("corpus.txt"), format!("{}\n{}\n", ABSTRACT, ABSTRACT)).unwrap();
        let mut server = mockito::Server::new();
        let (mock, seen) = serve_triples(&mut server, &dir.path().join("out.json"));
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_extract(args(dir.path(), false), &config_for(&server), &formatter).unwrap();

        mock.assert();
        assert_eq!(*seen.lock().unwrap(), vec![None, None]);
        assert_eq!(read_batch(dir.path().join("out.json")).unwrap().len(), 2);
    }
}
