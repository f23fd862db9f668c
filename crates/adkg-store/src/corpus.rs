//! Corpus file: one cleaned abstract per line

use crate::{Result, StoreError};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read corpus records in file order
///
/// Lines are trimmed and blank lines dropped, so a record's ordinal is its
/// position among non-blank lines. Extraction and loading both read the
/// corpus through this function and therefore agree on ordinals.
///
/// # Errors
///
/// `StoreError::MissingFile` if the file does not exist.
pub fn read_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StoreError::MissingFile(path.to_path_buf()));
    }

    let records: Vec<String> = fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    debug!("Read {} corpus records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reads_trimmed_non_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        fs::write(&path, "  first abstract  \n\n\nsecond abstract\n   \n").unwrap();

        let records = read_corpus(&path).unwrap();
        assert_eq!(records, vec!["first abstract", "second abstract"]);
    }

    #[test]
    fn test_empty_corpus() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        fs::write(&path, "").unwrap();

        assert!(read_corpus(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_corpus() {
        let dir = tempdir().unwrap();
        let result = read_corpus(dir.path().join("absent.txt"));
        assert!(matches!(result, Err(StoreError::MissingFile(_))));
    }
}
