//! Triple batch file: a JSON array written by extraction and read by loading

use crate::{Result, StoreError};
use adkg_domain::{RawTriple, Triple};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// One entry of the batch file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// Subject entity name
    pub subject: String,
    /// Relation phrase
    pub relation: String,
    /// Object entity name
    pub object: String,
    /// Source text, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl From<&Triple> for BatchRecord {
    fn from(triple: &Triple) -> Self {
        Self {
            subject: triple.subject.clone(),
            relation: triple.relation.clone(),
            object: triple.object.clone(),
            evidence: triple.evidence.clone(),
        }
    }
}

/// Write triples as a pretty-printed JSON array
///
/// The file is written next to its destination and renamed into place, so a
/// reader never sees a half-written batch.
pub fn write_batch<P: AsRef<Path>>(path: P, triples: &[Triple]) -> Result<()> {
    let path = path.as_ref();
    let records: Vec<BatchRecord> = triples.iter().map(BatchRecord::from).collect();
    let json = serde_json::to_string_pretty(&records)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;

    debug!("Wrote {} triples to {}", records.len(), path.display());
    Ok(())
}

/// Read a batch file without rejecting malformed entries
///
/// The top level must be a JSON array. Entries that are not objects, or whose
/// fields are missing or not strings, come back with those fields unset so
/// the loader can skip them with a warning.
///
/// # Errors
///
/// `StoreError::MissingFile` if the file does not exist; `StoreError::Json`
/// or `StoreError::InvalidData` if it is not a JSON array.
pub fn read_batch<P: AsRef<Path>>(path: P) -> Result<Vec<RawTriple>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StoreError::MissingFile(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&contents)?;
    let entries = json
        .as_array()
        .ok_or_else(|| StoreError::InvalidData("Batch file is not a JSON array".to_string()))?;

    Ok(entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            if !entry.is_object() {
                warn!("Batch entry {} is not an object", idx);
            }
            raw_triple(entry)
        })
        .collect())
}

fn raw_triple(entry: &Value) -> RawTriple {
    let field = |name: &str| entry.get(name).and_then(Value::as_str).map(str::to_string);

    RawTriple {
        subject: field("subject"),
        relation: field("relation"),
        object: field("object"),
        evidence: field("evidence"),
    }
}
