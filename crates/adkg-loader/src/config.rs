//! Configuration for the Loader

use adkg_domain::{DEFAULT_EVIDENCE_LEN, MAX_EVIDENCE_LEN};
use serde::{Deserialize, Serialize};

/// Configuration for the Loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Evidence stored on an edge is cut to this many characters
    pub max_evidence_len: usize,
}

impl LoaderConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_evidence_len == 0 {
            return Err("max_evidence_len must be greater than 0".to_string());
        }
        if self.max_evidence_len > MAX_EVIDENCE_LEN {
            return Err(format!(
                "max_evidence_len cannot exceed {} (got {})",
                MAX_EVIDENCE_LEN, self.max_evidence_len
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_evidence_len: DEFAULT_EVIDENCE_LEN,
        }
    }
}
