//! Triple module - extracted facts and their validation

use std::fmt;

/// A validated `(subject, relation, object)` fact
///
/// All three required fields are non-empty. `relation` keeps the free-text
/// phrase produced by extraction; canonicalization happens at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    /// Subject entity name
    pub subject: String,

    /// Relation phrase
    pub relation: String,

    /// Object entity name
    pub object: String,

    /// Source text the fact was extracted from, if known
    pub evidence: Option<String>,
}

impl Triple {
    /// Create a triple without evidence
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            relation: relation.into(),
            object: object.into(),
            evidence: None,
        }
    }

    /// Attach provenance text
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }
}

impl From<Triple> for RawTriple {
    fn from(triple: Triple) -> Self {
        RawTriple {
            subject: Some(triple.subject),
            relation: Some(triple.relation),
            object: Some(triple.object),
            evidence: triple.evidence,
        }
    }
}

/// A required field of a triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripleField {
    /// The subject entity
    Subject,
    /// The relation phrase
    Relation,
    /// The object entity
    Object,
}

impl TripleField {
    /// Field name as written in the batch file
    pub fn as_str(&self) -> &'static str {
        match self {
            TripleField::Subject => "subject",
            TripleField::Relation => "relation",
            TripleField::Object => "object",
        }
    }
}

/// Reason a raw triple was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedTriple {
    /// First required field that was missing or blank
    pub missing: TripleField,
}

impl fmt::Display for MalformedTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing or empty '{}'", self.missing.as_str())
    }
}

impl std::error::Error for MalformedTriple {}

/// An unvalidated triple as read from a batch file
///
/// Any field may be absent. `validate` is the only way to obtain a `Triple`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTriple {
    /// Subject entity name
    pub subject: Option<String>,
    /// Relation phrase
    pub relation: Option<String>,
    /// Object entity name
    pub object: Option<String>,
    /// Provenance text
    pub evidence: Option<String>,
}

impl RawTriple {
    /// Validate required fields, rejecting missing or blank values
    ///
    /// Values are kept exactly as given; entity names are case- and
    /// whitespace-sensitive keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use adkg_domain::{RawTriple, TripleField};
    ///
    /// let raw = RawTriple {
    ///     subject: Some("APOE4".into()),
    ///     relation: Some("impairs".into()),
    ///     object: None,
    ///     evidence: None,
    /// };
    /// assert_eq!(raw.validate().unwrap_err().missing, TripleField::Object);
    /// ```
    pub fn validate(&self) -> Result<Triple, MalformedTriple> {
        let subject = required(&self.subject, TripleField::Subject)?;
        let relation = required(&self.relation, TripleField::Relation)?;
        let object = required(&self.object, TripleField::Object)?;

        Ok(Triple {
            subject,
            relation,
            object,
            evidence: self.evidence.clone().filter(|e| !e.trim().is_empty()),
        })
    }
}

fn required(value: &Option<String>, field: TripleField) -> Result<String, MalformedTriple> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(MalformedTriple { missing: field }),
    }
}
