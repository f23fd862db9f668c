//! Label module - coarse entity types and the name-based label heuristic

use std::fmt;

/// Coarse type of a graph entity
///
/// The set is closed: these are the only node labels the graph store ever
/// sees, which is what allows a store to place a label into query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityLabel {
    /// Genes and alleles (APOE4, PSEN1, ...)
    Gene,

    /// Pathological processes and structures (amyloid plaques, ...)
    Pathology,

    /// Diseases (Alzheimer's disease, dementia)
    Disease,

    /// Clinical symptoms (memory loss, cognitive decline)
    Symptom,

    /// Anything the heuristic does not recognize
    Other,
}

/// Keyword rules in priority order; the first rule with a matching keyword wins.
const LABEL_RULES: [(EntityLabel, &[&str]); 4] = [
    (EntityLabel::Gene, &["apoe", "psen", "gene"]),
    (EntityLabel::Pathology, &["amyloid", "plaque", "clearance"]),
    (EntityLabel::Disease, &["alzheimer", "dementia"]),
    (EntityLabel::Symptom, &["memory", "cognitive", "decline"]),
];

impl EntityLabel {
    /// Every label, in heuristic priority order with the fallback last
    pub const ALL: [EntityLabel; 5] = [
        EntityLabel::Gene,
        EntityLabel::Pathology,
        EntityLabel::Disease,
        EntityLabel::Symptom,
        EntityLabel::Other,
    ];

    /// Get the label name as stored in the graph
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Gene => "Gene",
            EntityLabel::Pathology => "Pathology",
            EntityLabel::Disease => "Disease",
            EntityLabel::Symptom => "Symptom",
            EntityLabel::Other => "Other",
        }
    }

    /// Parse a label from its stored name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gene" => Some(EntityLabel::Gene),
            "pathology" => Some(EntityLabel::Pathology),
            "disease" => Some(EntityLabel::Disease),
            "symptom" => Some(EntityLabel::Symptom),
            "other" => Some(EntityLabel::Other),
            _ => None,
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guess the coarse label of an entity from its name
///
/// Case-insensitive substring match against fixed keyword sets, tested in the
/// order Gene, Pathology, Disease, Symptom. No match yields `Other`.
///
/// # Examples
///
/// ```
/// use adkg_domain::{guess_label, EntityLabel};
///
/// assert_eq!(guess_label("APOE4 allele"), EntityLabel::Gene);
/// assert_eq!(guess_label("xyz123"), EntityLabel::Other);
/// ```
pub fn guess_label(name: &str) -> EntityLabel {
    let lowered = name.to_lowercase();
    LABEL_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(label, _)| *label)
        .unwrap_or(EntityLabel::Other)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the heuristic is a pure function of the lower-cased name
        #[test]
        fn test_guess_is_case_insensitive(name in "[a-zA-Z ]{0,40}") {
            prop_assert_eq!(guess_label(&name), guess_label(&name.to_uppercase()));
        }

        /// Property: names with no keyword fall back to Other
        #[test]
        fn test_digits_are_other(name in "[0-9 _-]{0,20}") {
            prop_assert_eq!(guess_label(&name), EntityLabel::Other);
        }
    }
}
