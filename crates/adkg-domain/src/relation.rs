//! Relation module - canonical relation-type strings

/// Normalize a free-text relation phrase into a canonical relation type
///
/// The phrase is trimmed, upper-cased, and every space or hyphen becomes an
/// underscore. The result is used as a relation-type identifier by the graph
/// store, so it never contains either separator.
///
/// # Examples
///
/// ```
/// use adkg_domain::canonicalize_relation;
///
/// assert_eq!(
///     canonicalize_relation("is strongest genetic risk factor for"),
///     "IS_STRONGEST_GENETIC_RISK_FACTOR_FOR"
/// );
/// ```
pub fn canonicalize_relation(relation: &str) -> String {
    relation
        .trim()
        .to_uppercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}
