//! Version alignment
//!
//! Pure functions for reconciling the three inputs that describe a
//! manuscript's version history: versioned preprint identifiers, publication
//! dates, and bare version-number overrides. The output is the ordered,
//! deduplicated list of versions the rest of the program emits.

use chrono::{DateTime, Utc};

/// Error type for version alignment
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AlignError {
    #[error("Malformed versioned identifier or version token: {0}")]
    Format(String),

    #[error("No versioned identifiers were provided")]
    EmptyIdentifiers,

    #[error("At least one publication date is required")]
    EmptyDates,
}

/// A versioned preprint identifier, `<base>v<version>`.
///
/// The base is an opaque stable identifier (for biorxiv preprints, a DOI) and
/// the version is a positive integer. The separator is the *last* `v` in the
/// token, so bases containing `v` are handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedId {
    pub base: String,
    pub version: u32,
}

impl VersionedId {
    /// Parse a `<base>v<version>` token.
    ///
    /// Fails with [`AlignError::Format`] when the token has no `v` separator,
    /// an empty base, or a non-numeric version suffix.
    pub fn parse(token: &str) -> Result<Self, AlignError> {
        let (base, suffix) = token
            .rsplit_once('v')
            .ok_or_else(|| AlignError::Format(token.to_string()))?;

        if base.is_empty() {
            return Err(AlignError::Format(token.to_string()));
        }

        let version = suffix
            .parse::<u32>()
            .map_err(|_| AlignError::Format(token.to_string()))?;

        Ok(Self {
            base: base.to_string(),
            version,
        })
    }
}

impl std::fmt::Display for VersionedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.base, self.version)
    }
}

/// One manuscript version to emit, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedVersion {
    /// Effective versioned identifier, possibly synthesized or relabeled.
    pub versioned_id: String,
    /// The identifier with the version suffix removed.
    pub base_id: String,
    /// Reported version number.
    pub version: u32,
    /// Publication date for this version.
    pub date: DateTime<Utc>,
}

/// Align versioned identifiers, publication dates, and version overrides into
/// an ordered sequence of manuscript versions.
///
/// - `identifiers` and `overrides` have set semantics: duplicates collapse.
/// - Identifiers sort ascending by their embedded version number (numeric,
///   not lexicographic, so `v9` precedes `v10`); overrides sort ascending.
/// - When overrides outnumber identifiers, the sequence is extended with
///   identifiers synthesized from the last (highest-version) identifier's
///   base.
/// - At positions covered by an override, the override relabels the
///   identifier: the emitted id is `<base>v<override>` and the reported
///   version number is the override.
/// - Each position takes the date at the same index in `dates`; positions
///   beyond the last date reuse the final date.
pub fn align(
    identifiers: &[String],
    dates: &[DateTime<Utc>],
    overrides: &[String],
) -> Result<Vec<AlignedVersion>, AlignError> {
    // Set semantics: collapse repeated tokens before sorting.
    let mut unique_tokens: Vec<&str> = Vec::new();
    for token in identifiers {
        if !unique_tokens.contains(&token.as_str()) {
            unique_tokens.push(token);
        }
    }

    let mut ids = unique_tokens
        .iter()
        .map(|token| VersionedId::parse(token))
        .collect::<Result<Vec<_>, _>>()?;
    ids.sort_by_key(|id| id.version);

    let mut versions = overrides
        .iter()
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| AlignError::Format(token.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    versions.sort_unstable();
    versions.dedup();

    if ids.is_empty() {
        return Err(AlignError::EmptyIdentifiers);
    }
    if dates.is_empty() {
        return Err(AlignError::EmptyDates);
    }

    // More overrides than identifiers: extend from the highest version's base.
    if versions.len() > ids.len() {
        let last_base = ids
            .last()
            .map(|id| id.base.clone())
            .ok_or(AlignError::EmptyIdentifiers)?;
        for &version in &versions[ids.len()..] {
            ids.push(VersionedId {
                base: last_base.clone(),
                version,
            });
        }
    }

    let aligned = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let (versioned_id, version) = match versions.get(i) {
                Some(&version) => (format!("{}v{}", id.base, version), version),
                None => (id.to_string(), id.version),
            };
            let date = *dates.get(i).unwrap_or(&dates[dates.len() - 1]);

            AlignedVersion {
                versioned_id,
                base_id: id.base.clone(),
                version,
                date,
            }
        })
        .collect();

    Ok(aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, d, 0, 0, 0).unwrap()
    }

    fn ids(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_parse_versioned_id() {
        let id = VersionedId::parse("10.1101/2021.01.01.000001v2").unwrap();
        assert_eq!(id.base, "10.1101/2021.01.01.000001");
        assert_eq!(id.version, 2);
        assert_eq!(id.to_string(), "10.1101/2021.01.01.000001v2");
    }

    #[test]
    fn test_parse_splits_on_last_v() {
        // The base itself contains a `v`.
        let id = VersionedId::parse("10.1101/averyv5").unwrap();
        assert_eq!(id.base, "10.1101/avery");
        assert_eq!(id.version, 5);
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert_eq!(
            VersionedId::parse("10.1101/2021"),
            Err(AlignError::Format("10.1101/2021".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric_suffix() {
        assert!(matches!(
            VersionedId::parse("10.1101/xvii"),
            Err(AlignError::Format(_))
        ));
    }

    #[test]
    fn test_parse_rejects_empty_base() {
        assert!(matches!(
            VersionedId::parse("v1"),
            Err(AlignError::Format(_))
        ));
    }

    #[test]
    fn test_align_sorts_by_numeric_version() {
        let aligned = align(
            &ids(&["10.1/xv10", "10.1/xv9", "10.1/xv2"]),
            &[day(1)],
            &[],
        )
        .unwrap();

        let versions: Vec<u32> = aligned.iter().map(|v| v.version).collect();
        assert_eq!(versions, vec![2, 9, 10]);
    }

    #[test]
    fn test_align_out_of_order_identifiers() {
        let aligned = align(&ids(&["10.1/xv2", "10.1/xv1"]), &[day(1)], &[]).unwrap();

        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned[0].versioned_id, "10.1/xv1");
        assert_eq!(aligned[0].date, day(1));
        assert_eq!(aligned[1].versioned_id, "10.1/xv2");
        assert_eq!(aligned[1].date, day(1));
    }

    #[test]
    fn test_align_duplicates_are_idempotent() {
        let once = align(&ids(&["10.1/xv1", "10.1/xv2"]), &[day(1), day(2)], &[]).unwrap();
        let twice = align(
            &ids(&["10.1/xv1", "10.1/xv2", "10.1/xv1", "10.1/xv2"]),
            &[day(1), day(2)],
            &[],
        )
        .unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_align_duplicate_overrides_collapse() {
        let aligned = align(
            &ids(&["10.1/xv1"]),
            &[day(1), day(2)],
            &["1".to_string(), "2".to_string(), "2".to_string()],
        )
        .unwrap();

        assert_eq!(aligned.len(), 2);
    }

    #[test]
    fn test_align_overrides_extend_output() {
        let aligned = align(
            &ids(&["10.1/xv1"]),
            &[day(1), day(2)],
            &["1".to_string(), "2".to_string()],
        )
        .unwrap();

        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned[0].versioned_id, "10.1/xv1");
        assert_eq!(aligned[0].version, 1);
        assert_eq!(aligned[0].date, day(1));
        assert_eq!(aligned[1].versioned_id, "10.1/xv2");
        assert_eq!(aligned[1].version, 2);
        assert_eq!(aligned[1].date, day(2));
    }

    #[test]
    fn test_align_synthesized_ids_share_last_base() {
        let aligned = align(
            &ids(&["10.1/yv3", "10.1/xv1"]),
            &[day(1)],
            &["1".to_string(), "3".to_string(), "4".to_string(), "5".to_string()],
        )
        .unwrap();

        assert_eq!(aligned.len(), 4);
        // 10.1/y holds the highest input version, so it donates the base.
        assert_eq!(aligned[2].base_id, "10.1/y");
        assert_eq!(aligned[3].base_id, "10.1/y");
        assert_eq!(aligned[3].versioned_id, "10.1/yv5");
    }

    #[test]
    fn test_align_overrides_relabel_existing_identifiers() {
        let aligned = align(
            &ids(&["10.1/xv1", "10.1/xv2"]),
            &[day(1), day(2)],
            &["3".to_string(), "4".to_string()],
        )
        .unwrap();

        assert_eq!(aligned[0].versioned_id, "10.1/xv3");
        assert_eq!(aligned[0].version, 3);
        assert_eq!(aligned[1].versioned_id, "10.1/xv4");
        assert_eq!(aligned[1].version, 4);
    }

    #[test]
    fn test_align_reuses_final_date() {
        let aligned = align(
            &ids(&["10.1/xv1", "10.1/xv2", "10.1/xv3"]),
            &[day(1), day(2)],
            &[],
        )
        .unwrap();

        assert_eq!(aligned[0].date, day(1));
        assert_eq!(aligned[1].date, day(2));
        assert_eq!(aligned[2].date, day(2));
    }

    #[test]
    fn test_align_rejects_empty_identifiers() {
        assert_eq!(
            align(&[], &[day(1)], &["1".to_string()]),
            Err(AlignError::EmptyIdentifiers)
        );
    }

    #[test]
    fn test_align_rejects_empty_dates() {
        assert_eq!(
            align(&ids(&["10.1/xv1"]), &[], &[]),
            Err(AlignError::EmptyDates)
        );
    }

    #[test]
    fn test_align_rejects_malformed_identifier() {
        assert!(matches!(
            align(&ids(&["10.1/x"]), &[day(1)], &[]),
            Err(AlignError::Format(_))
        ));
    }

    #[test]
    fn test_align_rejects_malformed_override() {
        assert_eq!(
            align(&ids(&["10.1/xv1"]), &[day(1)], &["two".to_string()]),
            Err(AlignError::Format("two".to_string()))
        );
    }
}
