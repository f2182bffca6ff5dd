//! Sequence cleanup and alphabet validation.
//!
//! Normalization uppercases, strips whitespace, and then fails fast on any
//! symbol outside the `{A, T, C, G, N}` alphabet, reporting the complete
//! symbol set and a bounded list of offending sequence ids. It never
//! repairs data silently; the only sanctioned repair is the explicit
//! [`replace_ambiguous`] pass a caller opts into via its `clean_n` option.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::record::{SequenceRecord, SequenceSet};

/// Offending sequence ids reported in an `InvalidAlphabet` error.
const MAX_REPORTED_OFFENDERS: usize = 8;

fn is_valid_base(c: char) -> bool {
    matches!(c, 'A' | 'T' | 'C' | 'G' | 'N')
}

/// Uppercases all bases, strips spaces/tabs/line breaks, and validates the
/// alphabet. Pure, no I/O.
///
/// Fails with [`Error::InvalidAlphabet`] when any symbol outside
/// `{A, T, C, G, N}` survives the whitespace strip; partial results are
/// never returned.
pub fn normalize(set: SequenceSet) -> Result<SequenceSet> {
    let mut symbols: BTreeSet<char> = BTreeSet::new();
    let mut offending_ids: Vec<String> = Vec::new();
    let mut total_offending = 0usize;

    let records: Vec<SequenceRecord> = set
        .records
        .into_iter()
        .map(|record| {
            let bases: String = record
                .bases
                .chars()
                .filter(|c| !matches!(c, ' ' | '\t' | '\n' | '\r'))
                .map(|c| c.to_ascii_uppercase())
                .collect();

            let invalid: BTreeSet<char> =
                bases.chars().filter(|&c| !is_valid_base(c)).collect();
            if !invalid.is_empty() {
                warn!(id = %record.id, symbols = ?invalid, "sequence contains invalid symbols");
                total_offending += 1;
                if offending_ids.len() < MAX_REPORTED_OFFENDERS {
                    offending_ids.push(record.id.clone());
                }
                symbols.extend(invalid);
            }

            SequenceRecord {
                id: record.id,
                bases,
            }
        })
        .collect();

    if !symbols.is_empty() {
        return Err(Error::InvalidAlphabet {
            symbols,
            offending_ids,
            total_offending,
        });
    }

    debug!(label = %set.label, record_count = records.len(), "normalized sequence set");
    Ok(SequenceSet {
        label: set.label,
        records,
    })
}

/// Non-throwing alphabet check.
///
/// Case-insensitive; meant for sets whose whitespace has already been
/// stripped (whitespace counts as invalid here).
pub fn is_valid_alphabet(set: &SequenceSet) -> bool {
    set.records
        .iter()
        .all(|record| record.bases.chars().all(|c| is_valid_base(c.to_ascii_uppercase())))
}

/// Replaces every `N` base with `A`.
///
/// This biases codon counts towards A-containing triplets; it only runs
/// when the caller explicitly enables the `clean_n` option.
pub fn replace_ambiguous(set: SequenceSet) -> SequenceSet {
    let records = set
        .records
        .into_iter()
        .map(|record| SequenceRecord {
            id: record.id,
            bases: record.bases.replace('N', "A"),
        })
        .collect();
    SequenceSet {
        label: set.label,
        records,
    }
}

/// Drops sequences shorter than `min_len`, preserving order.
pub fn filter_min_len(set: SequenceSet, min_len: usize) -> SequenceSet {
    if min_len == 0 {
        return set;
    }
    let before = set.records.len();
    let records: Vec<SequenceRecord> = set
        .records
        .into_iter()
        .filter(|record| record.bases.len() >= min_len)
        .collect();
    debug!(
        label = %set.label,
        min_len,
        before,
        after = records.len(),
        "filtered sequences by minimum length"
    );
    SequenceSet {
        label: set.label,
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(pairs: &[(&str, &str)]) -> SequenceSet {
        let records = pairs
            .iter()
            .map(|(id, bases)| SequenceRecord {
                id: (*id).to_string(),
                bases: (*bases).to_string(),
            })
            .collect();
        SequenceSet::new("salmonella", records)
    }

    #[test]
    fn test_normalize_uppercases_and_strips() {
        let set = set_of(&[("s1", "at gc\tn\r\nAT")]);
        let normalized = normalize(set).unwrap();
        assert_eq!(normalized.records[0].bases, "ATGCNAT");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let set = set_of(&[("s1", "ATGCNATCG")]);
        let once = normalize(set).unwrap();
        let twice = normalize(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_rejects_invalid_symbols() {
        let set = set_of(&[("s1", "ATGZCC"), ("s2", "ATGC"), ("s3", "AXGZ")]);
        let error = normalize(set).unwrap_err();
        match error {
            Error::InvalidAlphabet {
                symbols,
                offending_ids,
                total_offending,
            } => {
                assert_eq!(symbols, BTreeSet::from(['X', 'Z']));
                assert_eq!(offending_ids, vec!["s1".to_string(), "s3".to_string()]);
                assert_eq!(total_offending, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_bounds_reported_offenders() {
        let pairs: Vec<(String, &str)> = (0..20).map(|i| (format!("s{i}"), "AZ")).collect();
        let records = pairs
            .iter()
            .map(|(id, bases)| SequenceRecord {
                id: id.clone(),
                bases: (*bases).to_string(),
            })
            .collect();
        let error = normalize(SequenceSet::new("x", records)).unwrap_err();
        match error {
            Error::InvalidAlphabet {
                offending_ids,
                total_offending,
                ..
            } => {
                assert_eq!(offending_ids.len(), MAX_REPORTED_OFFENDERS);
                assert_eq!(total_offending, 20);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_is_valid_alphabet() {
        assert!(is_valid_alphabet(&set_of(&[("s1", "ATCGN"), ("s2", "atcgn")])));
        assert!(!is_valid_alphabet(&set_of(&[("s1", "ATCGX")])));
    }

    #[test]
    fn test_replace_ambiguous() {
        let set = set_of(&[("s1", "ANNGTN")]);
        let cleaned = replace_ambiguous(set);
        assert_eq!(cleaned.records[0].bases, "AAAGTA");
    }

    #[test]
    fn test_filter_min_len() {
        let set = set_of(&[("s1", "ATG"), ("s2", "ATGCATGC"), ("s3", "AT")]);
        let filtered = filter_min_len(set, 3);
        let ids: Vec<&str> = filtered.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_filter_min_len_zero_keeps_everything() {
        let set = set_of(&[("s1", ""), ("s2", "A")]);
        assert_eq!(filter_min_len(set, 0).len(), 2);
    }
}
