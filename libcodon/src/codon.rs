//! Codon-usage frequency tables.
//!
//! Sequences are partitioned into non-overlapping triplets at offset 0; the
//! reading frame is a fixed, documented simplification, not detected.
//! Counts accumulate globally across all sequences of a set, and triplets
//! containing `N` (when the caller did not opt into N-replacement) count as
//! their own rows rather than being dropped.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::record::SequenceSet;

/// Relative frequency of one codon within a species' sequence set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodonFrequency {
    pub codon: String,
    /// In `[0, 1]`; the frequencies of one table sum to 1.0.
    pub frequency: f64,
}

/// Codon-usage frequencies for one species, sorted by codon ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct CodonUsageTable {
    pub label: String,
    pub rows: Vec<CodonFrequency>,
}

impl CodonUsageTable {
    /// Name of this species' frequency column in exported tables.
    pub fn frequency_column(&self) -> String {
        format!("frequency_{}", self.label)
    }
}

/// Entropy-based codon bias summary for one species.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodonBiasSummary {
    pub label: String,
    /// Shannon entropy of the frequency distribution, in bits.
    pub entropy_bits: f64,
    pub distinct_codons: usize,
}

/// Tallies frame-0 triplets across all sequences of the set and converts
/// the counts to relative frequencies.
///
/// Trailing 1-2 leftover bases of each sequence are discarded. A set with
/// zero complete triplets yields an empty table, not a fault.
pub fn compute_codon_usage(set: &SequenceSet) -> CodonUsageTable {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut total: u64 = 0;

    for record in &set.records {
        let chars: Vec<char> = record.bases.chars().collect();
        for triplet in chars.chunks_exact(3) {
            let codon: String = triplet.iter().collect();
            *counts.entry(codon).or_insert(0) += 1;
            total += 1;
        }
    }

    let rows = if total == 0 {
        Vec::new()
    } else {
        counts
            .into_iter()
            .map(|(codon, count)| CodonFrequency {
                codon,
                frequency: count as f64 / total as f64,
            })
            .collect()
    };

    debug!(label = %set.label, total_codons = total, distinct = rows.len(), "computed codon usage");
    CodonUsageTable {
        label: set.label.clone(),
        rows,
    }
}

/// Shannon entropy (bits) and distinct-codon count of a usage table.
pub fn codon_bias_summary(table: &CodonUsageTable) -> CodonBiasSummary {
    let entropy_bits = -table
        .rows
        .iter()
        .map(|row| row.frequency)
        .filter(|&f| f > 0.0)
        .map(|f| f * f.log2())
        .sum::<f64>();
    CodonBiasSummary {
        label: table.label.clone(),
        entropy_bits,
        distinct_codons: table.rows.len(),
    }
}
