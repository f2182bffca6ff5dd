//! Per-sequence composition metrics.

use serde::Serialize;

use crate::record::SequenceSet;

/// Length and GC-content of one sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceMetric {
    pub id: String,
    pub length: usize,
    /// Percentage of G/C bases in `[0, 100]`, rounded to 2 decimals.
    pub gc_percent: f64,
}

/// The per-sequence metrics of one species, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    pub label: String,
    pub rows: Vec<SequenceMetric>,
}

/// Rounds to 2 decimal places, half away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes length and GC% for every sequence in the set.
///
/// `gc_percent = 100 * (G + C) / length`, defined as `0.0` for empty
/// sequences. Deterministic, O(total bases).
pub fn compute_metrics(set: &SequenceSet) -> MetricsTable {
    let rows = set
        .records
        .iter()
        .map(|record| {
            let length = record.bases.len();
            let gc = record
                .bases
                .bytes()
                .filter(|b| matches!(b, b'G' | b'C'))
                .count();
            let gc_percent = if length == 0 {
                0.0
            } else {
                round2(100.0 * gc as f64 / length as f64)
            };
            SequenceMetric {
                id: record.id.clone(),
                length,
                gc_percent,
            }
        })
        .collect();
    MetricsTable {
        label: set.label.clone(),
        rows,
    }
}
