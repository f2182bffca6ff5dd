//! Cross-species aggregation of the per-species tables.
//!
//! Both merges are pure, deterministic and idempotent: the same two input
//! tables always produce a byte-identical result.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::codon::CodonUsageTable;
use crate::metrics::MetricsTable;

/// Sort order for the merged codon table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodonSort {
    /// By codon, ascending (the canonical export order).
    #[default]
    Codon,
    /// By absolute frequency difference, descending; ties broken by codon
    /// ascending. The "largest divergence" view.
    Divergence,
}

/// One codon with the two species' frequencies side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodonComparisonRow {
    pub codon: String,
    pub frequency_a: f64,
    pub frequency_b: f64,
    pub abs_difference: f64,
}

/// Full outer merge of two per-species codon-usage tables.
#[derive(Debug, Clone, PartialEq)]
pub struct CodonComparisonTable {
    pub label_a: String,
    pub label_b: String,
    pub rows: Vec<CodonComparisonRow>,
}

impl CodonComparisonTable {
    /// Label-independent column names, as the chart contracts reference them.
    pub const LOGICAL_COLUMNS: [&'static str; 4] =
        ["codon", "frequency_a", "frequency_b", "abs_difference"];

    /// Concrete column names with the species labels substituted, as written
    /// to the exported CSV.
    pub fn column_names(&self) -> Vec<String> {
        vec![
            "codon".to_string(),
            format!("frequency_{}", self.label_a),
            format!("frequency_{}", self.label_b),
            "abs_difference".to_string(),
        ]
    }
}

/// One metrics row tagged with its originating species.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesMetricRow {
    pub species: String,
    pub id: String,
    pub length: usize,
    pub gc_percent: f64,
}

/// Row-wise union of both species' metric tables.
///
/// The explicit `species` tag keeps the grouping recoverable for
/// per-species charts without relying on append order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparativeMetricsTable {
    pub label_a: String,
    pub label_b: String,
    pub rows: Vec<SpeciesMetricRow>,
}

impl ComparativeMetricsTable {
    pub const COLUMNS: [&'static str; 4] = ["species", "id", "length", "gc_percent"];

    /// Rows belonging to one species, in their original input order.
    pub fn species_rows(&self, label: &str) -> impl Iterator<Item = &SpeciesMetricRow> {
        self.rows.iter().filter(move |row| row.species == label)
    }
}

/// Merges two codon-usage tables with a full outer join on the codon.
///
/// A codon missing on either side gets frequency `0.0` there;
/// `abs_difference = |frequency_a - frequency_b|`.
pub fn merge_codon_tables(
    a: &CodonUsageTable,
    b: &CodonUsageTable,
    sort: CodonSort,
) -> CodonComparisonTable {
    let mut joined: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for row in &a.rows {
        joined.entry(row.codon.as_str()).or_default().0 = row.frequency;
    }
    for row in &b.rows {
        joined.entry(row.codon.as_str()).or_default().1 = row.frequency;
    }

    let mut rows: Vec<CodonComparisonRow> = joined
        .into_iter()
        .map(|(codon, (frequency_a, frequency_b))| CodonComparisonRow {
            codon: codon.to_string(),
            frequency_a,
            frequency_b,
            abs_difference: (frequency_a - frequency_b).abs(),
        })
        .collect();

    match sort {
        // BTreeMap iteration already yields codon-ascending order.
        CodonSort::Codon => {}
        CodonSort::Divergence => rows.sort_by(|x, y| {
            y.abs_difference
                .total_cmp(&x.abs_difference)
                .then_with(|| x.codon.cmp(&y.codon))
        }),
    }

    CodonComparisonTable {
        label_a: a.label.clone(),
        label_b: b.label.clone(),
        rows,
    }
}

/// Concatenates two per-species metric tables, species A first, preserving
/// each species' original row order.
pub fn merge_metric_tables(a: &MetricsTable, b: &MetricsTable) -> ComparativeMetricsTable {
    let rows = [a, b]
        .into_iter()
        .flat_map(|table| {
            table.rows.iter().map(|metric| SpeciesMetricRow {
                species: table.label.clone(),
                id: metric.id.clone(),
                length: metric.length,
                gc_percent: metric.gc_percent,
            })
        })
        .collect();
    ComparativeMetricsTable {
        label_a: a.label.clone(),
        label_b: b.label.clone(),
        rows,
    }
}

/// The `n` codons with the highest mean frequency across both species,
/// highest first. `n` is clamped to the table size.
pub fn top_codons(table: &CodonComparisonTable, n: usize) -> CodonComparisonTable {
    let mut rows = table.rows.clone();
    rows.sort_by(|x, y| {
        let mean_x = (x.frequency_a + x.frequency_b) / 2.0;
        let mean_y = (y.frequency_a + y.frequency_b) / 2.0;
        mean_y.total_cmp(&mean_x).then_with(|| x.codon.cmp(&y.codon))
    });
    rows.truncate(n);
    CodonComparisonTable {
        label_a: table.label_a.clone(),
        label_b: table.label_b.clone(),
        rows,
    }
}
