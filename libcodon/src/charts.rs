//! Chart data contracts.
//!
//! A closed set of chart identifiers mapped to static specifications: which
//! aggregated table a chart reads, which columns it needs, and the artifact
//! name an external renderer writes. The registry is process-wide constant
//! configuration; the guarantee that every `required_columns` set exists in
//! the produced tables is covered by an integration test.

use serde::Serialize;

/// The aggregated table a chart reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTable {
    Metrics,
    CodonUsage,
}

/// Display grouping for chart selection UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartCategory {
    BasicDistributions,
    Relationships,
    CodonAnalysis,
    AdvancedDistributions,
    PerSpeciesDistributions,
}

/// The supported charts. Closed set: a renderer can exhaustively match on
/// it, and an identifier that compiles is one the core actually produces
/// data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    LengthDistribution,
    GcDistribution,
    LengthGcScatter,
    TopCodons,
    CodonCorrelation,
    CodonHeatmap,
    CumulativeLengths,
    GcSpeciesA,
    GcSpeciesB,
}

/// Static description of one chart: identity, inputs and output artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub id: ChartId,
    /// Stable string key, usable at host boundaries (CLI flags, manifests).
    pub key: &'static str,
    pub name: &'static str,
    pub category: ChartCategory,
    pub table: SourceTable,
    /// Label-independent column names the chart reads.
    pub required_columns: &'static [&'static str],
    pub description: &'static str,
    /// Output filename stem of the rendered artifact.
    pub artifact: &'static str,
}

static REGISTRY: [ChartSpec; 9] = [
    ChartSpec {
        id: ChartId::LengthDistribution,
        key: "length_distribution",
        name: "Sequence length distribution",
        category: ChartCategory::BasicDistributions,
        table: SourceTable::Metrics,
        required_columns: &["length"],
        description: "Histogram of sequence lengths across both species",
        artifact: "length_distribution",
    },
    ChartSpec {
        id: ChartId::GcDistribution,
        key: "gc_distribution",
        name: "GC content distribution",
        category: ChartCategory::BasicDistributions,
        table: SourceTable::Metrics,
        required_columns: &["gc_percent"],
        description: "Histogram of GC percentage across both species",
        artifact: "gc_distribution",
    },
    ChartSpec {
        id: ChartId::LengthGcScatter,
        key: "length_gc_scatter",
        name: "Length vs GC content",
        category: ChartCategory::Relationships,
        table: SourceTable::Metrics,
        required_columns: &["length", "gc_percent"],
        description: "Density-colored scatter of sequence length against GC percentage",
        artifact: "length_gc_scatter",
    },
    ChartSpec {
        id: ChartId::TopCodons,
        key: "top_codons",
        name: "Most frequent codons",
        category: ChartCategory::CodonAnalysis,
        table: SourceTable::CodonUsage,
        required_columns: &["codon", "frequency_a", "frequency_b"],
        description: "Grouped bars for the N codons with the highest mean frequency",
        artifact: "top_codons",
    },
    ChartSpec {
        id: ChartId::CodonCorrelation,
        key: "codon_correlation",
        name: "Codon usage correlation",
        category: ChartCategory::CodonAnalysis,
        table: SourceTable::CodonUsage,
        required_columns: &["frequency_a", "frequency_b"],
        description: "Scatter of each codon's frequency in one species against the other",
        artifact: "codon_correlation",
    },
    ChartSpec {
        id: ChartId::CodonHeatmap,
        key: "codon_heatmap",
        name: "Codon usage heatmap",
        category: ChartCategory::CodonAnalysis,
        table: SourceTable::CodonUsage,
        required_columns: &["codon", "frequency_a"],
        description: "Codon frequencies of species A arranged by codon family",
        artifact: "codon_heatmap",
    },
    ChartSpec {
        id: ChartId::CumulativeLengths,
        key: "cumulative_lengths",
        name: "Cumulative length distribution",
        category: ChartCategory::AdvancedDistributions,
        table: SourceTable::Metrics,
        required_columns: &["length"],
        description: "Cumulative proportion of sequences by length, with percentile markers",
        artifact: "cumulative_lengths",
    },
    ChartSpec {
        id: ChartId::GcSpeciesA,
        key: "gc_species_a",
        name: "GC content distribution (species A)",
        category: ChartCategory::PerSpeciesDistributions,
        table: SourceTable::Metrics,
        required_columns: &["species", "gc_percent"],
        description: "GC percentage histogram restricted to species A",
        artifact: "gc_species_a",
    },
    ChartSpec {
        id: ChartId::GcSpeciesB,
        key: "gc_species_b",
        name: "GC content distribution (species B)",
        category: ChartCategory::PerSpeciesDistributions,
        table: SourceTable::Metrics,
        required_columns: &["species", "gc_percent"],
        description: "GC percentage histogram restricted to species B",
        artifact: "gc_species_b",
    },
];

impl ChartId {
    /// Every supported chart, in registry order.
    pub fn all() -> &'static [ChartSpec] {
        &REGISTRY
    }

    /// The static specification for this chart.
    pub fn spec(self) -> &'static ChartSpec {
        REGISTRY
            .iter()
            .find(|spec| spec.id == self)
            .unwrap_or_else(|| unreachable!("registry covers every ChartId"))
    }

    /// Resolves a stable string key back to an identifier.
    pub fn from_key(key: &str) -> Option<Self> {
        REGISTRY.iter().find(|spec| spec.key == key).map(|spec| spec.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_id() {
        for spec in ChartId::all() {
            assert_eq!(spec.id.spec().key, spec.key);
        }
        assert_eq!(ChartId::all().len(), 9);
    }

    #[test]
    fn test_keys_are_unique_and_round_trip() {
        for spec in ChartId::all() {
            assert_eq!(ChartId::from_key(spec.key), Some(spec.id));
        }
        assert_eq!(ChartId::from_key("nope"), None);
    }

    #[test]
    fn test_spec_lookup() {
        let spec = ChartId::TopCodons.spec();
        assert_eq!(spec.table, SourceTable::CodonUsage);
        assert!(spec.required_columns.contains(&"frequency_a"));
    }
}
