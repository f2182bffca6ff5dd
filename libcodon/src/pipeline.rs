//! Synchronous analysis pipeline.
//!
//! Each stage fully consumes its input before the next starts: ingest,
//! normalize/validate, minimum-length filter, optional N-replacement,
//! per-species metrics and codon usage, cross-species merges, chart
//! selection. Everything runs on the caller's thread over independently
//! owned data; a host that wants to abort simply drops the future result.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use tracing::{debug, info};

use crate::aggregate::{
    self, CodonComparisonTable, CodonSort, ComparativeMetricsTable,
};
use crate::charts::{ChartId, ChartSpec};
use crate::codon::{self, CodonBiasSummary};
use crate::error::{Error, Result};
use crate::ingest;
use crate::metrics;
use crate::normalize;
use crate::record::SequenceSet;

/// Allowed range for [`AnalysisConfig::top_codons`].
pub const TOP_CODONS_RANGE: RangeInclusive<usize> = 5..=30;

/// One species' raw input: label, originating file name, FASTA bytes.
#[derive(Debug, Clone)]
pub struct SpeciesInput<'a> {
    pub label: String,
    /// File name (or buffer description) used in diagnostics.
    pub source: String,
    pub raw: &'a [u8],
}

impl<'a> SpeciesInput<'a> {
    pub fn new(label: impl Into<String>, source: impl Into<String>, raw: &'a [u8]) -> Self {
        Self {
            label: label.into(),
            source: source.into(),
            raw,
        }
    }
}

/// Recognized analysis options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Sequences shorter than this are excluded before metrics/codons.
    pub min_len: usize,
    /// Replace `N` with `A` before codon counting (documented bias).
    pub clean_n: bool,
    /// Number of highest-mean-frequency codons in the top-codons view.
    pub top_codons: usize,
    /// Charts to materialize; empty means all.
    pub selected_charts: BTreeSet<ChartId>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_len: 0,
            clean_n: true,
            top_codons: 20,
            selected_charts: BTreeSet::new(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if !TOP_CODONS_RANGE.contains(&self.top_codons) {
            return Err(Error::InvalidConfig {
                detail: format!(
                    "top_codons must be between {} and {}, got {}",
                    TOP_CODONS_RANGE.start(),
                    TOP_CODONS_RANGE.end(),
                    self.top_codons
                ),
            });
        }
        Ok(())
    }

    /// The chart specs selected by this config, in registry order.
    pub fn charts(&self) -> Vec<&'static ChartSpec> {
        ChartId::all()
            .iter()
            .filter(|spec| self.selected_charts.is_empty() || self.selected_charts.contains(&spec.id))
            .collect()
    }
}

/// Everything one analysis run produces.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub metrics: ComparativeMetricsTable,
    pub codon_usage: CodonComparisonTable,
    /// Per-species entropy summaries, species A first.
    pub codon_bias: Vec<CodonBiasSummary>,
    /// Selected chart contracts, in registry order.
    pub charts: Vec<&'static ChartSpec>,
}

/// Runs the whole pipeline over two species' FASTA buffers.
///
/// Errors from ingestion and validation propagate unmodified; the pipeline
/// never continues past a validation failure.
pub fn run(
    species_a: SpeciesInput<'_>,
    species_b: SpeciesInput<'_>,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput> {
    config.validate()?;

    let set_a = prepare(species_a, config)?;
    let set_b = prepare(species_b, config)?;

    let metrics_a = metrics::compute_metrics(&set_a);
    let metrics_b = metrics::compute_metrics(&set_b);
    let usage_a = codon::compute_codon_usage(&set_a);
    let usage_b = codon::compute_codon_usage(&set_b);

    let codon_bias = vec![
        codon::codon_bias_summary(&usage_a),
        codon::codon_bias_summary(&usage_b),
    ];
    for summary in &codon_bias {
        debug!(
            label = %summary.label,
            entropy_bits = summary.entropy_bits,
            distinct_codons = summary.distinct_codons,
            "codon bias summary"
        );
    }

    let metrics = aggregate::merge_metric_tables(&metrics_a, &metrics_b);
    let codon_usage = aggregate::merge_codon_tables(&usage_a, &usage_b, CodonSort::Codon);
    let charts = config.charts();

    info!(
        metric_rows = metrics.rows.len(),
        codon_rows = codon_usage.rows.len(),
        chart_count = charts.len(),
        "analysis complete"
    );
    Ok(AnalysisOutput {
        metrics,
        codon_usage,
        codon_bias,
        charts,
    })
}

/// Ingests and cleans one species' input: parse, normalize/validate,
/// min-length filter, optional N-replacement.
fn prepare(input: SpeciesInput<'_>, config: &AnalysisConfig) -> Result<SequenceSet> {
    let set = ingest::parse(input.raw, &input.label, &input.source)?;
    let set = normalize::normalize(set)?;
    let set = normalize::filter_min_len(set, config.min_len);
    let set = if config.clean_n {
        normalize::replace_ambiguous(set)
    } else {
        set
    };
    debug!(label = %set.label, record_count = set.len(), "prepared sequence set");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_selects_all_charts() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.charts().len(), ChartId::all().len());
    }

    #[test]
    fn test_config_rejects_out_of_range_top_codons() {
        let config = AnalysisConfig {
            top_codons: 4,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig { .. })
        ));
        let config = AnalysisConfig {
            top_codons: 31,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_chart_selection_filters() {
        let config = AnalysisConfig {
            selected_charts: BTreeSet::from([ChartId::TopCodons, ChartId::GcDistribution]),
            ..AnalysisConfig::default()
        };
        let keys: Vec<&str> = config.charts().iter().map(|spec| spec.key).collect();
        assert_eq!(keys, vec!["gc_distribution", "top_codons"]);
    }

    #[test]
    fn test_run_respects_min_len() {
        let a = SpeciesInput::new("a", "a.fasta", b">g1\nATGGCC\n>g2\nATG\n".as_slice());
        let b = SpeciesInput::new("b", "b.fasta", b">h1\nATGGCC\n".as_slice());
        let config = AnalysisConfig {
            min_len: 6,
            ..AnalysisConfig::default()
        };
        let output = run(a, b, &config).unwrap();
        let ids: Vec<&str> = output.metrics.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "h1"]);
    }

    #[test]
    fn test_run_clean_n_changes_codon_counts() {
        let raw = b">g1\nATGNNN\n";
        let b_raw = b">h1\nATGATG\n";
        let cleaned = run(
            SpeciesInput::new("a", "a.fasta", raw.as_slice()),
            SpeciesInput::new("b", "b.fasta", b_raw.as_slice()),
            &AnalysisConfig::default(),
        )
        .unwrap();
        assert!(cleaned
            .codon_usage
            .rows
            .iter()
            .any(|row| row.codon == "AAA"));

        let kept = run(
            SpeciesInput::new("a", "a.fasta", raw.as_slice()),
            SpeciesInput::new("b", "b.fasta", b_raw.as_slice()),
            &AnalysisConfig {
                clean_n: false,
                ..AnalysisConfig::default()
            },
        )
        .unwrap();
        assert!(kept.codon_usage.rows.iter().any(|row| row.codon == "NNN"));
    }

    #[test]
    fn test_run_propagates_ingest_errors() {
        let result = run(
            SpeciesInput::new("a", "a.fasta", b"".as_slice()),
            SpeciesInput::new("b", "b.fasta", b">h1\nATG\n".as_slice()),
            &AnalysisConfig::default(),
        );
        assert!(matches!(result, Err(Error::EmptyInput { .. })));
    }
}
