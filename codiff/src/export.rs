//! Export of the canonical tables and the chart dataset manifest.
//!
//! Two CSV artifacts mirror the logical output tables (metrics and merged
//! codon usage, with the species labels substituted into the frequency
//! column names), and `charts.json` carries the selected chart contracts
//! plus the materialized top-codons rows for an external renderer.

use std::fs::File;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use libcodon::aggregate::{self, CodonComparisonRow, CodonComparisonTable, ComparativeMetricsTable};
use libcodon::charts::{ChartId, ChartSpec};
use libcodon::codon::CodonBiasSummary;
use libcodon::pipeline::AnalysisOutput;
use serde::Serialize;
use tracing::info;

/// Locations of the written artifacts.
#[derive(Debug)]
pub struct ExportPaths {
    pub metrics_csv: PathBuf,
    pub codon_csv: PathBuf,
    pub chart_manifest: PathBuf,
}

#[derive(Serialize)]
struct TopCodonsData<'a> {
    label_a: &'a str,
    label_b: &'a str,
    rows: &'a [CodonComparisonRow],
}

#[derive(Serialize)]
struct ChartManifest<'a> {
    charts: &'a [&'static ChartSpec],
    codon_bias: &'a [CodonBiasSummary],
    #[serde(skip_serializing_if = "Option::is_none")]
    top_codons: Option<TopCodonsData<'a>>,
}

/// Writes `metrics.csv`, `codon_usage.csv` and `charts.json` into `out_dir`.
pub fn write_outputs(
    out_dir: &Path,
    output: &AnalysisOutput,
    top_codons: usize,
) -> Result<ExportPaths> {
    std::fs::create_dir_all(out_dir)?;

    let metrics_csv = out_dir.join("metrics.csv");
    write_metrics_csv(&metrics_csv, &output.metrics)?;

    let codon_csv = out_dir.join("codon_usage.csv");
    write_codon_csv(&codon_csv, &output.codon_usage)?;

    let chart_manifest = out_dir.join("charts.json");
    write_chart_manifest(&chart_manifest, output, top_codons)?;

    info!(out_dir = %out_dir.display(), "wrote analysis artifacts");
    Ok(ExportPaths {
        metrics_csv,
        codon_csv,
        chart_manifest,
    })
}

fn write_metrics_csv(path: &Path, table: &ComparativeMetricsTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(ComparativeMetricsTable::COLUMNS)?;
    for row in &table.rows {
        writer.write_record([
            row.species.clone(),
            row.id.clone(),
            row.length.to_string(),
            row.gc_percent.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_codon_csv(path: &Path, table: &CodonComparisonTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.column_names())?;
    for row in &table.rows {
        writer.write_record([
            row.codon.clone(),
            row.frequency_a.to_string(),
            row.frequency_b.to_string(),
            row.abs_difference.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_chart_manifest(path: &Path, output: &AnalysisOutput, top_codons: usize) -> Result<()> {
    let top = output
        .charts
        .iter()
        .any(|spec| spec.id == ChartId::TopCodons)
        .then(|| aggregate::top_codons(&output.codon_usage, top_codons));

    let manifest = ChartManifest {
        charts: &output.charts,
        codon_bias: &output.codon_bias,
        top_codons: top.as_ref().map(|table| TopCodonsData {
            label_a: &table.label_a,
            label_b: &table.label_b,
            rows: &table.rows,
        }),
    };
    serde_json::to_writer_pretty(File::create(path)?, &manifest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use libcodon::pipeline::{self, AnalysisConfig, SpeciesInput};
    use tempfile::TempDir;

    fn sample_output() -> AnalysisOutput {
        pipeline::run(
            SpeciesInput::new("salmonella", "a.fasta", b">g1\nATGGCCATT\n"),
            SpeciesInput::new("gallus", "b.fasta", b">h1\nATGGGC\n"),
            &AnalysisConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_write_outputs() {
        let dir = TempDir::new().unwrap();
        let output = sample_output();
        let paths = write_outputs(dir.path(), &output, 5).unwrap();

        let metrics = std::fs::read_to_string(&paths.metrics_csv).unwrap();
        let mut lines = metrics.lines();
        assert_eq!(lines.next(), Some("species,id,length,gc_percent"));
        assert_eq!(lines.next(), Some("salmonella,g1,9,44.44"));
        assert_eq!(lines.next(), Some("gallus,h1,6,66.67"));

        let codon = std::fs::read_to_string(&paths.codon_csv).unwrap();
        assert!(codon.starts_with("codon,frequency_salmonella,frequency_gallus,abs_difference"));
        assert!(codon.lines().any(|line| line.starts_with("ATG,")));

        let manifest: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.chart_manifest).unwrap()).unwrap();
        assert_eq!(manifest["charts"].as_array().unwrap().len(), 9);
        assert_eq!(manifest["top_codons"]["label_a"], "salmonella");
        assert_eq!(manifest["codon_bias"][0]["label"], "salmonella");
    }

    #[test]
    fn test_manifest_omits_top_codons_when_chart_not_selected() {
        let dir = TempDir::new().unwrap();
        let mut output = sample_output();
        output.charts.retain(|spec| spec.id != ChartId::TopCodons);
        let paths = write_outputs(dir.path(), &output, 5).unwrap();
        let manifest: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.chart_manifest).unwrap()).unwrap();
        assert!(manifest.get("top_codons").is_none());
    }
}
