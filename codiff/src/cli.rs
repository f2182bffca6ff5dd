use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::{Result, eyre::eyre};
use libcodon::charts::ChartId;
use libcodon::pipeline::AnalysisConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// FASTA file for species A
    #[arg(value_name = "FASTA_A")]
    pub file_a: PathBuf,

    /// FASTA file for species B
    #[arg(value_name = "FASTA_B")]
    pub file_b: PathBuf,

    /// Label for species A (names its frequency column)
    #[arg(long, default_value = "species_a")]
    pub label_a: String,

    /// Label for species B
    #[arg(long, default_value = "species_b")]
    pub label_b: String,

    /// Exclude sequences shorter than this many bases
    #[arg(long, default_value_t = 0)]
    pub min_len: usize,

    /// Keep N bases as-is instead of replacing them with A before codon counting
    #[arg(long)]
    pub keep_n: bool,

    /// Number of highest-mean-frequency codons in the top-codons chart
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u8).range(5..=30))]
    pub top_codons: u8,

    /// Comma-separated chart keys to materialize (default: all)
    #[arg(long, value_delimiter = ',')]
    pub charts: Vec<String>,

    /// Directory the CSV tables and chart manifest are written to
    #[arg(long, short, default_value = "results")]
    pub out_dir: PathBuf,

    /// Per-file read time limit in seconds
    #[arg(long, default_value_t = 60)]
    pub read_timeout: u64,
}

impl Cli {
    pub fn to_config(&self) -> Result<AnalysisConfig> {
        let mut selected_charts = BTreeSet::new();
        for key in &self.charts {
            let id = ChartId::from_key(key).ok_or_else(|| {
                eyre!(
                    "unknown chart {key:?}; valid keys are: {}",
                    ChartId::all()
                        .iter()
                        .map(|spec| spec.key)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })?;
            selected_charts.insert(id);
        }

        Ok(AnalysisConfig {
            min_len: self.min_len,
            clean_n: !self.keep_n,
            top_codons: usize::from(self.top_codons),
            selected_charts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with(charts: Vec<String>) -> Cli {
        Cli {
            file_a: PathBuf::from("a.fasta"),
            file_b: PathBuf::from("b.fasta"),
            label_a: "salmonella".to_string(),
            label_b: "gallus".to_string(),
            min_len: 100,
            keep_n: false,
            top_codons: 10,
            charts,
            out_dir: PathBuf::from("results"),
            read_timeout: 60,
        }
    }

    #[test]
    fn test_to_config() {
        let config = cli_with(vec![]).to_config().unwrap();
        assert_eq!(config.min_len, 100);
        assert!(config.clean_n);
        assert_eq!(config.top_codons, 10);
        assert!(config.selected_charts.is_empty());
    }

    #[test]
    fn test_to_config_resolves_chart_keys() {
        let config = cli_with(vec![
            "top_codons".to_string(),
            "gc_distribution".to_string(),
        ])
        .to_config()
        .unwrap();
        assert_eq!(config.selected_charts.len(), 2);
        assert!(config.selected_charts.contains(&ChartId::TopCodons));
    }

    #[test]
    fn test_to_config_rejects_unknown_chart() {
        let result = cli_with(vec!["pie_chart".to_string()]).to_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_keep_n_disables_clean_n() {
        let mut cli = cli_with(vec![]);
        cli.keep_n = true;
        assert!(!cli.to_config().unwrap().clean_n);
    }
}
