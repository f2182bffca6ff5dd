mod cli;
mod export;
mod jobs;
mod logging;

use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use libcodon::pipeline::{self, SpeciesInput};
use tracing::{error, info};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _log_guard = logging::init_logging()?;
    let config = cli.to_config()?;

    info!(
        file_a = %cli.file_a.display(),
        file_b = %cli.file_b.display(),
        min_len = config.min_len,
        clean_n = config.clean_n,
        top_codons = config.top_codons,
        "starting analysis"
    );

    let (input_a, input_b) = jobs::read_input_pair(
        (cli.label_a.clone(), cli.file_a.clone()),
        (cli.label_b.clone(), cli.file_b.clone()),
        Duration::from_secs(cli.read_timeout),
    )
    .await?;

    let output = match pipeline::run(
        SpeciesInput::new(input_a.label.as_str(), input_a.source.as_str(), &input_a.raw),
        SpeciesInput::new(input_b.label.as_str(), input_b.source.as_str(), &input_b.raw),
        &config,
    ) {
        Ok(output) => output,
        Err(error_value) => {
            error!(error = %error_value, "analysis failed");
            return Err(error_value.into());
        }
    };

    for summary in &output.codon_bias {
        info!(
            species = %summary.label,
            entropy_bits = summary.entropy_bits,
            distinct_codons = summary.distinct_codons,
            "codon bias"
        );
    }

    let paths = export::write_outputs(&cli.out_dir, &output, config.top_codons)?;
    info!(
        metrics = %paths.metrics_csv.display(),
        codon_usage = %paths.codon_csv.display(),
        charts = %paths.chart_manifest.display(),
        "done"
    );
    Ok(())
}
