//! Align command implementation - optimal global alignment of two sequences

use anyhow::{Context, Result};
use nwalign_core::{AlignerFactory, Algorithm};
use std::path::PathBuf;
use std::time::Instant;

use super::input::InputArgs;
use crate::config::{Config, OutputFormat};
use crate::error::CliError;
use crate::report::{write_output, Report};

pub fn execute(
    config: &Config,
    input: InputArgs,
    algorithm: Option<Algorithm>,
    out: Option<PathBuf>,
    format: Option<OutputFormat>,
    stats: bool,
) -> Result<()> {
    let model = config.cost_model()?;
    let params = config.aligner_params(algorithm);
    let aligner = AlignerFactory::create(&params, &model).map_err(CliError::from)?;

    let (seq1, seq2) = input.load().context("Failed to load input sequences")?;
    log::info!(
        "Aligning {} x {} symbols with the {} algorithm",
        seq1.len(),
        seq2.len(),
        aligner.name()
    );

    let start = Instant::now();
    let alignment = aligner.align(&seq1, &seq2).map_err(CliError::from)?;
    let elapsed = start.elapsed();
    log::info!("Alignment cost {} in {:.3}s", alignment.cost, elapsed.as_secs_f64());

    let report = Report::new(
        params.algorithm,
        &alignment,
        elapsed,
        stats || config.output.include_stats,
    );
    let content = report.render(format.unwrap_or(config.output.format))?;
    write_output(&content, out.as_deref())
}
