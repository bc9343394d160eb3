//! Rendering alignment results for output

use anyhow::{Context, Result};
use nwalign_core::{Algorithm, Alignment, AlignmentStats};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::config::OutputFormat;

/// One alignment run as written to the output
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub algorithm: Algorithm,
    #[serde(flatten)]
    pub alignment: &'a Alignment,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<AlignmentStats>,
}

impl<'a> Report<'a> {
    pub fn new(algorithm: Algorithm, alignment: &'a Alignment, elapsed: Duration, with_stats: bool) -> Self {
        Self {
            algorithm,
            alignment,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            stats: with_stats.then(|| alignment.stats()),
        }
    }

    /// Cost, both aligned rows and the elapsed time, one per line
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "{}\n{}\n{}\n{:.3}\n",
            self.alignment.cost,
            self.alignment.seq1_str(),
            self.alignment.seq2_str(),
            self.elapsed_ms
        );
        if let Some(stats) = &self.stats {
            text.push_str(&format!(
                "matches={} mismatches={} gaps_seq1={} gaps_seq2={} identity={:.2}%\n",
                stats.matches,
                stats.mismatches,
                stats.gaps_in_seq1,
                stats.gaps_in_seq2,
                stats.identity()
            ));
        }
        text
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(self)
                    .context("Failed to serialize report")?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

/// Write `content` to `path`, or to stdout when no path is given
pub fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            log::info!("Output written to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes()).context("Failed to write to stdout")?;
            handle.flush()?;
        }
    }
    Ok(())
}
