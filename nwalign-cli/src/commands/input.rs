//! Where the two sequences of a run come from

use anyhow::{Context, Result};
use clap::Args;
use nwalign_core::io::FastaParser;
use nwalign_core::InputSpec;
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Generator input file (base strings followed by insertion indices)
    #[arg(short, long, conflicts_with_all = ["fasta1", "fasta2", "seq1", "seq2"])]
    pub input: Option<PathBuf>,

    /// FASTA/FASTQ file holding the first sequence
    #[arg(long, requires = "fasta2", conflicts_with_all = ["seq1", "seq2"])]
    pub fasta1: Option<PathBuf>,

    /// FASTA/FASTQ file holding the second sequence
    #[arg(long, requires = "fasta1")]
    pub fasta2: Option<PathBuf>,

    /// First sequence given literally
    #[arg(long, requires = "seq2")]
    pub seq1: Option<String>,

    /// Second sequence given literally (may be empty)
    #[arg(long, requires = "seq1")]
    pub seq2: Option<String>,
}

impl InputArgs {
    /// Resolve the two sequences to align
    pub fn load(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        if let Some(path) = &self.input {
            log::info!("Generating sequences from: {}", path.display());
            let spec = load_spec(path)?;
            return Ok(spec.generate());
        }

        if let (Some(fasta1), Some(fasta2)) = (&self.fasta1, &self.fasta2) {
            log::info!("Reading sequences from {} and {}", fasta1.display(), fasta2.display());
            let first = read_fasta(fasta1)?;
            let second = read_fasta(fasta2)?;
            return Ok((first, second));
        }

        if let (Some(seq1), Some(seq2)) = (&self.seq1, &self.seq2) {
            return Ok((seq1.as_bytes().to_vec(), seq2.as_bytes().to_vec()));
        }

        Err(CliError::invalid_input(
            "no input given; use --input, --fasta1/--fasta2 or --seq1/--seq2",
        )
        .into())
    }
}

/// Parse a generator input file
pub fn load_spec(path: &Path) -> CliResult<InputSpec> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }
    Ok(InputSpec::from_file(path)?)
}

fn read_fasta(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()).into());
    }
    let record = FastaParser::first_record(path)
        .with_context(|| format!("Failed to read sequence from {}", path.display()))?;
    log::debug!("{}: '{}' ({} bp)", path.display(), record.id, record.seq.len());
    Ok(record.seq)
}
