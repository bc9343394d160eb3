//! Sequence file input
//!
//! Alignment itself never touches the filesystem; these readers turn
//! FASTA/FASTQ files into plain byte sequences for the aligners.

pub mod fasta;

pub use fasta::{FastaError, FastaParser, FastaRecord};
