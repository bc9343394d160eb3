//! FASTA/FASTQ sequence file parser
//!
//! Parsing goes through the needletail library; gzipped input is decoded
//! with flate2. Sequences are upper-cased so that they line up with the
//! alphabet of the cost model.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Result;
use flate2::read::GzDecoder;
use needletail::{parse_fastx_file, parse_fastx_reader};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty file or no sequences found")]
    EmptyFile,
}

/// A named sequence read from a FASTA/FASTQ file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// First word of the header line
    pub id: String,
    pub seq: Vec<u8>,
}

/// FASTA/FASTQ parser for reading sequence data
pub struct FastaParser;

impl FastaParser {
    /// Parse a FASTA/FASTQ file, transparently handling `.gz`
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<FastaRecord>> {
        let path_str = path.as_ref().to_string_lossy();

        if path_str.ends_with(".gz") {
            Self::parse_gzipped_file(path)
        } else {
            Self::parse_uncompressed_file(path)
        }
    }

    /// First record of a file; the remaining records are ignored
    pub fn first_record<P: AsRef<Path>>(path: P) -> Result<FastaRecord> {
        let mut records = Self::parse_file(&path)?;
        if records.len() > 1 {
            log::warn!(
                "{} holds {} records, using only the first ('{}')",
                path.as_ref().display(),
                records.len(),
                records[0].id
            );
        }
        Ok(records.swap_remove(0))
    }

    fn parse_uncompressed_file<P: AsRef<Path>>(path: P) -> Result<Vec<FastaRecord>> {
        let mut records = Vec::new();
        let mut reader = parse_fastx_file(&path).map_err(|e| FastaError::Parse(e.to_string()))?;

        while let Some(record) = reader.next() {
            let record = record.map_err(|e| FastaError::Parse(e.to_string()))?;
            records.push(Self::convert(&record));
        }

        if records.is_empty() {
            Err(FastaError::EmptyFile.into())
        } else {
            Ok(records)
        }
    }

    fn parse_gzipped_file<P: AsRef<Path>>(path: P) -> Result<Vec<FastaRecord>> {
        let file = File::open(&path).map_err(FastaError::Io)?;
        let decoder = GzDecoder::new(file);
        Self::parse_reader(BufReader::new(decoder))
    }

    /// Parse FASTA/FASTQ data from any readable source
    pub fn parse_reader<R: std::io::Read + Send>(reader: R) -> Result<Vec<FastaRecord>> {
        let mut records = Vec::new();
        let mut fastx_reader =
            parse_fastx_reader(reader).map_err(|e| FastaError::Parse(e.to_string()))?;

        while let Some(record) = fastx_reader.next() {
            let record = record.map_err(|e| FastaError::Parse(e.to_string()))?;
            records.push(Self::convert(&record));
        }

        if records.is_empty() {
            Err(FastaError::EmptyFile.into())
        } else {
            Ok(records)
        }
    }

    fn convert(record: &needletail::parser::SequenceRecord) -> FastaRecord {
        let header = String::from_utf8_lossy(record.id());
        let id = header.split_whitespace().next().unwrap_or_default().to_string();
        let seq = record.seq().to_ascii_uppercase();
        FastaRecord { id, seq }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Cursor, Write};

    #[test]
    fn test_parse_fasta_reader() {
        let fasta_data = ">seq1 description of sequence 1\n\
                          ATCGATCGATCG\n\
                          >seq2\n\
                          gctagctagcta\n";

        let sequences = FastaParser::parse_reader(Cursor::new(fasta_data)).unwrap();

        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].id, "seq1");
        assert_eq!(sequences[0].seq, b"ATCGATCGATCG");
        assert_eq!(sequences[1].id, "seq2");
        assert_eq!(sequences[1].seq, b"GCTAGCTAGCTA");
    }

    #[test]
    fn test_parse_fastq_reader() {
        let fastq_data = "@seq1 description\n\
                          ATCGATCG\n\
                          +\n\
                          IIIIIIII\n";

        let sequences = FastaParser::parse_reader(Cursor::new(fastq_data)).unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].seq, b"ATCGATCG");
    }

    #[test]
    fn test_multiline_fasta() {
        let fasta_data = ">seq1\n\
                          ATCGATCG\n\
                          ATCGATCG\n\
                          GCTAGCTA\n";

        let sequences = FastaParser::parse_reader(Cursor::new(fasta_data)).unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].seq, b"ATCGATCGATCGATCGGCTAGCTA");
    }

    #[test]
    fn test_empty_file() {
        assert!(FastaParser::parse_reader(Cursor::new("")).is_err());
    }

    #[test]
    fn test_gzipped_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seqs.fa.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b">a\nACGT\n>b\nTTGA\n").unwrap();
        encoder.finish().unwrap();

        let first = FastaParser::first_record(&path).unwrap();
        assert_eq!(first, FastaRecord { id: "a".to_string(), seq: b"ACGT".to_vec() });
    }
}
