//! Alignment results and their assembly
//!
//! An [`Alignment`] is the pair of gapped sequences plus the total cost.
//! Backtraces write columns through an [`AlignmentBuilder`]; the
//! divide-and-conquer aligner stitches partial results with
//! [`Alignment::concat`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cost::{Cost, CostModel, GAP};
use crate::error::{AlignError, AlignResult};

/// Two equal-length gapped sequences and the cost of aligning them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Alignment {
    #[serde(with = "bytes_as_str")]
    pub seq1: Vec<u8>,
    #[serde(with = "bytes_as_str")]
    pub seq2: Vec<u8>,
    pub cost: Cost,
}

impl Alignment {
    /// Join two partial alignments end to end.
    ///
    /// Costs are added, not recomputed: the caller guarantees the halves
    /// meet at a column of an optimal path.
    pub fn concat(mut first: Alignment, second: Alignment) -> Alignment {
        first.seq1.extend_from_slice(&second.seq1);
        first.seq2.extend_from_slice(&second.seq2);
        first.cost += second.cost;
        first
    }

    /// Number of aligned columns
    pub fn len(&self) -> usize {
        self.seq1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq1.is_empty()
    }

    /// Aligned first sequence as text
    pub fn seq1_str(&self) -> String {
        String::from_utf8_lossy(&self.seq1).into_owned()
    }

    /// Aligned second sequence as text
    pub fn seq2_str(&self) -> String {
        String::from_utf8_lossy(&self.seq2).into_owned()
    }

    pub fn ungapped_seq1(&self) -> Vec<u8> {
        strip_gaps(&self.seq1)
    }

    pub fn ungapped_seq2(&self) -> Vec<u8> {
        strip_gaps(&self.seq2)
    }

    /// Sum of column costs under `model`, independent of the stored cost
    pub fn recompute_cost(&self, model: &CostModel) -> AlignResult<Cost> {
        if self.seq1.len() != self.seq2.len() {
            return Err(AlignError::invalid_alignment(format!(
                "aligned rows differ in length ({} vs {})",
                self.seq1.len(),
                self.seq2.len()
            )));
        }
        self.seq1
            .iter()
            .zip(&self.seq2)
            .try_fold(0, |total, (&a, &b)| Ok(total + model.column_cost(a, b)?))
    }

    /// Check that this is a well-formed alignment of `seq1` against `seq2`
    /// whose stored cost matches its columns.
    pub fn validate(&self, seq1: &[u8], seq2: &[u8], model: &CostModel) -> AlignResult<()> {
        let recomputed = self.recompute_cost(model)?;
        if self.ungapped_seq1() != seq1 {
            return Err(AlignError::invalid_alignment(
                "first row does not reproduce the first sequence",
            ));
        }
        if self.ungapped_seq2() != seq2 {
            return Err(AlignError::invalid_alignment(
                "second row does not reproduce the second sequence",
            ));
        }
        if recomputed != self.cost {
            return Err(AlignError::invalid_alignment(format!(
                "stored cost {} differs from column cost {}",
                self.cost, recomputed
            )));
        }
        Ok(())
    }

    /// Column statistics
    pub fn stats(&self) -> AlignmentStats {
        let mut stats = AlignmentStats::default();
        for (&a, &b) in self.seq1.iter().zip(&self.seq2) {
            match (a == GAP, b == GAP) {
                (true, _) => stats.gaps_in_seq1 += 1,
                (_, true) => stats.gaps_in_seq2 += 1,
                _ if a == b => stats.matches += 1,
                _ => stats.mismatches += 1,
            }
        }
        stats
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.seq1_str())?;
        writeln!(f, "{}", self.seq2_str())?;
        write!(f, "Cost: {}", self.cost)
    }
}

/// Per-column counts of an alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentStats {
    pub matches: usize,
    pub mismatches: usize,
    pub gaps_in_seq1: usize,
    pub gaps_in_seq2: usize,
}

impl AlignmentStats {
    pub fn columns(&self) -> usize {
        self.matches + self.mismatches + self.gaps_in_seq1 + self.gaps_in_seq2
    }

    /// Identity as a percentage of aligned columns
    pub fn identity(&self) -> f64 {
        let total = self.columns();
        if total == 0 {
            return 0.0;
        }
        (self.matches as f64 / total as f64) * 100.0
    }
}

/// Collects columns in reverse order during a backtrace
#[derive(Debug, Default)]
pub struct AlignmentBuilder {
    seq1: Vec<u8>,
    seq2: Vec<u8>,
}

impl AlignmentBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seq1: Vec::with_capacity(capacity),
            seq2: Vec::with_capacity(capacity),
        }
    }

    /// A symbol of the first sequence opposite a gap
    pub fn push_vertical(&mut self, a: u8) {
        self.seq1.push(a);
        self.seq2.push(GAP);
    }

    /// One symbol of each sequence
    pub fn push_diagonal(&mut self, a: u8, b: u8) {
        self.seq1.push(a);
        self.seq2.push(b);
    }

    /// A symbol of the second sequence opposite a gap
    pub fn push_horizontal(&mut self, b: u8) {
        self.seq1.push(GAP);
        self.seq2.push(b);
    }

    /// Reverse the collected columns into input order
    pub fn finish(mut self, cost: Cost) -> Alignment {
        self.seq1.reverse();
        self.seq2.reverse();
        Alignment {
            seq1: self.seq1,
            seq2: self.seq2,
            cost,
        }
    }
}

fn strip_gaps(row: &[u8]) -> Vec<u8> {
    row.iter().copied().filter(|&s| s != GAP).collect()
}

mod bytes_as_str {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        String::deserialize(deserializer).map(String::into_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alignment(seq1: &str, seq2: &str, cost: Cost) -> Alignment {
        Alignment {
            seq1: seq1.as_bytes().to_vec(),
            seq2: seq2.as_bytes().to_vec(),
            cost,
        }
    }

    #[test]
    fn test_builder_reverses_once() {
        let mut builder = AlignmentBuilder::with_capacity(3);
        // Backtrace order: last column first
        builder.push_vertical(b'C');
        builder.push_horizontal(b'G');
        builder.push_diagonal(b'A', b'A');
        let result = builder.finish(60);

        assert_eq!(result, alignment("A_C", "AG_", 60));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_concat_carries_cost() {
        let left = alignment("A", "A", 0);
        let right = alignment("_C", "G_", 60);
        let joined = Alignment::concat(left, right);
        assert_eq!(joined, alignment("A_C", "AG_", 60));
    }

    #[test]
    fn test_concat_with_empty() {
        let joined = Alignment::concat(Alignment::default(), alignment("AC", "AC", 0));
        assert_eq!(joined, alignment("AC", "AC", 0));
    }

    #[test]
    fn test_validate() {
        let model = CostModel::nucleotide();
        let good = alignment("A_C", "AG_", 60);
        assert!(good.validate(b"AC", b"AG", &model).is_ok());

        let wrong_cost = alignment("A_C", "AG_", 59);
        assert!(wrong_cost.validate(b"AC", b"AG", &model).is_err());

        let wrong_source = alignment("A_C", "AG_", 60);
        assert!(wrong_source.validate(b"AG", b"AG", &model).is_err());

        let ragged = alignment("AC", "A", 0);
        assert!(matches!(
            ragged.recompute_cost(&model),
            Err(AlignError::InvalidAlignment(_))
        ));
    }

    #[test]
    fn test_stats() {
        let stats = alignment("ACG_T", "AC_AA", 0).stats();
        assert_eq!(stats.matches, 2);
        assert_eq!(stats.mismatches, 1);
        assert_eq!(stats.gaps_in_seq1, 1);
        assert_eq!(stats.gaps_in_seq2, 1);
        assert_eq!(stats.columns(), 5);
        assert!((stats.identity() - 40.0).abs() < 1e-9);
        assert_eq!(Alignment::default().stats().identity(), 0.0);
    }

    #[test]
    fn test_display() {
        let text = alignment("A_C", "AG_", 60).to_string();
        assert_eq!(text, "A_C\nAG_\nCost: 60");
    }

    #[test]
    fn test_json_uses_strings() {
        let json = serde_json::to_string(&alignment("A_", "AC", 30)).unwrap();
        assert_eq!(json, r#"{"seq1":"A_","seq2":"AC","cost":30}"#);
    }
}
