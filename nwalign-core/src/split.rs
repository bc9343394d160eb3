//! Divide-and-conquer alignment in linear space
//!
//! `seq1` is halved at its midpoint. A prefix scan of the left half and a
//! suffix scan of the right half against all of `seq2` locate the column
//! where an optimal path crosses the midpoint row; the two sub-problems on
//! either side of that cell are solved independently and concatenated.
//! Sub-problems below the base length fall back to the full table.

use crate::alignment::Alignment;
use crate::cost::{Cost, CostModel};
use crate::error::{AlignError, AlignResult};
use crate::full::full_alignment;
use crate::scan::{prefix_costs, suffix_costs};

/// Smallest base length that still guarantees both halves shrink
pub const MIN_BASE_LEN: usize = 2;

/// Linear-space aligner
#[derive(Debug, Clone)]
pub struct SplitAligner<'m> {
    model: &'m CostModel,
    base_len: usize,
}

impl<'m> SplitAligner<'m> {
    pub fn new(model: &'m CostModel) -> Self {
        Self {
            model,
            base_len: MIN_BASE_LEN,
        }
    }

    /// Solve sub-problems with either side shorter than `base_len` using
    /// the full table. Larger values trade memory for fewer scans.
    pub fn with_base_len(mut self, base_len: usize) -> AlignResult<Self> {
        if base_len < MIN_BASE_LEN {
            return Err(AlignError::invalid_configuration(format!(
                "base length must be at least {}, got {}",
                MIN_BASE_LEN, base_len
            )));
        }
        self.base_len = base_len;
        Ok(self)
    }

    pub fn base_len(&self) -> usize {
        self.base_len
    }

    pub fn align(&self, seq1: &[u8], seq2: &[u8]) -> AlignResult<Alignment> {
        self.model.check_sequence(seq1)?;
        self.model.check_sequence(seq2)?;
        self.model.check_span(seq1.len(), seq2.len())?;
        self.align_recursive(seq1, seq2, 0)
    }

    fn align_recursive(&self, seq1: &[u8], seq2: &[u8], depth: usize) -> AlignResult<Alignment> {
        if seq1.len() < self.base_len || seq2.len() < self.base_len {
            return full_alignment(seq1, seq2, self.model);
        }

        let mid = seq1.len() / 2;
        let (left, right) = seq1.split_at(mid);

        // Scratch rows go out of scope before recursing.
        let cut = {
            let forward = prefix_costs(left, seq2, self.model)?;
            let backward = suffix_costs(right, seq2, self.model)?;
            optimal_cut(&forward, &backward)
        };
        log::debug!(
            "split depth={} len1={} len2={} mid={} cut={}",
            depth,
            seq1.len(),
            seq2.len(),
            mid,
            cut
        );

        let (head, tail) = seq2.split_at(cut);
        let first = self.align_recursive(left, head, depth + 1)?;
        let second = self.align_recursive(right, tail, depth + 1)?;
        Ok(Alignment::concat(first, second))
    }
}

/// Column minimising `forward[j] + backward[n - j]`; the first one on ties.
///
/// Both rows must have the same length `n + 1`.
pub fn optimal_cut(forward: &[Cost], backward: &[Cost]) -> usize {
    debug_assert_eq!(forward.len(), backward.len());
    let n = forward.len() - 1;
    let mut best = 0;
    let mut best_cost = Cost::MAX;
    for (j, &f) in forward.iter().enumerate() {
        let total = f + backward[n - j];
        if total < best_cost {
            best_cost = total;
            best = j;
        }
    }
    best
}

/// Optimal global alignment in space linear in `len(seq1) + len(seq2)`
pub fn align_linear_space(seq1: &[u8], seq2: &[u8], model: &CostModel) -> AlignResult<Alignment> {
    SplitAligner::new(model).align(seq1, seq2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::full::align_full;

    fn model() -> CostModel {
        CostModel::nucleotide()
    }

    #[test]
    fn test_optimal_cut_first_minimum() {
        assert_eq!(optimal_cut(&[30, 0, 30], &[30, 60, 90]), 1);
        // Sums 10, 10, 10: the first column wins
        assert_eq!(optimal_cut(&[0, 5, 10], &[0, 5, 10]), 0);
        assert_eq!(optimal_cut(&[9, 9, 0], &[0, 9, 9]), 2);
        assert_eq!(optimal_cut(&[4], &[7]), 0);
    }

    #[test]
    fn test_short_inputs_match_full_exactly() {
        let model = model();
        let cases: [(&[u8], &[u8]); 6] = [
            (b"", b""),
            (b"", b"AC"),
            (b"A", b"GATTACA"),
            (b"GATTACA", b"T"),
            (b"ACGT", b""),
            (b"C", b"C"),
        ];
        for (seq1, seq2) in cases {
            let linear = align_linear_space(seq1, seq2, &model).unwrap();
            let full = align_full(seq1, seq2, &model).unwrap();
            assert_eq!(linear, full);
        }
    }

    #[test]
    fn test_two_by_two() {
        let model = model();
        let result = align_linear_space(b"AC", b"AG", &model).unwrap();
        assert_eq!(result.cost, 60);
        // Cut after the first column; the C/G half backtraces vertical first
        // and reproduces the full-table rows.
        assert_eq!(result.seq1_str(), "A_C");
        assert_eq!(result.seq2_str(), "AG_");
        assert_eq!(result, align_full(b"AC", b"AG", &model).unwrap());
        result.validate(b"AC", b"AG", &model).unwrap();

        let result = align_linear_space(b"AC", b"AC", &model).unwrap();
        assert_eq!(result.seq1_str(), "AC");
        assert_eq!(result.cost, 0);
    }

    #[test]
    fn test_cut_at_borders() {
        let model = model();
        // Everything in seq2 pairs with the right half (cut == 0) or the left
        // half (cut == len2); both must terminate and stay optimal.
        for (seq1, seq2) in [
            (&b"TTTTGGGG"[..], &b"GGGG"[..]),
            (&b"GGGGTTTT"[..], &b"GGGG"[..]),
            (&b"AAAAAAAAAAAA"[..], &b"CC"[..]),
        ] {
            let linear = align_linear_space(seq1, seq2, &model).unwrap();
            let full = align_full(seq1, seq2, &model).unwrap();
            assert_eq!(linear.cost, full.cost);
            linear.validate(seq1, seq2, &model).unwrap();
        }
    }

    #[test]
    fn test_larger_base_len() {
        let model = model();
        let (seq1, seq2) = (b"ACACACTGACTACTGACTGGTGACTACTGACTGG", b"TATTATACGCTATTATACGCGACGCGGACGCG");
        let expected = align_full(seq1, seq2, &model).unwrap().cost;
        for base_len in [2, 3, 8, 64] {
            let aligner = SplitAligner::new(&model).with_base_len(base_len).unwrap();
            let result = aligner.align(seq1, seq2).unwrap();
            assert_eq!(result.cost, expected, "base_len {}", base_len);
            result.validate(seq1, seq2, &model).unwrap();
        }
    }

    #[test]
    fn test_base_len_must_allow_halving() {
        let model = model();
        assert!(SplitAligner::new(&model).with_base_len(1).is_err());
        assert!(SplitAligner::new(&model).with_base_len(0).is_err());
        assert_eq!(SplitAligner::new(&model).base_len(), 2);
    }

    #[test]
    fn test_unknown_symbol_fails_before_work() {
        let model = model();
        let err = align_linear_space(b"ACGTACGT", b"ACGU", &model).unwrap_err();
        assert_eq!(err, AlignError::UnknownSymbol { symbol: b'U', position: Some(3) });
    }

    #[test]
    fn test_overflowing_costs_are_rejected() {
        let model = CostModel::new(b"A", &[vec![0]], Cost::MAX / 2).unwrap();
        let err = align_linear_space(b"AAAA", b"AA", &model).unwrap_err();
        assert!(matches!(err, AlignError::InvalidConfiguration(_)));
        assert!(prefix_costs(b"AA", b"AA", &model).is_err());
        assert!(suffix_costs(b"AA", b"AA", &model).is_err());
    }
}
