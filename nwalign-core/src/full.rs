//! Quadratic-space Needleman-Wunsch
//!
//! Fills the whole `(len1+1) x (len2+1)` cost table and backtraces through
//! it. Used directly, as the base case of the divide-and-conquer aligner,
//! and as the reference the linear-space result is checked against.

use crate::alignment::{Alignment, AlignmentBuilder};
use crate::cost::{Cost, CostModel};
use crate::error::AlignResult;

/// Dense cost table, row `i` covering the first `i` symbols of `seq1`
#[derive(Debug, Clone)]
pub struct CostTable {
    cells: Vec<Cost>,
    width: usize,
}

impl CostTable {
    /// Fill the table for `seq1` (rows) against `seq2` (columns)
    pub fn fill(seq1: &[u8], seq2: &[u8], model: &CostModel) -> AlignResult<Self> {
        model.check_span(seq1.len(), seq2.len())?;
        let width = seq2.len() + 1;
        let gap = model.gap_cost();
        let mut cells = vec![0; (seq1.len() + 1) * width];

        for (j, cell) in cells[..width].iter_mut().enumerate() {
            *cell = j as Cost * gap;
        }

        for i in 1..=seq1.len() {
            let (done, rest) = cells.split_at_mut(i * width);
            let prev = &done[(i - 1) * width..];
            let row = &mut rest[..width];

            row[0] = i as Cost * gap;
            for j in 1..width {
                let diagonal = model.cost(seq1[i - 1], seq2[j - 1])? + prev[j - 1];
                let vertical = gap + prev[j];
                let horizontal = gap + row[j - 1];
                row[j] = diagonal.min(vertical).min(horizontal);
            }
        }

        Ok(Self { cells, width })
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Cost {
        self.cells[i * self.width + j]
    }

    /// Cost of the full alignment, the bottom-right cell
    pub fn total(&self) -> Cost {
        self.cells[self.cells.len() - 1]
    }

    /// Last row: cost of all of `seq1` against every prefix of `seq2`
    pub fn last_row(&self) -> &[Cost] {
        &self.cells[self.cells.len() - self.width..]
    }

    /// Walk from the bottom-right cell back to the origin.
    ///
    /// Ties are broken vertical, then diagonal, then horizontal, so the
    /// same table always yields the same alignment.
    pub fn backtrace(&self, seq1: &[u8], seq2: &[u8], model: &CostModel) -> AlignResult<Alignment> {
        let gap = model.gap_cost();
        let mut builder = AlignmentBuilder::with_capacity(seq1.len() + seq2.len());
        let (mut i, mut j) = (seq1.len(), seq2.len());

        while i > 0 && j > 0 {
            let here = self.get(i, j);
            if here == gap + self.get(i - 1, j) {
                builder.push_vertical(seq1[i - 1]);
                i -= 1;
            } else if here == model.cost(seq1[i - 1], seq2[j - 1])? + self.get(i - 1, j - 1) {
                builder.push_diagonal(seq1[i - 1], seq2[j - 1]);
                i -= 1;
                j -= 1;
            } else {
                debug_assert_eq!(here, gap + self.get(i, j - 1));
                builder.push_horizontal(seq2[j - 1]);
                j -= 1;
            }
        }
        while j > 0 {
            builder.push_horizontal(seq2[j - 1]);
            j -= 1;
        }
        while i > 0 {
            builder.push_vertical(seq1[i - 1]);
            i -= 1;
        }

        Ok(builder.finish(self.total()))
    }
}

/// Optimal global alignment using the full cost table
pub fn align_full(seq1: &[u8], seq2: &[u8], model: &CostModel) -> AlignResult<Alignment> {
    model.check_sequence(seq1)?;
    model.check_sequence(seq2)?;
    full_alignment(seq1, seq2, model)
}

/// Unchecked body of [`align_full`], shared with the split aligner's base case
pub(crate) fn full_alignment(seq1: &[u8], seq2: &[u8], model: &CostModel) -> AlignResult<Alignment> {
    log::trace!("full DP on {}x{}", seq1.len(), seq2.len());
    let table = CostTable::fill(seq1, seq2, model)?;
    table.backtrace(seq1, seq2, model)
}
