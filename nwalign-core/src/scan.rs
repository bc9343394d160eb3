//! Linear-space cost scans
//!
//! Both scans keep two rows of the cost table alive and return the last
//! one. The suffix scan is the prefix scan run over both sequences back to
//! front.

use crate::cost::{Cost, CostModel};
use crate::error::AlignResult;

/// Entry `j` is the optimal cost of all of `seq1` against `seq2[..j]`
pub fn prefix_costs(seq1: &[u8], seq2: &[u8], model: &CostModel) -> AlignResult<Vec<Cost>> {
    model.check_span(seq1.len(), seq2.len())?;
    last_row(seq1.iter().copied(), seq2.iter().copied(), seq2.len(), model)
}

/// Entry `j` is the optimal cost of all of `seq1` against the last `j`
/// symbols of `seq2`
pub fn suffix_costs(seq1: &[u8], seq2: &[u8], model: &CostModel) -> AlignResult<Vec<Cost>> {
    model.check_span(seq1.len(), seq2.len())?;
    last_row(
        seq1.iter().rev().copied(),
        seq2.iter().rev().copied(),
        seq2.len(),
        model,
    )
}

fn last_row<R, C>(rows: R, cols: C, width: usize, model: &CostModel) -> AlignResult<Vec<Cost>>
where
    R: Iterator<Item = u8>,
    C: Iterator<Item = u8> + Clone,
{
    let gap = model.gap_cost();
    let mut prev: Vec<Cost> = (0..=width).map(|j| j as Cost * gap).collect();
    let mut curr = vec![0; width + 1];

    for a in rows {
        curr[0] = prev[0] + gap;
        for (j, b) in cols.clone().enumerate() {
            let diagonal = prev[j] + model.cost(a, b)?;
            let vertical = prev[j + 1] + gap;
            let horizontal = curr[j] + gap;
            curr[j + 1] = diagonal.min(vertical).min(horizontal);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    Ok(prev)
}
