//! Algorithm selection
//!
//! Both algorithms produce an optimal alignment under the same
//! [`CostModel`]; they differ only in memory use and in how equal-cost ties
//! are resolved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alignment::Alignment;
use crate::cost::CostModel;
use crate::error::{AlignError, AlignResult};
use crate::full::align_full;
use crate::split::{SplitAligner, MIN_BASE_LEN};

/// Which alignment algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Full cost table, O(len1 * len2) memory
    Full,
    /// Divide and conquer, O(len1 + len2) memory
    Linear,
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Linear
    }
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Full => "full",
            Algorithm::Linear => "linear",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = AlignError;

    fn from_str(s: &str) -> AlignResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "full" | "basic" => Ok(Algorithm::Full),
            "linear" | "efficient" | "hirschberg" => Ok(Algorithm::Linear),
            other => Err(AlignError::invalid_configuration(format!(
                "unknown algorithm '{}', expected one of: {}",
                other,
                AlignerFactory::available_algorithms().join(", ")
            ))),
        }
    }
}

/// Parameters for building an aligner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignerParams {
    pub algorithm: Algorithm,
    /// Base length for the linear-space aligner; ignored by the full one
    pub base_len: usize,
}

impl Default for AlignerParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            base_len: MIN_BASE_LEN,
        }
    }
}

/// Trait for global alignment algorithms
pub trait Aligner {
    /// Optimal global alignment of `seq1` against `seq2`
    fn align(&self, seq1: &[u8], seq2: &[u8]) -> AlignResult<Alignment>;

    /// Get the name/identifier of this algorithm
    fn name(&self) -> &'static str;
}

/// Quadratic-space aligner
#[derive(Debug, Clone)]
pub struct FullAligner<'m> {
    model: &'m CostModel,
}

impl<'m> FullAligner<'m> {
    pub fn new(model: &'m CostModel) -> Self {
        Self { model }
    }
}

impl Aligner for FullAligner<'_> {
    fn align(&self, seq1: &[u8], seq2: &[u8]) -> AlignResult<Alignment> {
        align_full(seq1, seq2, self.model)
    }

    fn name(&self) -> &'static str {
        Algorithm::Full.name()
    }
}

impl Aligner for SplitAligner<'_> {
    fn align(&self, seq1: &[u8], seq2: &[u8]) -> AlignResult<Alignment> {
        SplitAligner::align(self, seq1, seq2)
    }

    fn name(&self) -> &'static str {
        Algorithm::Linear.name()
    }
}

/// Factory for creating aligners
pub struct AlignerFactory;

impl AlignerFactory {
    /// Create an aligner borrowing `model` for its lifetime
    pub fn create<'m>(
        params: &AlignerParams,
        model: &'m CostModel,
    ) -> AlignResult<Box<dyn Aligner + 'm>> {
        match params.algorithm {
            Algorithm::Full => Ok(Box::new(FullAligner::new(model))),
            Algorithm::Linear => Ok(Box::new(
                SplitAligner::new(model).with_base_len(params.base_len)?,
            )),
        }
    }

    /// List all available algorithms
    pub fn available_algorithms() -> Vec<&'static str> {
        vec![Algorithm::Full.name(), Algorithm::Linear.name()]
    }
}
