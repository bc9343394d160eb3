//! nwalign Core Library
//!
//! Optimal global alignment of two sequences under a substitution matrix
//! and a linear gap cost, computed either with the full Needleman-Wunsch
//! table or with Hirschberg's divide-and-conquer scheme in linear space.

pub mod error;
pub mod cost;
pub mod alignment;
pub mod full;
pub mod scan;
pub mod split;
pub mod aligner;
pub mod generator;
pub mod io;

// Re-export commonly used types and functions
pub use error::{AlignError, AlignResult};
pub use cost::{Cost, CostModel, CostModelConfig, GAP};
pub use alignment::{Alignment, AlignmentBuilder, AlignmentStats};
pub use full::{align_full, CostTable};
pub use scan::{prefix_costs, suffix_costs};
pub use split::{align_linear_space, optimal_cut, SplitAligner, MIN_BASE_LEN};
pub use aligner::{Aligner, AlignerFactory, AlignerParams, Algorithm, FullAligner};
pub use generator::{expand, random_sequence, InputSpec, GeneratorError};

/// Version information for the nwalign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
