//! Substitution and gap costs
//!
//! A [`CostModel`] is built once, validated, and then shared by reference
//! through every aligner. It is never mutated after construction.

use std::collections::BTreeMap;
use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

use crate::error::{AlignError, AlignResult};

/// Integer cost of an alignment column or of a whole alignment
pub type Cost = i64;

/// Symbol written opposite an unmatched symbol in an aligned sequence
pub const GAP: u8 = b'_';

/// Immutable substitution matrix over a byte alphabet plus a linear gap cost
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostModel {
    alphabet: Vec<u8>,
    /// Byte -> row index into `matrix`
    rank: [Option<u8>; 256],
    /// Row-major `alphabet.len() x alphabet.len()` table
    matrix: Vec<Cost>,
    gap_cost: Cost,
    /// Largest single-column cost, gap included
    max_cost: Cost,
}

impl CostModel {
    /// Build a cost model from an alphabet and a square substitution matrix.
    ///
    /// `matrix[i][j]` is the cost of pairing `alphabet[i]` with `alphabet[j]`.
    /// The matrix must be symmetric with a zero diagonal and no negative
    /// entries; the gap cost must be non-negative.
    pub fn new(alphabet: &[u8], matrix: &[Vec<Cost>], gap_cost: Cost) -> AlignResult<Self> {
        if alphabet.is_empty() {
            return Err(AlignError::invalid_configuration("alphabet is empty"));
        }
        if gap_cost < 0 {
            return Err(AlignError::invalid_configuration(format!(
                "gap cost must be non-negative, got {}",
                gap_cost
            )));
        }

        let mut rank = [None; 256];
        for (idx, &symbol) in alphabet.iter().enumerate() {
            if symbol == GAP {
                return Err(AlignError::invalid_configuration(format!(
                    "gap symbol '{}' cannot be part of the alphabet",
                    GAP as char
                )));
            }
            if rank[symbol as usize].is_some() {
                return Err(AlignError::invalid_configuration(format!(
                    "symbol '{}' appears twice in the alphabet",
                    symbol as char
                )));
            }
            rank[symbol as usize] = Some(idx as u8);
        }

        let n = alphabet.len();
        if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
            return Err(AlignError::invalid_configuration(format!(
                "substitution matrix must be {}x{}",
                n, n
            )));
        }

        for i in 0..n {
            for j in 0..n {
                let value = matrix[i][j];
                let (a, b) = (alphabet[i] as char, alphabet[j] as char);
                if value < 0 {
                    return Err(AlignError::invalid_configuration(format!(
                        "substitution cost {}{} is negative ({})",
                        a, b, value
                    )));
                }
                if i == j && value != 0 {
                    return Err(AlignError::invalid_configuration(format!(
                        "substitution cost {}{} must be 0, got {}",
                        a, b, value
                    )));
                }
                if value != matrix[j][i] {
                    return Err(AlignError::invalid_configuration(format!(
                        "substitution costs are asymmetric: {}{}={} but {}{}={}",
                        a, b, value, b, a, matrix[j][i]
                    )));
                }
            }
        }

        let matrix: Vec<Cost> = matrix.iter().flatten().copied().collect();
        let max_cost = matrix.iter().copied().fold(gap_cost, Cost::max);

        Ok(Self {
            alphabet: alphabet.to_vec(),
            rank,
            matrix,
            gap_cost,
            max_cost,
        })
    }

    /// Standard nucleotide table with gap cost 30
    pub fn nucleotide() -> Self {
        //               A    C    G    T
        let matrix = vec![
            vec![0, 110, 48, 94],
            vec![110, 0, 118, 48],
            vec![48, 118, 0, 110],
            vec![94, 48, 110, 0],
        ];
        Self::new(b"ACGT", &matrix, 30).expect("built-in nucleotide table is valid")
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub fn gap_cost(&self) -> Cost {
        self.gap_cost
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.rank[symbol as usize].is_some()
    }

    /// Substitution cost of pairing `a` with `b`
    #[inline]
    pub fn cost(&self, a: u8, b: u8) -> AlignResult<Cost> {
        let i = self.rank[a as usize].ok_or_else(|| AlignError::unknown_symbol(a))? as usize;
        let j = self.rank[b as usize].ok_or_else(|| AlignError::unknown_symbol(b))? as usize;
        Ok(self.matrix[i * self.alphabet.len() + j])
    }

    /// Cost of a single aligned column, either side of which may be [`GAP`]
    pub fn column_cost(&self, a: u8, b: u8) -> AlignResult<Cost> {
        match (a == GAP, b == GAP) {
            (false, false) => self.cost(a, b),
            (true, false) | (false, true) => Ok(self.gap_cost),
            (true, true) => Err(AlignError::invalid_alignment("column pairs two gaps")),
        }
    }

    /// Check that no partial sum for a `len1 x len2` problem can overflow.
    ///
    /// A path has at most `len1 + len2` columns, and choosing a split adds
    /// two such sums.
    pub fn check_span(&self, len1: usize, len2: usize) -> AlignResult<()> {
        let bound = len1
            .checked_add(len2)
            .and_then(|columns| Cost::try_from(columns).ok())
            .and_then(|columns| columns.checked_mul(self.max_cost))
            .and_then(|total| total.checked_mul(2));
        match bound {
            Some(_) => Ok(()),
            None => Err(AlignError::invalid_configuration(format!(
                "costs up to {} overflow for a {}x{} alignment",
                self.max_cost, len1, len2
            ))),
        }
    }

    /// Reject the first symbol of `seq` that is outside the alphabet
    pub fn check_sequence(&self, seq: &[u8]) -> AlignResult<()> {
        match seq.iter().position(|&s| !self.contains(s)) {
            Some(position) => Err(AlignError::UnknownSymbol {
                symbol: seq[position],
                position: Some(position),
            }),
            None => Ok(()),
        }
    }

    /// Serialisable form of this model
    pub fn to_config(&self) -> CostModelConfig {
        let mut substitutions = BTreeMap::new();
        for (i, &a) in self.alphabet.iter().enumerate() {
            for (j, &b) in self.alphabet.iter().enumerate().skip(i + 1) {
                let key = String::from_utf8_lossy(&[a, b]).into_owned();
                substitutions.insert(key, self.matrix[i * self.alphabet.len() + j]);
            }
        }
        CostModelConfig {
            alphabet: String::from_utf8_lossy(&self.alphabet).into_owned(),
            gap_cost: self.gap_cost,
            substitutions,
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::nucleotide()
    }
}

/// Cost model as written in configuration files.
///
/// Substitutions are keyed by two-symbol strings such as `"AC"`. Either
/// orientation of a pair may be given; identity pairs default to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModelConfig {
    pub alphabet: String,
    pub gap_cost: Cost,
    #[serde(default)]
    pub substitutions: BTreeMap<String, Cost>,
}

impl Default for CostModelConfig {
    fn default() -> Self {
        CostModel::nucleotide().to_config()
    }
}

impl TryFrom<CostModelConfig> for CostModel {
    type Error = AlignError;

    fn try_from(config: CostModelConfig) -> AlignResult<Self> {
        let alphabet = config.alphabet.as_bytes();
        let n = alphabet.len();
        let index_of = |symbol: u8| alphabet.iter().position(|&s| s == symbol);

        let mut matrix: Vec<Vec<Option<Cost>>> = vec![vec![None; n]; n];
        for (key, &value) in &config.substitutions {
            let bytes = key.as_bytes();
            let (i, j) = match bytes {
                [a, b] => match (index_of(*a), index_of(*b)) {
                    (Some(i), Some(j)) => (i, j),
                    _ => {
                        return Err(AlignError::invalid_configuration(format!(
                            "substitution key '{}' uses a symbol outside alphabet '{}'",
                            key, config.alphabet
                        )))
                    }
                },
                _ => {
                    return Err(AlignError::invalid_configuration(format!(
                        "substitution key '{}' must be exactly two symbols",
                        key
                    )))
                }
            };
            matrix[i][j] = Some(value);
        }

        let mut dense = vec![vec![0; n]; n];
        for i in 0..n {
            for j in 0..n {
                dense[i][j] = match (matrix[i][j], matrix[j][i]) {
                    (Some(v), _) | (None, Some(v)) => v,
                    (None, None) if i == j => 0,
                    (None, None) => {
                        return Err(AlignError::invalid_configuration(format!(
                            "missing substitution cost for {}{}",
                            alphabet[i] as char, alphabet[j] as char
                        )))
                    }
                };
            }
        }

        // `new` catches pairs given in both orientations with different values.
        Self::new(alphabet, &dense, config.gap_cost)
    }
}
