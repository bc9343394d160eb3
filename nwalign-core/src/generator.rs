//! Input string generation
//!
//! An input file names two base strings, each followed by a list of
//! indices. Each index `k` in turn grows the string by inserting a copy of
//! the whole current string right after position `k`. An index past the
//! end appends the copy, so every input expands:
//!
//! ```text
//! ACTG, [3, 6, 1]
//!   ACTG -> ACTGACTG -> ACTGACTACTGACTGG -> ACACTGACTACTGACTGGTGACTACTGACTGG
//! ```

use std::path::Path;

use rand::Rng;
use thiserror::Error;

/// Errors that can occur while reading or expanding an input description
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Grow `base` by self-insertion at each of `indices` in order
pub fn expand(base: &[u8], indices: &[usize]) -> Vec<u8> {
    let mut current = base.to_vec();

    for &index in indices {
        let at = index.saturating_add(1).min(current.len());
        let mut next = Vec::with_capacity(current.len() * 2);
        next.extend_from_slice(&current[..at]);
        next.extend_from_slice(&current);
        next.extend_from_slice(&current[at..]);
        current = next;
    }

    current
}

/// One base string and the indices that expand it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseString {
    pub base: Vec<u8>,
    pub indices: Vec<usize>,
}

impl BaseString {
    pub fn generate(&self) -> Vec<u8> {
        expand(&self.base, &self.indices)
    }

    /// Length of the generated string, `len(base) * 2^indices`, or `None`
    /// if that overflows
    pub fn generated_len(&self) -> Option<usize> {
        self.indices
            .iter()
            .try_fold(self.base.len(), |len, _| len.checked_mul(2))
    }
}

/// Parsed input file: two base strings with their indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub first: BaseString,
    pub second: BaseString,
}

impl InputSpec {
    /// Parse the two-block input format.
    ///
    /// Line 1 is the first base string, followed by its indices one per
    /// line. The first non-numeric line starts the second block. Blank
    /// lines are skipped.
    pub fn parse(text: &str) -> GeneratorResult<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, first_base) = lines.next().ok_or_else(|| GeneratorError::Parse {
            line: 1,
            message: "missing first base string".to_string(),
        })?;
        let mut first = BaseString {
            base: first_base.as_bytes().to_vec(),
            indices: Vec::new(),
        };

        let mut second: Option<BaseString> = None;
        for (line_no, line) in lines {
            let is_index = line.bytes().all(|b| b.is_ascii_digit());
            match second.as_mut() {
                None if is_index => first.indices.push(parse_index(line, line_no)?),
                None => {
                    second = Some(BaseString {
                        base: line.as_bytes().to_vec(),
                        indices: Vec::new(),
                    })
                }
                Some(block) if is_index => block.indices.push(parse_index(line, line_no)?),
                Some(_) => {
                    return Err(GeneratorError::Parse {
                        line: line_no,
                        message: format!("expected an index, found '{}'", line),
                    })
                }
            }
        }

        let second = second.ok_or_else(|| GeneratorError::Parse {
            line: text.lines().count().max(1),
            message: "missing second base string".to_string(),
        })?;

        Ok(Self { first, second })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> GeneratorResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Expand both base strings
    pub fn generate(&self) -> (Vec<u8>, Vec<u8>) {
        let first = self.first.generate();
        let second = self.second.generate();
        log::debug!(
            "generated sequences of length {} and {}",
            first.len(),
            second.len()
        );
        (first, second)
    }
}

fn parse_index(line: &str, line_no: usize) -> GeneratorResult<usize> {
    line.parse().map_err(|e| GeneratorError::Parse {
        line: line_no,
        message: format!("invalid index '{}': {}", line, e),
    })
}

/// Uniformly random sequence over `alphabet`
pub fn random_sequence<R: Rng + ?Sized>(alphabet: &[u8], len: usize, rng: &mut R) -> Vec<u8> {
    if alphabet.is_empty() {
        return Vec::new();
    }
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "ACTG\n3\n6\n1\nTACG\n1\n2\n9\n";

    #[test]
    fn test_expand_steps() {
        assert_eq!(expand(b"ACTG", &[3]), b"ACTGACTG");
        assert_eq!(expand(b"ACTG", &[3, 6]), b"ACTGACTACTGACTGG");
        assert_eq!(
            expand(b"ACTG", &[3, 6, 1]),
            b"ACACTGACTACTGACTGGTGACTACTGACTGG".to_vec()
        );
        assert_eq!(expand(b"ACTG", &[]), b"ACTG");
    }

    #[test]
    fn test_expand_past_the_end_appends() {
        assert_eq!(expand(b"AC", &[5]), b"ACAC");
        assert_eq!(expand(b"AC", &[1]), b"ACAC");
        assert_eq!(expand(b"AC", &[usize::MAX]), b"ACAC");
        assert_eq!(expand(b"AC", &[9, 0]), b"AACACCAC");
        assert!(expand(b"", &[0, 3]).is_empty());
    }

    #[test]
    fn test_parse_sample() {
        let spec = InputSpec::parse(SAMPLE).unwrap();
        assert_eq!(spec.first.base, b"ACTG");
        assert_eq!(spec.first.indices, vec![3, 6, 1]);
        assert_eq!(spec.second.base, b"TACG");
        assert_eq!(spec.second.indices, vec![1, 2, 9]);
        assert_eq!(spec.first.generated_len(), Some(32));

        let (first, second) = spec.generate();
        assert_eq!(first, b"ACACTGACTACTGACTGGTGACTACTGACTGG".to_vec());
        assert_eq!(second, b"TATTATACGCTATTATACGCGACGCGGACGCG".to_vec());
    }

    #[test]
    fn test_parse_without_indices() {
        let spec = InputSpec::parse("\r\nAC\r\n\r\nGT\r\n").unwrap();
        assert!(spec.first.indices.is_empty());
        assert_eq!(spec.second.base, b"GT");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(InputSpec::parse(""), Err(GeneratorError::Parse { .. })));
        assert!(matches!(
            InputSpec::parse("ACTG\n1\n"),
            Err(GeneratorError::Parse { .. })
        ));
        match InputSpec::parse("A\nC\n0\nG\n") {
            Err(GeneratorError::Parse { line, .. }) => assert_eq!(line, 4),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let spec = InputSpec::from_file(file.path()).unwrap();
        assert_eq!(spec, InputSpec::parse(SAMPLE).unwrap());

        assert!(matches!(
            InputSpec::from_file("/nonexistent/input.txt"),
            Err(GeneratorError::Io(_))
        ));
    }

    #[test]
    fn test_random_sequence_is_deterministic() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let seq = random_sequence(b"ACGT", 100, &mut a);
        assert_eq!(seq.len(), 100);
        assert!(seq.iter().all(|s| b"ACGT".contains(s)));
        assert_eq!(seq, random_sequence(b"ACGT", 100, &mut b));
        assert!(random_sequence(b"", 5, &mut a).is_empty());
    }
}
