//! Compare command implementation - run both algorithms on the same input
//! and check that they agree on the optimal cost

use anyhow::Result;
use nwalign_core::{random_sequence, AlignerFactory, AlignerParams, Algorithm, Alignment, Cost};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::input::InputArgs;
use crate::config::Config;
use crate::error::CliError;
use crate::report::write_output;

/// Source of the sequence pair being compared
pub enum CompareInput {
    Args(InputArgs),
    Random { len1: usize, len2: usize, seed: u64 },
}

#[derive(Debug)]
pub struct Timing {
    pub algorithm: Algorithm,
    pub cost: Cost,
    pub elapsed: Duration,
}

pub fn execute(config: &Config, input: CompareInput, out: Option<PathBuf>) -> Result<()> {
    let timings = run(config, input)?;
    let mut text = String::new();
    for timing in &timings {
        text.push_str(&format!(
            "{:<7} cost={} time={:.3}ms\n",
            timing.algorithm.name(),
            timing.cost,
            timing.elapsed.as_secs_f64() * 1000.0
        ));
    }
    write_output(&text, out.as_deref())
}

/// Align with every algorithm and fail if the costs disagree
pub fn run(config: &Config, input: CompareInput) -> Result<Vec<Timing>> {
    let model = config.cost_model()?;
    let (seq1, seq2) = match input {
        CompareInput::Args(args) => args.load()?,
        CompareInput::Random { len1, len2, seed } => {
            log::info!("Random pair {} x {} (seed {})", len1, len2, seed);
            let mut rng = StdRng::seed_from_u64(seed);
            let seq1 = random_sequence(model.alphabet(), len1, &mut rng);
            let seq2 = random_sequence(model.alphabet(), len2, &mut rng);
            (seq1, seq2)
        }
    };

    let mut timings = Vec::new();
    for algorithm in [Algorithm::Full, Algorithm::Linear] {
        let params = AlignerParams { algorithm, ..config.aligner_params(None) };
        let aligner = AlignerFactory::create(&params, &model).map_err(CliError::from)?;

        let start = Instant::now();
        let alignment: Alignment = aligner.align(&seq1, &seq2).map_err(CliError::from)?;
        let elapsed = start.elapsed();

        alignment.validate(&seq1, &seq2, &model).map_err(CliError::from)?;
        log::info!("{}: cost {} in {:.3}s", algorithm, alignment.cost, elapsed.as_secs_f64());
        timings.push(Timing { algorithm, cost: alignment.cost, elapsed });
    }

    if let [first, second] = timings.as_slice() {
        if first.cost != second.cost {
            return Err(CliError::validation(format!(
                "{} cost {} differs from {} cost {}",
                first.algorithm, first.cost, second.algorithm, second.cost
            ))
            .into());
        }
    }

    Ok(timings)
}
