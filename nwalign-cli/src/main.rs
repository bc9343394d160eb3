use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use nwalign_core::Algorithm;
use std::path::PathBuf;

mod commands;
mod config;
mod error;
mod report;

use commands::compare::CompareInput;
use commands::input::InputArgs;
use config::{Config, OutputFormat};
use error::{format_error_with_suggestions, CliError};

#[derive(Parser)]
#[command(name = "nwalign")]
#[command(about = "nwalign - optimal global alignment in quadratic or linear space")]
#[command(version)]
#[command(long_about = "
nwalign computes a minimum-cost global alignment of two sequences under a
substitution matrix and a per-symbol gap cost. The full algorithm fills the
whole dynamic-programming table; the linear algorithm splits the problem
recursively and keeps only two rows at a time.

Examples:
  nwalign align --input input1.txt --out output1.txt
  nwalign align --seq1 GATTACA --seq2 GCATGCT --algorithm full --stats
  nwalign align --fasta1 a.fa.gz --fasta2 b.fa --format json
  nwalign generate --input input1.txt
  nwalign compare --random 500 400 --seed 7
  nwalign config --example > nwalign.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align two sequences and report the cost and both aligned rows
    Align {
        #[command(flatten)]
        input: InputArgs,

        /// Alignment algorithm (defaults to the configured one)
        #[arg(short, long)]
        algorithm: Option<AlgorithmType>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Output format (defaults to the configured one)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Include match/mismatch/gap statistics
        #[arg(long)]
        stats: bool,
    },

    /// Print the two sequences an input file expands to
    Generate {
        /// Generator input file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Run both algorithms on one input and check that their costs agree
    Compare {
        #[command(flatten)]
        input: InputArgs,

        /// Align two random sequences of these lengths instead
        #[arg(long, num_args = 2, value_names = ["LEN1", "LEN2"], conflicts_with_all = ["input", "fasta1", "seq1"])]
        random: Option<Vec<usize>>,

        /// Seed for --random
        #[arg(long, default_value = "0", requires = "random")]
        seed: u64,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        /// Print an example configuration file
        #[arg(long)]
        example: bool,

        /// Write the effective configuration to this file
        #[arg(long, conflicts_with = "example")]
        save: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AlgorithmType {
    Full,
    Linear,
}

impl From<AlgorithmType> for Algorithm {
    fn from(value: AlgorithmType) -> Self {
        match value {
            AlgorithmType::Full => Algorithm::Full,
            AlgorithmType::Linear => Algorithm::Linear,
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Align {
            input,
            algorithm,
            out,
            format,
            stats,
        } => {
            commands::align::execute(
                &config,
                input,
                algorithm.map(Algorithm::from),
                out,
                format,
                stats,
            )?;
        }

        Commands::Generate { input, out } => {
            commands::generate::execute(input, out)?;
        }

        Commands::Compare {
            input,
            random,
            seed,
            out,
        } => {
            let input = match random.as_deref() {
                Some(&[len1, len2]) => CompareInput::Random { len1, len2, seed },
                Some(_) => {
                    return Err(CliError::invalid_input("--random takes exactly two lengths").into())
                }
                None => CompareInput::Args(input),
            };
            commands::compare::execute(&config, input, out)?;
        }

        Commands::Config { example, save } => {
            if example {
                print!("{}", Config::example_toml());
            } else if let Some(path) = save {
                config.save_to_file(&path)?;
                log::info!("Configuration written to: {}", path.display());
            } else {
                println!("{:#?}", config);
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => eprintln!("Error: {}", format_error_with_suggestions(cli_err)),
            None => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }
}
