use blackjack_stand_sim::prelude::*;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, Level};

/// Simulate a series of blackjack games with a customizable stand-threshold strategy.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file containing the strategy and configuration.
    #[arg(long, default_value = "strategy.json")]
    strategy_file: PathBuf,

    /// Number of games to simulate.
    #[arg(long, default_value_t = 0)]
    simulate: u32,

    /// Seed for the random number generator, a random seed is used when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the summary as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Log every card dealt and every round's outcome.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let config = match StrategyConfig::load(&args.strategy_file) {
        Ok(c) => c,
        Err(e) => {
            error!("{}: {}", args.strategy_file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut simulator = BlackjackSimulator::new(config, rng);
    let summary = match simulator.run(args.simulate) {
        Ok(s) => s,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    if let Err(e) = write_summary(&summary, format, std::io::stdout()) {
        error!("unable to write summary: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
