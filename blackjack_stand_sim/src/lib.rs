pub mod config;
pub mod error;
pub mod game;
pub mod stats;
pub mod write;

use rand::Rng;
use std::time::Instant;
use tracing::{debug, info};

pub use config::{StrategyConfig, StrategyConfigBuilder, StrategyFile};
pub use error::SimulationError;
pub use game::prelude::*;
pub use stats::SimulationSummary;

pub mod prelude {
    pub use super::{
        game::prelude::*, write::write_summary, write::OutputFormat, BlackjackSimulator,
        SimulationError, SimulationSummary, StrategyConfig, StrategyConfigBuilder,
    };
}

/// Struct for running a simulation of many consecutive rounds with a single strategy.
/// The balance carries over from round to round, and the simulation ends once the requested number
/// of rounds has been played or the player can no longer cover the wager.
pub struct BlackjackSimulator<R: Rng> {
    engine: RoundEngine<R>,
}

impl<R: Rng> BlackjackSimulator<R> {
    /// Associated function to create a new `BlackjackSimulator`, all randomness is drawn from `rng`.
    pub fn new(config: StrategyConfig, rng: R) -> Self {
        BlackjackSimulator {
            engine: RoundEngine::new(config, rng),
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        self.engine.config()
    }

    /// Method that plays up to `rounds` rounds, returning the statistics recorded along the way.
    /// Running out of money is a normal way for a run to end, the only error is an invalid deck count.
    pub fn run(&mut self, rounds: u32) -> Result<SimulationSummary, SimulationError> {
        let config = *self.config();
        let wager = config.wager;
        let mut balance = config.player_balance;
        let mut summary = SimulationSummary::new(balance);

        info!(
            rounds,
            decks = config.decks,
            wager,
            balance,
            "starting simulation"
        );
        let start = Instant::now();

        while summary.rounds_played < rounds && balance > 0.0 {
            debug!("current balance: {:.2}", balance);
            if balance < wager {
                info!(balance, wager, "not enough balance to continue, ending simulation");
                summary.ended_early = true;
                break;
            }

            let result = self.engine.play_round(wager, balance)?;
            balance = result.balance;
            summary.record(wager, &result);
        }

        if balance <= 0.0 && summary.rounds_played < rounds {
            info!(balance, "balance exhausted, ending simulation");
            summary.ended_early = true;
        }

        summary.set_elapsed(start.elapsed());
        info!(
            rounds_played = summary.rounds_played,
            final_balance = summary.final_balance,
            "simulation finished"
        );

        Ok(summary)
    }
}
