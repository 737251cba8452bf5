use crate::game::round::RoundResult;
use serde::Serialize;
use std::fmt::Display;
use std::time::Duration;

/// Simple struct for recording all of the interesting data points accumulated during a simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub rounds_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub total_wagered: f64,
    pub starting_balance: f64,
    pub final_balance: f64,
    pub elapsed_secs: f64,
    pub ended_early: bool,
}

impl SimulationSummary {
    /// Associated function to create an empty summary for a run starting at `starting_balance`.
    pub fn new(starting_balance: f64) -> Self {
        SimulationSummary {
            rounds_played: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            total_wagered: 0.0,
            starting_balance,
            final_balance: starting_balance,
            elapsed_secs: 0.0,
            ended_early: false,
        }
    }

    /// Method for recording the result of a round that was played for `wager`.
    pub fn record(&mut self, wager: f64, result: &RoundResult) {
        self.rounds_played += 1;
        self.total_wagered += wager;
        if result.outcome.is_win() {
            self.wins += 1;
        } else if result.outcome.is_loss() {
            self.losses += 1;
        } else {
            self.ties += 1;
        }
        self.final_balance = result.balance;
    }

    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed_secs = elapsed.as_secs_f64();
    }

    /// Net winnings (positive) or losses (negative) over the whole run.
    pub fn net_change(&self) -> f64 {
        self.final_balance - self.starting_balance
    }

    /// Percentage of rounds won, 0 when no rounds were played.
    pub fn win_percentage(&self) -> f64 {
        if self.rounds_played == 0 {
            0.0
        } else {
            (self.wins as f64) / (self.rounds_played as f64) * 100.0
        }
    }

    pub fn average_time_per_round(&self) -> f64 {
        if self.rounds_played == 0 {
            0.0
        } else {
            self.elapsed_secs / (self.rounds_played as f64)
        }
    }
}

impl Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 80;
        const TEXT_WIDTH: usize = "average time per game (seconds)".len() + 20;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        let body = format!(
            "{:-^WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {}\n",
            "simulation results",
            "total games played",
            self.rounds_played,
            "games won",
            self.wins,
            "win percentage",
            self.win_percentage(),
            "games lost",
            self.losses,
            "ties",
            self.ties,
            "time taken (seconds)",
            self.elapsed_secs,
            "average time per game (seconds)",
            self.average_time_per_round(),
            "total wagered",
            self.total_wagered,
            "total winnings/losses",
            self.net_change(),
            "final balance",
            self.final_balance,
            "ended early",
            self.ended_early,
            "-".repeat(WIDTH),
        );
        write!(f, "{}", body)
    }
}
