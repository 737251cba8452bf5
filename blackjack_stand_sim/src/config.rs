//! Configuration of a simulation run. A strategy is either built programmatically through
//! `StrategyConfigBuilder` or loaded from a JSON strategy file, in both cases defaults are resolved
//! and the values validated before any round is played.

use crate::error::SimulationError;
use crate::game::deck::ALLOWED_NUM_DECKS;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_NUM_DECKS: usize = 4;
pub const DEFAULT_WAGER: f64 = 10.0;
pub const DEFAULT_PLAYER_BALANCE: f64 = 100.0;
pub const DEFAULT_STAND_VALUE: u32 = 17;

/// Struct for the validated configuration of a simulation. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyConfig {
    pub decks: usize,
    pub wager: f64,
    pub player_balance: f64,
    pub player_stand_value: u32,
    pub dealer_stand_value: u32,
    pub insurance: bool,
}

impl StrategyConfig {
    /// Associated method for returning a new `StrategyConfigBuilder` object. Any option left unset
    /// takes its default when the builder is built.
    pub fn new() -> StrategyConfigBuilder {
        StrategyConfigBuilder::default()
    }

    /// Parses a strategy from the contents of a JSON strategy file.
    pub fn from_json_str(json: &str) -> Result<StrategyConfig, SimulationError> {
        let file: StrategyFile = serde_json::from_str(json)?;
        StrategyConfig::try_from(file)
    }

    /// Reads and parses the strategy file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<StrategyConfig, SimulationError> {
        let contents = fs::read_to_string(path)?;
        StrategyConfig::from_json_str(&contents)
    }
}

impl Default for StrategyConfig {
    /// Returns the standard configuration: four decks, a wager of 10, a balance of 100, both sides
    /// standing on 17 and no insurance.
    fn default() -> Self {
        StrategyConfig {
            decks: DEFAULT_NUM_DECKS,
            wager: DEFAULT_WAGER,
            player_balance: DEFAULT_PLAYER_BALANCE,
            player_stand_value: DEFAULT_STAND_VALUE,
            dealer_stand_value: DEFAULT_STAND_VALUE,
            insurance: false,
        }
    }
}

/// Struct to implement builder pattern for `StrategyConfig`
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyConfigBuilder {
    decks: Option<usize>,
    wager: Option<f64>,
    player_balance: Option<f64>,
    player_stand_value: Option<u32>,
    dealer_stand_value: Option<u32>,
    insurance: Option<bool>,
}

impl StrategyConfigBuilder {
    /// Method for choosing the number of decks each round is dealt from, must be 2, 4 or 8.
    pub fn decks(&mut self, decks: usize) -> &mut Self {
        self.decks = Some(decks);
        self
    }

    /// Method for setting the amount wagered on every round.
    pub fn wager(&mut self, wager: f64) -> &mut Self {
        self.wager = Some(wager);
        self
    }

    /// Method for setting the starting balance of the player.
    pub fn player_balance(&mut self, balance: f64) -> &mut Self {
        self.player_balance = Some(balance);
        self
    }

    /// Method for setting the total at which the player stops drawing.
    pub fn player_stand_value(&mut self, value: u32) -> &mut Self {
        self.player_stand_value = Some(value);
        self
    }

    /// Method for setting the total at which the dealer stops drawing.
    pub fn dealer_stand_value(&mut self, value: u32) -> &mut Self {
        self.dealer_stand_value = Some(value);
        self
    }

    /// Method for setting whether the player takes insurance when the dealer's first card is an ace.
    pub fn insurance(&mut self, insurance: bool) -> &mut Self {
        self.insurance = Some(insurance);
        self
    }

    /// Method for building a `StrategyConfig`, returns an `InvalidConfiguration` error if the deck
    /// count is unsupported, the wager is not a positive amount or the balance is not finite.
    pub fn build(&self) -> Result<StrategyConfig, SimulationError> {
        let defaults = StrategyConfig::default();
        let config = StrategyConfig {
            decks: self.decks.unwrap_or(defaults.decks),
            wager: self.wager.unwrap_or(defaults.wager),
            player_balance: self.player_balance.unwrap_or(defaults.player_balance),
            player_stand_value: self.player_stand_value.unwrap_or(defaults.player_stand_value),
            dealer_stand_value: self.dealer_stand_value.unwrap_or(defaults.dealer_stand_value),
            insurance: self.insurance.unwrap_or(defaults.insurance),
        };

        if !ALLOWED_NUM_DECKS.contains(&config.decks) {
            return Err(SimulationError::invalid_config(format!(
                "invalid number of decks {}, must be one of: 2, 4, or 8",
                config.decks
            )));
        }
        if !config.wager.is_finite() || config.wager <= 0.0 {
            return Err(SimulationError::invalid_config(format!(
                "wager must be a positive amount, got {}",
                config.wager
            )));
        }
        if !config.player_balance.is_finite() {
            return Err(SimulationError::invalid_config(format!(
                "player balance must be a finite amount, got {}",
                config.player_balance
            )));
        }

        Ok(config)
    }
}

/// The shape of a strategy file. Every option may be omitted and unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct StrategyFile {
    pub decks: Option<usize>,
    pub wager: Option<f64>,
    pub player_balance: Option<f64>,
    pub player_stand_value: Option<u32>,
    pub dealer_stand_value: Option<u32>,
    pub insurance: Option<bool>,
}

impl TryFrom<StrategyFile> for StrategyConfig {
    type Error = SimulationError;

    fn try_from(value: StrategyFile) -> Result<Self, Self::Error> {
        let mut builder = StrategyConfig::new();
        if let Some(decks) = value.decks {
            builder.decks(decks);
        }
        if let Some(wager) = value.wager {
            builder.wager(wager);
        }
        if let Some(balance) = value.player_balance {
            builder.player_balance(balance);
        }
        if let Some(stand) = value.player_stand_value {
            builder.player_stand_value(stand);
        }
        if let Some(stand) = value.dealer_stand_value {
            builder.dealer_stand_value(stand);
        }
        if let Some(insurance) = value.insurance {
            builder.insurance(insurance);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = StrategyConfig::new().build().unwrap();
        assert_eq!(config, StrategyConfig::default());
        assert_eq!(config.decks, 4);
        assert_eq!(config.wager, 10.0);
        assert_eq!(config.player_balance, 100.0);
        assert_eq!(config.player_stand_value, 17);
        assert_eq!(config.dealer_stand_value, 17);
        assert!(!config.insurance);
    }

    #[test]
    fn builder_overrides() {
        let config = StrategyConfig::new()
            .decks(8)
            .wager(25.0)
            .player_balance(500.0)
            .player_stand_value(15)
            .dealer_stand_value(18)
            .insurance(true)
            .build()
            .unwrap();
        assert_eq!(config.decks, 8);
        assert_eq!(config.wager, 25.0);
        assert_eq!(config.player_balance, 500.0);
        assert_eq!(config.player_stand_value, 15);
        assert_eq!(config.dealer_stand_value, 18);
        assert!(config.insurance);
    }

    #[test]
    fn builder_rejects_bad_values() {
        for decks in [0, 1, 3, 6] {
            assert!(matches!(
                StrategyConfig::new().decks(decks).build(),
                Err(SimulationError::InvalidConfiguration(_))
            ));
        }
        for wager in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                StrategyConfig::new().wager(wager).build(),
                Err(SimulationError::InvalidConfiguration(_))
            ));
        }
        assert!(matches!(
            StrategyConfig::new().player_balance(f64::NAN).build(),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn parses_strategy_file() {
        let json = r#"{
            "decks": 2,
            "wager": 5,
            "player_balance": 250.5,
            "player_stand_value": 16,
            "dealer_stand_value": 17,
            "insurance": true,
            "comment": "unknown keys are ignored"
        }"#;
        let config = StrategyConfig::from_json_str(json).unwrap();
        assert_eq!(config.decks, 2);
        assert_eq!(config.wager, 5.0);
        assert_eq!(config.player_balance, 250.5);
        assert_eq!(config.player_stand_value, 16);
        assert!(config.insurance);
    }

    #[test]
    fn empty_strategy_file_uses_defaults() {
        let config = StrategyConfig::from_json_str("{}").unwrap();
        assert_eq!(config, StrategyConfig::default());
    }

    #[test]
    fn strategy_file_errors() {
        assert!(matches!(
            StrategyConfig::from_json_str(r#"{"decks": 6}"#),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            StrategyConfig::from_json_str("not json"),
            Err(SimulationError::Parse(_))
        ));
        assert!(matches!(
            StrategyConfig::load("this/file/does/not/exist.json"),
            Err(SimulationError::Io(_))
        ));
    }
}
