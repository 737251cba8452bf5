//! A single round of blackjack played as a small state machine:
//! `Dealt -> InsuranceCheck -> PlayerTurn -> {PlayerBust | DealerTurn} -> Resolved`.

use crate::config::StrategyConfig;
use crate::error::SimulationError;
use crate::game::deck::{CardSource, Deck, Shoe};
use crate::game::hand::{Hand, BLACKJACK};
use rand::Rng;
use std::fmt::Display;
use tracing::debug;

/// The phases a round moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Dealt,
    InsuranceCheck,
    PlayerTurn,
    PlayerBust,
    DealerTurn,
    Resolved,
}

/// How the main wager of a round was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    PlayerBust,
    DealerBust,
    PlayerWin,
    DealerWin,
    Push,
}

impl RoundOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, RoundOutcome::DealerBust | RoundOutcome::PlayerWin)
    }

    pub fn is_loss(&self) -> bool {
        matches!(self, RoundOutcome::PlayerBust | RoundOutcome::DealerWin)
    }

    pub fn is_push(&self) -> bool {
        matches!(self, RoundOutcome::Push)
    }
}

impl Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundOutcome::PlayerBust => write!(f, "player busted, dealer wins"),
            RoundOutcome::DealerBust => write!(f, "dealer busted, player wins"),
            RoundOutcome::PlayerWin => write!(f, "player wins"),
            RoundOutcome::DealerWin => write!(f, "dealer wins"),
            RoundOutcome::Push => write!(f, "push"),
        }
    }
}

/// What happened to the insurance side bet. Amounts are the insurance stake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Insurance {
    NotTaken,
    Won(f64),
    Lost(f64),
    /// The player busted, so the side bet was never settled.
    Unsettled(f64),
}

/// The record produced at the end of every round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub balance: f64,
    pub outcome: RoundOutcome,
    pub net_change: f64,
    /// Natural blackjacks are not paid differently, so this is always false.
    pub blackjack: bool,
    pub insurance: Insurance,
    pub player_hand: Hand,
    pub dealer_hand: Hand,
}

impl RoundResult {
    pub fn player_total(&self) -> u32 {
        self.player_hand.score()
    }

    pub fn dealer_total(&self) -> u32 {
        self.dealer_hand.score()
    }
}

/// Plays rounds with the given configuration, every round is dealt from a freshly built and
/// shuffled deck drawn with the engine's random source.
pub struct RoundEngine<R: Rng> {
    config: StrategyConfig,
    rng: R,
}

impl<R: Rng> RoundEngine<R> {
    /// Associated function to create a new `RoundEngine`, `rng` is the only source of randomness used.
    pub fn new(config: StrategyConfig, rng: R) -> Self {
        RoundEngine { config, rng }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Plays one round for `wager` starting from `balance`. Fails only if the configured deck count
    /// is unsupported.
    pub fn play_round(&mut self, wager: f64, balance: f64) -> Result<RoundResult, SimulationError> {
        let deck = Deck::build(self.config.decks, &mut self.rng)?;
        let mut shoe = Shoe::new(deck, &mut self.rng);
        Ok(play_round_from(&self.config, &mut shoe, wager, balance))
    }
}

/// Plays one round dealing from `source`. If the source runs out, whoever is drawing simply keeps
/// the cards they have.
pub fn play_round_from<S: CardSource + ?Sized>(
    config: &StrategyConfig,
    source: &mut S,
    wager: f64,
    balance: f64,
) -> RoundResult {
    let mut round = Round::deal(source, wager, balance);
    let mut phase = RoundPhase::Dealt;

    loop {
        phase = match phase {
            RoundPhase::Dealt => {
                debug!(
                    "player's hand: {}, dealer's hand: {}",
                    round.player,
                    round.dealer.formatted_with_hole_card()
                );
                RoundPhase::InsuranceCheck
            }
            RoundPhase::InsuranceCheck => {
                round.check_insurance(config);
                RoundPhase::PlayerTurn
            }
            RoundPhase::PlayerTurn => round.player_turn(config, source),
            RoundPhase::PlayerBust => return round.settle_bust(),
            RoundPhase::DealerTurn => {
                round.dealer_turn(config, source);
                RoundPhase::Resolved
            }
            RoundPhase::Resolved => return round.resolve(),
        }
    }
}

/// In-progress state of a round.
struct Round {
    player: Hand,
    dealer: Hand,
    wager: f64,
    starting_balance: f64,
    balance: f64,
    insurance_stake: Option<f64>,
}

impl Round {
    /// Deals two cards each, alternating player and dealer.
    fn deal<S: CardSource + ?Sized>(source: &mut S, wager: f64, balance: f64) -> Round {
        let mut player = Hand::new();
        let mut dealer = Hand::new();
        for _ in 0..2 {
            if let Some(card) = source.deal() {
                player.receive_card(card);
            }
            if let Some(card) = source.deal() {
                dealer.receive_card(card);
            }
        }

        Round {
            player,
            dealer,
            wager,
            starting_balance: balance,
            balance,
            insurance_stake: None,
        }
    }

    fn check_insurance(&mut self, config: &StrategyConfig) {
        let dealer_shows_ace = self.dealer.first_card().map_or(false, |c| c.is_ace());
        if dealer_shows_ace && config.insurance {
            let stake = self.wager / 2.0;
            debug!("placed an insurance bet of {:.2}", stake);
            self.insurance_stake = Some(stake);
        }
    }

    fn player_turn<S: CardSource + ?Sized>(
        &mut self,
        config: &StrategyConfig,
        source: &mut S,
    ) -> RoundPhase {
        while self.player.score() < config.player_stand_value {
            let Some(card) = source.deal() else {
                break;
            };
            self.player.receive_card(card);
            debug!(
                "player drew {}, hand: {} (total {})",
                card,
                self.player,
                self.player.score()
            );
            if self.player.is_bust() {
                return RoundPhase::PlayerBust;
            }
        }
        debug!(
            "player's final hand: {} (total {})",
            self.player,
            self.player.score()
        );
        RoundPhase::DealerTurn
    }

    fn dealer_turn<S: CardSource + ?Sized>(&mut self, config: &StrategyConfig, source: &mut S) {
        debug!("dealer's hand: {}", self.dealer);
        while self.dealer.score() < config.dealer_stand_value {
            let Some(card) = source.deal() else {
                break;
            };
            self.dealer.receive_card(card);
            debug!(
                "dealer drew {}, hand: {} (total {})",
                card,
                self.dealer,
                self.dealer.score()
            );
        }
        debug!(
            "dealer's final hand: {} (total {})",
            self.dealer,
            self.dealer.score()
        );
    }

    /// The wager is lost and nothing else is settled, including any insurance bet.
    fn settle_bust(mut self) -> RoundResult {
        self.balance -= self.wager;
        let insurance = match self.insurance_stake {
            Some(stake) => Insurance::Unsettled(stake),
            None => Insurance::NotTaken,
        };
        self.finish(RoundOutcome::PlayerBust, insurance)
    }

    fn resolve(mut self) -> RoundResult {
        let player_total = self.player.score();
        let dealer_total = self.dealer.score();

        let outcome = if dealer_total > BLACKJACK {
            RoundOutcome::DealerBust
        } else if player_total > dealer_total {
            RoundOutcome::PlayerWin
        } else if player_total < dealer_total {
            RoundOutcome::DealerWin
        } else {
            RoundOutcome::Push
        };

        if outcome.is_win() {
            self.balance += self.wager;
        } else if outcome.is_loss() {
            self.balance -= self.wager;
        }

        // Settled on the dealer's final total, so a 21 reached by drawing also pays.
        let insurance = match self.insurance_stake {
            Some(stake) if dealer_total == BLACKJACK => {
                self.balance += stake;
                Insurance::Won(stake)
            }
            Some(stake) => {
                self.balance -= stake;
                Insurance::Lost(stake)
            }
            None => Insurance::NotTaken,
        };

        self.finish(outcome, insurance)
    }

    fn finish(self, outcome: RoundOutcome, insurance: Insurance) -> RoundResult {
        debug!("{}", outcome);
        match insurance {
            Insurance::Won(stake) => debug!("dealer has 21, insurance bet of {:.2} won", stake),
            Insurance::Lost(stake) => debug!("dealer does not have 21, insurance bet of {:.2} lost", stake),
            Insurance::NotTaken | Insurance::Unsettled(_) => {}
        }

        RoundResult {
            balance: self.balance,
            outcome,
            net_change: self.balance - self.starting_balance,
            blackjack: false,
            insurance,
            player_hand: self.player,
            dealer_hand: self.dealer,
        }
    }
}
