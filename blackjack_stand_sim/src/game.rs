//! Module that focuses on the simulation of a single round of blackjack, i.e. building and dealing
//! from the deck, scoring hands, and playing out a round between the player and the dealer.

pub mod deck;
pub mod hand;
pub mod round;

pub mod prelude {
    pub use super::deck::{Card, CardSource, Deck, Shoe, ALLOWED_NUM_DECKS};
    pub use super::hand::{score, Hand, BLACKJACK};
    pub use super::round::{
        play_round_from, Insurance, RoundEngine, RoundOutcome, RoundPhase, RoundResult,
    };
}

pub use prelude::*;
