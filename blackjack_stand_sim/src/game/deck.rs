use crate::error::SimulationError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use std::fmt::Display;

/// The deck counts a table may be configured with.
pub const ALLOWED_NUM_DECKS: [usize; 3] = [2, 4, 8];

/// Number of distinct ranks, Ace through King.
pub const NUM_RANKS: u8 = 13;

/// A single card, identified only by its rank. Suits play no part in scoring so they are not tracked.
/// Rank 1 is an Ace, 11 through 13 are the face cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(u8);

impl Card {
    pub const ACE: Card = Card(1);

    /// Associated function to create a new `Card`, returns `None` if `rank` is not in `1..=13`.
    pub fn new(rank: u8) -> Option<Card> {
        if (1..=NUM_RANKS).contains(&rank) {
            Some(Card(rank))
        } else {
            None
        }
    }

    /// Getter method for the rank of the card.
    pub fn rank(&self) -> u8 {
        self.0
    }

    /// The scoring value of the card with face cards flattened to 10. An Ace is reported as 1,
    /// whether it counts as 11 is decided when a whole hand is scored.
    pub fn value(&self) -> u8 {
        u8::min(self.0, 10)
    }

    pub fn is_ace(&self) -> bool {
        self.0 == 1
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            1 => write!(f, "A"),
            11 => write!(f, "J"),
            12 => write!(f, "Q"),
            13 => write!(f, "K"),
            n => write!(f, "{}", n),
        }
    }
}

/// Trait for anything cards can be dealt from during a round. Returning `None` means the source is
/// exhausted, which is a normal state rather than an error.
pub trait CardSource {
    fn deal(&mut self) -> Option<Card>;
}

/// A stacked sequence of cards dealt strictly front to back.
impl CardSource for VecDeque<Card> {
    fn deal(&mut self) -> Option<Card> {
        self.pop_front()
    }
}

/// Struct representing the multiset of cards that make up one or more standard decks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Associated function that builds `num_decks` standard decks and shuffles them with `rng`.
    /// Returns an `InvalidConfiguration` error if `num_decks` is not one of `ALLOWED_NUM_DECKS`.
    pub fn build<R: Rng + ?Sized>(num_decks: usize, rng: &mut R) -> Result<Deck, SimulationError> {
        if !ALLOWED_NUM_DECKS.contains(&num_decks) {
            return Err(SimulationError::invalid_config(format!(
                "invalid number of decks {}, must be one of: 2, 4, or 8",
                num_decks
            )));
        }

        let mut cards = Vec::with_capacity(num_decks * NUM_RANKS as usize);
        for _ in 0..num_decks {
            cards.extend((1..=NUM_RANKS).map(Card));
        }
        cards.shuffle(rng);

        Ok(Deck { cards })
    }

    /// Associated function for building a deck from a given set of cards, no shuffling is done.
    pub fn from_cards(cards: Vec<Card>) -> Deck {
        Deck { cards }
    }

    /// Removes a uniformly random card from the deck and returns it, or `None` if the deck is empty.
    /// The card is removed by rank, so any one of several cards sharing that rank may be taken.
    pub fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        let card = *self.cards.choose(rng)?;
        let idx = self.cards.iter().position(|c| *c == card)?;
        self.cards.remove(idx);
        Some(card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Getter method for the cards currently remaining in the deck.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// A deck paired with the random source used to deal from it. This is what a round is played from.
pub struct Shoe<'a, R: Rng + ?Sized> {
    deck: Deck,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Shoe<'a, R> {
    pub fn new(deck: Deck, rng: &'a mut R) -> Self {
        Shoe { deck, rng }
    }

    /// Getter method for the undealt portion of the deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }
}

impl<'a, R: Rng + ?Sized> CardSource for Shoe<'a, R> {
    fn deal(&mut self) -> Option<Card> {
        self.deck.deal(&mut *self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rank_counts(cards: &[Card]) -> [usize; 14] {
        let mut counts = [0usize; 14];
        for card in cards {
            counts[card.rank() as usize] += 1;
        }
        counts
    }

    #[test]
    fn card_values() {
        assert_eq!(Card::new(0), None);
        assert_eq!(Card::new(14), None);
        assert_eq!(Card::new(1), Some(Card::ACE));
        assert!(Card::ACE.is_ace());
        assert_eq!(Card::new(7).unwrap().value(), 7);
        assert_eq!(Card::new(10).unwrap().value(), 10);
        assert_eq!(Card::new(13).unwrap().value(), 10);
        assert_eq!(format!("{}", Card::new(12).unwrap()), "Q");
        assert_eq!(format!("{}", Card::new(10).unwrap()), "10");
    }

    #[test]
    fn build_contains_each_rank_once_per_deck() {
        let mut rng = StdRng::seed_from_u64(7);
        for num_decks in ALLOWED_NUM_DECKS {
            let deck = Deck::build(num_decks, &mut rng).unwrap();
            assert_eq!(deck.len(), 13 * num_decks);
            let counts = rank_counts(deck.cards());
            assert_eq!(counts[0], 0);
            for rank in 1..=13 {
                assert_eq!(counts[rank], num_decks, "rank {} miscounted", rank);
            }
        }
    }

    #[test]
    fn build_rejects_unsupported_deck_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        for num_decks in [0, 1, 3, 5, 6, 7, 9, 16] {
            match Deck::build(num_decks, &mut rng) {
                Err(SimulationError::InvalidConfiguration(_)) => {}
                other => panic!("expected invalid configuration for {}, got {:?}", num_decks, other),
            }
        }
    }

    #[test]
    fn build_is_reproducible_for_a_seed() {
        let a = Deck::build(4, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Deck::build(4, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn deal_exhausts_deck_then_yields_none() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut deck = Deck::build(2, &mut rng).unwrap();
        let original = rank_counts(deck.cards());
        let size = deck.len();

        let mut dealt = Vec::new();
        for i in 0..size {
            let card = deck.deal(&mut rng).expect("deck ran out early");
            dealt.push(card);
            assert_eq!(deck.len(), size - i - 1);
        }

        assert!(deck.is_empty());
        assert_eq!(deck.deal(&mut rng), None);
        assert!(deck.is_empty());
        assert_eq!(rank_counts(&dealt), original);
    }

    #[test]
    fn shoe_deals_from_its_deck() {
        let mut rng = StdRng::seed_from_u64(11);
        let deck = Deck::from_cards(vec![Card::ACE, Card::ACE]);
        let mut shoe = Shoe::new(deck, &mut rng);
        assert_eq!(shoe.deal(), Some(Card::ACE));
        assert_eq!(shoe.deck().len(), 1);
        assert_eq!(shoe.deal(), Some(Card::ACE));
        assert_eq!(shoe.deal(), None);
    }

    #[test]
    fn stacked_cards_deal_in_order() {
        let mut stacked: VecDeque<Card> = [10, 9, 8].iter().filter_map(|r| Card::new(*r)).collect();
        assert_eq!(stacked.deal().map(|c| c.rank()), Some(10));
        assert_eq!(stacked.deal().map(|c| c.rank()), Some(9));
        assert_eq!(stacked.deal().map(|c| c.rank()), Some(8));
        assert_eq!(stacked.deal(), None);
    }
}
