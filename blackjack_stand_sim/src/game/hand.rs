use crate::game::deck::Card;
use std::fmt::Display;

/// Highest total a hand can have without busting.
pub const BLACKJACK: u32 = 21;

/// Computes the best total for `cards`. Every card counts `min(rank, 10)` with Aces as 1, then a
/// single Ace is raised to 11 if that keeps the total at or below 21. Two Aces can never both count
/// 11, so this is the highest total that does not bust. The result is over 21 only when the hand
/// busts even with every Ace counted as 1.
pub fn score(cards: &[Card]) -> u32 {
    let total: u32 = cards.iter().map(|c| c.value() as u32).sum();
    let has_ace = cards.iter().any(|c| c.is_ace());

    if has_ace && total + 10 <= BLACKJACK {
        total + 10
    } else {
        total
    }
}

/// The ordered cards dealt to a single participant during one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    /// Method for receiving a card, the card is appended to the end of the hand.
    pub fn receive_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The first card dealt to the hand, for the dealer this is the card checked for insurance.
    pub fn first_card(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    pub fn score(&self) -> u32 {
        score(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.score() > BLACKJACK
    }

    /// Formats the hand with its first card hidden, the way the dealer's hand is shown during the deal.
    pub fn formatted_with_hole_card(&self) -> String {
        let shown = self
            .cards
            .iter()
            .skip(1)
            .map(|c| c.to_string())
            .collect::<Vec<String>>();
        if self.cards.is_empty() {
            "[]".to_string()
        } else if shown.is_empty() {
            "[X]".to_string()
        } else {
            format!("[X, {}]", shown.join(", "))
        }
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "[{}]", cards)
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand {
            cards: iter.into_iter().collect(),
        }
    }
}
