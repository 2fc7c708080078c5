//! Deck construction, shuffling and dealing.

use super::GameError;
use crate::rng::RandomSource;
use arcade_types::casino::{Card, Rank, Suit, DECK_SIZE};

/// Builds the deck for a new round.
pub type Shoe = fn(&dyn RandomSource) -> Deck;

/// An ordered pile of cards, dealt from the tail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards, suit-major (♠ ♥ ♣ ♦), ranks 2 through ace.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// A short deck that deals `cards` front to back.
    #[cfg(test)]
    pub(crate) fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.iter().rev().copied().collect(),
        }
    }

    /// A standard deck, shuffled.
    pub fn fresh(rng: &dyn RandomSource) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(rng);
        deck
    }

    /// Shuffle in place using Fisher-Yates.
    pub fn shuffle(&mut self, rng: &dyn RandomSource) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.integer_in_range(0, i as u32) as usize;
            self.cards.swap(i, j);
        }
    }

    pub fn deal(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::DeckExhausted)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mocks::ScriptedRandom, rng::GameRng};
    use std::collections::HashSet;

    #[test]
    fn test_standard_deck() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), DECK_SIZE);

        // All cards should be unique
        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);

        assert_eq!(deck.cards()[0], Card::new(Rank::Two, Suit::Spades));
        assert_eq!(deck.cards()[51], Card::new(Rank::Ace, Suit::Diamonds));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        for seed in 0..20 {
            let deck = Deck::fresh(&GameRng::new(seed));
            let mut shuffled: Vec<Card> = deck.cards().to_vec();
            let mut standard: Vec<Card> = Deck::standard().cards().to_vec();
            shuffled.sort_by_key(|card| (card.suit as u8, card.rank));
            standard.sort_by_key(|card| (card.suit as u8, card.rank));
            assert_eq!(shuffled, standard);
        }
    }

    #[test]
    fn test_shuffle_changes_order() {
        let deck = Deck::fresh(&GameRng::new(11));
        assert_ne!(deck, Deck::standard());
    }

    #[test]
    fn test_deal_from_tail() {
        let mut deck = Deck::standard();
        assert_eq!(deck.deal(), Ok(Card::new(Rank::Ace, Suit::Diamonds)));
        assert_eq!(deck.deal(), Ok(Card::new(Rank::King, Suit::Diamonds)));
        assert_eq!(deck.len(), DECK_SIZE - 2);
    }

    #[test]
    fn test_deal_exhausted() {
        let mut deck = Deck::standard();
        for _ in 0..DECK_SIZE {
            deck.deal().unwrap();
        }
        assert!(deck.is_empty());
        assert_eq!(deck.deal(), Err(GameError::DeckExhausted));
    }

    #[test]
    fn test_short_deck_deals_in_order() {
        let mut deck = Deck::from_cards(&[
            Card::new(Rank::Two, Suit::Hearts),
            Card::new(Rank::Nine, Suit::Clubs),
        ]);
        assert_eq!(deck.deal(), Ok(Card::new(Rank::Two, Suit::Hearts)));
        assert_eq!(deck.deal(), Ok(Card::new(Rank::Nine, Suit::Clubs)));
        assert_eq!(deck.deal(), Err(GameError::DeckExhausted));
    }

    #[test]
    fn test_stacked_shuffle_deals_requested_order() {
        let order = [
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Hearts),
            Card::new(Rank::Two, Suit::Clubs),
        ];
        let rng = ScriptedRandom::new().then_stacked_deck(&order);
        let mut deck = Deck::fresh(&rng);
        for card in order {
            assert_eq!(deck.deal(), Ok(card));
        }
    }
}
