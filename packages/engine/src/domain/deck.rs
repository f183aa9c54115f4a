//! Draw deck, discard pile and deterministic deck construction.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::cards_logic::{effective_top, matching_run};
use crate::domain::{Card, CardValue, Color, Rank, Suit};

/// Ordered stack of cards. The last element is the top.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds a deck from cards listed bottom to top.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// 52 standard cards in suit/rank order followed by `jokers` Jokers
    /// alternating red and black.
    pub fn standard(jokers: usize) -> Self {
        let mut cards = Vec::with_capacity(52 + jokers);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        for i in 0..jokers {
            let color = if i % 2 == 0 { Color::Red } else { Color::Black };
            cards.push(Card::joker(color));
        }
        Self { cards }
    }

    /// Standard deck shuffled with a seeded ChaCha RNG.
    pub fn shuffled(jokers: usize, seed: u64) -> Self {
        let mut deck = Self::standard(jokers);
        deck.shuffle(seed);
        deck
    }

    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn peek(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterates from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().rev()
    }

    /// Removes every card, returned bottom to top.
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }
}

/// The shared pile cards are played onto.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pile from cards listed bottom to top.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn peek(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterates from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().rev()
    }

    /// First non-Three card from the top; `None` means no rank constraint.
    pub fn effective_top(&self) -> Option<Card> {
        effective_top(&self.cards)
    }

    /// How many cards of `value` sit consecutively on top.
    pub fn matching_run(&self, value: CardValue) -> usize {
        matching_run(&self.cards, value)
    }

    /// Empties the pile, returning its cards bottom to top.
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }
}
