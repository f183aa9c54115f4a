//! Per-player card holdings.

use serde::{Deserialize, Serialize};

use crate::domain::rules::{REVEALED_SLOTS, UNDERCARD_SLOTS};
use crate::domain::state::PlayerId;
use crate::domain::Card;

/// A face-down card dealt at setup. `revealed` flips once and stays set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Undercard {
    pub card: Card,
    pub revealed: bool,
}

impl Undercard {
    pub const fn hidden(card: Card) -> Self {
        Self {
            card,
            revealed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Stable seat id, never reused.
    pub id: PlayerId,
    /// Index-addressable; order is irrelevant to the rules.
    pub hand: Vec<Card>,
    /// Face-up cards chosen during setup.
    pub revealed: [Option<Card>; REVEALED_SLOTS],
    /// Slots are vacated as cards are taken, never resized.
    pub undercards: [Option<Undercard>; UNDERCARD_SLOTS],
    pub revealed_accepted: bool,
    pub left_game: bool,
}

impl PlayerState {
    pub fn new(id: PlayerId, hand: Vec<Card>, undercards: [Card; UNDERCARD_SLOTS]) -> Self {
        Self {
            id,
            hand,
            revealed: [None; REVEALED_SLOTS],
            undercards: undercards.map(|c| Some(Undercard::hidden(c))),
            revealed_accepted: false,
            left_game: false,
        }
    }

    /// A player wins by shedding every card without having left.
    pub fn has_won(&self) -> bool {
        !self.left_game && self.hand.is_empty() && !self.has_revealed() && !self.has_undercards()
    }

    /// Still competing: neither won nor left.
    pub fn is_contender(&self) -> bool {
        !self.left_game && !self.has_won()
    }

    pub fn has_revealed(&self) -> bool {
        self.revealed.iter().any(Option::is_some)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().flatten().count()
    }

    pub fn has_undercards(&self) -> bool {
        self.undercards.iter().any(Option::is_some)
    }

    pub fn has_revealed_undercards(&self) -> bool {
        self.undercards.iter().flatten().any(|u| u.revealed)
    }

    /// Every card this player holds, in any zone.
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.revealed_count() + self.undercards.iter().flatten().count()
    }
}
