use serde::{Deserialize, Serialize};

pub const HAND_SIZE: usize = 6;
pub const REVEALED_SLOTS: usize = 3;
pub const UNDERCARD_SLOTS: usize = 3;
/// Cards dealt to each player: starting hand plus undercards.
pub const CARDS_PER_PLAYER: usize = HAND_SIZE + UNDERCARD_SLOTS;
pub const MIN_PLAYERS: usize = 2;
/// Cards of one value that burn the pile when stacked on top of each other.
pub const BURN_RUN: usize = 4;

/// Minimum deck size for a table of `players`.
pub fn cards_needed(players: usize) -> usize {
    players.saturating_mul(CARDS_PER_PLAYER)
}

/// Optional table variations. Defaults match the base game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRules {
    /// Draw from the deck back up to [`HAND_SIZE`] after each applied move.
    pub refill_hand: bool,
}
