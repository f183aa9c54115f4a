//! Move vocabulary submitted by players.

use serde::{Deserialize, Serialize};

use crate::domain::state::{Phase, PlayerId};

/// Every action a player can request. Moves are plain values; only the engine
/// mutates state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Move {
    /// Move hand card `card_index` into revealed slot `target_index`.
    SetRevealedCard {
        card_index: usize,
        target_index: usize,
    },
    /// Return the card in revealed slot `target_index` to the hand.
    UnsetRevealedCard { target_index: usize },
    AcceptSelectedRevealedCards,
    ReselectRevealedCards,
    /// Play hand cards of one value.
    PlaceCard { indices: Vec<usize> },
    /// Spend a Joker to hand the discard pile to `target_player_id`.
    PlaceJoker { target_player_id: PlayerId },
    AcceptDiscardPile,
    RevealUndercard { index: usize },
    /// Pick up revealed cards, or revealed undercards once none remain.
    TakeUndercards { indices: Vec<usize> },
    LeaveGame { player_id: PlayerId },
}

impl Move {
    /// Phases in which this move can be applied.
    pub fn allowed_in(&self, phase: Phase) -> bool {
        match self {
            Move::SetRevealedCard { .. }
            | Move::UnsetRevealedCard { .. }
            | Move::AcceptSelectedRevealedCards
            | Move::ReselectRevealedCards => phase == Phase::Init,
            Move::PlaceCard { .. }
            | Move::PlaceJoker { .. }
            | Move::AcceptDiscardPile
            | Move::RevealUndercard { .. }
            | Move::TakeUndercards { .. } => phase == Phase::GameOn,
            Move::LeaveGame { .. } => phase != Phase::GameOver,
        }
    }

    /// Short name used in logs and metrics.
    pub const fn name(&self) -> &'static str {
        match self {
            Move::SetRevealedCard { .. } => "set_revealed_card",
            Move::UnsetRevealedCard { .. } => "unset_revealed_card",
            Move::AcceptSelectedRevealedCards => "accept_selected_revealed_cards",
            Move::ReselectRevealedCards => "reselect_revealed_cards",
            Move::PlaceCard { .. } => "place_card",
            Move::PlaceJoker { .. } => "place_joker",
            Move::AcceptDiscardPile => "accept_discard_pile",
            Move::RevealUndercard { .. } => "reveal_undercard",
            Move::TakeUndercards { .. } => "take_undercards",
            Move::LeaveGame { .. } => "leave_game",
        }
    }
}
