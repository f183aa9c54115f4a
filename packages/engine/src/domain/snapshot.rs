//! Public snapshot API for observing table state without exposing internals.
//!
//! Everyone sees counts, revealed cards, face-up undercards and the discard
//! pile. A viewer additionally sees their own hand and the values of their own
//! undercards.

use serde::{Deserialize, Serialize};

use crate::domain::player::PlayerState;
use crate::domain::rules::{REVEALED_SLOTS, UNDERCARD_SLOTS};
use crate::domain::state::{GameState, Phase, PlayerId, RecordedMove};
use crate::domain::turn_order::Direction;
use crate::domain::Card;

/// What others can see of one undercard slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "card", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UndercardPublic {
    Empty,
    Hidden,
    Revealed(Card),
}

/// Public info about a single seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPublic {
    pub id: PlayerId,
    pub hand_count: usize,
    pub revealed: [Option<Card>; REVEALED_SLOTS],
    pub undercards: [UndercardPublic; UNDERCARD_SLOTS],
    pub accepted: bool,
    pub left: bool,
    pub won: bool,
    /// 1-based finishing place for winners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<usize>,
}

/// Cards only the viewer may see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateView {
    pub id: PlayerId,
    pub hand: Vec<Card>,
    pub undercards: [Option<Card>; UNDERCARD_SLOTS],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub phase: Phase,
    pub deck_size: usize,
    /// Top card first.
    pub discard: Vec<Card>,
    pub burned_count: usize,
    pub current: PlayerId,
    pub direction: Direction,
    pub active: Vec<PlayerId>,
    pub finished: Vec<PlayerId>,
    pub seats: Vec<SeatPublic>,
    pub last_played_move: Option<RecordedMove>,
    /// Present when the snapshot is taken for a seated player.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<PrivateView>,
}

fn seat_public(state: &GameState, player: &PlayerState) -> SeatPublic {
    SeatPublic {
        id: player.id,
        hand_count: player.hand.len(),
        revealed: player.revealed,
        undercards: player.undercards.map(|slot| match slot {
            None => UndercardPublic::Empty,
            Some(u) if u.revealed => UndercardPublic::Revealed(u.card),
            Some(_) => UndercardPublic::Hidden,
        }),
        accepted: player.revealed_accepted,
        left: player.left_game,
        won: player.has_won(),
        place: state
            .finished
            .iter()
            .position(|&id| id == player.id)
            .map(|pos| pos + 1),
    }
}

/// Produce a snapshot as seen by `viewer`. `None`, or an id outside the
/// table, yields the spectator view.
pub fn snapshot_for(state: &GameState, viewer: Option<PlayerId>) -> TableSnapshot {
    let viewer = viewer.and_then(|id| state.player(id)).map(|p| PrivateView {
        id: p.id,
        hand: p.hand.clone(),
        undercards: p.undercards.map(|slot| slot.map(|u| u.card)),
    });

    TableSnapshot {
        phase: state.phase,
        deck_size: state.deck.len(),
        discard: state.discard.iter().copied().collect(),
        burned_count: state.burned.len(),
        current: state.turns.current(),
        direction: state.turns.direction(),
        active: state.turns.active_players().to_vec(),
        finished: state.finished.clone(),
        seats: state
            .players
            .iter()
            .map(|p| seat_public(state, p))
            .collect(),
        last_played_move: state.last_played_move.clone(),
        viewer,
    }
}
