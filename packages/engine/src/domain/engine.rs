//! Move validation and application.
//!
//! Every move goes through two steps. Validation inspects the state and
//! resolves the move into an [`Action`] with all indices and effects decided;
//! it never mutates. Application then performs the action and settles the
//! table: optional refill, winners, phase changes. A rejected move leaves the
//! state untouched apart from `last_move`.

use tracing::{debug, info};

use crate::domain::moves::Move;
use crate::domain::play::{self, Applied};
use crate::domain::setup;
use crate::domain::state::{GameState, Phase, PlayerId, RecordedMove};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of an applied move, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The discard pile was burned.
    pub burned: bool,
    /// Extra turn steps from Eights.
    pub skipped: usize,
    /// Whose turn it is after the move.
    pub turn_after: PlayerId,
    /// Phase transitioned to, if any.
    pub phase_transitioned: Option<Phase>,
    /// Player who shed their last card with this move.
    pub finished: Option<PlayerId>,
}

/// Where a Joker is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JokerSource {
    Hand(usize),
    Revealed(usize),
    Undercard(usize),
}

/// Which face-up zone `TakeUndercards` draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TakeSource {
    Revealed,
    Undercards,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Placement {
    /// Hand indices, highest first.
    pub indices: Vec<usize>,
    pub burns: bool,
    pub eights: usize,
}

/// A validated move, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    SetRevealed { card_index: usize, slot: usize },
    UnsetRevealed { slot: usize },
    Accept,
    Reselect,
    Place(Placement),
    Joker { source: JokerSource, target: PlayerId },
    TakePile,
    Reveal { slot: usize },
    Take { source: TakeSource, slots: Vec<usize> },
    Leave { target: PlayerId },
}

impl Action {
    fn is_setup(&self) -> bool {
        matches!(
            self,
            Action::SetRevealed { .. }
                | Action::UnsetRevealed { .. }
                | Action::Accept
                | Action::Reselect
        )
    }
}

impl GameState {
    /// Whether `player` may submit `mv` right now. Never mutates.
    pub fn is_valid_move(&self, mv: &Move, player: PlayerId) -> bool {
        self.resolve(mv, player).is_ok()
    }

    /// Like [`GameState::is_valid_move`], with the rejection reason.
    pub fn validate_move(&self, mv: &Move, player: PlayerId) -> Result<(), DomainError> {
        self.resolve(mv, player).map(|_| ())
    }

    /// Applies `mv` if it is valid. Returns whether it was applied.
    pub fn play_move(&mut self, mv: Move, player: PlayerId) -> bool {
        self.try_play_move(mv, player).is_ok()
    }

    /// Applies `mv` if it is valid and reports what changed.
    pub fn try_play_move(
        &mut self,
        mv: Move,
        player: PlayerId,
    ) -> Result<MoveOutcome, DomainError> {
        self.last_move = Some(RecordedMove {
            player,
            mv: mv.clone(),
        });

        let action = match self.resolve(&mv, player) {
            Ok(action) => action,
            Err(err) => {
                debug!(
                    player,
                    mv = mv.name(),
                    kind = ?err.kind(),
                    error = %err,
                    "move rejected"
                );
                return Err(err);
            }
        };

        let applied = if action.is_setup() {
            setup::apply(self, action, player)?;
            Applied::default()
        } else {
            play::apply(self, action, player)?
        };
        debug!(player, mv = mv.name(), "move applied");
        self.last_played_move = Some(RecordedMove { player, mv });

        self.settle(player, applied)
    }

    fn resolve(&self, mv: &Move, player: PlayerId) -> Result<Action, DomainError> {
        let mover = self.player(player).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("No player {player} at this table"),
            )
        })?;
        if mover.left_game {
            return Err(DomainError::validation(
                ValidationKind::PlayerLeft,
                format!("Player {player} left the game"),
            ));
        }
        if !mv.allowed_in(self.phase) {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("{} is not allowed in {:?}", mv.name(), self.phase),
            ));
        }
        if !self.turns.is_active(player) {
            return Err(DomainError::validation(
                ValidationKind::PlayerFinished,
                format!("Player {player} already finished"),
            ));
        }

        match mv {
            Move::SetRevealedCard {
                card_index,
                target_index,
            } => setup::set_revealed(mover, *card_index, *target_index),
            Move::UnsetRevealedCard { target_index } => setup::unset_revealed(mover, *target_index),
            Move::AcceptSelectedRevealedCards => setup::accept(mover),
            Move::ReselectRevealedCards => setup::reselect(mover),
            Move::PlaceCard { indices } => play::place_card(self, mover, indices),
            Move::PlaceJoker { target_player_id } => {
                play::place_joker(self, mover, *target_player_id)
            }
            Move::AcceptDiscardPile => play::accept_pile(self, mover),
            Move::RevealUndercard { index } => play::reveal_undercard(self, mover, *index),
            Move::TakeUndercards { indices } => play::take_undercards(mover, indices),
            Move::LeaveGame { player_id } => play::leave_game(self, *player_id),
        }
    }

    /// Post-move bookkeeping, in order: refill, record winners, start the
    /// game, then end it or retire the winners from the rotation.
    fn settle(&mut self, mover: PlayerId, applied: Applied) -> Result<MoveOutcome, DomainError> {
        let phase_before = self.phase;

        if self.rules.refill_hand && self.phase == Phase::GameOn {
            let drawn = play::refill_hand(self, mover)?;
            if drawn > 0 {
                debug!(player = mover, drawn, "hand refilled");
            }
        }

        let newly_finished: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.has_won() && !self.finished.contains(&p.id))
            .map(|p| p.id)
            .collect();
        for &id in &newly_finished {
            self.finished.push(id);
            info!(player = id, place = self.finished.len(), "player finished");
        }

        if self.phase == Phase::Init
            && self
                .players
                .iter()
                .filter(|p| !p.left_game)
                .all(|p| p.revealed_accepted)
        {
            self.phase = Phase::GameOn;
            info!(first = self.turns.current(), "game started");
        }

        if self.phase == Phase::GameOn {
            if self.contenders().count() <= 1 {
                self.phase = Phase::GameOver;
                info!(loser = ?self.loser(), "game over");
            } else {
                for &id in &newly_finished {
                    if self.turns.is_active(id) {
                        self.turns.remove_player(id)?;
                    }
                }
            }
        }

        Ok(MoveOutcome {
            burned: applied.burned,
            skipped: applied.skipped,
            turn_after: self.turns.current(),
            phase_transitioned: (self.phase != phase_before).then_some(self.phase),
            finished: newly_finished.first().copied(),
        })
    }
}
