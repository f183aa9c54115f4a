//! Circular turn scheduler.
//!
//! Tracks whose turn it is over a ring of player ids that can shrink. Ids are
//! never renumbered: a table created for `n` players keeps ids `0..n` for its
//! whole life, and removed ids simply drop out of the ring. Every operation
//! either succeeds or leaves the scheduler untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::state::PlayerId;

/// Rotation direction. `Up` walks ids in ascending ring order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    #[default]
    Up,
    Down,
}

impl Direction {
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Scheduler misuse. These never describe a player mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("player {0} is outside the table")]
    UnknownPlayer(PlayerId),
    #[error("player {0} is not in the rotation")]
    Inactive(PlayerId),
    #[error("player {0} is the last one in the rotation")]
    LastPlayer(PlayerId),
    #[error("a table needs at least one player")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    initial_player_count: usize,
    active: Vec<PlayerId>,
    current: PlayerId,
    direction: Direction,
}

impl TurnOrder {
    pub fn new(
        player_count: usize,
        first: PlayerId,
        direction: Direction,
    ) -> Result<Self, TurnError> {
        if player_count == 0 {
            return Err(TurnError::Empty);
        }
        if first >= player_count {
            return Err(TurnError::UnknownPlayer(first));
        }
        Ok(Self {
            initial_player_count: player_count,
            active: (0..player_count).collect(),
            current: first,
            direction,
        })
    }

    pub fn initial_player_count(&self) -> usize {
        self.initial_player_count
    }

    pub fn current(&self) -> PlayerId {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Active ids in ring order.
    pub fn active_players(&self) -> &[PlayerId] {
        &self.active
    }

    pub fn is_active(&self, id: PlayerId) -> bool {
        self.position(id).is_some()
    }

    /// Player one step after `current` in the current direction.
    pub fn next(&self) -> PlayerId {
        self.peek(1, self.direction)
    }

    /// Player one step before `current` in the current direction.
    pub fn previous(&self) -> PlayerId {
        self.peek(1, self.direction.reversed())
    }

    /// Optionally sets the direction, then advances `steps` ring positions.
    pub fn jump(&mut self, steps: usize, direction: Option<Direction>) -> PlayerId {
        if let Some(direction) = direction {
            self.direction = direction;
        }
        self.current = self.peek(steps, self.direction);
        self.current
    }

    /// Redirects the turn to `explicit_next`, or advances one step.
    pub fn move_next(&mut self, explicit_next: Option<PlayerId>) -> Result<PlayerId, TurnError> {
        match explicit_next {
            Some(id) => {
                self.set_current(id)?;
                Ok(id)
            }
            None => Ok(self.jump(1, None)),
        }
    }

    pub fn switch_direction(&mut self) {
        self.direction = self.direction.reversed();
    }

    pub fn set_current(&mut self, id: PlayerId) -> Result<(), TurnError> {
        self.check_active(id)?;
        self.current = id;
        Ok(())
    }

    /// Permanently removes `id` from the ring.
    ///
    /// When `id` is current, the turn passes to whoever follows the removed
    /// seat in the current direction.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), TurnError> {
        let pos = self.check_active(id)?;
        if self.active.len() == 1 {
            return Err(TurnError::LastPlayer(id));
        }
        self.active.remove(pos);
        if self.current == id {
            let len = self.active.len();
            let next_pos = match self.direction {
                Direction::Up => pos % len,
                Direction::Down => (pos + len - 1) % len,
            };
            self.current = self.active[next_pos];
        }
        Ok(())
    }

    fn position(&self, id: PlayerId) -> Option<usize> {
        self.active.iter().position(|&p| p == id)
    }

    fn check_active(&self, id: PlayerId) -> Result<usize, TurnError> {
        if id >= self.initial_player_count {
            return Err(TurnError::UnknownPlayer(id));
        }
        self.position(id).ok_or(TurnError::Inactive(id))
    }

    fn peek(&self, steps: usize, direction: Direction) -> PlayerId {
        let len = self.active.len();
        // `current` is always in the ring; fall back to slot 0 only if that breaks.
        let pos = self.position(self.current).unwrap_or(0);
        let steps = steps % len;
        let next_pos = match direction {
            Direction::Up => (pos + steps) % len,
            Direction::Down => (pos + len - steps) % len,
        };
        self.active[next_pos]
    }
}
