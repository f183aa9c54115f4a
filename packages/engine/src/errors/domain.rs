//! Domain-level error types.
//!
//! Two tiers are kept apart:
//! - [`SetupError`] is returned while building a table (bad player counts,
//!   short decks, malformed config). Nothing is constructed when it fires.
//! - [`DomainError`] is returned while validating or applying a move. A
//!   rejected move is an ordinary outcome and never mutates state.

use thiserror::Error;

use crate::domain::turn_order::TurnError;

/// Why a move (or a card token) was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Move is not allowed in the current phase.
    PhaseMismatch,
    /// Mover id is outside the roster.
    UnknownPlayer,
    /// Mover has left the game.
    PlayerLeft,
    /// Mover has already shed every card.
    PlayerFinished,
    /// Move requires the mover's turn.
    OutOfTurn,
    /// Revealed cards are already accepted.
    AlreadyAccepted,
    /// Revealed cards have not been accepted yet.
    NotAccepted,
    /// Fewer than three revealed cards are set.
    RevealedIncomplete,
    /// Target slot already holds a card.
    SlotOccupied,
    /// Addressed slot is empty.
    SlotEmpty,
    /// Index does not address a card or slot.
    InvalidIndex,
    /// The same index appears twice.
    DuplicateIndex,
    /// No cards were selected.
    EmptySelection,
    /// Selected cards do not share one value.
    MixedValues,
    /// Jokers are played with `PlaceJoker`, not `PlaceCard`.
    JokerNotPlaceable,
    /// Value cannot be placed on the current effective top.
    RankTooLow,
    /// No Joker available in the playable source.
    NoJoker,
    /// Target player is not in the rotation.
    InactiveTarget,
    /// Hand or revealed cards must be played first.
    CardsRemaining,
    /// Undercard is already face up.
    AlreadyRevealed,
    /// Undercard must be revealed before it is taken.
    NotRevealed,
    /// The last active player cannot leave the rotation.
    LastPlayer,
    /// Card token could not be parsed.
    ParseCard,
}

/// Central error type for move validation and card parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Rule violation or malformed input.
    #[error("validation error ({0:?}): {1}")]
    Validation(ValidationKind, String),
    /// Scheduler misuse escaping the engine.
    #[error("turn order: {0}")]
    Turn(#[from] TurnError),
    /// Internal bookkeeping no longer holds.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    /// Validation kind, if this is a rule violation.
    pub fn kind(&self) -> Option<ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(*kind),
            _ => None,
        }
    }
}

/// Construction and configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("player count must be at least {min}, got {got}")]
    InvalidPlayerCount { min: usize, got: usize },
    #[error("deck has {available} cards but {needed} are needed")]
    InsufficientCards { needed: usize, available: usize },
    #[error("first player {first} is outside a table of {players}")]
    InvalidFirstPlayer { first: usize, players: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
