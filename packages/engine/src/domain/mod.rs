//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod engine;
pub mod legal;
pub mod moves;
pub mod player;
pub mod rules;
pub mod snapshot;
pub mod state;
pub mod turn_order;

mod play;
mod setup;

#[cfg(test)]
mod tests_engine;
#[cfg(test)]
mod tests_snapshot;

// Re-exports for ergonomics
pub use cards_logic::{can_place_on, compare_values};
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, CardValue, Color, Rank, Suit};
pub use deck::{Deck, DiscardPile};
pub use legal::legal_moves;
pub use moves::Move;
pub use player::{PlayerState, Undercard};
pub use snapshot::{snapshot_for, TableSnapshot};
pub use state::{GameState, Phase, PlayerId};
pub use turn_order::{Direction, TurnOrder};
