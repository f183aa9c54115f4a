#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;


// Re-exports for public API
pub use config::GameConfig;
pub use domain::engine::MoveOutcome;
pub use domain::moves::Move;
pub use domain::state::{GameState, Phase, PlayerId};
pub use domain::turn_order::{Direction, TurnOrder};
pub use domain::{Card, CardValue, Color, Rank, Suit};
pub use errors::{DomainError, SetupError, TurnError, ValidationKind};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
