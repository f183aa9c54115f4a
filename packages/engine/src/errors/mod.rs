//! Error handling for the Shithead engine.

pub mod domain;

pub use domain::{DomainError, SetupError, ValidationKind};
pub use crate::domain::turn_order::TurnError;
