//! Init-phase moves: arranging and accepting revealed cards.

use crate::domain::engine::Action;
use crate::domain::player::PlayerState;
use crate::domain::rules::REVEALED_SLOTS;
use crate::domain::state::{GameState, PlayerId};
use crate::errors::domain::{DomainError, ValidationKind};

fn ensure_not_accepted(player: &PlayerState) -> Result<(), DomainError> {
    if player.revealed_accepted {
        return Err(DomainError::validation(
            ValidationKind::AlreadyAccepted,
            "Revealed cards already accepted",
        ));
    }
    Ok(())
}

fn ensure_slot(slot: usize) -> Result<(), DomainError> {
    if slot >= REVEALED_SLOTS {
        return Err(DomainError::validation(
            ValidationKind::InvalidIndex,
            format!("Revealed slot {slot} out of range"),
        ));
    }
    Ok(())
}

pub(crate) fn set_revealed(
    player: &PlayerState,
    card_index: usize,
    target_index: usize,
) -> Result<Action, DomainError> {
    ensure_not_accepted(player)?;
    ensure_slot(target_index)?;
    if player.revealed[target_index].is_some() {
        return Err(DomainError::validation(
            ValidationKind::SlotOccupied,
            format!("Revealed slot {target_index} already set"),
        ));
    }
    if card_index >= player.hand.len() {
        return Err(DomainError::validation(
            ValidationKind::InvalidIndex,
            format!("No hand card at index {card_index}"),
        ));
    }
    Ok(Action::SetRevealed {
        card_index,
        slot: target_index,
    })
}

pub(crate) fn unset_revealed(
    player: &PlayerState,
    target_index: usize,
) -> Result<Action, DomainError> {
    ensure_not_accepted(player)?;
    ensure_slot(target_index)?;
    if player.revealed[target_index].is_none() {
        return Err(DomainError::validation(
            ValidationKind::SlotEmpty,
            format!("Revealed slot {target_index} is empty"),
        ));
    }
    Ok(Action::UnsetRevealed { slot: target_index })
}

pub(crate) fn accept(player: &PlayerState) -> Result<Action, DomainError> {
    ensure_not_accepted(player)?;
    if player.revealed_count() != REVEALED_SLOTS {
        return Err(DomainError::validation(
            ValidationKind::RevealedIncomplete,
            format!(
                "{} of {REVEALED_SLOTS} revealed cards set",
                player.revealed_count()
            ),
        ));
    }
    Ok(Action::Accept)
}

pub(crate) fn reselect(player: &PlayerState) -> Result<Action, DomainError> {
    if !player.revealed_accepted {
        return Err(DomainError::validation(
            ValidationKind::NotAccepted,
            "Revealed cards not accepted yet",
        ));
    }
    Ok(Action::Reselect)
}

/// Indices were checked when the action was resolved.
pub(crate) fn apply(
    state: &mut GameState,
    action: Action,
    who: PlayerId,
) -> Result<(), DomainError> {
    let player = state
        .players
        .get_mut(who)
        .ok_or_else(|| DomainError::invariant(format!("player {who} vanished")))?;
    match action {
        Action::SetRevealed { card_index, slot } => {
            let card = player.hand.remove(card_index);
            player.revealed[slot] = Some(card);
        }
        Action::UnsetRevealed { slot } => {
            if let Some(card) = player.revealed[slot].take() {
                player.hand.push(card);
            }
        }
        Action::Accept => player.revealed_accepted = true,
        Action::Reselect => player.revealed_accepted = false,
        other => {
            return Err(DomainError::invariant(format!(
                "{other:?} is not a setup action"
            )))
        }
    }
    Ok(())
}
