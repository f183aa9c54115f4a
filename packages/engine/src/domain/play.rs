//! GameOn-phase moves and leaving the table.

use tracing::info;

use crate::domain::cards_logic::can_place_on;
use crate::domain::engine::{Action, JokerSource, Placement, TakeSource};
use crate::domain::player::PlayerState;
use crate::domain::rules::{BURN_RUN, HAND_SIZE, UNDERCARD_SLOTS};
use crate::domain::state::{GameState, PlayerId};
use crate::domain::{Card, CardValue, Rank};
use crate::errors::domain::{DomainError, ValidationKind};

/// Effects of an applied action that the caller reports back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Applied {
    pub burned: bool,
    pub skipped: usize,
}

fn ensure_turn(state: &GameState, who: PlayerId) -> Result<(), DomainError> {
    if state.turns.current() != who {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Out of turn",
        ));
    }
    Ok(())
}

/// Checks a selection of indices into `len` positions: non-empty, in range,
/// no repeats.
fn check_selection(indices: &[usize], len: usize) -> Result<(), DomainError> {
    if indices.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptySelection,
            "No cards selected",
        ));
    }
    for (i, &idx) in indices.iter().enumerate() {
        if idx >= len {
            return Err(DomainError::validation(
                ValidationKind::InvalidIndex,
                format!("Index {idx} out of range"),
            ));
        }
        if indices[..i].contains(&idx) {
            return Err(DomainError::validation(
                ValidationKind::DuplicateIndex,
                format!("Index {idx} selected twice"),
            ));
        }
    }
    Ok(())
}

fn common_value<I>(cards: I) -> Result<CardValue, DomainError>
where
    I: IntoIterator<Item = Card>,
{
    let mut iter = cards.into_iter();
    let first = iter
        .next()
        .ok_or_else(|| DomainError::validation(ValidationKind::EmptySelection, "No cards"))?;
    let value = first.value();
    if iter.any(|c| c.value() != value) {
        return Err(DomainError::validation(
            ValidationKind::MixedValues,
            "Selected cards differ in value",
        ));
    }
    Ok(value)
}

/// Indices sorted high to low so removals do not shift later positions.
fn removal_order(indices: &[usize]) -> Vec<usize> {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
}

pub(crate) fn place_card(
    state: &GameState,
    player: &PlayerState,
    indices: &[usize],
) -> Result<Action, DomainError> {
    check_selection(indices, player.hand.len())?;
    let value = common_value(indices.iter().map(|&i| player.hand[i]))?;
    if value == CardValue::Joker {
        return Err(DomainError::validation(
            ValidationKind::JokerNotPlaceable,
            "Jokers are played with PlaceJoker",
        ));
    }

    let stacked = state.discard.matching_run(value) + indices.len();
    // Completing four of a kind may interrupt out of turn, whatever the top.
    if stacked != BURN_RUN {
        ensure_turn(state, player.id)?;
        let top = state.discard.effective_top().map(|c| c.value());
        if !can_place_on(value, top) {
            return Err(DomainError::validation(
                ValidationKind::RankTooLow,
                format!("{value:?} cannot be placed on {top:?}"),
            ));
        }
    }

    let burns = stacked >= BURN_RUN || value == CardValue::Rank(Rank::Ten);
    let eights = if !burns && value == CardValue::Rank(Rank::Eight) {
        indices.len()
    } else {
        0
    };
    Ok(Action::Place(Placement {
        indices: removal_order(indices),
        burns,
        eights,
    }))
}

fn joker_source(player: &PlayerState) -> Result<JokerSource, DomainError> {
    let no_joker = |zone: &str| {
        DomainError::validation(ValidationKind::NoJoker, format!("No Joker in {zone}"))
    };
    if !player.hand.is_empty() {
        return player
            .hand
            .iter()
            .position(Card::is_joker)
            .map(JokerSource::Hand)
            .ok_or_else(|| no_joker("hand"));
    }
    if player.has_revealed() {
        return player
            .revealed
            .iter()
            .position(|slot| slot.is_some_and(|c| c.is_joker()))
            .map(JokerSource::Revealed)
            .ok_or_else(|| no_joker("revealed cards"));
    }
    player
        .undercards
        .iter()
        .position(|slot| slot.is_some_and(|u| u.revealed && u.card.is_joker()))
        .map(JokerSource::Undercard)
        .ok_or_else(|| no_joker("revealed undercards"))
}

pub(crate) fn place_joker(
    state: &GameState,
    player: &PlayerState,
    target: PlayerId,
) -> Result<Action, DomainError> {
    if !state.turns.is_active(target) {
        return Err(DomainError::validation(
            ValidationKind::InactiveTarget,
            format!("Player {target} is not in the rotation"),
        ));
    }
    let source = joker_source(player)?;
    Ok(Action::Joker { source, target })
}

pub(crate) fn accept_pile(state: &GameState, player: &PlayerState) -> Result<Action, DomainError> {
    ensure_turn(state, player.id)?;
    Ok(Action::TakePile)
}

pub(crate) fn reveal_undercard(
    state: &GameState,
    player: &PlayerState,
    index: usize,
) -> Result<Action, DomainError> {
    ensure_turn(state, player.id)?;
    if !player.hand.is_empty() || player.has_revealed() {
        return Err(DomainError::validation(
            ValidationKind::CardsRemaining,
            "Hand and revealed cards must be played first",
        ));
    }
    let slot = player.undercards.get(index).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidIndex,
            format!("Undercard slot {index} out of range"),
        )
    })?;
    match slot {
        None => Err(DomainError::validation(
            ValidationKind::SlotEmpty,
            format!("Undercard slot {index} is empty"),
        )),
        Some(u) if u.revealed => Err(DomainError::validation(
            ValidationKind::AlreadyRevealed,
            format!("Undercard {index} is already face up"),
        )),
        Some(_) => Ok(Action::Reveal { slot: index }),
    }
}

/// Revealed cards are taken while any remain, then revealed undercards.
pub(crate) fn take_undercards(
    player: &PlayerState,
    indices: &[usize],
) -> Result<Action, DomainError> {
    let source = if player.has_revealed() {
        TakeSource::Revealed
    } else {
        TakeSource::Undercards
    };
    check_selection(indices, UNDERCARD_SLOTS)?;

    let mut cards = Vec::with_capacity(indices.len());
    for &idx in indices {
        let card = match source {
            TakeSource::Revealed => player.revealed[idx],
            TakeSource::Undercards => match player.undercards[idx] {
                Some(u) if !u.revealed => {
                    return Err(DomainError::validation(
                        ValidationKind::NotRevealed,
                        format!("Undercard {idx} must be revealed first"),
                    ))
                }
                other => other.map(|u| u.card),
            },
        };
        let card = card.ok_or_else(|| {
            DomainError::validation(ValidationKind::SlotEmpty, format!("Slot {idx} is empty"))
        })?;
        cards.push(card);
    }
    common_value(cards)?;
    Ok(Action::Take {
        source,
        slots: indices.to_vec(),
    })
}

pub(crate) fn leave_game(state: &GameState, target: PlayerId) -> Result<Action, DomainError> {
    let leaver = state.player(target).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::UnknownPlayer,
            format!("No player {target} at this table"),
        )
    })?;
    if leaver.left_game {
        return Err(DomainError::validation(
            ValidationKind::PlayerLeft,
            format!("Player {target} already left"),
        ));
    }
    if !state.turns.is_active(target) {
        return Err(DomainError::validation(
            ValidationKind::InactiveTarget,
            format!("Player {target} is not in the rotation"),
        ));
    }
    if state.turns.active_players().len() == 1 {
        return Err(DomainError::validation(
            ValidationKind::LastPlayer,
            "The last active player cannot leave",
        ));
    }
    Ok(Action::Leave { target })
}

fn player_mut(state: &mut GameState, id: PlayerId) -> Result<&mut PlayerState, DomainError> {
    state
        .players
        .get_mut(id)
        .ok_or_else(|| DomainError::invariant(format!("player {id} vanished")))
}

/// Applies a resolved action. Scheduler calls run before any card moves, so
/// an error here leaves the cards untouched.
pub(crate) fn apply(
    state: &mut GameState,
    action: Action,
    who: PlayerId,
) -> Result<Applied, DomainError> {
    match action {
        Action::Place(placement) => apply_placement(state, placement, who),
        Action::Joker { source, target } => {
            state.turns.move_next(Some(target))?;
            let player = player_mut(state, who)?;
            let joker = match source {
                JokerSource::Hand(idx) => Some(player.hand.remove(idx)),
                JokerSource::Revealed(slot) => player.revealed[slot].take(),
                JokerSource::Undercard(slot) => player.undercards[slot].take().map(|u| u.card),
            }
            .ok_or_else(|| DomainError::invariant("Joker source emptied"))?;
            state.burned.push(joker);
            let pile = state.discard.take_all();
            let picked_up = pile.len();
            player_mut(state, target)?.hand.extend(pile);
            info!(player = who, to = target, picked_up, "joker played");
            Ok(Applied::default())
        }
        Action::TakePile => {
            state.turns.jump(1, None);
            let pile = state.discard.take_all();
            player_mut(state, who)?.hand.extend(pile);
            Ok(Applied::default())
        }
        Action::Reveal { slot } => {
            if let Some(under) = player_mut(state, who)?.undercards[slot].as_mut() {
                under.revealed = true;
            }
            Ok(Applied::default())
        }
        Action::Take { source, slots } => {
            let player = player_mut(state, who)?;
            for slot in slots {
                let card = match source {
                    TakeSource::Revealed => player.revealed[slot].take(),
                    TakeSource::Undercards => player.undercards[slot].take().map(|u| u.card),
                };
                player.hand.extend(card);
            }
            Ok(Applied::default())
        }
        Action::Leave { target } => {
            state.turns.remove_player(target)?;
            player_mut(state, target)?.left_game = true;
            info!(
                player = target,
                by = who,
                current = state.turns.current(),
                "player left"
            );
            Ok(Applied::default())
        }
        other => Err(DomainError::invariant(format!(
            "{other:?} is not a play action"
        ))),
    }
}

fn apply_placement(
    state: &mut GameState,
    placement: Placement,
    who: PlayerId,
) -> Result<Applied, DomainError> {
    if !placement.burns {
        state.turns.jump(1 + placement.eights, None);
    }
    let player = player_mut(state, who)?;
    let mut placed: Vec<Card> = placement
        .indices
        .iter()
        .map(|&idx| player.hand.remove(idx))
        .collect();
    placed.reverse();
    for card in placed {
        state.discard.push(card);
    }
    if placement.burns {
        let pile = state.discard.take_all();
        info!(player = who, cards = pile.len(), "pile burned");
        state.burned.extend(pile);
    }
    Ok(Applied {
        burned: placement.burns,
        skipped: placement.eights,
    })
}

/// Draws the player back up to a full hand while the deck lasts.
pub(crate) fn refill_hand(state: &mut GameState, who: PlayerId) -> Result<usize, DomainError> {
    let mut drawn = 0;
    while state
        .players
        .get(who)
        .is_some_and(|p| !p.left_game && p.hand.len() < HAND_SIZE)
    {
        let Some(card) = state.deck.pop() else {
            break;
        };
        player_mut(state, who)?.hand.push(card);
        drawn += 1;
    }
    Ok(drawn)
}
