//! Enumeration of currently legal moves, for bots and hint UIs.

use std::collections::BTreeMap;

use crate::domain::moves::Move;
use crate::domain::rules::{REVEALED_SLOTS, UNDERCARD_SLOTS};
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::domain::CardValue;

/// Groups positions by the card value found there, in first-seen order per value.
fn group_by_value<I>(items: I) -> Vec<Vec<usize>>
where
    I: IntoIterator<Item = (usize, CardValue)>,
{
    let mut order: Vec<CardValue> = Vec::new();
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, value) in items {
        let key = match order.iter().position(|v| *v == value) {
            Some(k) => k,
            None => {
                order.push(value);
                order.len() - 1
            }
        };
        groups.entry(key).or_default().push(idx);
    }
    groups.into_values().collect()
}

/// Every prefix of every group: one card, two cards, and so on.
fn prefixes(groups: Vec<Vec<usize>>) -> impl Iterator<Item = Vec<usize>> {
    groups
        .into_iter()
        .flat_map(|g| (1..=g.len()).map(move |n| g[..n].to_vec()))
}

fn candidates(state: &GameState, who: PlayerId) -> Vec<Move> {
    let Some(player) = state.player(who) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    match state.phase {
        Phase::Init => {
            for card_index in 0..player.hand.len() {
                for target_index in 0..REVEALED_SLOTS {
                    out.push(Move::SetRevealedCard {
                        card_index,
                        target_index,
                    });
                }
            }
            for target_index in 0..REVEALED_SLOTS {
                out.push(Move::UnsetRevealedCard { target_index });
            }
            out.push(Move::AcceptSelectedRevealedCards);
            out.push(Move::ReselectRevealedCards);
        }
        Phase::GameOn => {
            let hand = player.hand.iter().map(|c| c.value()).enumerate();
            out.extend(prefixes(group_by_value(hand)).map(|indices| Move::PlaceCard { indices }));

            for &target_player_id in state.turns.active_players() {
                out.push(Move::PlaceJoker { target_player_id });
            }
            out.push(Move::AcceptDiscardPile);
            for index in 0..UNDERCARD_SLOTS {
                out.push(Move::RevealUndercard { index });
            }

            let face_up: Vec<(usize, CardValue)> = if player.has_revealed() {
                player
                    .revealed
                    .iter()
                    .enumerate()
                    .filter_map(|(i, c)| c.map(|c| (i, c.value())))
                    .collect()
            } else {
                player
                    .undercards
                    .iter()
                    .enumerate()
                    .filter_map(|(i, u)| u.filter(|u| u.revealed).map(|u| (i, u.card.value())))
                    .collect()
            };
            out.extend(
                prefixes(group_by_value(face_up)).map(|indices| Move::TakeUndercards { indices }),
            );
        }
        Phase::GameOver => {}
    }
    out
}

/// Legal moves for `who`, filtered through the same validation `play_move`
/// uses. `LeaveGame` is never suggested.
///
/// `PlaceCard` and `TakeUndercards` are offered once per value and count,
/// using the lowest indices holding that value, rather than as every index
/// combination.
pub fn legal_moves(state: &GameState, who: PlayerId) -> Vec<Move> {
    candidates(state, who)
        .into_iter()
        .filter(|mv| state.is_valid_move(mv, who))
        .collect()
}
