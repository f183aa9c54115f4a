use crate::domain::player::Undercard;
use crate::domain::rules::{TableRules, HAND_SIZE};
use crate::domain::state::{GameState, Phase, RecordedMove};
use crate::domain::test_state_helpers::{card, cards, place, set_pile, strip, table};
use crate::domain::turn_order::Direction;
use crate::domain::{CardValue, Move, Rank};
use crate::errors::domain::ValidationKind;

fn kind_of(state: &GameState, mv: &Move, who: usize) -> Option<ValidationKind> {
    state.validate_move(mv, who).err().and_then(|e| e.kind())
}

fn top_value(state: &GameState) -> Option<CardValue> {
    state.discard.effective_top().map(|c| c.value())
}

// PlaceCard: ranking

#[test]
fn placement_advances_one_turn() {
    let mut state = table(vec![vec!["5C", "9D"], vec!["KH"], vec!["4S"]]);
    let outcome = state.try_play_move(place(&[0]), 0).unwrap();
    assert_eq!(outcome.turn_after, 1);
    assert!(!outcome.burned);
    assert_eq!(state.discard.peek(), Some(&card("5C")));
    assert_eq!(state.players[0].hand, cards(&["9D"]));
}

#[test]
fn lower_rank_is_rejected() {
    let mut state = table(vec![vec!["5C"], vec!["KH"]]);
    set_pile(&mut state, &["9S"]);
    assert_eq!(kind_of(&state, &place(&[0]), 0), Some(ValidationKind::RankTooLow));
}

#[test]
fn equal_rank_is_accepted() {
    let mut state = table(vec![vec!["9C"], vec!["KH"]]);
    set_pile(&mut state, &["9S"]);
    assert!(state.play_move(place(&[0]), 0));
}

#[test]
fn wildcards_go_on_anything() {
    for wild in ["2C", "3C"] {
        let mut state = table(vec![vec![wild, "4D"], vec!["KH"]]);
        set_pile(&mut state, &["AS"]);
        assert!(state.play_move(place(&[0]), 0), "{wild} on an Ace");
    }
}

#[test]
fn three_inherits_what_lies_beneath() {
    let mut state = table(vec![vec!["3C", "5D"], vec!["3H", "JD", "QS"]]);
    set_pile(&mut state, &["JS"]);
    assert!(state.play_move(place(&[0]), 0));
    assert_eq!(top_value(&state), Some(CardValue::Rank(Rank::Jack)));
    assert!(state.play_move(place(&[0]), 1));
    assert_eq!(top_value(&state), Some(CardValue::Rank(Rank::Jack)));
    assert_eq!(kind_of(&state, &place(&[0]), 0), Some(ValidationKind::RankTooLow));
}

#[test]
fn only_wildcards_follow_a_two() {
    let mut state = table(vec![vec!["2C", "KD"], vec!["4H", "AD", "TC"]]);
    set_pile(&mut state, &["AS"]);
    assert!(state.play_move(place(&[0]), 0));
    assert_eq!(top_value(&state), Some(CardValue::Rank(Rank::Two)));
    assert_eq!(kind_of(&state, &place(&[0]), 1), Some(ValidationKind::RankTooLow));
    assert_eq!(kind_of(&state, &place(&[1]), 1), Some(ValidationKind::RankTooLow));
    assert!(state.play_move(place(&[2]), 1));
}

#[test]
fn seven_caps_the_next_card() {
    let mut state = table(vec![vec!["9C", "8C", "6C", "7D"], vec!["4H"]]);
    set_pile(&mut state, &["7S"]);
    assert_eq!(kind_of(&state, &place(&[0]), 0), Some(ValidationKind::RankTooLow));
    // Eights are rank-checked like any other card.
    assert_eq!(kind_of(&state, &place(&[1]), 0), Some(ValidationKind::RankTooLow));
    assert!(state.is_valid_move(&place(&[2]), 0));
    assert!(state.is_valid_move(&place(&[3]), 0));
}

#[test]
fn selection_errors() {
    let state = table(vec![vec!["5C", "6C", "XR"], vec!["4H"]]);
    assert_eq!(kind_of(&state, &place(&[]), 0), Some(ValidationKind::EmptySelection));
    assert_eq!(kind_of(&state, &place(&[3]), 0), Some(ValidationKind::InvalidIndex));
    assert_eq!(kind_of(&state, &place(&[0, 0]), 0), Some(ValidationKind::DuplicateIndex));
    assert_eq!(kind_of(&state, &place(&[0, 1]), 0), Some(ValidationKind::MixedValues));
    assert_eq!(kind_of(&state, &place(&[2]), 0), Some(ValidationKind::JokerNotPlaceable));
}

#[test]
fn out_of_turn_placement_is_rejected() {
    let state = table(vec![vec!["5C"], vec!["6H"]]);
    assert_eq!(kind_of(&state, &place(&[0]), 1), Some(ValidationKind::OutOfTurn));
}

#[test]
fn multiple_cards_of_one_value() {
    let mut state = table(vec![vec!["5C", "KD", "5H"], vec!["4H"], vec!["4D"]]);
    let outcome = state.try_play_move(place(&[2, 0]), 0).unwrap();
    assert_eq!(outcome.turn_after, 1);
    assert_eq!(state.discard.len(), 2);
    assert_eq!(state.players[0].hand, cards(&["KD"]));
}

// PlaceCard: special effects

#[test]
fn eights_skip_one_player_each() {
    for k in 1..=3usize {
        let hand: Vec<&str> = ["8C", "8D", "8H", "4S"].to_vec();
        let mut state = table(vec![hand, vec!["4H"], vec!["4D"], vec!["4C"]]);
        let indices: Vec<usize> = (0..k).collect();
        let outcome = state.try_play_move(place(&indices), 0).unwrap();
        assert_eq!(state.current_player(), (1 + k) % 4, "k = {k}");
        assert_eq!(outcome.skipped, k);
    }
}

#[test]
fn eights_skip_against_the_direction_of_play() {
    let mut state = table(vec![vec!["8C", "4S"], vec!["4H"], vec!["4D"], vec!["4C"]]);
    state.turns.switch_direction();
    assert!(state.play_move(place(&[0]), 0));
    assert_eq!(state.current_player(), 2);
    assert_eq!(state.turns.direction(), Direction::Down);
}

#[test]
fn ten_burns_and_keeps_the_turn() {
    let mut state = table(vec![vec!["TC", "4S"], vec!["4H"]]);
    set_pile(&mut state, &["AS", "KD"]);
    let outcome = state.try_play_move(place(&[0]), 0).unwrap();
    assert!(outcome.burned);
    assert!(state.discard.is_empty());
    assert_eq!(state.burned.len(), 3);
    assert_eq!(state.current_player(), 0);
}

#[test]
fn completing_four_burns_and_keeps_the_turn() {
    let mut state = table(vec![
        vec!["6C", "6D", "6H", "4S"],
        vec!["4H"],
        vec!["4D"],
        vec!["4C"],
    ]);
    set_pile(&mut state, &["6S"]);
    let outcome = state.try_play_move(place(&[0, 1, 2]), 0).unwrap();
    assert!(outcome.burned);
    assert!(state.discard.is_empty());
    assert_eq!(state.current_player(), 0);
}

#[test]
fn completing_four_interrupts_out_of_turn() {
    let mut state = table(vec![vec!["4S"], vec!["4H"], vec!["QC", "QD"], vec!["4C"]]);
    set_pile(&mut state, &["9S", "QS", "QH"]);
    state.turns.set_current(1).unwrap();
    let outcome = state.try_play_move(place(&[0, 1]), 2).unwrap();
    assert!(outcome.burned);
    assert!(state.discard.is_empty());
    assert_eq!(state.current_player(), 1);
}

#[test]
fn partial_run_out_of_turn_is_rejected() {
    let mut state = table(vec![vec!["4S"], vec!["4H"], vec!["QC"], vec!["4C"]]);
    set_pile(&mut state, &["QS", "QH"]);
    assert_eq!(kind_of(&state, &place(&[0]), 2), Some(ValidationKind::OutOfTurn));
}

#[test]
fn four_eights_burn_without_skipping() {
    let mut state = table(vec![vec!["8C", "8D", "8H", "8S"], vec!["4H"], vec!["4D"]]);
    let outcome = state.try_play_move(place(&[0, 1, 2, 3]), 0).unwrap();
    assert!(outcome.burned);
    assert_eq!(outcome.skipped, 0);
    assert_eq!(state.current_player(), 0);
}

// PlaceJoker

#[test]
fn joker_redirects_and_hands_over_the_pile() {
    let mut state = table(vec![vec!["4S"], vec!["XR", "4H"], vec!["4D"], vec!["4C"]]);
    set_pile(&mut state, &["9S", "JD"]);
    let outcome = state
        .try_play_move(
            Move::PlaceJoker {
                target_player_id: 3,
            },
            1,
        )
        .unwrap();
    assert_eq!(outcome.turn_after, 3);
    assert_eq!(state.current_player(), 3);
    assert!(state.discard.is_empty());
    assert_eq!(state.players[3].hand, cards(&["4C", "9S", "JD"]));
    assert_eq!(state.players[1].hand, cards(&["4H"]));
    assert_eq!(state.burned, cards(&["XR"]));
}

#[test]
fn joker_may_target_the_player_who_spends_it() {
    let mut state = table(vec![vec!["XB"], vec!["4H"]]);
    set_pile(&mut state, &["9S"]);
    assert!(state.play_move(
        Move::PlaceJoker {
            target_player_id: 0
        },
        0
    ));
    assert_eq!(state.players[0].hand, cards(&["9S"]));
    assert_eq!(state.current_player(), 0);
}

#[test]
fn joker_comes_from_the_first_non_empty_zone() {
    let mut state = table(vec![vec!["4S"], vec!["4H"]]);
    state.players[0].revealed[1] = Some(card("XR"));
    let joker = Move::PlaceJoker {
        target_player_id: 1,
    };
    // Hand is not empty and holds no Joker.
    assert_eq!(kind_of(&state, &joker, 0), Some(ValidationKind::NoJoker));

    state.players[0].hand.clear();
    assert!(state.play_move(joker, 0));
    assert_eq!(state.players[0].revealed[1], None);
}

#[test]
fn undercard_joker_must_be_revealed() {
    let mut state = table(vec![vec![], vec!["4H"]]);
    state.players[0].undercards = [Some(Undercard::hidden(card("XB"))), None, None];
    let joker = Move::PlaceJoker {
        target_player_id: 1,
    };
    assert_eq!(kind_of(&state, &joker, 0), Some(ValidationKind::NoJoker));

    assert!(state.play_move(Move::RevealUndercard { index: 0 }, 0));
    assert!(state.play_move(joker, 0));
    assert_eq!(state.players[0].undercards[0], None);
    assert_eq!(state.burned, cards(&["XB"]));
}

#[test]
fn joker_cannot_target_a_player_who_left() {
    let mut state = table(vec![vec!["XR"], vec!["4H"], vec!["4D"]]);
    assert!(state.play_move(Move::LeaveGame { player_id: 2 }, 2));
    let at_leaver = Move::PlaceJoker {
        target_player_id: 2,
    };
    assert_eq!(kind_of(&state, &at_leaver, 0), Some(ValidationKind::InactiveTarget));
    let nowhere = Move::PlaceJoker {
        target_player_id: 9,
    };
    assert_eq!(kind_of(&state, &nowhere, 0), Some(ValidationKind::InactiveTarget));
}

// AcceptDiscardPile

#[test]
fn accepting_the_pile_advances_the_turn() {
    let mut state = table(vec![vec!["4S"], vec!["4H"], vec!["4D"]]);
    set_pile(&mut state, &["KS", "AD"]);
    assert_eq!(
        kind_of(&state, &Move::AcceptDiscardPile, 1),
        Some(ValidationKind::OutOfTurn)
    );
    let outcome = state.try_play_move(Move::AcceptDiscardPile, 0).unwrap();
    assert_eq!(outcome.turn_after, 1);
    assert!(state.discard.is_empty());
    assert_eq!(state.players[0].hand, cards(&["4S", "KS", "AD"]));
}

// Undercards

#[test]
fn reveal_requires_empty_hand_and_revealed_cards() {
    let mut state = table(vec![vec!["4S"], vec!["4H"]]);
    let reveal = Move::RevealUndercard { index: 0 };
    assert_eq!(kind_of(&state, &reveal, 0), Some(ValidationKind::CardsRemaining));
    state.players[0].hand.clear();
    state.players[0].revealed[2] = Some(card("9C"));
    assert_eq!(kind_of(&state, &reveal, 0), Some(ValidationKind::CardsRemaining));
    state.players[0].revealed[2] = None;
    assert!(state.is_valid_move(&reveal, 0));
    assert_eq!(kind_of(&state, &reveal, 1), Some(ValidationKind::OutOfTurn));
}

#[test]
fn reveal_flips_in_place_without_moving_the_turn() {
    let mut state = table(vec![vec![], vec!["4H"]]);
    let before = state.players[0].undercards[1].map(|u| u.card);
    let outcome = state
        .try_play_move(Move::RevealUndercard { index: 1 }, 0)
        .unwrap();
    assert_eq!(outcome.turn_after, 0);
    let slot = state.players[0].undercards[1].unwrap();
    assert!(slot.revealed);
    assert_eq!(Some(slot.card), before);
    assert_eq!(
        kind_of(&state, &Move::RevealUndercard { index: 1 }, 0),
        Some(ValidationKind::AlreadyRevealed)
    );
    assert_eq!(
        kind_of(&state, &Move::RevealUndercard { index: 3 }, 0),
        Some(ValidationKind::InvalidIndex)
    );
}

#[test]
fn take_draws_from_revealed_cards_first() {
    let mut state = table(vec![vec!["4S"], vec!["4H"]]);
    state.players[1].revealed = [Some(card("9C")), Some(card("9D")), Some(card("KS"))];
    state.players[1].undercards[0] = Some(Undercard {
        card: card("AH"),
        revealed: true,
    });

    // Out of turn, yet allowed and the turn is untouched.
    let outcome = state
        .try_play_move(Move::TakeUndercards { indices: vec![0, 1] }, 1)
        .unwrap();
    assert_eq!(outcome.turn_after, 0);
    assert_eq!(state.players[1].revealed, [None, None, Some(card("KS"))]);
    assert_eq!(state.players[1].hand, cards(&["4H", "9C", "9D"]));

    // The revealed undercard is unreachable while a revealed card remains.
    assert_eq!(
        kind_of(&state, &Move::TakeUndercards { indices: vec![0] }, 1),
        Some(ValidationKind::SlotEmpty)
    );
}

#[test]
fn take_rejects_mixed_values_and_hidden_undercards() {
    let mut state = table(vec![vec!["4S"], vec![]]);
    state.players[1].revealed = [Some(card("9C")), Some(card("TD")), None];
    assert_eq!(
        kind_of(&state, &Move::TakeUndercards { indices: vec![0, 1] }, 1),
        Some(ValidationKind::MixedValues)
    );

    state.players[1].revealed = [None; 3];
    assert_eq!(
        kind_of(&state, &Move::TakeUndercards { indices: vec![0] }, 1),
        Some(ValidationKind::NotRevealed)
    );
}

#[test]
fn taken_undercard_empties_its_slot() {
    let mut state = table(vec![vec![], vec!["4H"]]);
    let hidden = state.players[0].undercards[2].map(|u| u.card);
    assert!(state.play_move(Move::RevealUndercard { index: 2 }, 0));
    assert!(state.play_move(Move::TakeUndercards { indices: vec![2] }, 0));
    assert_eq!(state.players[0].undercards[2], None);
    assert_eq!(state.players[0].hand.first().copied(), hidden);
    assert_eq!(state.current_player(), 0);
}

// LeaveGame

#[test]
fn leaving_removes_the_player_for_good() {
    let mut state = table(vec![vec!["4S"], vec!["4H"], vec!["4D"]]);
    state.turns.set_current(1).unwrap();
    assert!(state.play_move(Move::LeaveGame { player_id: 1 }, 1));
    assert!(state.players[1].left_game);
    assert!(!state.turns.is_active(1));
    assert_eq!(state.current_player(), 2);

    assert_eq!(
        kind_of(&state, &Move::AcceptDiscardPile, 1),
        Some(ValidationKind::PlayerLeft)
    );
    assert_eq!(
        kind_of(&state, &Move::LeaveGame { player_id: 1 }, 0),
        Some(ValidationKind::PlayerLeft)
    );
}

#[test]
fn leaving_down_the_ring_passes_the_turn_backwards() {
    let mut state = table(vec![vec!["4S"], vec!["4H"], vec!["4D"], vec!["4C"]]);
    state.turns.switch_direction();
    state.turns.set_current(2).unwrap();
    assert!(state.play_move(Move::LeaveGame { player_id: 2 }, 0));
    assert_eq!(state.current_player(), 1);
}

#[test]
fn leaving_down_to_one_contender_ends_the_game() {
    let mut state = table(vec![vec!["4S"], vec!["4H"]]);
    let outcome = state
        .try_play_move(Move::LeaveGame { player_id: 0 }, 0)
        .unwrap();
    assert_eq!(outcome.phase_transitioned, Some(Phase::GameOver));
    assert_eq!(state.loser(), Some(1));
    assert!(!state.is_valid_move(&Move::LeaveGame { player_id: 1 }, 1));
}

#[test]
fn unknown_mover_is_rejected() {
    let state = table(vec![vec!["4S"], vec!["4H"]]);
    assert_eq!(
        kind_of(&state, &Move::AcceptDiscardPile, 5),
        Some(ValidationKind::UnknownPlayer)
    );
    assert_eq!(
        kind_of(&state, &Move::LeaveGame { player_id: 5 }, 0),
        Some(ValidationKind::UnknownPlayer)
    );
}

// Winning

#[test]
fn winners_retire_and_the_last_contender_loses() {
    let mut state = table(vec![vec!["KS"], vec!["AS"], vec!["4D", "5D"]]);
    strip(&mut state, 0);
    strip(&mut state, 1);

    let outcome = state.try_play_move(place(&[0]), 0).unwrap();
    assert_eq!(outcome.finished, Some(0));
    assert_eq!(state.finished, vec![0]);
    assert!(!state.turns.is_active(0));
    assert_eq!(state.current_player(), 1);
    assert_eq!(state.phase, Phase::GameOn);

    let outcome = state.try_play_move(place(&[0]), 1).unwrap();
    assert_eq!(outcome.finished, Some(1));
    assert_eq!(outcome.phase_transitioned, Some(Phase::GameOver));
    assert_eq!(state.finished, vec![0, 1]);
    assert_eq!(state.loser(), Some(2));
    assert!(!state.is_valid_move(&place(&[0]), 2));
}

#[test]
fn burning_out_passes_the_turn_on() {
    let mut state = table(vec![vec!["TS"], vec!["4H"], vec!["4D"]]);
    strip(&mut state, 0);
    let outcome = state.try_play_move(place(&[0]), 0).unwrap();
    assert!(outcome.burned);
    assert_eq!(outcome.finished, Some(0));
    assert_eq!(state.current_player(), 1);
    assert_eq!(state.turns.active_players(), &[1, 2]);
}

#[test]
fn finished_players_cannot_act() {
    let mut state = table(vec![vec!["KS"], vec!["4H"], vec!["4D"]]);
    strip(&mut state, 0);
    assert!(state.play_move(place(&[0]), 0));
    assert_eq!(
        kind_of(&state, &Move::LeaveGame { player_id: 1 }, 0),
        Some(ValidationKind::PlayerFinished)
    );
    assert_eq!(
        kind_of(&state, &Move::LeaveGame { player_id: 0 }, 1),
        Some(ValidationKind::InactiveTarget)
    );
}

// Bookkeeping

#[test]
fn rejected_moves_only_touch_last_move() {
    let mut state = table(vec![vec!["4S"], vec!["4H"]]);
    set_pile(&mut state, &["KS"]);
    assert!(state.play_move(Move::AcceptDiscardPile, 0));
    let applied = state.last_played_move.clone();

    let before = state.clone();
    let mv = place(&[0]);
    assert!(!state.play_move(mv.clone(), 0));
    assert_eq!(state.last_move, Some(RecordedMove { player: 0, mv }));
    assert_eq!(state.last_played_move, applied);

    state.last_move = before.last_move.clone();
    assert_eq!(state, before);
}

#[test]
fn is_valid_move_never_mutates() {
    let state = table(vec![vec!["4S"], vec!["4H"]]);
    let copy = state.clone();
    assert!(state.is_valid_move(&place(&[0]), 0));
    assert!(!state.is_valid_move(&place(&[0]), 1));
    assert_eq!(state, copy);
}

#[test]
fn refill_draws_back_to_a_full_hand() {
    let mut state = table(vec![vec!["4S", "5S"], vec!["4H"]]);
    state.rules = TableRules { refill_hand: true };
    let deck_before = state.deck.len();
    assert!(state.play_move(place(&[0]), 0));
    assert_eq!(state.players[0].hand.len(), HAND_SIZE);
    assert_eq!(state.deck.len(), deck_before - (HAND_SIZE - 1));
}

#[test]
fn refill_stops_when_the_deck_runs_out() {
    let mut state = table(vec![vec!["4S", "5S"], vec!["4H"]]);
    state.rules = TableRules { refill_hand: true };
    state.deck = crate::domain::Deck::from_cards(cards(&["KC", "KD"]));
    assert!(state.play_move(place(&[0]), 0));
    assert_eq!(state.players[0].hand.len(), 3);
    assert!(state.deck.is_empty());
}
