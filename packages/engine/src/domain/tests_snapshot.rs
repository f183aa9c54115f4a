use crate::domain::player::Undercard;
use crate::domain::snapshot::{snapshot_for, UndercardPublic};
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{card, cards, place, set_pile, started, strip, table};
use crate::domain::Move;

#[test]
fn spectators_see_only_public_information() {
    let mut state = table(vec![vec!["4S", "5S"], vec!["4H"]]);
    set_pile(&mut state, &["9C", "JD"]);
    state.players[1].undercards[0] = Some(Undercard {
        card: card("AH"),
        revealed: true,
    });
    state.players[1].undercards[2] = None;

    let snap = snapshot_for(&state, None);
    assert_eq!(snap.phase, Phase::GameOn);
    assert_eq!(snap.discard, cards(&["JD", "9C"]));
    assert_eq!(snap.current, 0);
    assert_eq!(snap.active, vec![0, 1]);
    assert!(snap.viewer.is_none());

    let seat = &snap.seats[1];
    assert_eq!(seat.hand_count, 1);
    assert_eq!(
        seat.undercards,
        [
            UndercardPublic::Revealed(card("AH")),
            UndercardPublic::Hidden,
            UndercardPublic::Empty
        ]
    );
    assert_eq!(snap.seats[0].hand_count, 2);
}

#[test]
fn viewer_sees_own_hand_and_undercard_values() {
    let state = started(3, 21);
    let snap = snapshot_for(&state, Some(1));
    let private = snap.viewer.expect("seated viewer");
    assert_eq!(private.id, 1);
    assert_eq!(private.hand, state.players[1].hand);
    for (slot, under) in private.undercards.iter().zip(state.players[1].undercards) {
        assert_eq!(*slot, under.map(|u| u.card));
    }
    // Others' undercards stay hidden in the public section.
    assert!(snap.seats[0]
        .undercards
        .iter()
        .all(|u| *u == UndercardPublic::Hidden));
}

#[test]
fn unknown_viewer_gets_spectator_view() {
    let state = started(2, 4);
    assert!(snapshot_for(&state, Some(7)).viewer.is_none());
}

#[test]
fn finishing_place_is_reported() {
    let mut state = table(vec![vec!["KS"], vec!["4H"], vec!["4D"]]);
    strip(&mut state, 0);
    assert!(state.play_move(place(&[0]), 0));
    let snap = snapshot_for(&state, None);
    assert!(snap.seats[0].won);
    assert_eq!(snap.seats[0].place, Some(1));
    assert_eq!(snap.seats[1].place, None);
    assert_eq!(snap.finished, vec![0]);
    assert_eq!(snap.active, vec![1, 2]);
}

#[test]
fn snapshot_serializes_tagged_undercards() {
    let mut state = table(vec![vec!["4S"], vec!["4H"]]);
    assert!(state.play_move(Move::AcceptDiscardPile, 0));
    let json = serde_json::to_value(snapshot_for(&state, Some(0))).unwrap();
    assert_eq!(json["phase"], "GAME_ON");
    assert_eq!(json["seats"][0]["undercards"][0]["state"], "HIDDEN");
    assert_eq!(json["viewer"]["hand"][0], "4S");
    assert_eq!(json["last_played_move"]["move"]["type"], "accept_discard_pile");
    assert_eq!(json["direction"], "UP");
}
