#![allow(dead_code)]

pub mod proptest_prelude;

use shithead_engine::{Card, GameConfig, GameState, Move, Phase, PlayerId};

// Logging is auto-installed for every integration test binary
#[ctor::ctor]
fn init_logging() {
    test_support::logging::init();
}

pub fn card(token: &str) -> Card {
    token.parse().expect("valid card token")
}

/// Deterministic table built through the public config path.
pub fn table(players: usize, seed: u64) -> GameState {
    let config = GameConfig {
        players,
        ..GameConfig::default()
    }
    .with_seed(seed);
    GameState::from_config(&config).expect("valid config")
}

/// Every player reveals their first three hand cards and accepts.
pub fn finish_setup(state: &mut GameState) {
    let ids: Vec<PlayerId> = (0..state.player_count()).collect();
    for id in ids {
        if state.players[id].left_game {
            continue;
        }
        for slot in 0..3 {
            let mv = Move::SetRevealedCard {
                card_index: 0,
                target_index: slot,
            };
            assert!(state.play_move(mv, id));
        }
        assert!(state.play_move(Move::AcceptSelectedRevealedCards, id));
    }
    assert_eq!(state.phase, Phase::GameOn);
}
