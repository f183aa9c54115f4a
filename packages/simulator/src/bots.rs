//! Move-choosing players for self-play.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use shithead_engine::domain::legal_moves;
use shithead_engine::{GameState, Move, Phase, PlayerId};

/// A player that picks one of its legal moves.
pub trait Bot: Send + Sync {
    fn name(&self) -> &'static str;

    /// Choose a move for `me`, or `None` when nothing is legal.
    fn choose_move(&self, state: &GameState, me: PlayerId) -> Option<Move>;
}

/// Picks uniformly among the moves that make progress.
///
/// During setup it accepts as soon as it can, otherwise fills a revealed
/// slot. During play it only picks up the pile when no card can be shed.
pub struct RandomBot {
    rng: Mutex<StdRng>,
}

impl RandomBot {
    pub const NAME: &'static str = "RandomBot";

    /// A seeded bot plays reproducibly; `None` draws from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn pick(&self, moves: &[Move]) -> Option<Move> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        moves.choose(&mut *rng).cloned()
    }
}

impl Bot for RandomBot {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_move(&self, state: &GameState, me: PlayerId) -> Option<Move> {
        let legal = legal_moves(state, me);
        match state.phase {
            Phase::Init => {
                if legal.contains(&Move::AcceptSelectedRevealedCards) {
                    return Some(Move::AcceptSelectedRevealedCards);
                }
                let sets: Vec<Move> = legal
                    .into_iter()
                    .filter(|m| matches!(m, Move::SetRevealedCard { .. }))
                    .collect();
                self.pick(&sets)
            }
            Phase::GameOn => {
                let progress: Vec<Move> = legal
                    .iter()
                    .filter(|m| {
                        matches!(
                            m,
                            Move::PlaceCard { .. }
                                | Move::PlaceJoker { .. }
                                | Move::RevealUndercard { .. }
                                | Move::TakeUndercards { .. }
                        )
                    })
                    .cloned()
                    .collect();
                if progress.is_empty() {
                    legal
                        .into_iter()
                        .find(|m| matches!(m, Move::AcceptDiscardPile))
                } else {
                    self.pick(&progress)
                }
            }
            Phase::GameOver => None,
        }
    }
}
