//! In-memory self-play driver.
//!
//! Runs a single table from deal to game over, asking one bot per seat for
//! its next move and feeding it through the rule engine. Every move goes
//! through full validation; a rejection is a bot bug and aborts the game.

use shithead_engine::{DomainError, GameConfig, GameState, Move, Phase, PlayerId, SetupError};
use tracing::{debug, trace};

use crate::bots::Bot;

/// Counters and result of one simulated game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameResult {
    /// Applied moves, setup included.
    pub moves: usize,
    pub burns: usize,
    pub jokers_played: usize,
    pub pile_pickups: usize,
    pub undercards_revealed: usize,
    /// Total turns skipped by Eights.
    pub skips: usize,
    /// Winners in finishing order.
    pub finish_order: Vec<PlayerId>,
    pub loser: Option<PlayerId>,
    /// The move limit was reached before the game ended.
    pub stalled: bool,
}

/// Errors that can occur during simulation.
#[derive(Debug)]
pub enum SimulatorError {
    /// The table could not be dealt
    Setup(SetupError),
    /// Bot count does not match the seat count
    SeatMismatch { seats: usize, bots: usize },
    /// A bot had nothing to play
    NoMove { player: PlayerId, phase: Phase },
    /// The engine refused a bot's move
    Rejected {
        player: PlayerId,
        mv: Move,
        source: DomainError,
    },
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::Setup(err) => write!(f, "Setup failed: {err}"),
            SimulatorError::SeatMismatch { seats, bots } => {
                write!(f, "Table has {seats} seats but {bots} bots were given")
            }
            SimulatorError::NoMove { player, phase } => {
                write!(f, "No legal move for player {player} in {phase:?}")
            }
            SimulatorError::Rejected { player, mv, source } => {
                write!(f, "Move {mv:?} by player {player} rejected: {source}")
            }
        }
    }
}

impl std::error::Error for SimulatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulatorError::Setup(err) => Some(err),
            SimulatorError::Rejected { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SetupError> for SimulatorError {
    fn from(err: SetupError) -> Self {
        SimulatorError::Setup(err)
    }
}

pub struct Simulator {
    state: GameState,
    max_moves: usize,
}

impl Simulator {
    /// Deal a table for `config`. The config should carry a seed for
    /// reproducible games.
    pub fn new(config: &GameConfig, max_moves: usize) -> Result<Self, SimulatorError> {
        Ok(Self {
            state: GameState::from_config(config)?,
            max_moves,
        })
    }

    /// Play until game over or until `max_moves` moves have been applied.
    pub fn simulate_game(mut self, bots: &[Box<dyn Bot>]) -> Result<GameResult, SimulatorError> {
        if bots.len() != self.state.player_count() {
            return Err(SimulatorError::SeatMismatch {
                seats: self.state.player_count(),
                bots: bots.len(),
            });
        }

        let mut result = GameResult::default();
        while let Some(player) = next_actor(&self.state) {
            if result.moves >= self.max_moves {
                result.stalled = true;
                debug!(moves = result.moves, "move limit reached");
                break;
            }

            let phase = self.state.phase;
            let mv = bots[player]
                .choose_move(&self.state, player)
                .ok_or(SimulatorError::NoMove { player, phase })?;
            trace!(player, bot = bots[player].name(), mv = mv.name(), "bot move");

            let outcome = self
                .state
                .try_play_move(mv.clone(), player)
                .map_err(|source| SimulatorError::Rejected {
                    player,
                    mv: mv.clone(),
                    source,
                })?;

            result.moves += 1;
            result.skips += outcome.skipped;
            if outcome.burned {
                result.burns += 1;
            }
            match mv {
                Move::PlaceJoker { .. } => result.jokers_played += 1,
                Move::AcceptDiscardPile => result.pile_pickups += 1,
                Move::RevealUndercard { .. } => result.undercards_revealed += 1,
                _ => {}
            }
        }

        result.finish_order = self.state.finished.clone();
        result.loser = self.state.loser();
        Ok(result)
    }
}

/// Who acts next: the first seat still choosing revealed cards during setup,
/// otherwise the player whose turn it is.
fn next_actor(state: &GameState) -> Option<PlayerId> {
    match state.phase {
        Phase::Init => state
            .players
            .iter()
            .find(|p| !p.left_game && !p.revealed_accepted)
            .map(|p| p.id),
        Phase::GameOn => Some(state.current_player()),
        Phase::GameOver => None,
    }
}
