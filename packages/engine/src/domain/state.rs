use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GameConfig;
use crate::domain::moves::Move;
use crate::domain::player::PlayerState;
use crate::domain::rules::{cards_needed, TableRules, HAND_SIZE, MIN_PLAYERS, UNDERCARD_SLOTS};
use crate::domain::turn_order::{Direction, TurnOrder};
use crate::domain::{Card, Deck, DiscardPile};
use crate::errors::domain::SetupError;

/// Stable seat id in `0..player_count`.
pub type PlayerId = usize;

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Players choose their revealed cards.
    Init,
    /// Turn play.
    GameOn,
    /// At most one contender remains.
    GameOver,
}

/// A move together with the player who submitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMove {
    pub player: PlayerId,
    #[serde(rename = "move")]
    pub mv: Move,
}

/// Entire table state, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Draw deck.
    pub deck: Deck,
    pub discard: DiscardPile,
    /// Cards removed from play by burns and spent Jokers.
    pub burned: Vec<Card>,
    pub turns: TurnOrder,
    /// Indexed by player id; entries are never removed.
    pub players: Vec<PlayerState>,
    pub phase: Phase,
    /// Most recent attempt, applied or not.
    pub last_move: Option<RecordedMove>,
    /// Most recent applied move.
    pub last_played_move: Option<RecordedMove>,
    /// Winners in finishing order.
    pub finished: Vec<PlayerId>,
    pub rules: TableRules,
}

impl GameState {
    /// Deal a new table from `deck`, player 0 first, rotating up.
    ///
    /// Cards are drawn from the top: three undercards per player, then six
    /// hand cards per player. Fails before dealing if the roster or the deck
    /// is too small.
    pub fn new(player_count: usize, deck: Deck, rules: TableRules) -> Result<Self, SetupError> {
        Self::deal(player_count, deck, rules, 0, Direction::Up)
    }

    /// Build a table with a standard deck shuffled by `config.seed`.
    ///
    /// Without a seed the shuffle seed is drawn from the thread RNG, so every
    /// such table is dealt differently.
    pub fn from_config(config: &GameConfig) -> Result<Self, SetupError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let deck = Deck::shuffled(config.jokers, seed);
        Self::deal(
            config.players,
            deck,
            config.rules(),
            config.first_player,
            config.direction,
        )
    }

    fn deal(
        player_count: usize,
        mut deck: Deck,
        rules: TableRules,
        first: PlayerId,
        direction: Direction,
    ) -> Result<Self, SetupError> {
        if player_count < MIN_PLAYERS {
            return Err(SetupError::InvalidPlayerCount {
                min: MIN_PLAYERS,
                got: player_count,
            });
        }
        let needed = cards_needed(player_count);
        if deck.len() < needed {
            return Err(SetupError::InsufficientCards {
                needed,
                available: deck.len(),
            });
        }
        let turns = TurnOrder::new(player_count, first, direction).map_err(|_| {
            SetupError::InvalidFirstPlayer {
                first,
                players: player_count,
            }
        })?;

        let mut undercards: Vec<Vec<Card>> = vec![Vec::with_capacity(UNDERCARD_SLOTS); player_count];
        for _ in 0..UNDERCARD_SLOTS {
            for pile in undercards.iter_mut() {
                pile.push(draw(&mut deck)?);
            }
        }
        let mut hands: Vec<Vec<Card>> = vec![Vec::with_capacity(HAND_SIZE); player_count];
        for _ in 0..HAND_SIZE {
            for hand in hands.iter_mut() {
                hand.push(draw(&mut deck)?);
            }
        }

        let players = hands
            .into_iter()
            .zip(undercards)
            .enumerate()
            .map(|(id, (hand, under))| {
                let slots: [Card; UNDERCARD_SLOTS] =
                    under.try_into().map_err(|_| SetupError::InsufficientCards {
                        needed,
                        available: 0,
                    })?;
                Ok(PlayerState::new(id, hand, slots))
            })
            .collect::<Result<Vec<_>, SetupError>>()?;

        debug!(players = player_count, deck_left = deck.len(), "table dealt");

        Ok(Self {
            deck,
            discard: DiscardPile::new(),
            burned: Vec::new(),
            turns,
            players,
            phase: Phase::Init,
            last_move: None,
            last_played_move: None,
            finished: Vec::new(),
            rules,
        })
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Whose turn it is.
    pub fn current_player(&self) -> PlayerId {
        self.turns.current()
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Players who have neither won nor left.
    pub fn contenders(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.iter().filter(|p| p.is_contender())
    }

    /// The last contender standing, once the game is over.
    pub fn loser(&self) -> Option<PlayerId> {
        if self.phase != Phase::GameOver {
            return None;
        }
        self.contenders().next().map(|p| p.id)
    }

    /// Cards across every zone of the table. Constant for the life of a game.
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.discard.len()
            + self.burned.len()
            + self.players.iter().map(PlayerState::card_count).sum::<usize>()
    }
}

fn draw(deck: &mut Deck) -> Result<Card, SetupError> {
    deck.pop().ok_or(SetupError::InsufficientCards {
        needed: 1,
        available: 0,
    })
}
