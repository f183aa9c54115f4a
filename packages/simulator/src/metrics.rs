//! Metrics collection and output for simulation results.

use serde::Serialize;
use shithead_engine::{GameConfig, PlayerId};

use crate::simulator::GameResult;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: TableMetrics,
    pub result: GameResultMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableMetrics {
    pub players: usize,
    pub jokers: usize,
    pub refill_hand: bool,
    pub max_moves: usize,
    pub bot: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub moves: usize,
    pub burns: usize,
    pub jokers_played: usize,
    pub pile_pickups: usize,
    pub undercards_revealed: usize,
    pub skips: usize,
    pub finish_order: Vec<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loser: Option<PlayerId>,
    pub stalled: bool,
    pub duration_ms: f64,
}

/// Build metrics from a finished game.
pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    config: &GameConfig,
    max_moves: usize,
    bot: &str,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    GameMetrics {
        game_id,
        seed,
        timestamp,
        config: TableMetrics {
            players: config.players,
            jokers: config.jokers,
            refill_hand: config.refill_hand,
            max_moves,
            bot: bot.to_string(),
        },
        result: GameResultMetrics {
            moves: result.moves,
            burns: result.burns,
            jokers_played: result.jokers_played,
            pile_pickups: result.pile_pickups,
            undercards_revealed: result.undercards_revealed,
            skips: result.skips,
            finish_order: result.finish_order.clone(),
            loser: result.loser,
            stalled: result.stalled,
            duration_ms,
        },
    }
}

/// One CSV row per game.
#[derive(Debug, Clone, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub players: usize,
    pub moves: usize,
    pub burns: usize,
    pub jokers_played: usize,
    pub pile_pickups: usize,
    /// Space-separated seat ids.
    pub finish_order: String,
    pub loser: Option<PlayerId>,
    pub stalled: bool,
    pub duration_ms: f64,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        let finish_order = metrics
            .result
            .finish_order
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        CsvSummaryRow {
            game_id: metrics.game_id,
            seed: metrics.seed,
            players: metrics.config.players,
            moves: metrics.result.moves,
            burns: metrics.result.burns,
            jokers_played: metrics.result.jokers_played,
            pile_pickups: metrics.result.pile_pickups,
            finish_order,
            loser: metrics.result.loser,
            stalled: metrics.result.stalled,
            duration_ms: metrics.result.duration_ms,
        }
    }
}
