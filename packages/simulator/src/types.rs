//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per game, streamed.
    Jsonl,
    /// A single JSON array written when the run ends.
    Json,
}
