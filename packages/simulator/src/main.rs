//! Shithead simulator CLI - in-memory self-play for exercising the rule engine.
//!
//! Games run entirely in memory with full move validation, so a bot that
//! proposes an illegal move surfaces as a failed game rather than a bad result.

mod bots;
mod metrics;
mod output;
mod simulator;
mod types;

use std::path::PathBuf;
use std::time::Instant;

use bots::{Bot, RandomBot};
use clap::Parser;
use metrics::build_game_metrics;
use output::OutputWriter;
use shithead_engine::GameConfig;
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "shithead-sim")]
#[command(about = "In-memory Shithead self-play simulator")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Seats at the table (overrides the config file)
    #[arg(short, long)]
    players: Option<usize>,

    /// Jokers added to the deck (overrides the config file)
    #[arg(long)]
    jokers: Option<usize>,

    /// Base seed; game N uses seed + N for dealing and bots
    #[arg(long)]
    seed: Option<u64>,

    /// Table config as a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Moves after which a game is abandoned as stalled
    #[arg(long, default_value = "2000")]
    max_moves: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging - silent by default, only show warnings/errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(&args)?;
    if args.show_output {
        info!(
            games = args.games,
            players = config.players,
            jokers = config.jokers,
            refill_hand = config.refill_hand,
            "starting simulator"
        );
    }

    let mut output_writer = OutputWriter::new(&args.output_dir, args.output_format, args.compress)?;
    if args.show_output {
        info!("Output directory: {}", args.output_dir.display());
    }

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let game_seed = match args.seed {
            Some(s) => s.wrapping_add(u64::from(game_num)),
            None => rand::random(),
        };
        let game_config = config.clone().with_seed(game_seed);

        match run_game(&game_config, game_seed, args.max_moves) {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(
                    game_num,
                    game_seed,
                    &game_config,
                    args.max_moves,
                    RandomBot::NAME,
                    &result,
                    duration_ms,
                );

                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }

                if result.stalled {
                    warn!(game = game_num, seed = game_seed, "game stalled");
                } else if args.verbose {
                    info!(
                        game = game_num,
                        moves = result.moves,
                        loser = ?result.loser,
                        "game completed"
                    );
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} (seed {}) failed: {}", game_num, game_seed, e);
            }
        }
    }

    let elapsed = start.elapsed();

    let (detail_path, csv_path) = output_writer.output_paths();
    let detail_path = detail_path.cloned();
    let csv_path = csv_path.cloned();

    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = detail_path {
            info!("Detailed results written to: {}", path.display());
        }
        if let Some(path) = csv_path {
            info!("Summary CSV written to: {}", path.display());
        }

        print_summary(&results, config.players, errors, elapsed, args.games);
    }

    Ok(())
}

/// Config file (or defaults), then command-line overrides, then validation.
fn load_config(args: &Args) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    if let Some(players) = args.players {
        config.players = players;
    }
    if let Some(jokers) = args.jokers {
        config.jokers = jokers;
    }
    config.validate()?;
    Ok(config)
}

fn run_game(
    config: &GameConfig,
    game_seed: u64,
    max_moves: usize,
) -> Result<GameResult, Box<dyn std::error::Error>> {
    let bots: Vec<Box<dyn Bot>> = (0..config.players)
        .map(|seat| {
            let seed = game_seed.wrapping_add(seat as u64 + 1);
            Box::new(RandomBot::new(Some(seed))) as Box<dyn Bot>
        })
        .collect();
    let simulator = Simulator::new(config, max_moves)?;
    simulator.simulate_game(&bots).map_err(|e| e.into())
}

fn print_summary(
    results: &[GameResult],
    players: usize,
    errors: u32,
    elapsed: std::time::Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );

    let stalled = results.iter().filter(|r| r.stalled).count();
    let finished: Vec<&GameResult> = results.iter().filter(|r| !r.stalled).collect();
    println!("Stalled: {}", stalled);
    if finished.is_empty() {
        return;
    }

    let games = finished.len() as f64;
    let total_of = |field: fn(&GameResult) -> usize| -> f64 {
        finished.iter().copied().map(field).sum::<usize>() as f64
    };
    println!("Average moves: {:.1}", total_of(|r| r.moves) / games);
    println!("Average burns: {:.1}", total_of(|r| r.burns) / games);
    println!("Average pile pickups: {:.1}", total_of(|r| r.pile_pickups) / games);
    println!("Average jokers played: {:.1}", total_of(|r| r.jokers_played) / games);

    let mut losses = vec![0u32; players];
    let mut firsts = vec![0u32; players];
    for result in &finished {
        if let Some(loser) = result.loser {
            if let Some(count) = losses.get_mut(loser) {
                *count += 1;
            }
        }
        if let Some(&first) = result.finish_order.first() {
            if let Some(count) = firsts.get_mut(first) {
                *count += 1;
            }
        }
    }

    println!("\n=== Results by Seat ===");
    for seat in 0..players {
        println!(
            "Seat {}: first out={} ({:.1}%), lost={} ({:.1}%)",
            seat,
            firsts[seat],
            firsts[seat] as f64 / games * 100.0,
            losses[seat],
            losses[seat] as f64 / games * 100.0
        );
    }
}
