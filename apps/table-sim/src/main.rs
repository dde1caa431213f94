//! Table simulator CLI: plays complete 3-2-5 games in memory with AI seats.
//!
//! Every game runs through the same reducer the room actor uses, so a
//! finished simulation doubles as an end-to-end rules check.

mod metrics;
mod output;
mod simulator;
mod types;

use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use engine::ai::create_ai;
use engine::domain::rules::{DEFAULT_WINNING_SCORE, PLAYERS};
use engine::AiPlayer;
use metrics::build_game_metrics;
use output::OutputWriter;
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "table-sim")]
#[command(about = "In-memory 3-2-5 table simulator")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// AI type for all three seats
    #[arg(long, default_value = "random")]
    seats: AiType,

    /// Base seed; game N uses seed + N. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Score that ends a game
    #[arg(long, default_value_t = DEFAULT_WINNING_SCORE, value_parser = clap::value_parser!(i16).range(1..))]
    winning_score: i16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON logs filtered by RUST_LOG instead of plain text
    #[arg(long)]
    json_logs: bool,

    /// Skip the summary printed at the end
    #[arg(short, long)]
    quiet: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Gzip the JSONL output
    #[arg(long)]
    compress: bool,
}

#[derive(Debug, Clone, ValueEnum)]
enum AiType {
    Random,
}

impl AiType {
    fn name(&self) -> &'static str {
        match self {
            AiType::Random => "random",
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        engine::telemetry::init_tracing();
    } else {
        let filter = if args.verbose { "debug" } else { "warn" };
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!(
        games = args.games,
        winning_score = args.winning_score,
        seats = args.seats.name(),
        "Starting table simulator"
    );

    let mut output_writer = OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;
    let ai_types: [String; PLAYERS] = std::array::from_fn(|_| args.seats.name().to_string());

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0u32;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let game_seed = match args.seed {
            Some(s) => s.wrapping_add(u64::from(game_num)),
            None => rand::random(),
        };

        let ais = create_seats(args.seats.name(), game_seed)?;
        match Simulator::new(game_seed, args.winning_score).simulate_game(&ais) {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(
                    game_num,
                    game_seed,
                    ai_types.clone(),
                    args.winning_score,
                    args.games,
                    &result,
                    duration_ms,
                );
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!(game = game_num, error = %e, "Failed to write metrics");
                }
                info!(
                    game = game_num,
                    winner = result.winner,
                    scores = ?result.final_scores,
                    "Game completed"
                );
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(game = game_num, seed = game_seed, error = %e, "Game failed");
            }
        }
    }

    let elapsed = start.elapsed();
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.clone();
    output_writer.finish()?;

    if !args.quiet {
        if let Some(path) = jsonl_path {
            println!("Detailed results: {}", path.display());
        }
        println!("Summary CSV: {}", csv_path.display());
        print_summary(&results, errors, elapsed, args.games);
    }

    Ok(())
}

/// One AI per seat, each seeded from the game seed.
fn create_seats(
    ai_type: &str,
    game_seed: u64,
) -> Result<[Box<dyn AiPlayer>; PLAYERS], Box<dyn std::error::Error>> {
    let make = |seat: u64| {
        create_ai(ai_type, Some(game_seed.wrapping_mul(31).wrapping_add(seat)))
            .ok_or_else(|| format!("Unknown AI type: {ai_type}"))
    };
    Ok([make(0)?, make(1)?, make(2)?])
}

fn print_summary(results: &[GameResult], errors: u32, elapsed: Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );

    let mut wins = [0u32; PLAYERS];
    let mut total_scores = [0i64; PLAYERS];
    let mut rounds = 0usize;
    let mut pulls = 0u32;
    for result in results {
        wins[result.winner as usize] += 1;
        for (seat, &score) in result.final_scores.iter().enumerate() {
            total_scores[seat] += i64::from(score);
        }
        rounds += result.rounds.len();
        pulls += result.total_pulls();
    }

    let n = results.len() as f64;
    println!("Average rounds per game: {:.1}", rounds as f64 / n);
    println!("Average pulls per game: {:.1}", f64::from(pulls) / n);

    println!("\n=== Results by Seat ===");
    for seat in 0..PLAYERS {
        println!(
            "Seat {}: avg={:.1}, wins={} ({:.1}%)",
            seat,
            total_scores[seat] as f64 / n,
            wins[seat],
            f64::from(wins[seat]) / n * 100.0
        );
    }
}
