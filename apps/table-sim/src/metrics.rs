//! Per-game metrics written by the simulator.

use engine::domain::rules::PLAYERS;
use engine::domain::Suit;
use serde::Serialize;

use crate::simulator::{GameResult, RoundRecord};

#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: GameConfig,
    pub result: GameResultMetrics,
    pub rounds: Vec<RoundMetrics>,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameConfig {
    pub ai_types: [String; PLAYERS],
    pub winning_score: i16,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub final_scores: [i16; PLAYERS],
    pub winner: u8,
    pub rounds_played: usize,
    pub pulls: u32,
    pub steps: usize,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundMetrics {
    pub round_no: u32,
    pub dealer: u8,
    pub trump: Option<Suit>,
    pub targets: [u8; PLAYERS],
    pub tricks_won: [u8; PLAYERS],
    pub deltas: Vec<i16>,
    pub scores: Vec<i16>,
    pub pulls: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub seat: u8,
    pub ai_type: String,
    pub total_score: i16,
    /// Rounds where the seat met its quota exactly.
    pub quotas_met: u32,
    pub quotas_beaten: u32,
    pub quotas_missed: u32,
    pub avg_tricks_per_round: f64,
}

impl From<&RoundRecord> for RoundMetrics {
    fn from(r: &RoundRecord) -> Self {
        Self {
            round_no: r.round,
            dealer: r.dealer,
            trump: r.trump,
            targets: r.targets,
            tricks_won: r.tricks_won,
            deltas: r.deltas.clone(),
            scores: r.scores.clone(),
            pulls: r.pulls,
        }
    }
}

/// Build metrics for one finished game.
pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    ai_types: [String; PLAYERS],
    winning_score: i16,
    total_games: u32,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let player_metrics = (0..PLAYERS)
        .map(|seat| {
            let mut met = 0;
            let mut beaten = 0;
            let mut missed = 0;
            let mut tricks = 0u32;
            for r in &result.rounds {
                tricks += u32::from(r.tricks_won[seat]);
                match r.tricks_won[seat].cmp(&r.targets[seat]) {
                    std::cmp::Ordering::Equal => met += 1,
                    std::cmp::Ordering::Greater => beaten += 1,
                    std::cmp::Ordering::Less => missed += 1,
                }
            }
            let rounds = result.rounds.len().max(1) as f64;
            PlayerMetrics {
                seat: seat as u8,
                ai_type: ai_types[seat].clone(),
                total_score: result.final_scores[seat],
                quotas_met: met,
                quotas_beaten: beaten,
                quotas_missed: missed,
                avg_tricks_per_round: f64::from(tricks) / rounds,
            }
        })
        .collect();

    GameMetrics {
        game_id,
        seed,
        timestamp,
        config: GameConfig {
            ai_types,
            winning_score,
            total_games,
        },
        result: GameResultMetrics {
            final_scores: result.final_scores,
            winner: result.winner,
            rounds_played: result.rounds.len(),
            pulls: result.total_pulls(),
            steps: result.steps,
            duration_ms,
        },
        rounds: result.rounds.iter().map(RoundMetrics::from).collect(),
        player_metrics,
    }
}

/// CSV summary row for quick analysis.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub winner: u8,
    pub rounds: usize,
    pub pulls: u32,
    pub seat0_score: i16,
    pub seat1_score: i16,
    pub seat2_score: i16,
    pub seat0_ai: String,
    pub seat1_ai: String,
    pub seat2_ai: String,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(m: &GameMetrics) -> Self {
        let [s0, s1, s2] = m.result.final_scores;
        let [a0, a1, a2] = m.config.ai_types.clone();
        Self {
            game_id: m.game_id,
            seed: m.seed,
            winner: m.result.winner,
            rounds: m.result.rounds_played,
            pulls: m.result.pulls,
            seat0_score: s0,
            seat1_score: s1,
            seat2_score: s2,
            seat0_ai: a0,
            seat1_ai: a1,
            seat2_ai: a2,
        }
    }
}
