//! In-memory game simulator.
//!
//! Drives one room's `GameState` through the reducer with AI seats, exactly
//! as the room actor would, and collects what happened per round.

use engine::domain::rules::PLAYERS;
use engine::domain::Suit;
use engine::{
    drive_turn, reduce, AiError, AiPlayer, DomainError, GameState, GameTransition, Reduction,
};
use thiserror::Error;

/// Hard stop for a game that never reaches the winning score.
const MAX_STEPS: usize = 100_000;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error("engine rejected AI action: {0}")]
    Engine(#[from] DomainError),
    #[error("engine ignored AI action: {0}")]
    Ignored(String),
    #[error("no winner after {0} steps")]
    Stuck(usize),
}

/// What one round looked like.
#[derive(Debug, Clone)]
pub struct RoundRecord {
    pub round: u32,
    pub dealer: u8,
    pub trump: Option<Suit>,
    pub targets: [u8; PLAYERS],
    pub tricks_won: [u8; PLAYERS],
    pub deltas: Vec<i16>,
    pub scores: Vec<i16>,
    pub pulls: u32,
}

/// Result of simulating a complete game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub final_scores: [i16; PLAYERS],
    pub winner: u8,
    pub rounds: Vec<RoundRecord>,
    pub steps: usize,
}

impl GameResult {
    pub fn total_pulls(&self) -> u32 {
        self.rounds.iter().map(|r| r.pulls).sum()
    }
}

pub struct Simulator {
    rng_seed: u64,
    winning_score: i16,
}

impl Simulator {
    pub fn new(rng_seed: u64, winning_score: i16) -> Self {
        Self {
            rng_seed,
            winning_score,
        }
    }

    pub fn simulate_game(
        &self,
        ais: &[Box<dyn AiPlayer>; PLAYERS],
    ) -> Result<GameResult, SimError> {
        let mut state = GameState::with_winning_score(self.rng_seed, self.winning_score);
        let mut rounds = Vec::new();
        let mut trump = None;
        let mut pulls = 0u32;

        for step in 0..MAX_STEPS {
            let Some((seat, action)) = drive_turn(&state, ais)? else {
                let winner = state.winner.unwrap_or_default();
                return Ok(GameResult {
                    final_scores: state.scores(),
                    winner,
                    rounds,
                    steps: step,
                });
            };

            let (next, transitions) = match reduce(&state, seat, action)? {
                Reduction::Applied { state, transitions } => (state, transitions),
                Reduction::Ignored { reason } => return Err(SimError::Ignored(reason)),
            };

            for t in transitions {
                match t {
                    GameTransition::TrumpChosen { suit, .. } => trump = Some(suit),
                    GameTransition::CardPulled { .. } => pulls += 1,
                    GameTransition::RoundScored {
                        round,
                        deltas,
                        scores,
                    } => {
                        // `state` predates the final play; `next` has the rotated dealer.
                        rounds.push(RoundRecord {
                            round,
                            dealer: state.dealer_index,
                            trump: trump.take(),
                            targets: state.seats.each_ref().map(|s| s.target_tricks),
                            tricks_won: next.seats.each_ref().map(|s| s.tricks_won),
                            deltas,
                            scores,
                            pulls: std::mem::take(&mut pulls),
                        });
                    }
                    _ => {}
                }
            }
            state = next;
        }

        Err(SimError::Stuck(MAX_STEPS))
    }
}
