use tracing::info;

use crate::domain::state::{next_player, GameState, Phase, Seat, SeatRoundResult};

/// What scoring a round led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundScore {
    pub results: Vec<SeatRoundResult>,
    /// Score delta per seat, in seat order.
    pub deltas: Vec<i16>,
    /// Set when a seat reached the winning score.
    pub winner: Option<Seat>,
}

/// First seat, in scan order, whose score reached `winning_score`.
pub fn find_winner(scores: &[i16], winning_score: i16) -> Option<Seat> {
    scores
        .iter()
        .position(|&s| s >= winning_score)
        .map(|i| i as Seat)
}

/// Apply per-round scoring, then either finish the game or rotate the dealer.
///
/// Expects every hand to be empty. Leaves the state in `RoundComplete` or
/// `Finished`.
pub fn apply_round_scoring(state: &mut GameState) -> RoundScore {
    let results: Vec<SeatRoundResult> = state
        .seats
        .iter()
        .map(|s| SeatRoundResult {
            position: s.position,
            tricks_won: s.tricks_won,
            target_tricks: s.target_tricks,
        })
        .collect();

    let deltas: Vec<i16> = results.iter().map(SeatRoundResult::overachievement).collect();
    for (seat, delta) in state.seats.iter_mut().zip(&deltas) {
        seat.score += delta;
    }

    let winner = find_winner(&state.scores(), state.winning_score);
    state.previous_round_results = Some(results.clone());

    match winner {
        Some(w) => {
            state.phase = Phase::Finished;
            state.winner = Some(w);
            info!(
                round = state.round_number,
                winner = w,
                scores = ?state.scores(),
                "Game finished"
            );
        }
        None => {
            state.dealer_index = next_player(state.dealer_index);
            state.round_number += 1;
            state.phase = Phase::RoundComplete;
            info!(
                next_round = state.round_number,
                dealer = state.dealer_index,
                scores = ?state.scores(),
                "Round scored"
            );
        }
    }

    RoundScore {
        results,
        deltas,
        winner,
    }
}
