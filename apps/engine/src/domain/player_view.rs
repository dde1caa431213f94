//! Seat view of room state: what one seat is allowed to see.
//!
//! The other seats' hands are reduced to their sizes, so blind pulls stay
//! blind. During a pull, the pulled card is shown only to the puller.

use serde::Serialize;

use crate::domain::card_pull::{self, PullPhase};
use crate::domain::controller::expected_actor;
use crate::domain::rules::PLAYERS;
use crate::domain::state::{require_seat, GameState, Phase, Seat};
use crate::domain::tricks::legal_moves_for;
use crate::domain::{Card, Suit};
use crate::errors::domain::DomainError;

/// Public per-seat figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatPublic {
    pub position: Seat,
    pub hand_size: usize,
    pub target_tricks: u8,
    pub tricks_won: u8,
    pub score: i16,
}

/// Pull progress as the viewing seat sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullView {
    pub phase: PullPhase,
    pub current_puller: Option<Seat>,
    pub pulls_remaining: u8,
    pub under_scorers: Vec<Seat>,
    pub selected_target: Option<Seat>,
    /// Only visible to the current puller.
    pub pulled_card: Option<Card>,
}

/// Information visible to one seat at a decision point.
///
/// This is the interface between the engine and AI players: every
/// [`crate::ai::AiPlayer`] method receives one. Use the `legal_*` helpers
/// rather than re-deriving the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub seat: Seat,
    pub phase: Phase,
    pub round_number: u32,
    pub dealer_index: Seat,
    /// Seat expected to act, `None` when any seat may.
    pub turn: Option<Seat>,
    pub trump_suit: Option<Suit>,
    pub trump_led_at_start: Option<bool>,
    pub first_trick_leader: Option<Seat>,
    /// Own hand, sorted.
    pub hand: Vec<Card>,
    pub seats: Vec<SeatPublic>,
    pub current_trick: Vec<(Seat, Card)>,
    pub last_trick: Option<Vec<(Seat, Card)>>,
    pub pull: Option<PullView>,
    pub winner: Option<Seat>,
    playable: Vec<Card>,
    pull_targets: Vec<Seat>,
    returnable: Vec<Card>,
}

impl SeatView {
    pub fn for_seat(state: &GameState, seat: Seat) -> Result<Self, DomainError> {
        require_seat(seat, "seat view")?;

        let mut hand = state.hand(seat).to_vec();
        hand.sort();

        let pull = state.card_pull_state.as_ref().map(|p| {
            let current = p.current_puller();
            let is_puller = current.map(|c| c.position) == Some(seat);
            PullView {
                phase: p.phase,
                current_puller: current.map(|c| c.position),
                pulls_remaining: current.map_or(0, |c| c.pulls_remaining),
                under_scorers: p.under_scorers.iter().map(|u| u.position).collect(),
                selected_target: p.selected_target,
                pulled_card: if is_puller { p.pulled_card } else { None },
            }
        });

        Ok(Self {
            seat,
            phase: state.phase,
            round_number: state.round_number,
            dealer_index: state.dealer_index,
            turn: expected_actor(state),
            trump_suit: state.round.trump_suit,
            trump_led_at_start: state.round.trump_led_at_start,
            first_trick_leader: state.round.first_trick_leader,
            hand,
            seats: state
                .seats
                .iter()
                .map(|s| SeatPublic {
                    position: s.position,
                    hand_size: s.hand.len(),
                    target_tricks: s.target_tricks,
                    tricks_won: s.tricks_won,
                    score: s.score,
                })
                .collect(),
            current_trick: state.round.current_trick.clone(),
            last_trick: state.round.last_trick.clone(),
            pull,
            winner: state.winner,
            playable: legal_moves_for(state, seat),
            pull_targets: card_pull::legal_targets_for(state, seat),
            returnable: card_pull::legal_returns_for(state, seat),
        })
    }

    pub fn is_my_turn(&self) -> bool {
        self.turn == Some(self.seat)
    }

    /// Cards this seat may play now; empty unless it is their turn to play.
    pub fn legal_plays(&self) -> &[Card] {
        &self.playable
    }

    /// Trump options; empty unless this seat is choosing trump.
    pub fn legal_trumps(&self) -> Vec<Suit> {
        if self.phase == Phase::TrumpSelection && self.is_my_turn() {
            Suit::ALL.to_vec()
        } else {
            Vec::new()
        }
    }

    pub fn legal_pull_targets(&self) -> &[Seat] {
        &self.pull_targets
    }

    /// Blind indices into the selected target's hand.
    pub fn legal_pull_indices(&self) -> std::ops::Range<usize> {
        let Some(pull) = &self.pull else {
            return 0..0;
        };
        if pull.phase != PullPhase::SelectingCard || pull.current_puller != Some(self.seat) {
            return 0..0;
        }
        let size = pull
            .selected_target
            .and_then(|t| self.seats.get(t as usize))
            .map_or(0, |s| s.hand_size);
        0..size
    }

    pub fn legal_returns(&self) -> &[Card] {
        &self.returnable
    }

    pub fn hand_sizes(&self) -> [usize; PLAYERS] {
        let mut sizes = [0; PLAYERS];
        for s in &self.seats {
            sizes[s.position as usize] = s.hand_size;
        }
        sizes
    }
}
