use serde::{Deserialize, Serialize};

use crate::domain::card_pull::CardPullState;
use crate::domain::rules::{DEFAULT_WINNING_SCORE, PLAYERS};
use crate::domain::{Card, Suit};
use crate::errors::domain::DomainError;

pub type Seat = u8; // 0..=2

/// Room progression phases.
///
/// `TrumpSelection`, `Dealing3` and `CardPull` are the dealing sub-stages a
/// round passes through before `Playing`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Room created, no cards dealt yet.
    Waiting,
    /// Five cards per seat dealt; the 5-quota seat picks trump.
    TrumpSelection,
    /// Eight cards per seat dealt; the dealer deals the final two.
    #[serde(rename = "dealing_3")]
    Dealing3,
    /// Over-scorers from the previous round pull cards from under-scorers.
    CardPull,
    /// Tricks are being played.
    Playing,
    /// Round scored; waiting for the next round to be started.
    RoundComplete,
    /// A seat crossed the winning score.
    Finished,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Waiting => "waiting",
            Phase::TrumpSelection => "trump_selection",
            Phase::Dealing3 => "dealing_3",
            Phase::CardPull => "card_pull",
            Phase::Playing => "playing",
            Phase::RoundComplete => "round_complete",
            Phase::Finished => "finished",
        }
    }
}

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatState {
    pub position: Seat,
    pub hand: Vec<Card>,
    pub tricks_won: u8,
    pub target_tricks: u8,
    pub score: i16,
}

impl SeatState {
    pub fn empty(position: Seat) -> Self {
        Self {
            position,
            hand: Vec::new(),
            tricks_won: 0,
            target_tricks: 0,
            score: 0,
        }
    }
}

/// `(position, tricks_won, target_tricks)` for one seat of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRoundResult {
    pub position: Seat,
    pub tricks_won: u8,
    pub target_tricks: u8,
}

impl SeatRoundResult {
    pub fn overachievement(&self) -> i16 {
        self.tricks_won as i16 - self.target_tricks as i16
    }
}

/// A resolved trick, kept for replay and audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickRecord {
    pub round_number: u32,
    /// 1-based within the round.
    pub trick_number: u8,
    pub cards_played: Vec<(Seat, Card)>,
    pub winner_position: Seat,
}

/// Per-round container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoundState {
    /// Trump for this round (set by the 5-quota seat).
    pub trump_suit: Option<Suit>,
    /// Latched by the first card of trick 0: was it a trump?
    pub trump_led_at_start: Option<bool>,
    /// The 5-quota seat, set once the final cards are dealt.
    pub first_trick_leader: Option<Seat>,
    /// Ordered plays for the current trick (who, card).
    pub current_trick: Vec<(Seat, Card)>,
    /// Cards staged between dealing stages.
    pub remaining_cards: Option<Vec<Card>>,
    /// Tricks resolved so far this round.
    pub completed_tricks: Vec<TrickRecord>,
    /// Last completed trick (3 cards) for display purposes.
    pub last_trick: Option<Vec<(Seat, Card)>>,
}

impl RoundState {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Entire room state, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub phase: Phase,
    /// 1-based; 0 until the first deal.
    pub round_number: u32,
    pub dealer_index: Seat,
    /// Seat expected to act next.
    pub current_player_index: Seat,
    pub seats: [SeatState; PLAYERS],
    pub round: RoundState,
    /// Results of the round just played; feeds card-pull eligibility.
    pub previous_round_results: Option<Vec<SeatRoundResult>>,
    pub card_pull_state: Option<CardPullState>,
    /// Set once the game is finished.
    pub winner: Option<Seat>,
    /// Base seed all per-round shuffles derive from.
    pub rng_seed: u64,
    pub winning_score: i16,
}

impl GameState {
    /// A fresh room: seat 0 deals first.
    pub fn new(rng_seed: u64) -> Self {
        Self::with_winning_score(rng_seed, DEFAULT_WINNING_SCORE)
    }

    pub fn with_winning_score(rng_seed: u64, winning_score: i16) -> Self {
        Self {
            phase: Phase::Waiting,
            round_number: 0,
            dealer_index: 0,
            current_player_index: 0,
            seats: [SeatState::empty(0), SeatState::empty(1), SeatState::empty(2)],
            round: RoundState::empty(),
            previous_round_results: None,
            card_pull_state: None,
            winner: None,
            rng_seed,
            winning_score,
        }
    }

    pub fn seat(&self, seat: Seat) -> &SeatState {
        &self.seats[seat as usize]
    }

    pub fn seat_mut(&mut self, seat: Seat) -> &mut SeatState {
        &mut self.seats[seat as usize]
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.seats[seat as usize].hand
    }

    pub fn scores(&self) -> [i16; PLAYERS] {
        [self.seats[0].score, self.seats[1].score, self.seats[2].score]
    }

    /// Index of the trick being played, derived from the acting seat's hand size.
    pub fn trick_index(&self, seat: Seat) -> u8 {
        crate::domain::tricks::trick_index_for(self.hand(seat).len())
    }
}

/// Seat / turn math helpers (3 fixed seats: 0..=2).
///
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    (seat_i + delta_i).rem_euclid(PLAYERS as i16) as Seat
}

/// Returns the next player clockwise (0 → 1 → 2 → 0).
#[inline]
pub fn next_player(p: Seat) -> Seat {
    seat_offset(p, 1)
}

/// Clockwise steps from the dealer to `position`: the dealer is 0, the seat
/// after the dealer is 1.
#[inline]
pub fn clockwise_distance(position: Seat, dealer: Seat) -> u8 {
    ((position as i16 - dealer as i16).rem_euclid(PLAYERS as i16)) as u8
}

pub fn require_seat(seat: Seat, ctx: &'static str) -> Result<Seat, DomainError> {
    if (seat as usize) < PLAYERS {
        Ok(seat)
    } else {
        Err(DomainError::precondition(format!(
            "Invariant violated: seat {seat} out of range ({ctx})"
        )))
    }
}

pub fn require_trump(state: &GameState, ctx: &'static str) -> Result<Suit, DomainError> {
    state.round.trump_suit.ok_or_else(|| {
        DomainError::precondition(format!("Invariant violated: trump must be set ({ctx})"))
    })
}

/// Take the staged cards, insisting on the exact count the next stage needs.
pub fn take_remaining_cards(
    state: &mut GameState,
    expected: usize,
    ctx: &'static str,
) -> Result<Vec<Card>, DomainError> {
    let staged = state.round.remaining_cards.as_ref().map_or(0, Vec::len);
    if staged != expected {
        return Err(DomainError::precondition(format!(
            "Invariant violated: expected {expected} staged cards, found {staged} ({ctx})"
        )));
    }
    Ok(state.round.remaining_cards.take().unwrap_or_default())
}
