//! External room record: the shape persistence and fan-out exchange with the
//! engine. Field names are camelCase on the wire.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::card_pull::{CardPullState, PullPhase};
use crate::domain::dealing::build_deck;
use crate::domain::rules::{
    DECK_SIZE, PLAYERS, STAGED_AFTER_FIRST_DEAL, STAGED_FOR_FINAL_DEAL, TRICKS_PER_ROUND,
};
use crate::domain::state::{
    GameState, Phase, RoundState, Seat, SeatRoundResult, SeatState, TrickRecord,
};
use crate::domain::{Card, Suit};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Waiting,
    Active,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRecord {
    pub position: Seat,
    pub hand: Vec<Card>,
    pub target_tricks: u8,
    pub tricks_won: u8,
    pub score: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub status: RoomStatus,
    /// Set only while `status` is `active`.
    pub dealing_phase: Option<Phase>,
    pub trump_suit: Option<Suit>,
    pub dealer_index: Seat,
    pub current_player_index: Seat,
    pub first_trick_leader: Option<Seat>,
    pub round_number: u32,
    pub current_trick: Vec<(Seat, Card)>,
    pub remaining_cards: Option<Vec<Card>>,
    pub trump_led_at_start: Option<bool>,
    pub previous_round_results: Option<Vec<SeatRoundResult>>,
    pub card_pull_state: Option<CardPullState>,
    pub winner_position: Option<Seat>,
    pub rng_seed: u64,
    pub winning_score: i16,
    pub last_trick: Option<Vec<(Seat, Card)>>,
    #[serde(default)]
    pub completed_tricks: Vec<TrickRecord>,
    pub seats: Vec<SeatRecord>,
}

impl RoomRecord {
    /// Top-level phase encoded by `status` plus `dealingPhase`.
    pub fn phase(&self) -> Result<Phase, DomainError> {
        match (self.status, self.dealing_phase) {
            (RoomStatus::Waiting, None) => Ok(Phase::Waiting),
            (RoomStatus::Finished, None) => Ok(Phase::Finished),
            (
                RoomStatus::Active,
                Some(
                    p @ (Phase::TrumpSelection
                    | Phase::Dealing3
                    | Phase::CardPull
                    | Phase::Playing
                    | Phase::RoundComplete),
                ),
            ) => Ok(p),
            (status, dealing) => Err(DomainError::precondition(format!(
                "Record status {status:?} is inconsistent with dealing phase {dealing:?}"
            ))),
        }
    }
}

impl From<&GameState> for RoomRecord {
    fn from(state: &GameState) -> Self {
        let (status, dealing_phase) = match state.phase {
            Phase::Waiting => (RoomStatus::Waiting, None),
            Phase::Finished => (RoomStatus::Finished, None),
            p => (RoomStatus::Active, Some(p)),
        };

        Self {
            status,
            dealing_phase,
            trump_suit: state.round.trump_suit,
            dealer_index: state.dealer_index,
            current_player_index: state.current_player_index,
            first_trick_leader: state.round.first_trick_leader,
            round_number: state.round_number,
            current_trick: state.round.current_trick.clone(),
            remaining_cards: state.round.remaining_cards.clone(),
            trump_led_at_start: state.round.trump_led_at_start,
            previous_round_results: state.previous_round_results.clone(),
            card_pull_state: state.card_pull_state.clone(),
            winner_position: state.winner,
            rng_seed: state.rng_seed,
            winning_score: state.winning_score,
            last_trick: state.round.last_trick.clone(),
            completed_tricks: state.round.completed_tricks.clone(),
            seats: state
                .seats
                .iter()
                .map(|s| SeatRecord {
                    position: s.position,
                    hand: s.hand.clone(),
                    target_tricks: s.target_tricks,
                    tricks_won: s.tricks_won,
                    score: s.score,
                })
                .collect(),
        }
    }
}

impl TryFrom<RoomRecord> for GameState {
    type Error = DomainError;

    fn try_from(record: RoomRecord) -> Result<Self, Self::Error> {
        let phase = record.phase()?;
        validate_positions(&record)?;
        validate_cards(&record, phase)?;
        if let Some(pull) = &record.card_pull_state {
            validate_pull(&record, pull)?;
        }

        if record.winning_score < 1 {
            return Err(invalid("winning score must be at least 1"));
        }
        if (phase == Phase::CardPull) != record.card_pull_state.is_some() {
            return Err(invalid("card pull state must exist exactly during card_pull"));
        }
        if (phase == Phase::Finished) != record.winner_position.is_some() {
            return Err(invalid("winner must be set exactly when finished"));
        }
        if phase != Phase::Waiting && record.round_number == 0 {
            return Err(invalid("round number must be at least 1 once dealing began"));
        }

        let mut seat_records = record.seats;
        seat_records.sort_by_key(|s| s.position);
        let mut seats = [
            SeatState::empty(0),
            SeatState::empty(1),
            SeatState::empty(2),
        ];
        for (slot, s) in seats.iter_mut().zip(seat_records) {
            *slot = SeatState {
                position: s.position,
                hand: s.hand,
                tricks_won: s.tricks_won,
                target_tricks: s.target_tricks,
                score: s.score,
            };
        }

        Ok(GameState {
            phase,
            round_number: record.round_number,
            dealer_index: record.dealer_index,
            current_player_index: record.current_player_index,
            seats,
            round: RoundState {
                trump_suit: record.trump_suit,
                trump_led_at_start: record.trump_led_at_start,
                first_trick_leader: record.first_trick_leader,
                current_trick: record.current_trick,
                remaining_cards: record.remaining_cards,
                completed_tricks: record.completed_tricks,
                last_trick: record.last_trick,
            },
            previous_round_results: record.previous_round_results,
            card_pull_state: record.card_pull_state,
            winner: record.winner_position,
            rng_seed: record.rng_seed,
            winning_score: record.winning_score,
        })
    }
}

fn invalid(detail: &str) -> DomainError {
    DomainError::precondition(format!("Invalid room record: {detail}"))
}

fn valid_seat(seat: Seat) -> bool {
    (seat as usize) < PLAYERS
}

fn validate_positions(record: &RoomRecord) -> Result<(), DomainError> {
    if record.seats.len() != PLAYERS {
        return Err(invalid(&format!(
            "expected {PLAYERS} seats, found {}",
            record.seats.len()
        )));
    }
    let mut positions: Vec<Seat> = record.seats.iter().map(|s| s.position).collect();
    positions.sort_unstable();
    if positions != [0, 1, 2] {
        return Err(invalid(&format!("seat positions {positions:?}")));
    }

    let singles = [
        Some(record.dealer_index),
        Some(record.current_player_index),
        record.first_trick_leader,
        record.winner_position,
    ];
    let in_tricks = record
        .current_trick
        .iter()
        .chain(record.last_trick.iter().flatten())
        .map(|&(s, _)| s)
        .chain(record.completed_tricks.iter().map(|t| t.winner_position));
    let in_results = record
        .previous_round_results
        .iter()
        .flatten()
        .map(|r| r.position);
    if !singles
        .into_iter()
        .flatten()
        .chain(in_tricks)
        .chain(in_results)
        .all(valid_seat)
    {
        return Err(invalid("seat index out of range"));
    }
    if record.current_trick.len() >= PLAYERS {
        return Err(invalid("current trick holds a full trick"));
    }
    if record.completed_tricks.len() > TRICKS_PER_ROUND as usize {
        return Err(invalid("more than ten completed tricks"));
    }
    Ok(())
}

/// Every live card comes from the deck exactly once, and staging matches the phase.
fn validate_cards(record: &RoomRecord, phase: Phase) -> Result<(), DomainError> {
    let deck: HashSet<Card> = build_deck().into_iter().collect();
    let staged = record.remaining_cards.as_deref().unwrap_or_default();

    let expected_staged = match phase {
        Phase::TrumpSelection => STAGED_AFTER_FIRST_DEAL,
        Phase::Dealing3 => STAGED_FOR_FINAL_DEAL,
        _ => 0,
    };
    if staged.len() != expected_staged {
        return Err(invalid(&format!(
            "{} staged cards during {}, expected {expected_staged}",
            staged.len(),
            phase.as_str()
        )));
    }

    let live = record
        .seats
        .iter()
        .flat_map(|s| s.hand.iter())
        .chain(record.current_trick.iter().map(|(_, c)| c))
        .chain(staged.iter())
        .chain(
            record
                .completed_tricks
                .iter()
                .flat_map(|t| t.cards_played.iter().map(|(_, c)| c)),
        );

    let mut seen = HashSet::new();
    for card in live {
        if !deck.contains(card) {
            return Err(invalid(&format!("{card} is not in the deck")));
        }
        if !seen.insert(*card) {
            return Err(invalid(&format!("duplicate card {card}")));
        }
    }

    let dealt = !matches!(phase, Phase::Waiting);
    if dealt && seen.len() != DECK_SIZE {
        return Err(invalid(&format!(
            "{} cards accounted for, expected {DECK_SIZE}",
            seen.len()
        )));
    }
    Ok(())
}

/// Pull bookkeeping must point at real seats and, mid-pull, at a real card.
fn validate_pull(record: &RoomRecord, pull: &CardPullState) -> Result<(), DomainError> {
    let seats = pull
        .pullers
        .iter()
        .map(|p| p.position)
        .chain(pull.under_scorers.iter().map(|u| u.position))
        .chain(pull.selected_target);
    if !seats.into_iter().all(valid_seat) {
        return Err(invalid("card pull seat index out of range"));
    }
    if let Some(target) = pull.selected_target {
        if !pull.is_under_scorer(target) {
            return Err(invalid("card pull target is not an under-scorer"));
        }
    }
    if pull.pullers.iter().any(|p| pull.is_under_scorer(p.position)) {
        return Err(invalid("a seat cannot both pull and be pulled from"));
    }

    let Some(puller) = pull.current_puller() else {
        return Err(invalid("card pull has no current puller"));
    };
    if puller.pulls_remaining == 0 {
        return Err(invalid("current puller has no pulls left"));
    }
    if record.current_player_index != puller.position {
        return Err(invalid("current player is not the current puller"));
    }

    let needs_target = matches!(pull.phase, PullPhase::SelectingCard | PullPhase::ReturningCard);
    let needs_card = pull.phase == PullPhase::ReturningCard;
    if pull.phase == PullPhase::Complete
        || needs_target != pull.selected_target.is_some()
        || needs_card != pull.pulled_card.is_some()
        || needs_card != pull.pulled_card_index.is_some()
    {
        return Err(invalid(&format!(
            "card pull fields inconsistent with {:?}",
            pull.phase
        )));
    }

    if let (Some(target), Some(card), Some(index)) =
        (pull.selected_target, pull.pulled_card, pull.pulled_card_index)
    {
        let held = record
            .seats
            .iter()
            .find(|s| s.position == target)
            .and_then(|s| s.hand.get(index));
        if held != Some(&card) {
            return Err(invalid("pulled card is not at its index in the target hand"));
        }
    }
    Ok(())
}
