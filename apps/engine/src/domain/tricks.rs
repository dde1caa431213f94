use tracing::debug;

use crate::domain::rules::{HAND_SIZE, PLAYERS};
use crate::domain::state::{next_player, require_trump, GameState, Phase, Seat, TrickRecord};
use crate::domain::{card_beats, hand_has_other_than, hand_has_suit, Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Outcome of a legality check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveCheck {
    Legal,
    Illegal {
        kind: ValidationKind,
        reason: &'static str,
    },
}

impl MoveCheck {
    fn illegal(kind: ValidationKind, reason: &'static str) -> Self {
        MoveCheck::Illegal { kind, reason }
    }

    pub fn is_legal(&self) -> bool {
        matches!(self, MoveCheck::Legal)
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        match self {
            MoveCheck::Legal => Ok(()),
            MoveCheck::Illegal { kind, reason } => Err(DomainError::illegal_move(kind, reason)),
        }
    }
}

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// The resolved trick, if this play was the third card.
    pub completed_trick: Option<TrickRecord>,
    /// Whether every hand is now empty.
    pub round_over: bool,
}

/// Trick index (0..=9) for a seat holding `hand_len` cards.
#[inline]
pub fn trick_index_for(hand_len: usize) -> u8 {
    HAND_SIZE.saturating_sub(hand_len) as u8
}

/// Check whether `card` may be played from `hand` into `partial_trick`.
///
/// Does not check that `card` is in `hand`; callers do that first.
pub fn is_legal_move(
    card: Card,
    hand: &[Card],
    partial_trick: &[(Seat, Card)],
    trump_suit: Option<Suit>,
    trick_index: u8,
    trump_led_at_start: Option<bool>,
) -> MoveCheck {
    if let Some(&(_, lead_card)) = partial_trick.first() {
        let lead = lead_card.suit;
        if card.suit != lead && hand_has_suit(hand, lead) {
            return MoveCheck::illegal(ValidationKind::MustFollowSuit, "must follow suit");
        }
        return MoveCheck::Legal;
    }

    // Leading
    let Some(trump) = trump_suit else {
        return MoveCheck::Legal;
    };
    if trick_index == 0 {
        return MoveCheck::Legal;
    }

    match trump_led_at_start {
        Some(true) if card.suit != trump && hand_has_suit(hand, trump) => {
            MoveCheck::illegal(ValidationKind::MustLeadTrump, "must lead trump")
        }
        Some(false) if card.suit == trump && hand_has_other_than(hand, trump) => {
            MoveCheck::illegal(
                ValidationKind::CannotLeadTrump,
                "cannot lead trump unless forced",
            )
        }
        _ => MoveCheck::Legal,
    }
}

/// Cards in `hand` that `is_legal_move` accepts, sorted.
pub fn legal_moves(
    hand: &[Card],
    partial_trick: &[(Seat, Card)],
    trump_suit: Option<Suit>,
    trick_index: u8,
    trump_led_at_start: Option<bool>,
) -> Vec<Card> {
    let mut v: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|&c| {
            is_legal_move(
                c,
                hand,
                partial_trick,
                trump_suit,
                trick_index,
                trump_led_at_start,
            )
            .is_legal()
        })
        .collect();
    v.sort();
    v
}

/// Legal cards for `who` in the current state; empty unless it is their turn to play.
pub fn legal_moves_for(state: &GameState, who: Seat) -> Vec<Card> {
    if state.phase != Phase::Playing || state.current_player_index != who {
        return Vec::new();
    }
    legal_moves(
        state.hand(who),
        &state.round.current_trick,
        state.round.trump_suit,
        state.trick_index(who),
        state.round.trump_led_at_start,
    )
}

/// Winning seat of a trick. `None` only for an empty play list.
pub fn evaluate_trick(plays: &[(Seat, Card)], trump_suit: Option<Suit>) -> Option<Seat> {
    let (&(first_seat, first_card), rest) = plays.split_first()?;
    let lead = first_card.suit;

    let mut winner = (first_seat, first_card);
    for &(seat, card) in rest {
        if card_beats(card, winner.1, lead, trump_suit) {
            winner = (seat, card);
        }
    }
    Some(winner.0)
}

/// Play a card into the current trick, enforcing phase, turn, and lead/follow rules.
pub fn play_card(
    state: &mut GameState,
    who: Seat,
    card: Card,
) -> Result<PlayCardResult, DomainError> {
    if state.phase != Phase::Playing {
        return Err(DomainError::stale(format!(
            "Cannot play a card during {}",
            state.phase.as_str()
        )));
    }

    require_trump(state, "play_card")?;

    if state.current_player_index != who {
        return Err(DomainError::illegal_move(
            ValidationKind::OutOfTurn,
            "Out of turn",
        ));
    }

    let Some(pos) = state.hand(who).iter().position(|&c| c == card) else {
        return Err(DomainError::illegal_move(
            ValidationKind::CardNotInHand,
            "Card not in hand",
        ));
    };

    let trick_index = state.trick_index(who);
    is_legal_move(
        card,
        state.hand(who),
        &state.round.current_trick,
        state.round.trump_suit,
        trick_index,
        state.round.trump_led_at_start,
    )
    .into_result()?;

    // The opening lead of the round decides how every later lead is constrained.
    if trick_index == 0 && state.round.current_trick.is_empty() {
        let led_trump = state.round.trump_suit == Some(card.suit);
        state.round.trump_led_at_start = Some(led_trump);
        debug!(seat = who, %card, led_trump, "Opening lead latched");
    }

    let removed = state.seat_mut(who).hand.remove(pos);
    state.round.current_trick.push((who, removed));
    state.current_player_index = next_player(who);

    let mut result = PlayCardResult {
        completed_trick: None,
        round_over: false,
    };

    if state.round.current_trick.len() < PLAYERS {
        return Ok(result);
    }

    let plays = std::mem::take(&mut state.round.current_trick);
    let winner = evaluate_trick(&plays, state.round.trump_suit)
        .ok_or_else(|| DomainError::precondition("Cannot evaluate an empty trick"))?;

    state.seat_mut(winner).tricks_won += 1;
    state.current_player_index = winner;

    let record = TrickRecord {
        round_number: state.round_number,
        trick_number: state.round.completed_tricks.len() as u8 + 1,
        cards_played: plays.clone(),
        winner_position: winner,
    };
    debug!(
        round = record.round_number,
        trick = record.trick_number,
        winner,
        "Trick resolved"
    );
    state.round.completed_tricks.push(record.clone());
    state.round.last_trick = Some(plays);

    result.completed_trick = Some(record);
    result.round_over = state.seats.iter().all(|s| s.hand.is_empty());
    Ok(result)
}
