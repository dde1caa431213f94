//! Card-pull protocol run between rounds.
//!
//! Seats that beat their quota last round ("over-scorers") each take a card
//! blindly from a seat that fell short ("under-scorer") and hand back one of
//! their own, once per extra trick won.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::count_suit;
use crate::domain::state::{
    clockwise_distance, seat_offset, GameState, Phase, Seat, SeatRoundResult,
};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Minimum cards of a suit the puller must keep when returning off-suit.
const MIN_KEPT_OF_SUIT: usize = 2;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullPhase {
    SelectingTarget,
    SelectingCard,
    ReturningCard,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puller {
    pub position: Seat,
    pub extra_tricks: u8,
    pub pulls_remaining: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderScorer {
    pub position: Seat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPullState {
    pub pullers: Vec<Puller>,
    pub under_scorers: Vec<UnderScorer>,
    pub current_puller_index: usize,
    pub phase: PullPhase,
    pub selected_target: Option<Seat>,
    pub pulled_card: Option<Card>,
    pub pulled_card_index: Option<usize>,
}

impl CardPullState {
    /// Start the protocol, or `None` when either side is empty.
    pub fn begin(previous_results: &[SeatRoundResult], dealer: Seat) -> Option<Self> {
        let (pullers, under_scorers) = calculate_eligibility(previous_results, dealer);
        if pullers.is_empty() || under_scorers.is_empty() {
            return None;
        }
        Some(Self {
            pullers,
            under_scorers,
            current_puller_index: 0,
            phase: PullPhase::SelectingTarget,
            selected_target: None,
            pulled_card: None,
            pulled_card_index: None,
        })
    }

    pub fn current_puller(&self) -> Option<&Puller> {
        self.pullers.get(self.current_puller_index)
    }

    pub fn is_under_scorer(&self, position: Seat) -> bool {
        self.under_scorers.iter().any(|u| u.position == position)
    }
}

/// Split last round's seats into over-scorers (sorted pull order) and under-scorers.
///
/// Over-scorers sort by extra tricks descending. Ties go clockwise starting
/// from the seat after the dealer, so the dealer itself sorts last.
pub fn calculate_eligibility(
    previous_results: &[SeatRoundResult],
    dealer: Seat,
) -> (Vec<Puller>, Vec<UnderScorer>) {
    let mut over = Vec::new();
    let mut under = Vec::new();

    for result in previous_results {
        let diff = result.overachievement();
        if diff > 0 {
            over.push(Puller {
                position: result.position,
                extra_tricks: diff as u8,
                pulls_remaining: diff as u8,
            });
        } else if diff < 0 {
            under.push(UnderScorer {
                position: result.position,
            });
        }
    }

    let first = seat_offset(dealer, 1);
    over.sort_by(|a, b| {
        b.extra_tricks.cmp(&a.extra_tricks).then_with(|| {
            clockwise_distance(a.position, first).cmp(&clockwise_distance(b.position, first))
        })
    });

    (over, under)
}

/// Whether the puller may hand back `return_card` in exchange for `pulled_card`.
pub fn can_return(
    return_card: Card,
    pulled_card: Card,
    puller_hand: &[Card],
) -> Result<(), DomainError> {
    if return_card == pulled_card || return_card.suit == pulled_card.suit {
        return Ok(());
    }
    if count_suit(puller_hand, return_card.suit) > MIN_KEPT_OF_SUIT {
        return Ok(());
    }
    Err(DomainError::illegal_pull(
        ValidationKind::MustKeepSuit,
        "must keep at least 2 of that suit",
    ))
}

/// A completed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullSwap {
    pub puller: Seat,
    pub target: Seat,
    pub pulled: Card,
    pub returned: Card,
    /// True when this was the last pull of the whole protocol.
    pub protocol_complete: bool,
}

fn pull_state_for<'a>(
    state: &'a mut GameState,
    who: Seat,
    expected: PullPhase,
) -> Result<&'a mut CardPullState, DomainError> {
    if state.phase != Phase::CardPull {
        return Err(DomainError::stale(format!(
            "No card pull in progress during {}",
            state.phase.as_str()
        )));
    }
    let pull = state.card_pull_state.as_mut().ok_or_else(|| {
        DomainError::precondition("Invariant violated: card_pull phase without pull state")
    })?;

    let puller = pull
        .current_puller()
        .ok_or_else(|| DomainError::precondition("Invariant violated: no current puller"))?;
    if puller.position != who {
        return Err(DomainError::illegal_pull(
            ValidationKind::NotCurrentPuller,
            "Not the current puller",
        ));
    }
    if pull.phase != expected {
        return Err(DomainError::illegal_pull(
            ValidationKind::PullPhaseMismatch,
            format!("Pull is in {:?}, not {:?}", pull.phase, expected),
        ));
    }
    Ok(pull)
}

/// Step 1: the current puller names an under-scorer.
pub fn select_target(state: &mut GameState, who: Seat, target: Seat) -> Result<(), DomainError> {
    let pull = pull_state_for(state, who, PullPhase::SelectingTarget)?;
    if !pull.is_under_scorer(target) {
        return Err(DomainError::illegal_pull(
            ValidationKind::InvalidPullTarget,
            format!("Seat {target} is not an under-scorer"),
        ));
    }
    pull.selected_target = Some(target);
    pull.phase = PullPhase::SelectingCard;
    debug!(puller = who, target, "Pull target selected");
    Ok(())
}

/// Step 2: the current puller names a blind index into the target's hand.
pub fn select_card_index(
    state: &mut GameState,
    who: Seat,
    index: usize,
) -> Result<Card, DomainError> {
    let target = {
        let pull = pull_state_for(state, who, PullPhase::SelectingCard)?;
        pull.selected_target
            .ok_or_else(|| DomainError::precondition("Invariant violated: no selected target"))?
    };

    let target_hand = state.hand(target);
    let Some(&card) = target_hand.get(index) else {
        return Err(DomainError::illegal_pull(
            ValidationKind::InvalidPullIndex,
            format!(
                "Index {index} out of range for a hand of {}",
                target_hand.len()
            ),
        ));
    };

    let pull = pull_state_for(state, who, PullPhase::SelectingCard)?;
    pull.pulled_card = Some(card);
    pull.pulled_card_index = Some(index);
    pull.phase = PullPhase::ReturningCard;
    debug!(puller = who, target, index, "Pull card selected");
    Ok(card)
}

/// Step 3: the current puller hands back a card and the two cards swap hands.
pub fn return_card(
    state: &mut GameState,
    who: Seat,
    return_card: Card,
) -> Result<PullSwap, DomainError> {
    let (target, pulled) = {
        let pull = pull_state_for(state, who, PullPhase::ReturningCard)?;
        match (pull.selected_target, pull.pulled_card) {
            (Some(t), Some(c)) => (t, c),
            _ => {
                return Err(DomainError::precondition(
                    "Invariant violated: returning without a pulled card",
                ))
            }
        }
    };

    let Some(return_pos) = state.hand(who).iter().position(|&c| c == return_card) else {
        return Err(DomainError::illegal_pull(
            ValidationKind::CardNotInHand,
            "Card not in hand",
        ));
    };
    can_return(return_card, pulled, state.hand(who))?;

    let Some(pulled_pos) = state.hand(target).iter().position(|&c| c == pulled) else {
        return Err(DomainError::precondition(
            "Invariant violated: pulled card no longer in target hand",
        ));
    };

    state.seat_mut(who).hand.remove(return_pos);
    state.seat_mut(who).hand.push(pulled);
    state.seat_mut(target).hand.remove(pulled_pos);
    state.seat_mut(target).hand.push(return_card);

    let pull = pull_state_for(state, who, PullPhase::ReturningCard)?;
    pull.selected_target = None;
    pull.pulled_card = None;
    pull.pulled_card_index = None;

    let puller = &mut pull.pullers[pull.current_puller_index];
    puller.pulls_remaining = puller.pulls_remaining.saturating_sub(1);
    if puller.pulls_remaining == 0 {
        pull.current_puller_index += 1;
    }

    let next_puller = pull.current_puller().map(|p| p.position);
    pull.phase = if next_puller.is_some() {
        PullPhase::SelectingTarget
    } else {
        PullPhase::Complete
    };
    if let Some(next) = next_puller {
        state.current_player_index = next;
    }

    debug!(
        puller = who,
        target,
        pulled = %pulled,
        returned = %return_card,
        "Pull exchange completed"
    );

    Ok(PullSwap {
        puller: who,
        target,
        pulled,
        returned: return_card,
        protocol_complete: next_puller.is_none(),
    })
}

/// Legal targets for `who`; empty unless they are the puller choosing a target.
pub fn legal_targets_for(state: &GameState, who: Seat) -> Vec<Seat> {
    let Some(pull) = state.card_pull_state.as_ref() else {
        return Vec::new();
    };
    match pull.current_puller() {
        Some(p) if p.position == who && pull.phase == PullPhase::SelectingTarget => {
            pull.under_scorers.iter().map(|u| u.position).collect()
        }
        _ => Vec::new(),
    }
}

/// Cards `who` may hand back for the currently pulled card.
pub fn legal_returns_for(state: &GameState, who: Seat) -> Vec<Card> {
    let Some(pull) = state.card_pull_state.as_ref() else {
        return Vec::new();
    };
    let (Some(p), Some(pulled)) = (pull.current_puller(), pull.pulled_card) else {
        return Vec::new();
    };
    if p.position != who || pull.phase != PullPhase::ReturningCard {
        return Vec::new();
    }
    let hand = state.hand(who);
    let mut v: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|&c| can_return(c, pulled, hand).is_ok())
        .collect();
    v.sort();
    v
}
