//! Round and game orchestration as a pure reducer.
//!
//! `reduce` never mutates its input. It clones the state, applies one action
//! and hands back either the new state plus the transitions it produced, or
//! the reason the action was ignored.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::domain::card_pull::{self, CardPullState};
use crate::domain::dealing::{deal, shuffled_deck};
use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::domain::rules::{
    five_quota_seat, target_tricks, DEAL_STAGES, STAGED_AFTER_FIRST_DEAL, STAGED_FOR_FINAL_DEAL,
};
use crate::domain::scoring::apply_round_scoring;
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::state::{require_seat, take_remaining_cards, GameState, Phase, RoundState, Seat};
use crate::domain::tricks::play_card;
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Every way a seat can drive the game forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameAction {
    StartDealing,
    ChooseTrump { suit: Suit },
    DealFinal,
    PlayCard { card: Card },
    SelectPullTarget { target: Seat },
    SelectPullCardIndex { index: usize },
    ReturnPullCard { card: Card },
    StartNextRound,
}

impl GameAction {
    pub const fn name(&self) -> &'static str {
        match self {
            GameAction::StartDealing => "start_dealing",
            GameAction::ChooseTrump { .. } => "choose_trump",
            GameAction::DealFinal => "deal_final",
            GameAction::PlayCard { .. } => "play_card",
            GameAction::SelectPullTarget { .. } => "select_pull_target",
            GameAction::SelectPullCardIndex { .. } => "select_pull_card_index",
            GameAction::ReturnPullCard { .. } => "return_pull_card",
            GameAction::StartNextRound => "start_next_round",
        }
    }
}

/// Outcome of `reduce`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reduction {
    Applied {
        state: GameState,
        transitions: Vec<GameTransition>,
    },
    /// The action belonged to another phase; the state is untouched.
    Ignored { reason: String },
}

impl Reduction {
    pub fn is_applied(&self) -> bool {
        matches!(self, Reduction::Applied { .. })
    }
}

/// Seat the state is waiting on, or `None` when any seat may act.
pub fn expected_actor(state: &GameState) -> Option<Seat> {
    GameLifecycleView::of(state).turn
}

/// Apply `action` on behalf of `actor`.
pub fn reduce(
    state: &GameState,
    actor: Seat,
    action: GameAction,
) -> Result<Reduction, DomainError> {
    require_seat(actor, "reduce")?;

    let before = GameLifecycleView::of(state);
    let mut next = state.clone();
    let mut explicit = Vec::new();

    match apply(&mut next, actor, action, &mut explicit) {
        Ok(()) => {}
        Err(DomainError::StalePhase(reason)) => {
            debug!(
                seat = actor,
                action = action.name(),
                phase = state.phase.as_str(),
                %reason,
                "Ignoring stale action"
            );
            return Ok(Reduction::Ignored { reason });
        }
        Err(e) if e.is_recoverable() => {
            debug!(seat = actor, action = action.name(), error = %e, "Action rejected");
            return Err(e);
        }
        Err(e) => {
            error!(
                seat = actor,
                action = action.name(),
                phase = state.phase.as_str(),
                error = %e,
                "Engine precondition failed"
            );
            return Err(e);
        }
    }

    let after = GameLifecycleView::of(&next);
    let mut transitions = explicit;
    transitions.extend(derive_game_transitions(&before, &after));

    debug!(
        seat = actor,
        action = action.name(),
        phase = next.phase.as_str(),
        transitions = transitions.len(),
        "Action applied"
    );

    Ok(Reduction::Applied {
        state: next,
        transitions,
    })
}

fn apply(
    state: &mut GameState,
    actor: Seat,
    action: GameAction,
    out: &mut Vec<GameTransition>,
) -> Result<(), DomainError> {
    match action {
        GameAction::StartDealing => start_dealing(state),
        GameAction::ChooseTrump { suit } => choose_trump(state, actor, suit, out),
        GameAction::DealFinal => deal_final(state, actor),
        GameAction::PlayCard { card } => play(state, actor, card, out),
        GameAction::SelectPullTarget { target } => {
            require_seat(target, "pull target")?;
            card_pull::select_target(state, actor, target)
        }
        GameAction::SelectPullCardIndex { index } => {
            card_pull::select_card_index(state, actor, index).map(|_| ())
        }
        GameAction::ReturnPullCard { card } => return_pull_card(state, actor, card, out),
        GameAction::StartNextRound => start_next_round(state),
    }
}

fn require_phase(state: &GameState, phase: Phase, action: &str) -> Result<(), DomainError> {
    if state.phase == phase {
        Ok(())
    } else {
        Err(DomainError::stale(format!(
            "{action} needs {}, room is in {}",
            phase.as_str(),
            state.phase.as_str()
        )))
    }
}

fn start_dealing(state: &mut GameState) -> Result<(), DomainError> {
    require_phase(state, Phase::Waiting, "start_dealing")?;
    state.round_number = 1;
    begin_round(state)
}

fn start_next_round(state: &mut GameState) -> Result<(), DomainError> {
    require_phase(state, Phase::RoundComplete, "start_next_round")?;
    begin_round(state)
}

/// Shuffle, deal the first five per seat and assign quotas.
fn begin_round(state: &mut GameState) -> Result<(), DomainError> {
    let seed = derive_dealing_seed(state.rng_seed, state.round_number);
    let deck = shuffled_deck(seed);
    let (hands, staged) = deal(&deck, DEAL_STAGES[0])?;

    let dealer = state.dealer_index;
    for (seat, hand) in state.seats.iter_mut().zip(hands) {
        seat.hand = hand;
        seat.tricks_won = 0;
        seat.target_tricks = target_tricks(seat.position, dealer);
    }
    state.round = RoundState {
        remaining_cards: Some(staged),
        ..RoundState::empty()
    };
    state.card_pull_state = None;
    state.current_player_index = five_quota_seat(dealer);
    state.phase = Phase::TrumpSelection;

    info!(
        round = state.round_number,
        dealer,
        trump_chooser = state.current_player_index,
        "Round started"
    );
    Ok(())
}

fn choose_trump(
    state: &mut GameState,
    actor: Seat,
    suit: Suit,
    out: &mut Vec<GameTransition>,
) -> Result<(), DomainError> {
    require_phase(state, Phase::TrumpSelection, "choose_trump")?;
    let chooser = five_quota_seat(state.dealer_index);
    if actor != chooser {
        return Err(DomainError::illegal_move(
            ValidationKind::OutOfTurn,
            "Only the 5-quota seat chooses trump",
        ));
    }

    let staged = take_remaining_cards(state, STAGED_AFTER_FIRST_DEAL, "choose_trump")?;
    let (hands, rest) = deal(&staged, DEAL_STAGES[1])?;
    for (seat, cards) in state.seats.iter_mut().zip(hands) {
        seat.hand.extend(cards);
    }
    state.round.remaining_cards = Some(rest);
    state.round.trump_suit = Some(suit);
    state.current_player_index = state.dealer_index;
    state.phase = Phase::Dealing3;

    debug!(round = state.round_number, seat = actor, trump = %suit, "Trump chosen");
    out.push(GameTransition::TrumpChosen { seat: actor, suit });
    Ok(())
}

fn deal_final(state: &mut GameState, actor: Seat) -> Result<(), DomainError> {
    require_phase(state, Phase::Dealing3, "deal_final")?;
    if actor != state.dealer_index {
        return Err(DomainError::illegal_move(
            ValidationKind::OutOfTurn,
            "Only the dealer deals the final cards",
        ));
    }

    let staged = take_remaining_cards(state, STAGED_FOR_FINAL_DEAL, "deal_final")?;
    let (hands, _) = deal(&staged, DEAL_STAGES[2])?;
    for (seat, cards) in state.seats.iter_mut().zip(hands) {
        seat.hand.extend(cards);
    }

    let leader = five_quota_seat(state.dealer_index);
    state.round.first_trick_leader = Some(leader);
    state.round.trump_led_at_start = None;

    let pull = match state.previous_round_results.as_deref() {
        Some(results) if state.round_number > 1 && !results.is_empty() => {
            CardPullState::begin(results, state.dealer_index)
        }
        _ => None,
    };

    match pull.as_ref().and_then(CardPullState::current_puller) {
        Some(first) => {
            state.current_player_index = first.position;
            state.phase = Phase::CardPull;
            info!(
                round = state.round_number,
                first_puller = first.position,
                "Card pull started"
            );
        }
        None => {
            state.current_player_index = leader;
            state.phase = Phase::Playing;
        }
    }
    state.card_pull_state = pull;
    Ok(())
}

fn play(
    state: &mut GameState,
    actor: Seat,
    card: Card,
    out: &mut Vec<GameTransition>,
) -> Result<(), DomainError> {
    let result = play_card(state, actor, card)?;
    out.push(GameTransition::CardPlayed { seat: actor, card });

    if let Some(trick) = result.completed_trick {
        out.push(GameTransition::TrickCompleted { trick });
    }

    if result.round_over {
        let round = state.round_number;
        let score = apply_round_scoring(state);
        out.push(GameTransition::RoundScored {
            round,
            deltas: score.deltas,
            scores: state.scores().to_vec(),
        });
    }
    Ok(())
}

fn return_pull_card(
    state: &mut GameState,
    actor: Seat,
    card: Card,
    out: &mut Vec<GameTransition>,
) -> Result<(), DomainError> {
    let swap = card_pull::return_card(state, actor, card)?;
    out.push(GameTransition::CardPulled {
        puller: swap.puller,
        target: swap.target,
        pulled: swap.pulled,
        returned: swap.returned,
    });

    if swap.protocol_complete {
        let leader = state.round.first_trick_leader.ok_or_else(|| {
            DomainError::precondition("Invariant violated: no first trick leader after pull")
        })?;
        state.card_pull_state = None;
        state.current_player_index = leader;
        state.phase = Phase::Playing;
        info!(round = state.round_number, leader, "Card pull complete");
    }
    Ok(())
}
