use serde::Serialize;

use crate::domain::state::{GameState, Phase, Seat, TrickRecord};
use crate::domain::{Card, Suit};

/// The slice of state that edge-triggered transitions are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub phase: Phase,
    pub turn: Option<Seat>,
    pub winner: Option<Seat>,
}

impl GameLifecycleView {
    pub fn of(state: &GameState) -> Self {
        let turn = match state.phase {
            Phase::TrumpSelection | Phase::Dealing3 | Phase::CardPull | Phase::Playing => {
                Some(state.current_player_index)
            }
            Phase::Waiting | Phase::RoundComplete | Phase::Finished => None,
        };
        Self {
            phase: state.phase,
            turn,
            winner: state.winner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameTransition {
    /// Edge-triggered: the room moved to another phase.
    PhaseChanged { from: Phase, to: Phase },

    /// Edge-triggered: a specific seat is now expected to act.
    TurnBecame { seat: Seat },

    /// Edge-triggered: the game finished.
    GameEnded { winner: Seat },

    /// Explicit: trump was named for the round.
    TrumpChosen { seat: Seat, suit: Suit },

    /// Explicit: a card went into the current trick.
    CardPlayed { seat: Seat, card: Card },

    /// Explicit: the third card resolved a trick.
    TrickCompleted { trick: TrickRecord },

    /// Explicit: one pull exchange finished. Card identities are private to
    /// the two seats involved; fan-out decides who sees them.
    CardPulled {
        puller: Seat,
        target: Seat,
        pulled: Card,
        returned: Card,
    },

    /// Explicit: a round was scored.
    RoundScored {
        round: u32,
        deltas: Vec<i16>,
        scores: Vec<i16>,
    },
}

/// Derive edge-triggered transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    if before.phase != after.phase {
        transitions.push(GameTransition::PhaseChanged {
            from: before.phase,
            to: after.phase,
        });
    }

    // A phase change re-announces the turn even when the same seat keeps it.
    if let Some(seat) = after.turn {
        if before.turn != Some(seat) || before.phase != after.phase {
            transitions.push(GameTransition::TurnBecame { seat });
        }
    }

    if before.phase != Phase::Finished && after.phase == Phase::Finished {
        if let Some(winner) = after.winner {
            transitions.push(GameTransition::GameEnded { winner });
        }
    }

    transitions
}
