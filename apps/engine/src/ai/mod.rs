//! AI players: the decision trait, a random baseline and turn driving.

mod random;
mod trait_def;

pub use random::RandomPlayer;
pub use trait_def::{AiError, AiPlayer};

use crate::domain::card_pull::PullPhase;
use crate::domain::controller::GameAction;
use crate::domain::player_view::SeatView;
use crate::domain::rules::PLAYERS;
use crate::domain::state::{GameState, Phase, Seat};

/// Create an AI player by name. Currently only `"random"`.
pub fn create_ai(ai_type: &str, seed: Option<u64>) -> Option<Box<dyn AiPlayer>> {
    match ai_type {
        "random" => Some(Box::new(RandomPlayer::new(seed))),
        _ => None,
    }
}

/// Ask whichever seat must act for its next action.
///
/// Returns `None` once the game is finished. Phases where any seat may act
/// are driven by the dealer's seat.
pub fn drive_turn(
    state: &GameState,
    players: &[Box<dyn AiPlayer>; PLAYERS],
) -> Result<Option<(Seat, GameAction)>, AiError> {
    let seat = state.current_player_index;
    let action = match state.phase {
        Phase::Finished => return Ok(None),
        Phase::Waiting => return Ok(Some((state.dealer_index, GameAction::StartDealing))),
        Phase::RoundComplete => {
            return Ok(Some((state.dealer_index, GameAction::StartNextRound)))
        }
        Phase::Dealing3 => GameAction::DealFinal,
        Phase::TrumpSelection => {
            let view = view_for(state, seat)?;
            GameAction::ChooseTrump {
                suit: players[seat as usize].choose_trump(&view)?,
            }
        }
        Phase::Playing => {
            let view = view_for(state, seat)?;
            GameAction::PlayCard {
                card: players[seat as usize].choose_play(&view)?,
            }
        }
        Phase::CardPull => {
            let view = view_for(state, seat)?;
            let player = &players[seat as usize];
            match view.pull.as_ref().map(|p| p.phase) {
                Some(PullPhase::SelectingTarget) => GameAction::SelectPullTarget {
                    target: player.choose_pull_target(&view)?,
                },
                Some(PullPhase::SelectingCard) => GameAction::SelectPullCardIndex {
                    index: player.choose_pull_index(&view)?,
                },
                Some(PullPhase::ReturningCard) => GameAction::ReturnPullCard {
                    card: player.choose_return(&view)?,
                },
                Some(PullPhase::Complete) | None => {
                    return Err(AiError::Internal(
                        "card pull phase without a pending pull step".into(),
                    ))
                }
            }
        }
    };
    Ok(Some((seat, action)))
}

fn view_for(state: &GameState, seat: Seat) -> Result<SeatView, AiError> {
    SeatView::for_seat(state, seat).map_err(|e| AiError::Internal(e.to_string()))
}
