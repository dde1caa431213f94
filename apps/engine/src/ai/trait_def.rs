//! AI player trait definition.

use thiserror::Error;

use crate::domain::player_view::SeatView;
use crate::domain::state::Seat;
use crate::domain::{Card, Suit};

/// Errors that can occur during AI decision-making.
#[derive(Debug, Error)]
pub enum AiError {
    /// AI encountered an internal error
    #[error("AI internal error: {0}")]
    Internal(String),
    /// AI had no legal option to choose from
    #[error("AI invalid move: {0}")]
    InvalidMove(String),
}

/// Trait for AI players.
///
/// Implementations receive what their seat may see and must choose a legal
/// action. Query the `legal_*` helpers on [`SeatView`] for the options.
pub trait AiPlayer: Send + Sync {
    /// Choose trump. Called on the 5-quota seat after the first five cards.
    fn choose_trump(&self, view: &SeatView) -> Result<Suit, AiError>;

    /// Choose a card to play; `view.legal_plays()` lists the options.
    fn choose_play(&self, view: &SeatView) -> Result<Card, AiError>;

    /// Choose which under-scorer to pull from.
    fn choose_pull_target(&self, view: &SeatView) -> Result<Seat, AiError>;

    /// Choose a blind index into the target's hand.
    fn choose_pull_index(&self, view: &SeatView) -> Result<usize, AiError>;

    /// Choose the card to hand back for the pulled one.
    fn choose_return(&self, view: &SeatView) -> Result<Card, AiError>;
}
