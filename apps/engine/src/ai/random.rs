//! Random AI player - makes random legal moves.
//!
//! [`RandomPlayer`] is the baseline [`AiPlayer`](super::AiPlayer): it picks
//! uniformly among the options the seat view reports as legal, and can be
//! seeded for reproducible games.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{AiError, AiPlayer};
use crate::domain::player_view::SeatView;
use crate::domain::state::Seat;
use crate::domain::{Card, Suit};

/// AI that makes random legal moves.
///
/// The RNG sits behind a `Mutex` because `AiPlayer` methods take `&self`.
///
/// ```rust,ignore
/// let seeded = RandomPlayer::new(Some(12345));
/// let entropy = RandomPlayer::new(None);
/// ```
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";

    /// `Some(seed)` for reproducible play, `None` to draw from the OS RNG.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn pick<T: Copy>(&self, options: &[T], what: &str) -> Result<T, AiError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;
        options
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::InvalidMove(format!("No legal {what} available")))
    }
}

impl AiPlayer for RandomPlayer {
    fn choose_trump(&self, view: &SeatView) -> Result<Suit, AiError> {
        self.pick(&view.legal_trumps(), "trump")
    }

    fn choose_play(&self, view: &SeatView) -> Result<Card, AiError> {
        self.pick(view.legal_plays(), "plays")
    }

    fn choose_pull_target(&self, view: &SeatView) -> Result<Seat, AiError> {
        self.pick(view.legal_pull_targets(), "pull targets")
    }

    fn choose_pull_index(&self, view: &SeatView) -> Result<usize, AiError> {
        let indices: Vec<usize> = view.legal_pull_indices().collect();
        self.pick(&indices, "pull indices")
    }

    fn choose_return(&self, view: &SeatView) -> Result<Card, AiError> {
        self.pick(view.legal_returns(), "returns")
    }
}
