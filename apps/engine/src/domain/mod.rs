//! Domain layer: pure game logic types and helpers.

pub mod card_pull;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod controller;
pub mod dealing;
pub mod game_transition;
pub mod player_view;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_card_pull;
#[cfg(test)]
mod tests_controller;
#[cfg(test)]
mod tests_props_trick_winner;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use card_pull::{CardPullState, PullPhase, Puller, UnderScorer};
pub use cards_logic::{card_beats, count_suit, hand_has_other_than, hand_has_suit};
pub use cards_types::{Card, Rank, Suit};
pub use controller::{reduce, GameAction, Reduction};
pub use dealing::{build_deck, deal, shuffled_deck};
pub use game_transition::GameTransition;
pub use player_view::SeatView;
pub use seed_derivation::derive_dealing_seed;
pub use snapshot::{RoomRecord, RoomStatus, SeatRecord};
pub use state::{GameState, Phase, Seat, SeatRoundResult, TrickRecord};
