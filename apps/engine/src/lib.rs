#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Rules engine and turn orchestration for the 3-seat trick-taking game 3-2-5.

pub mod ai;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use ai::{drive_turn, AiError, AiPlayer, RandomPlayer};
pub use config::{ConfigError, EngineConfig};
pub use domain::controller::{reduce, GameAction, Reduction};
pub use domain::game_transition::GameTransition;
pub use domain::player_view::SeatView;
pub use domain::snapshot::{RoomRecord, RoomStatus};
pub use domain::state::{GameState, Phase, Seat};
pub use errors::{DomainError, ErrorCode, ValidationKind};
pub use services::room::{spawn_room, RoomHandle, RoomReply, RoomSink};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
