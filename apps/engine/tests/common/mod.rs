#![allow(dead_code)]

use engine::domain::rules::PLAYERS;
use engine::{drive_turn, reduce, AiPlayer, GameState, Phase, RandomPlayer, Reduction};

// Logging is auto-installed for every test binary that declares `mod common;`
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

/// Upper bound on reducer steps for one game; a game that needs more is stuck.
pub const MAX_STEPS: usize = 20_000;

pub fn random_seats(seed: u64) -> [Box<dyn AiPlayer>; PLAYERS] {
    [
        Box::new(RandomPlayer::new(Some(seed))),
        Box::new(RandomPlayer::new(Some(seed.wrapping_add(1)))),
        Box::new(RandomPlayer::new(Some(seed.wrapping_add(2)))),
    ]
}

/// Drive a game with random seats until it finishes, calling `observe` after
/// every applied action.
pub fn play_random_game_with(
    rng_seed: u64,
    winning_score: i16,
    mut observe: impl FnMut(&GameState),
) -> GameState {
    let players = random_seats(rng_seed);
    let mut state = GameState::with_winning_score(rng_seed, winning_score);

    for _ in 0..MAX_STEPS {
        let Some((seat, action)) = drive_turn(&state, &players).expect("AI found a legal action")
        else {
            return state;
        };
        match reduce(&state, seat, action).expect("AI action must be legal") {
            Reduction::Applied { state: next, .. } => state = next,
            Reduction::Ignored { reason } => panic!("AI action ignored: {reason}"),
        }
        observe(&state);
    }
    panic!(
        "game did not finish within {MAX_STEPS} steps (phase {})",
        state.phase.as_str()
    );
}

pub fn play_random_game(rng_seed: u64, winning_score: i16) -> GameState {
    play_random_game_with(rng_seed, winning_score, |_| {})
}

pub fn is_finished(state: &GameState) -> bool {
    state.phase == Phase::Finished
}
