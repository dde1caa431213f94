use crate::domain::state::{seat_offset, Seat};

pub const PLAYERS: usize = 3;
pub const DECK_SIZE: usize = 30;
pub const TRICKS_PER_ROUND: u8 = 10;
pub const HAND_SIZE: usize = TRICKS_PER_ROUND as usize;
pub const DEFAULT_WINNING_SCORE: i16 = 5;

/// Cards per seat in each dealing stage: before trump, after trump, final.
pub const DEAL_STAGES: [usize; 3] = [5, 3, 2];

/// Cards staged once the first five per seat are out.
pub const STAGED_AFTER_FIRST_DEAL: usize = (DEAL_STAGES[1] + DEAL_STAGES[2]) * PLAYERS;
/// Cards staged for the final deal.
pub const STAGED_FOR_FINAL_DEAL: usize = DEAL_STAGES[2] * PLAYERS;

/// Trick quota for `position` given the dealer.
///
/// Dealer → 2, left of dealer → 5 (chooses trump and leads trick 0),
/// two seats round → 3.
pub fn target_tricks(position: Seat, dealer: Seat) -> u8 {
    if position == dealer {
        2
    } else if position == seat_offset(dealer, 1) {
        5
    } else {
        3
    }
}

/// The seat holding the 5-trick quota: trump chooser and first-trick leader.
#[inline]
pub fn five_quota_seat(dealer: Seat) -> Seat {
    seat_offset(dealer, 1)
}
