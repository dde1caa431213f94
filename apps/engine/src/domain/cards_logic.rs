//! Card game logic: checking suits in hands, comparing card strength

use super::cards_types::{Card, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

pub fn count_suit(hand: &[Card], suit: Suit) -> usize {
    hand.iter().filter(|c| c.suit == suit).count()
}

/// True if the hand holds at least one card that is not of `suit`.
pub fn hand_has_other_than(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit != suit)
}

/// Whether `challenger` takes the trick from the current `winner`.
///
/// Trump beats non-trump, higher trump beats lower trump, and among
/// non-trump cards only the lead suit competes (higher rank wins).
/// An off-suit non-trump card never wins.
pub fn card_beats(challenger: Card, winner: Card, lead: Suit, trump: Option<Suit>) -> bool {
    let is_trump = |c: Card| trump == Some(c.suit);

    match (is_trump(challenger), is_trump(winner)) {
        (true, false) => true,
        (false, true) => false,
        (true, true) => challenger.rank > winner.rank,
        (false, false) => {
            if challenger.suit != lead {
                return false;
            }
            if winner.suit != lead {
                return true;
            }
            challenger.rank > winner.rank
        }
    }
}
