//! Deck composition, shuffling and staged round-robin dealing.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::rules::{DECK_SIZE, PLAYERS};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

/// Generate the 30-card deck in a stable order.
///
/// All four suits carry A, K, Q, J, 10, 9, 8; only spades and hearts
/// carry a seven.
pub fn build_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            if rank == Rank::Seven && !matches!(suit, Suit::Spades | Suit::Hearts) {
                continue;
            }
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Uniform Fisher-Yates shuffle.
pub fn shuffle<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}

/// Fresh deck shuffled deterministically from `seed`.
pub fn shuffled_deck(seed: u64) -> Vec<Card> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut deck = build_deck();
    shuffle(&mut deck, &mut rng);
    deck
}

/// Deal `per_seat` cards to each seat, round-robin starting at seat 0.
///
/// Seat 0 receives indices 0, 3, 6, …; seat 1 receives 1, 4, 7, …; seat 2
/// receives 2, 5, 8, …. Consumes exactly `per_seat * 3` cards from the front
/// of `cards` and returns the unconsumed tail alongside the slices.
pub fn deal(
    cards: &[Card],
    per_seat: usize,
) -> Result<([Vec<Card>; PLAYERS], Vec<Card>), DomainError> {
    let needed = per_seat * PLAYERS;
    if cards.len() < needed {
        return Err(DomainError::precondition(format!(
            "Dealing {per_seat} per seat needs {needed} cards, only {} staged",
            cards.len()
        )));
    }

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for (i, &card) in cards[..needed].iter().enumerate() {
        hands[i % PLAYERS].push(card);
    }
    Ok((hands, cards[needed..].to_vec()))
}
