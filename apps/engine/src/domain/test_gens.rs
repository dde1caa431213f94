// Proptest generators for domain types.
// Cards are always drawn from one shuffled deck so they never repeat.

use proptest::prelude::*;

use crate::domain::dealing::build_deck;
use crate::domain::state::{next_player, Seat};
use crate::domain::{Card, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

pub fn seat() -> impl Strategy<Value = Seat> {
    0u8..3
}

/// The full 30-card deck in a random order.
pub fn shuffled_deck() -> impl Strategy<Value = Vec<Card>> {
    Just(build_deck()).prop_shuffle()
}

/// Three distinct plays in turn order starting from a random leader.
pub fn complete_trick() -> impl Strategy<Value = Vec<(Seat, Card)>> {
    (seat(), shuffled_deck()).prop_map(|(leader, deck)| {
        let mut who = leader;
        deck.into_iter()
            .take(3)
            .map(|card| {
                let play = (who, card);
                who = next_player(who);
                play
            })
            .collect()
    })
}

/// A hand of `1..=10` cards and a partial trick (0..=2 plays) of other cards.
pub fn hand_and_partial_trick() -> impl Strategy<Value = (Vec<Card>, Vec<(Seat, Card)>)> {
    (shuffled_deck(), 1usize..=10, 0usize..=2).prop_map(|(deck, hand_len, played)| {
        let hand = deck[..hand_len].to_vec();
        let trick = deck[hand_len..hand_len + played]
            .iter()
            .enumerate()
            .map(|(i, &c)| (i as Seat, c))
            .collect();
        (hand, trick)
    })
}
