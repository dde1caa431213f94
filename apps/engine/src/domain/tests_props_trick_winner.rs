use proptest::prelude::*;

use crate::domain::state::Seat;
use crate::domain::tricks::evaluate_trick;
use crate::domain::{test_gens, test_prelude, Card, Suit};

/// Reference winner: highest trump if any trump was played, else highest card
/// of the lead suit.
fn oracle_trick_winner(plays: &[(Seat, Card)], trump: Option<Suit>) -> Seat {
    let lead = plays[0].1.suit;
    let best_of = |suit: Suit| {
        plays
            .iter()
            .filter(|(_, c)| c.suit == suit)
            .max_by_key(|(_, c)| c.rank)
            .map(|&(s, _)| s)
    };
    trump
        .and_then(best_of)
        .or_else(|| best_of(lead))
        .unwrap_or(plays[0].0)
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: the domain winner matches the oracle with and without trump.
    #[test]
    fn prop_trick_winner_matches_oracle(
        plays in test_gens::complete_trick(),
        trump in proptest::option::of(test_gens::suit()),
    ) {
        let winner = evaluate_trick(&plays, trump);
        prop_assert_eq!(winner, Some(oracle_trick_winner(&plays, trump)),
            "plays={:?} trump={:?}", plays, trump);
    }

    /// Property: reordering the followers never changes the winning seat.
    #[test]
    fn prop_winner_independent_of_follower_order(
        plays in test_gens::complete_trick(),
        trump in test_gens::suit(),
    ) {
        let swapped = vec![plays[0], plays[2], plays[1]];
        prop_assert_eq!(
            evaluate_trick(&plays, Some(trump)),
            evaluate_trick(&swapped, Some(trump))
        );
    }

    /// Property: an off-suit non-trump card never wins.
    #[test]
    fn prop_discard_never_wins(
        plays in test_gens::complete_trick(),
        trump in test_gens::suit(),
    ) {
        let lead = plays[0].1.suit;
        let winner = evaluate_trick(&plays, Some(trump)).unwrap();
        let card = plays.iter().find(|(s, _)| *s == winner).unwrap().1;
        prop_assert!(card.suit == lead || card.suit == trump);
    }
}
