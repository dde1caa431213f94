// Reducer scenarios: whole rounds driven through `reduce`.

use crate::domain::controller::{expected_actor, reduce, GameAction, Reduction};
use crate::domain::game_transition::GameTransition;
use crate::domain::player_view::SeatView;
use crate::domain::rules::five_quota_seat;
use crate::domain::state::{GameState, Phase, Seat, SeatRoundResult};
use crate::domain::tricks::legal_moves_for;
use crate::domain::Suit;

fn step(state: &GameState, seat: Seat, action: GameAction) -> (GameState, Vec<GameTransition>) {
    match reduce(state, seat, action).expect("action accepted") {
        Reduction::Applied { state, transitions } => (state, transitions),
        Reduction::Ignored { reason } => panic!("unexpectedly ignored: {reason}"),
    }
}

/// Deal a round and stop at the first decision after the final deal.
fn deal_round(state: &GameState, trump: Suit) -> GameState {
    let start = if state.phase == Phase::Waiting {
        GameAction::StartDealing
    } else {
        GameAction::StartNextRound
    };
    let (s, _) = step(state, 0, start);
    let chooser = five_quota_seat(s.dealer_index);
    let (s, _) = step(&s, chooser, GameAction::ChooseTrump { suit: trump });
    let dealer = s.dealer_index;
    let (s, _) = step(&s, dealer, GameAction::DealFinal);
    s
}

/// Play the lowest legal card for whoever is to act until the round ends.
fn play_out(mut state: GameState) -> (GameState, Vec<GameTransition>) {
    let mut all = Vec::new();
    while state.phase == Phase::Playing {
        let seat = state.current_player_index;
        let card = legal_moves_for(&state, seat)[0];
        let (next, transitions) = step(&state, seat, GameAction::PlayCard { card });
        all.extend(transitions);
        state = next;
    }
    (state, all)
}

#[test]
fn first_round_deals_in_three_stages() {
    let (s, _) = step(&GameState::new(11), 2, GameAction::StartDealing);
    assert_eq!(s.phase, Phase::TrumpSelection);
    assert_eq!(s.current_player_index, 1);

    let (s, transitions) = step(&s, 1, GameAction::ChooseTrump { suit: Suit::Spades });
    assert_eq!(s.phase, Phase::Dealing3);
    assert!(s.seats.iter().all(|seat| seat.hand.len() == 8));
    assert_eq!(s.round.remaining_cards.as_ref().map(Vec::len), Some(6));
    assert_eq!(s.current_player_index, 0);
    assert!(transitions.contains(&GameTransition::TrumpChosen {
        seat: 1,
        suit: Suit::Spades
    }));

    let (s, _) = step(&s, 0, GameAction::DealFinal);
    assert_eq!(s.phase, Phase::Playing);
    assert!(s.seats.iter().all(|seat| seat.hand.len() == 10));
    assert_eq!(s.round.remaining_cards, None);
    assert_eq!(s.round.first_trick_leader, Some(1));
    assert_eq!(s.current_player_index, 1);
    assert_eq!(s.round.trump_led_at_start, None);
}

#[test]
fn only_dealer_deals_final_cards() {
    let (s, _) = step(&GameState::new(11), 0, GameAction::StartDealing);
    let (s, _) = step(&s, 1, GameAction::ChooseTrump { suit: Suit::Clubs });
    assert!(reduce(&s, 1, GameAction::DealFinal).is_err());
}

#[test]
fn second_deal_final_is_ignored() {
    let s = deal_round(&GameState::new(11), Suit::Hearts);
    let r = reduce(&s, 0, GameAction::DealFinal).unwrap();
    assert!(matches!(r, Reduction::Ignored { .. }));
}

#[test]
fn full_round_scores_and_rotates_dealer() {
    let s = deal_round(&GameState::with_winning_score(21, 100), Suit::Diamonds);
    let (s, transitions) = play_out(s);

    assert_eq!(s.phase, Phase::RoundComplete);
    assert!(s.seats.iter().all(|seat| seat.hand.is_empty()));
    assert_eq!(s.seats.iter().map(|seat| seat.tricks_won).sum::<u8>(), 10);
    assert_eq!(s.scores().iter().sum::<i16>(), 0);
    assert_eq!(s.round.completed_tricks.len(), 10);
    assert_eq!(s.dealer_index, 1);
    assert_eq!(s.round_number, 2);
    assert_eq!(expected_actor(&s), None);

    let tricks = transitions
        .iter()
        .filter(|t| matches!(t, GameTransition::TrickCompleted { .. }))
        .count();
    assert_eq!(tricks, 10);
    assert!(transitions
        .iter()
        .any(|t| matches!(t, GameTransition::RoundScored { round: 1, .. })));
}

#[test]
fn next_round_enters_card_pull_for_uneven_results() {
    let s = deal_round(&GameState::with_winning_score(21, 100), Suit::Diamonds);
    let (mut s, _) = play_out(s);
    s.previous_round_results = Some(
        [(0, 2, 2), (1, 7, 5), (2, 1, 3)]
            .into_iter()
            .map(|(position, tricks_won, target_tricks)| SeatRoundResult {
                position,
                tricks_won,
                target_tricks,
            })
            .collect(),
    );

    let s = deal_round(&s, Suit::Spades);
    assert_eq!(s.phase, Phase::CardPull);
    assert_eq!(s.current_player_index, 1);

    let mut s = s;
    let mut pulls = 0;
    while s.phase == Phase::CardPull {
        let (next, _) = step(&s, 1, GameAction::SelectPullTarget { target: 2 });
        let (next, _) = step(&next, 1, GameAction::SelectPullCardIndex { index: 0 });
        let view = SeatView::for_seat(&next, 1).unwrap();
        let card = view.legal_returns()[0];
        let (next, transitions) = step(&next, 1, GameAction::ReturnPullCard { card });
        assert!(transitions
            .iter()
            .any(|t| matches!(t, GameTransition::CardPulled { puller: 1, target: 2, .. })));
        pulls += 1;
        s = next;
    }

    assert_eq!(pulls, 2);
    assert_eq!(s.phase, Phase::Playing);
    assert!(s.card_pull_state.is_none());
    assert_eq!(s.current_player_index, five_quota_seat(s.dealer_index));
}

#[test]
fn even_results_skip_card_pull() {
    let s = deal_round(&GameState::with_winning_score(21, 100), Suit::Diamonds);
    let (mut s, _) = play_out(s);
    s.previous_round_results = Some(
        (0..3)
            .map(|position| SeatRoundResult {
                position,
                tricks_won: 3,
                target_tricks: 3,
            })
            .collect(),
    );
    let s = deal_round(&s, Suit::Spades);
    assert_eq!(s.phase, Phase::Playing);
    assert!(s.card_pull_state.is_none());
}

#[test]
fn finished_game_ignores_everything() {
    let mut s = GameState::new(1);
    s.phase = Phase::Finished;
    s.winner = Some(0);
    for action in [
        GameAction::StartDealing,
        GameAction::StartNextRound,
        GameAction::DealFinal,
    ] {
        assert!(!reduce(&s, 0, action).unwrap().is_applied());
    }
}
