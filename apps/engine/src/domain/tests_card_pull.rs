use crate::domain::card_pull::{
    calculate_eligibility, return_card, select_card_index, select_target, CardPullState, PullPhase,
};
use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::state::{GameState, Phase, SeatRoundResult};
use crate::domain::{count_suit, Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

fn c(s: &str) -> Card {
    s.parse().expect("hardcoded valid card token")
}

const SEAT0: [&str; 10] = ["JS", "TS", "9S", "8H", "7H", "TD", "9D", "8D", "9C", "8C"];
const SEAT1: [&str; 10] = ["7S", "8S", "AH", "KH", "QH", "AD", "KD", "AC", "KC", "QC"];
const SEAT2: [&str; 10] = ["AS", "KS", "QS", "JH", "TH", "9H", "QD", "JD", "JC", "TC"];

fn previous_results() -> Vec<SeatRoundResult> {
    [(0, 2, 2), (1, 7, 5), (2, 1, 3)]
        .into_iter()
        .map(|(position, tricks_won, target_tricks)| SeatRoundResult {
            position,
            tricks_won,
            target_tricks,
        })
        .collect()
}

/// Seat 1 owes two pulls against seat 2.
fn pulling_state() -> GameState {
    let mut state = GameState::new(0);
    state.phase = Phase::CardPull;
    state.round_number = 2;
    state.dealer_index = 0;
    state.current_player_index = 1;
    state.round.trump_suit = Some(Suit::Clubs);
    state.round.first_trick_leader = Some(1);
    for (seat, hand) in state.seats.iter_mut().zip([SEAT0, SEAT1, SEAT2]) {
        seat.hand = try_parse_cards(hand).expect("hardcoded valid card tokens");
    }
    state.previous_round_results = Some(previous_results());
    state.card_pull_state = CardPullState::begin(&previous_results(), 0);
    state
}

fn pull_phase(state: &GameState) -> Option<PullPhase> {
    state.card_pull_state.as_ref().map(|p| p.phase)
}

#[test]
fn scenario_eligibility() {
    let (over, under) = calculate_eligibility(&previous_results(), 0);
    assert_eq!(over.len(), 1);
    assert_eq!(over[0].position, 1);
    assert_eq!(over[0].extra_tricks, 2);
    assert_eq!(over[0].pulls_remaining, 2);
    assert_eq!(under.len(), 1);
    assert_eq!(under[0].position, 2);
}

#[test]
fn two_pulls_then_complete() {
    let mut state = pulling_state();

    select_target(&mut state, 1, 2).unwrap();
    assert_eq!(pull_phase(&state), Some(PullPhase::SelectingCard));
    let pulled = select_card_index(&mut state, 1, 0).unwrap();
    assert_eq!(pulled, c("AS"));
    assert_eq!(pull_phase(&state), Some(PullPhase::ReturningCard));

    let swap = return_card(&mut state, 1, c("8S")).unwrap();
    assert!(!swap.protocol_complete);
    assert!(state.hand(1).contains(&c("AS")));
    assert!(!state.hand(1).contains(&c("8S")));
    assert!(state.hand(2).contains(&c("8S")));
    assert!(!state.hand(2).contains(&c("AS")));
    let pull = state.card_pull_state.as_ref().unwrap();
    assert_eq!(pull.phase, PullPhase::SelectingTarget);
    assert_eq!(pull.pullers[0].pulls_remaining, 1);
    assert_eq!(pull.pulled_card, None);

    select_target(&mut state, 1, 2).unwrap();
    assert_eq!(select_card_index(&mut state, 1, 0).unwrap(), c("KS"));
    let swap = return_card(&mut state, 1, c("AH")).unwrap();
    assert!(swap.protocol_complete);
    assert_eq!(pull_phase(&state), Some(PullPhase::Complete));

    for seat in &state.seats {
        assert_eq!(seat.hand.len(), 10);
    }
}

#[test]
fn only_the_current_puller_acts() {
    let mut state = pulling_state();
    let err = select_target(&mut state, 0, 2).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::NotCurrentPuller));
    assert!(matches!(err, DomainError::IllegalPullAction(..)));
}

#[test]
fn target_must_be_an_under_scorer() {
    let mut state = pulling_state();
    let err = select_target(&mut state, 1, 0).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::InvalidPullTarget));
    assert_eq!(pull_phase(&state), Some(PullPhase::SelectingTarget));
}

#[test]
fn sub_phase_order_is_enforced() {
    let mut state = pulling_state();
    let err = select_card_index(&mut state, 1, 0).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::PullPhaseMismatch));
    let err = return_card(&mut state, 1, c("8S")).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::PullPhaseMismatch));
}

#[test]
fn index_must_fall_inside_target_hand() {
    let mut state = pulling_state();
    select_target(&mut state, 1, 2).unwrap();
    let err = select_card_index(&mut state, 1, 10).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::InvalidPullIndex));
    assert_eq!(pull_phase(&state), Some(PullPhase::SelectingCard));
}

#[test]
fn return_must_keep_two_of_its_suit() {
    let mut state = pulling_state();
    select_target(&mut state, 1, 2).unwrap();
    select_card_index(&mut state, 1, 0).unwrap();

    assert_eq!(count_suit(state.hand(1), Suit::Diamonds), 2);
    let err = return_card(&mut state, 1, c("AD")).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::MustKeepSuit));
    assert_eq!(err.reason(), "must keep at least 2 of that suit");

    assert_eq!(count_suit(state.hand(1), Suit::Hearts), 3);
    return_card(&mut state, 1, c("QH")).unwrap();
}

#[test]
fn return_card_must_be_held() {
    let mut state = pulling_state();
    select_target(&mut state, 1, 2).unwrap();
    select_card_index(&mut state, 1, 3).unwrap();
    let err = return_card(&mut state, 1, c("JS")).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::CardNotInHand));
}

#[test]
fn pull_actions_outside_card_pull_are_stale() {
    let mut state = pulling_state();
    state.phase = Phase::Playing;
    let err = select_target(&mut state, 1, 2).unwrap_err();
    assert!(matches!(err, DomainError::StalePhase(_)));
}

/// Seats 1 and 0 each owe one pull against seat 2; seat 1 goes first.
fn two_puller_state() -> GameState {
    let results: Vec<SeatRoundResult> = [(0, 3, 2), (1, 6, 5), (2, 1, 3)]
        .into_iter()
        .map(|(position, tricks_won, target_tricks)| SeatRoundResult {
            position,
            tricks_won,
            target_tricks,
        })
        .collect();
    let mut state = pulling_state();
    state.card_pull_state = CardPullState::begin(&results, 0);
    state.previous_round_results = Some(results);
    state
}

#[test]
fn turn_passes_to_the_next_puller() {
    let mut state = two_puller_state();
    let order: Vec<_> = state
        .card_pull_state
        .as_ref()
        .unwrap()
        .pullers
        .iter()
        .map(|p| (p.position, p.pulls_remaining))
        .collect();
    assert_eq!(order, vec![(1, 1), (0, 1)]);

    select_target(&mut state, 1, 2).unwrap();
    assert_eq!(select_card_index(&mut state, 1, 0).unwrap(), c("AS"));
    let swap = return_card(&mut state, 1, c("8S")).unwrap();
    assert!(!swap.protocol_complete);

    let pull = state.card_pull_state.as_ref().unwrap();
    assert_eq!(pull.current_puller_index, 1);
    assert_eq!(pull.current_puller().map(|p| p.position), Some(0));
    assert_eq!(pull.phase, PullPhase::SelectingTarget);
    assert_eq!(state.current_player_index, 0);

    let err = select_target(&mut state, 1, 2).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::NotCurrentPuller));

    select_target(&mut state, 0, 2).unwrap();
    assert_eq!(select_card_index(&mut state, 0, 0).unwrap(), c("KS"));
    let swap = return_card(&mut state, 0, c("9S")).unwrap();
    assert_eq!(swap.puller, 0);
    assert!(swap.protocol_complete);
    assert_eq!(pull_phase(&state), Some(PullPhase::Complete));
    assert!(state.hand(0).contains(&c("KS")));
    assert!(state.hand(2).contains(&c("9S")));
}
