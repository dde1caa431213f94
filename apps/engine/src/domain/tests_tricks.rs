use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::state::{GameState, Phase, Seat};
use crate::domain::tricks::{is_legal_move, legal_moves, play_card, MoveCheck};
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

fn c(s: &str) -> Card {
    s.parse().expect("hardcoded valid card token")
}

fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens.iter().copied()).expect("hardcoded valid card tokens")
}

const SEAT0: [&str; 10] = ["JS", "TS", "9S", "8H", "7H", "TD", "9D", "8D", "9C", "8C"];
const SEAT1: [&str; 10] = ["7S", "8S", "AH", "KH", "QH", "AD", "KD", "AC", "KC", "QC"];
const SEAT2: [&str; 10] = ["AS", "KS", "QS", "JH", "TH", "9H", "QD", "JD", "JC", "TC"];

/// Dealer 0, so seat 1 holds the 5 quota and leads trick 0.
fn playing_state(trump: Suit) -> GameState {
    let mut state = GameState::new(0);
    state.phase = Phase::Playing;
    state.round_number = 1;
    state.dealer_index = 0;
    state.current_player_index = 1;
    state.round.trump_suit = Some(trump);
    state.round.first_trick_leader = Some(1);
    for (seat, hand) in state.seats.iter_mut().zip([SEAT0, SEAT1, SEAT2]) {
        seat.hand = cards(&hand);
    }
    for (seat, target) in state.seats.iter_mut().zip([2, 5, 3]) {
        seat.target_tricks = target;
    }
    state
}

fn play(state: &mut GameState, who: Seat, card: &str) {
    play_card(state, who, c(card)).expect("legal play");
}

#[test]
fn follower_must_follow_lead_suit() {
    let hand = cards(&["AH", "8S"]);
    let trick = [(0, c("9S"))];
    let check = is_legal_move(c("AH"), &hand, &trick, Some(Suit::Hearts), 8, Some(false));
    assert_eq!(
        check,
        MoveCheck::Illegal {
            kind: ValidationKind::MustFollowSuit,
            reason: "must follow suit"
        }
    );
    assert!(is_legal_move(c("8S"), &hand, &trick, Some(Suit::Hearts), 8, Some(false)).is_legal());
}

#[test]
fn void_follower_may_play_anything() {
    let hand = cards(&["AH", "8C"]);
    let trick = [(0, c("9S"))];
    assert_eq!(
        legal_moves(&hand, &trick, Some(Suit::Hearts), 8, Some(true)),
        cards(&["8C", "AH"])
    );
}

#[test]
fn opening_lead_is_unrestricted() {
    let hand = cards(&SEAT1);
    let all = legal_moves(&hand, &[], Some(Suit::Spades), 0, None);
    assert_eq!(all.len(), 10);
}

#[test]
fn no_trump_yet_means_no_lead_restriction() {
    let hand = cards(&["AH", "8C"]);
    assert_eq!(legal_moves(&hand, &[], None, 4, Some(true)).len(), 2);
}

#[test]
fn forced_trump_lead_is_legal() {
    let hand = cards(&["AH", "8H"]);
    assert!(is_legal_move(c("AH"), &hand, &[], Some(Suit::Hearts), 8, Some(false)).is_legal());
}

#[test]
fn trump_opening_obliges_trump_leads() {
    let mut state = playing_state(Suit::Spades);
    play(&mut state, 1, "7S");
    assert_eq!(state.round.trump_led_at_start, Some(true));
    play(&mut state, 2, "AS");
    play(&mut state, 0, "JS");
    assert_eq!(state.current_player_index, 2);
    assert_eq!(state.seat(2).tricks_won, 1);

    let err = play_card(&mut state, 2, c("JH")).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::MustLeadTrump));
    assert_eq!(err.reason(), "must lead trump");
    assert_eq!(state.hand(2).len(), 9, "rejected play leaves the hand intact");

    play(&mut state, 2, "KS");
    assert_eq!(state.round.current_trick, vec![(2, c("KS"))]);
}

#[test]
fn plain_opening_forbids_trump_leads() {
    let mut state = playing_state(Suit::Hearts);
    play(&mut state, 1, "7S");
    assert_eq!(state.round.trump_led_at_start, Some(false));
    play(&mut state, 2, "AS");
    play(&mut state, 0, "JS");

    let err = play_card(&mut state, 2, c("9H")).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::CannotLeadTrump));
    play(&mut state, 2, "QD");
}

#[test]
fn trick_resolution_records_history() {
    let mut state = playing_state(Suit::Diamonds);
    play(&mut state, 1, "AH");
    play(&mut state, 2, "9H");
    let result = play_card(&mut state, 0, c("7H")).unwrap();

    let trick = result.completed_trick.expect("third card resolves the trick");
    assert_eq!(trick.trick_number, 1);
    assert_eq!(trick.round_number, 1);
    assert_eq!(trick.winner_position, 1);
    assert_eq!(trick.cards_played.len(), 3);
    assert!(!result.round_over);
    assert!(state.round.current_trick.is_empty());
    assert_eq!(state.round.last_trick.as_ref().map(Vec::len), Some(3));
    assert_eq!(state.round.completed_tricks.len(), 1);
}

#[test]
fn out_of_turn_and_missing_card_are_rejected() {
    let mut state = playing_state(Suit::Spades);
    let before = state.clone();

    let err = play_card(&mut state, 2, c("AS")).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::OutOfTurn));

    let err = play_card(&mut state, 1, c("AS")).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::CardNotInHand));

    assert_eq!(state, before);
}

#[test]
fn play_outside_playing_phase_is_stale() {
    let mut state = playing_state(Suit::Spades);
    state.phase = Phase::Dealing3;
    let err = play_card(&mut state, 1, c("7S")).unwrap_err();
    assert!(matches!(err, DomainError::StalePhase(_)));
}

#[test]
fn playing_without_trump_is_a_precondition_failure() {
    let mut state = playing_state(Suit::Spades);
    state.round.trump_suit = None;
    let before = state.clone();
    let err = play_card(&mut state, 1, c("7S")).unwrap_err();
    assert!(matches!(err, DomainError::Precondition(_)));
    assert!(!err.is_recoverable());
    assert_eq!(state, before);
}
