use crate::domain::bidding::{legal_bids, place_bid, AuctionState, BidAction, BidOutcome};
use crate::domain::dealing::shuffle_with_seed;
use crate::domain::state::{AuctionRound, RoundStatus};
use crate::domain::test_state_helpers::{at, bidding_round};
use crate::domain::Suit;
use crate::errors::domain::DomainError;

fn pass() -> BidAction {
    BidAction::Pass
}

#[test]
fn three_passes_then_take_fixes_contract_and_completes_deal() {
    // Dealer 0: seat 1 speaks first.
    let mut state = bidding_round(shuffle_with_seed(42), 0);
    let turned = state.round.turned_card();
    assert_eq!(state.round.turn, Some(1));

    assert_eq!(
        place_bid(&mut state, 1, pass(), at()).unwrap(),
        BidOutcome::NextBidder { seat: 2 }
    );
    place_bid(&mut state, 2, pass(), at()).unwrap();
    place_bid(&mut state, 3, pass(), at()).unwrap();
    let outcome = place_bid(&mut state, 0, BidAction::TakeTurnedCard, at()).unwrap();

    assert_eq!(
        outcome,
        BidOutcome::Taken {
            taker: 0,
            trump: turned.suit
        }
    );
    assert_eq!(state.auction_state(), AuctionState::Taken);
    assert_eq!(state.round.status, RoundStatus::Playing);
    assert_eq!(state.round.taker, Some(0));
    assert_eq!(state.round.trump, Some(turned.suit));
    for hand in &state.hands {
        assert_eq!(hand.len(), 8);
    }
    assert!(state.hands[0].contains(&turned));
    // Trick 1 is led by the seat left of the dealer.
    assert_eq!(state.round.turn, Some(1));
    assert_eq!(state.current_trick().map(|t| (t.trick_no, t.leader)), Some((1, 1)));
    assert_eq!(state.bids.len(), 4);
    state.verify_card_partition().unwrap();
}

#[test]
fn four_passes_open_round_two_with_same_first_actor() {
    let mut state = bidding_round(shuffle_with_seed(7), 2);
    for seat in [3, 0, 1] {
        place_bid(&mut state, seat, pass(), at()).unwrap();
    }
    let outcome = place_bid(&mut state, 2, pass(), at()).unwrap();
    assert_eq!(outcome, BidOutcome::SecondRound { seat: 3 });
    assert_eq!(state.round.auction_round, AuctionRound::Second);
    assert_eq!(state.auction_state(), AuctionState::Round2);
    assert_eq!(state.round.turn, Some(3));
}

#[test]
fn eight_passes_void_the_deal() {
    let mut state = bidding_round(shuffle_with_seed(7), 3);
    let mut last = None;
    for i in 0..8u8 {
        let seat = i % 4;
        last = Some(place_bid(&mut state, seat, pass(), at()).unwrap());
    }
    assert_eq!(last, Some(BidOutcome::Redeal));
    assert_eq!(state.round.status, RoundStatus::Redealt);
    assert_eq!(state.auction_state(), AuctionState::Redealt);
    assert_eq!(state.round.turn, None);
    assert_eq!(state.bids.len(), 8);
    assert!(state.bids.iter().enumerate().all(|(i, b)| b.bid_order as usize == i));
}

#[test]
fn round_two_choose_trump_other_than_turned_suit() {
    let mut state = bidding_round(shuffle_with_seed(11), 0);
    let turned = state.round.turned_card().suit;
    for seat in [1, 2, 3, 0] {
        place_bid(&mut state, seat, pass(), at()).unwrap();
    }

    let err = place_bid(&mut state, 1, BidAction::ChooseTrump { suit: turned }, at()).unwrap_err();
    assert!(matches!(err, DomainError::IllegalAction { .. }), "{err:?}");
    // Rejection leaves the log untouched.
    assert_eq!(state.bids.len(), 4);
    assert_eq!(state.round.turn, Some(1));

    let other = Suit::ALL.into_iter().find(|&s| s != turned).unwrap();
    let outcome = place_bid(&mut state, 1, BidAction::ChooseTrump { suit: other }, at()).unwrap();
    assert_eq!(
        outcome,
        BidOutcome::Taken {
            taker: 1,
            trump: other
        }
    );
    assert!(state.hands[1].contains(&state.round.turned_card()));
}

#[test]
fn wrong_round_actions_are_illegal() {
    let mut state = bidding_round(shuffle_with_seed(5), 0);
    let err = place_bid(
        &mut state,
        1,
        BidAction::ChooseTrump { suit: Suit::Hearts },
        at(),
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::IllegalAction { .. }));

    for seat in [1, 2, 3, 0] {
        place_bid(&mut state, seat, pass(), at()).unwrap();
    }
    let err = place_bid(&mut state, 1, BidAction::TakeTurnedCard, at()).unwrap_err();
    assert!(matches!(err, DomainError::IllegalAction { .. }));
}

#[test]
fn out_of_turn_bid_reports_expected_seat() {
    let mut state = bidding_round(shuffle_with_seed(5), 0);
    let err = place_bid(&mut state, 2, pass(), at()).unwrap_err();
    assert_eq!(
        err,
        DomainError::OutOfTurn {
            round_id: state.round.id,
            expected: Some(1),
            actual: 2
        }
    );
}

#[test]
fn bidding_on_taken_round_is_stale() {
    let mut state = bidding_round(shuffle_with_seed(5), 0);
    place_bid(&mut state, 1, BidAction::TakeTurnedCard, at()).unwrap();
    let err = place_bid(&mut state, 2, pass(), at()).unwrap_err();
    assert!(matches!(err, DomainError::StaleRound { .. }), "{err:?}");
}

#[test]
fn legal_bids_per_auction_round() {
    let mut state = bidding_round(shuffle_with_seed(9), 0);
    assert_eq!(
        legal_bids(&state, 1),
        vec![BidAction::Pass, BidAction::TakeTurnedCard]
    );
    assert!(legal_bids(&state, 2).is_empty());

    for seat in [1, 2, 3, 0] {
        place_bid(&mut state, seat, pass(), at()).unwrap();
    }
    let turned = state.round.turned_card().suit;
    let bids = legal_bids(&state, 1);
    assert_eq!(bids.len(), 4);
    assert_eq!(bids[0], BidAction::Pass);
    assert!(!bids.contains(&BidAction::ChooseTrump { suit: turned }));
}

#[test]
fn bid_action_serde_is_tagged() {
    let json = serde_json::to_value(BidAction::ChooseTrump {
        suit: Suit::Hearts,
    })
    .unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "action": "CHOOSE_TRUMP", "suit": "HEARTS" })
    );
    let back: BidAction = serde_json::from_value(serde_json::json!({ "action": "PASS" })).unwrap();
    assert_eq!(back, BidAction::Pass);
}
