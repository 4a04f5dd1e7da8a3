use crate::domain::bidding::{place_bid, AuctionState, BidAction};
use crate::domain::dealing::shuffle_with_seed;
use crate::domain::events::{derive_round_events, GameEvent};
use crate::domain::scoring::apply_round_scoring;
use crate::domain::state::Team;
use crate::domain::test_state_helpers::{
    at, bidding_round, capot_hands, deck_for_hands, first_legal, play_out,
};
use crate::domain::tricks::{play_card, BeloteCall};
use crate::domain::Card;

fn names(events: &[GameEvent]) -> Vec<&'static str> {
    events.iter().map(GameEvent::name).collect()
}

#[test]
fn pass_emits_only_bid_placed() {
    let mut state = bidding_round(shuffle_with_seed(1), 0);
    let before = state.clone();
    place_bid(&mut state, 1, BidAction::Pass, at()).unwrap();
    let events = derive_round_events(&before, &state);
    assert_eq!(
        events,
        vec![GameEvent::BidPlaced {
            round_id: state.round.id,
            bid_order: 0,
            seat: 1,
            action: BidAction::Pass
        }]
    );
}

#[test]
fn take_emits_auction_change_and_contract() {
    let mut state = bidding_round(deck_for_hands(&capot_hands(), 0), 3);
    let before = state.clone();
    place_bid(&mut state, 0, BidAction::TakeTurnedCard, at()).unwrap();
    let events = derive_round_events(&before, &state);
    assert_eq!(
        names(&events),
        vec!["bid_placed", "auction_changed", "contract_taken"]
    );
    assert!(matches!(
        events[1],
        GameEvent::AuctionChanged {
            state: AuctionState::Taken,
            turn: Some(0),
            ..
        }
    ));
}

#[test]
fn fourth_card_closes_trick() {
    let mut state = bidding_round(deck_for_hands(&capot_hands(), 0), 3);
    place_bid(&mut state, 0, BidAction::TakeTurnedCard, at()).unwrap();
    for (seat, token) in [(0, "JS"), (1, "7H"), (2, "KS")] {
        play_card(&mut state, seat, token.parse::<Card>().unwrap()).unwrap();
    }
    let before = state.clone();
    play_card(&mut state, 3, "7C".parse().unwrap()).unwrap();
    let events = derive_round_events(&before, &state);
    assert_eq!(names(&events), vec!["card_played", "trick_closed"]);
    assert_eq!(
        events[1],
        GameEvent::TrickClosed {
            round_id: state.round.id,
            trick_no: 1,
            winner: 0,
            team: Team::A,
            points: 24
        }
    );
}

#[test]
fn whole_hand_diff_reports_every_trick() {
    let mut state = bidding_round(deck_for_hands(&capot_hands(), 0), 3);
    place_bid(&mut state, 0, BidAction::TakeTurnedCard, at()).unwrap();
    // KS and QS are split between partners: no belote.
    let before = state.clone();
    play_out(&mut state, first_legal);
    let events = derive_round_events(&before, &state);
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::BeloteAnnounced { .. })));
    let closed = events
        .iter()
        .filter(|e| matches!(e, GameEvent::TrickClosed { .. }))
        .count();
    assert_eq!(closed, 8);

    let mut scored = state.clone();
    apply_round_scoring(&mut scored, at()).unwrap();
    let events = derive_round_events(&state, &scored);
    assert_eq!(names(&events), vec!["hand_completed"]);
}

#[test]
fn belote_holder_announces_both_calls() {
    use crate::domain::test_state_helpers::{hands_from, playing_round};
    let hands = hands_from([
        "KH 7S 8S 9S TS QH AH JH",
        "7C 8C 9C TC JC 7H 8H 9H",
        "QC KC AC 7D 8D TH JS QS",
        "9D TD JD QD KD AD KS AS",
    ]);
    let mut state = playing_round(&hands, 3, 0);
    let before = state.clone();
    play_card(&mut state, 0, "KH".parse().unwrap()).unwrap();
    let events = derive_round_events(&before, &state);
    assert_eq!(
        events[1],
        GameEvent::BeloteAnnounced {
            round_id: state.round.id,
            seat: 0,
            call: BeloteCall::Belote
        }
    );
}

#[test]
fn redeal_emits_round_redealt() {
    let mut state = bidding_round(shuffle_with_seed(4), 3);
    for seat in [0, 1, 2, 3, 0, 1, 2] {
        place_bid(&mut state, seat, BidAction::Pass, at()).unwrap();
    }
    let before = state.clone();
    place_bid(&mut state, 3, BidAction::Pass, at()).unwrap();
    let events = derive_round_events(&before, &state);
    assert_eq!(
        names(&events),
        vec!["bid_placed", "auction_changed", "round_redealt"]
    );
}

#[test]
fn events_serialize_with_type_tag() {
    let event = GameEvent::ContractTaken {
        round_id: 5,
        taker: 2,
        trump: crate::domain::Suit::Clubs,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "type": "contract_taken", "round_id": 5, "taker": 2, "trump": "CLUBS" })
    );
    let back: GameEvent = serde_json::from_value(json).unwrap();
    assert_eq!(back, event);
}
