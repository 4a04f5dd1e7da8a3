//! Deal partition properties.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::bidding::{place_bid, BidAction};
use crate::domain::cards_types::ALL_CARDS;
use crate::domain::test_state_helpers::{at, bidding_round, taken_round};
use crate::domain::{test_gens, test_prelude, Card};
use crate::errors::domain::DomainError;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Initial hands plus the turned card: 21 distinct cards.
    #[test]
    fn prop_initial_deal_is_21_distinct(deck in test_gens::deck(), dealer in test_gens::seat()) {
        let state = bidding_round(deck, dealer);
        let mut seen: HashSet<Card> = HashSet::new();
        for hand in &state.hands {
            prop_assert_eq!(hand.len(), 5);
            seen.extend(hand.iter().copied());
        }
        prop_assert!(seen.insert(state.round.turned_card()));
        prop_assert_eq!(seen.len(), 21);
        state.verify_card_partition().unwrap();
    }

    /// After the completion deal every card is in exactly one hand.
    #[test]
    fn prop_completion_deal_partitions_pack(
        deck in test_gens::deck(),
        dealer in test_gens::seat(),
        taker in test_gens::seat(),
    ) {
        let state = taken_round(deck, dealer, taker);
        let mut all: Vec<Card> = state.hands.iter().flatten().copied().collect();
        prop_assert_eq!(all.len(), 32);
        all.sort();
        let mut expected = ALL_CARDS.to_vec();
        expected.sort();
        prop_assert_eq!(all, expected);
        prop_assert!(state.hands[taker as usize].contains(&state.round.turned_card()));
        state.verify_card_partition().unwrap();
    }
}

#[test]
fn corrupted_hand_breaks_partition() {
    let mut state = taken_round(crate::domain::dealing::shuffle_with_seed(3), 0, 1);
    let stolen = state.hands[2].pop().unwrap();
    state.hands[3].push(stolen);
    let err = state.verify_card_partition().unwrap_err();
    assert!(matches!(err, DomainError::Invariant(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn duplicated_card_breaks_partition() {
    let mut state = bidding_round(crate::domain::dealing::shuffle_with_seed(3), 0);
    let dup = state.hands[0][0];
    state.hands[1][0] = dup;
    assert!(matches!(
        state.verify_card_partition(),
        Err(DomainError::Invariant(_))
    ));
}

#[test]
fn redealt_round_keeps_initial_partition() {
    let mut state = bidding_round(crate::domain::dealing::shuffle_with_seed(8), 1);
    for i in 0..8u8 {
        place_bid(&mut state, (2 + i) % 4, BidAction::Pass, at()).unwrap();
    }
    state.verify_card_partition().unwrap();
}
