//! Property-based tests for the legal-play engine.

use proptest::prelude::*;

use crate::domain::cards_logic::{strongest_trump, trump_strength};
use crate::domain::rules::{current_winner, legal_plays};
use crate::domain::state::{same_team, Seat};
use crate::domain::tricks::{legal_moves, play_card, Play};
use crate::domain::{hand_has_suit, test_gens, test_prelude, Card};

fn plays_from(leader: Seat, cards: &[Card]) -> Vec<Play> {
    cards
        .iter()
        .enumerate()
        .map(|(i, &card)| Play {
            seat: (leader + i as u8) % 4,
            card,
            position: i as u8,
        })
        .collect()
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Legal set is a non-empty subset of a non-empty hand.
    #[test]
    fn prop_legal_set_nonempty_subset(
        (leader, trick, hand) in test_gens::partial_trick_and_hand(),
        trump in test_gens::suit(),
    ) {
        let plays = plays_from(leader, &trick);
        let actor = (leader + trick.len() as u8) % 4;
        let legal = legal_plays(&hand, &plays, trump, actor);
        prop_assert!(!legal.is_empty());
        for card in &legal {
            prop_assert!(hand.contains(card));
        }
    }

    /// Holding the asked suit restricts the set to exactly that suit.
    #[test]
    fn prop_follow_suit_exactly(
        (leader, trick, hand) in test_gens::partial_trick_and_hand(),
        trump in test_gens::suit(),
    ) {
        let asked = trick[0].suit;
        prop_assume!(hand_has_suit(&hand, asked));
        let plays = plays_from(leader, &trick);
        let actor = (leader + trick.len() as u8) % 4;
        let legal = legal_plays(&hand, &plays, trump, actor);
        let expected: Vec<Card> = hand.iter().copied().filter(|c| c.suit == asked).collect();
        prop_assert_eq!(legal, expected);
    }

    /// Void in the asked suit with an opponent winning and trumps in hand:
    /// only trumps are legal, and only over-trumps when any exist.
    #[test]
    fn prop_must_trump_and_over_trump(
        (leader, trump, trick, hand) in test_gens::void_hand_facing_opponent(),
    ) {
        let plays = plays_from(leader, &trick);
        let actor = (leader + trick.len() as u8) % 4;
        let winner = current_winner(&plays, trump).unwrap();
        prop_assert!(!same_team(winner, actor));

        let legal = legal_plays(&hand, &plays, trump, actor);
        prop_assert!(!legal.is_empty());
        prop_assert!(legal.iter().all(|c| c.suit == trump));
        match strongest_trump(&trick, trump) {
            None => {
                let trumps = hand.iter().filter(|c| c.suit == trump).count();
                prop_assert_eq!(legal.len(), trumps);
            }
            Some(top) => {
                let beats = |c: &Card| trump_strength(c.rank) > trump_strength(top.rank);
                if hand.iter().any(|c| c.suit == trump && beats(c)) {
                    prop_assert!(legal.iter().all(beats));
                } else {
                    let trumps = hand.iter().filter(|c| c.suit == trump).count();
                    prop_assert_eq!(legal.len(), trumps);
                }
            }
        }
    }

    /// Random full hands: every seat always has a legal card and the engine
    /// accepts it.
    #[test]
    fn prop_random_hand_always_has_legal_play(
        deck in test_gens::deck(),
        dealer in test_gens::seat(),
        taker in test_gens::seat(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 32),
    ) {
        let mut state = crate::domain::test_state_helpers::taken_round(deck, dealer, taker);
        let mut picks = picks.into_iter();
        while let Some(seat) = state.round.turn {
            let legal = legal_moves(&state, seat);
            prop_assert!(!legal.is_empty());
            let idx = picks.next().unwrap();
            let card = *idx.get(&legal);
            prop_assert!(state.hands[seat as usize].contains(&card));
            play_card(&mut state, seat, card).unwrap();
        }
        prop_assert!(state.hand_complete());
        state.verify_card_partition().unwrap();
    }
}
