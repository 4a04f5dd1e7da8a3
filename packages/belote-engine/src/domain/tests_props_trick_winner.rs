//! Property-based tests for trick resolution.

use proptest::prelude::*;

use crate::domain::cards_logic::{plain_strength, trump_strength};
use crate::domain::state::Seat;
use crate::domain::tricks::{close_trick, resolve_trick, Play, Trick};
use crate::domain::{test_gens, test_prelude, Card, Suit};

/// Direct reading of the ranking rules: the highest trump wins if any was
/// played, otherwise the highest card of the led suit.
fn oracle_winner(leader: Seat, cards: &[Card], trump: Suit) -> Seat {
    let asked = cards[0].suit;
    let key = |c: &Card| -> (u8, u8) {
        if c.suit == trump {
            (2, trump_strength(c.rank))
        } else if c.suit == asked {
            (1, plain_strength(c.rank))
        } else {
            (0, 0)
        }
    };
    let (idx, _) = cards
        .iter()
        .enumerate()
        .max_by_key(|(_, c)| key(c))
        .expect("non-empty trick");
    (leader + idx as u8) % 4
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_winner_matches_oracle(
        (leader, cards) in test_gens::complete_trick(),
        trump in test_gens::suit(),
    ) {
        let mut trick = Trick::open(1, leader);
        for (i, &card) in cards.iter().enumerate() {
            trick.plays.push(Play {
                seat: (leader + i as u8) % 4,
                card,
                position: i as u8,
            });
        }
        let expected = oracle_winner(leader, &cards, trump);
        prop_assert_eq!(resolve_trick(&trick.plays, trump), Some(expected));
        prop_assert_eq!(close_trick(&mut trick, trump).unwrap(), expected);
        prop_assert!(close_trick(&mut trick, trump).is_err());
    }

    /// An incomplete trick has no resolved winner.
    #[test]
    fn prop_partial_trick_unresolved(
        (leader, cards) in test_gens::complete_trick(),
        trump in test_gens::suit(),
        keep in 0usize..4,
    ) {
        let plays: Vec<Play> = cards[..keep]
            .iter()
            .enumerate()
            .map(|(i, &card)| Play { seat: (leader + i as u8) % 4, card, position: i as u8 })
            .collect();
        prop_assert_eq!(resolve_trick(&plays, trump), None);
    }
}
