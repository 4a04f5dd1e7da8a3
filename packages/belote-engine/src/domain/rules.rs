//! Fixed Belote rule constants and the legal-play rule engine.

use crate::domain::cards_logic::{strongest_trump, trump_strength, winning_index};
use crate::domain::state::{same_team, Seat};
use crate::domain::tricks::Play;
use crate::domain::{hand_has_suit, Card, Suit};

pub const PLAYERS: usize = 4;
pub const INITIAL_HAND_SIZE: usize = 5;
pub const TURNED_CARD_INDEX: usize = 20;
pub const TAKER_COMPLETION: usize = 2;
pub const OTHERS_COMPLETION: usize = 3;
pub const TRICKS_PER_ROUND: usize = 8;
pub const CARDS_PER_TRICK: usize = 4;

/// Total card points in the pack under any trump.
pub const DECK_POINTS: u16 = 152;
/// Base points the taker's team must reach to make its contract.
pub const CONTRACT_THRESHOLD: u16 = 82;
pub const LAST_TRICK_BONUS: u16 = 10;
pub const CAPOT_BONUS: u16 = 90;
pub const BELOTE_BONUS: u16 = 20;

/// Legal subset of `hand` for `actor`, given the plays so far in the trick.
///
/// - Leading: anything.
/// - Holding the asked suit: only that suit, no obligation to climb.
/// - Void in the asked suit with trumps in hand: free choice if the partner
///   is currently winning; otherwise must trump, and must over-trump an
///   opponent's trump when able. If no trump in hand beats the strongest
///   trump played, any trump is allowed.
/// - Void in both: anything.
///
/// The result keeps the hand's order.
pub fn legal_plays(hand: &[Card], plays: &[Play], trump: Suit, actor: Seat) -> Vec<Card> {
    let Some(lead) = plays.first() else {
        return hand.to_vec();
    };
    let asked = lead.card.suit;

    if hand_has_suit(hand, asked) {
        return hand.iter().copied().filter(|c| c.suit == asked).collect();
    }

    if !hand_has_suit(hand, trump) {
        return hand.to_vec();
    }

    if let Some(winner) = current_winner(plays, trump) {
        if winner != actor && same_team(winner, actor) {
            return hand.to_vec();
        }
    }

    let played: Vec<Card> = plays.iter().map(|p| p.card).collect();

    let trumps = hand.iter().copied().filter(|c| c.suit == trump);
    let Some(top) = strongest_trump(&played, trump) else {
        return trumps.collect();
    };

    let over: Vec<Card> = trumps
        .clone()
        .filter(|c| trump_strength(c.rank) > trump_strength(top.rank))
        .collect();
    if over.is_empty() {
        trumps.collect()
    } else {
        over
    }
}

/// Seat currently winning an in-progress (or complete) trick.
pub fn current_winner(plays: &[Play], trump: Suit) -> Option<Seat> {
    let cards: Vec<Card> = plays.iter().map(|p| p.card).collect();
    winning_index(&cards, trump).map(|i| plays[i].seat)
}
