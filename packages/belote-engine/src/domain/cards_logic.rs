//! Card game logic: point tables, strength tables, comparing card strength

use super::cards_types::{Card, Rank, Suit};

/// Points for a rank when its suit is not trump. A suit totals 30.
pub const fn plain_points(rank: Rank) -> u16 {
    match rank {
        Rank::Seven | Rank::Eight | Rank::Nine => 0,
        Rank::Jack => 2,
        Rank::Queen => 3,
        Rank::King => 4,
        Rank::Ten => 10,
        Rank::Ace => 11,
    }
}

/// Points for a rank when its suit is trump. The trump suit totals 62.
pub const fn trump_points(rank: Rank) -> u16 {
    match rank {
        Rank::Seven | Rank::Eight => 0,
        Rank::Queen => 3,
        Rank::King => 4,
        Rank::Ten => 10,
        Rank::Ace => 11,
        Rank::Nine => 14,
        Rank::Jack => 20,
    }
}

/// Plain-suit strength: 7 < 8 < 9 < J < Q < K < 10 < A.
pub const fn plain_strength(rank: Rank) -> u8 {
    match rank {
        Rank::Seven => 0,
        Rank::Eight => 1,
        Rank::Nine => 2,
        Rank::Jack => 3,
        Rank::Queen => 4,
        Rank::King => 5,
        Rank::Ten => 6,
        Rank::Ace => 7,
    }
}

/// Trump strength: 7 < 8 < Q < K < 10 < A < 9 < J.
pub const fn trump_strength(rank: Rank) -> u8 {
    match rank {
        Rank::Seven => 0,
        Rank::Eight => 1,
        Rank::Queen => 2,
        Rank::King => 3,
        Rank::Ten => 4,
        Rank::Ace => 5,
        Rank::Nine => 6,
        Rank::Jack => 7,
    }
}

/// Point value of a card under the given trump.
pub fn card_points(card: Card, trump: Suit) -> u16 {
    if card.suit == trump {
        trump_points(card.rank)
    } else {
        plain_points(card.rank)
    }
}

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Does `candidate` beat the card currently winning the trick?
///
/// Trump beats non-trump; two trumps compare by trump strength; two cards of
/// the asked suit compare by plain strength; anything else never beats.
pub fn card_beats(candidate: Card, current: Card, asked: Suit, trump: Suit) -> bool {
    let cand_trump = candidate.suit == trump;
    let curr_trump = current.suit == trump;
    match (cand_trump, curr_trump) {
        (true, false) => true,
        (false, true) => false,
        (true, true) => trump_strength(candidate.rank) > trump_strength(current.rank),
        (false, false) => {
            if candidate.suit != asked {
                return false;
            }
            if current.suit != asked {
                return true;
            }
            plain_strength(candidate.rank) > plain_strength(current.rank)
        }
    }
}

/// Index of the card currently winning, folding `card_beats` left to right.
/// `None` when no card has been played.
pub fn winning_index(cards: &[Card], trump: Suit) -> Option<usize> {
    let first = cards.first()?;
    let asked = first.suit;
    let mut best = 0usize;
    for (i, &card) in cards.iter().enumerate().skip(1) {
        if card_beats(card, cards[best], asked, trump) {
            best = i;
        }
    }
    Some(best)
}

/// Strongest trump among `cards`, if any.
pub fn strongest_trump(cards: &[Card], trump: Suit) -> Option<Card> {
    cards
        .iter()
        .copied()
        .filter(|c| c.suit == trump)
        .max_by_key(|c| trump_strength(c.rank))
}
