//! Two-round auction for the turned card.
//!
//! Round 1: each seat from the dealer's left may pass or take the turned
//! card (trump = its suit). Round 2: pass or name any other suit. Four passes
//! in round 2 void the deal.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::rules::PLAYERS;
use crate::domain::state::{
    first_actor, next_seat, AuctionRound, RoundId, RoundState, RoundStatus, Seat,
};
use crate::domain::tricks::Trick;
use crate::domain::Suit;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidAction {
    Pass,
    TakeTurnedCard,
    ChooseTrump { suit: Suit },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuctionState {
    Round1,
    Round2,
    Taken,
    Redealt,
}

/// One entry of the append-only auction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub round_id: RoundId,
    /// 0-based position in the log.
    pub bid_order: u8,
    pub seat: Seat,
    pub action: BidAction,
    pub created_at: OffsetDateTime,
}

/// Result of an accepted bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidOutcome {
    /// Same auction round, next seat to speak.
    NextBidder { seat: Seat },
    /// Everyone passed in round 1; round 2 opens with the first actor.
    SecondRound { seat: Seat },
    /// Taker and trump fixed, completion deal done, trick 1 open.
    Taken { taker: Seat, trump: Suit },
    /// Everyone passed in round 2; the deal is void.
    Redeal,
}

/// Bids `who` may make right now (empty when not their turn).
pub fn legal_bids(state: &RoundState, who: Seat) -> Vec<BidAction> {
    if state.round.status != RoundStatus::Bidding || state.round.turn != Some(who) {
        return Vec::new();
    }
    match state.round.auction_round {
        AuctionRound::First => vec![BidAction::Pass, BidAction::TakeTurnedCard],
        AuctionRound::Second => {
            let turned = state.round.turned_card().suit;
            std::iter::once(BidAction::Pass)
                .chain(
                    Suit::ALL
                        .into_iter()
                        .filter(|&s| s != turned)
                        .map(|suit| BidAction::ChooseTrump { suit }),
                )
                .collect()
        }
    }
}

/// Apply one auction action.
pub fn place_bid(
    state: &mut RoundState,
    who: Seat,
    action: BidAction,
    at: OffsetDateTime,
) -> Result<BidOutcome, DomainError> {
    let round_id = state.round.id;
    if state.round.status != RoundStatus::Bidding {
        // Taken or superseded: the caller must resynchronise.
        return Err(DomainError::StaleRound {
            requested: round_id,
            active_round_id: round_id,
            active_round_no: state.round.round_no,
        });
    }

    let turn = state.require_turn()?;
    if turn != who {
        return Err(DomainError::OutOfTurn {
            round_id,
            expected: Some(turn),
            actual: who,
        });
    }

    let turned = state.round.turned_card();
    let outcome = match (state.round.auction_round, action) {
        (_, BidAction::Pass) => {
            let next = next_seat(who);
            if next != state.round.first_actor() {
                BidOutcome::NextBidder { seat: next }
            } else if state.round.auction_round == AuctionRound::First {
                BidOutcome::SecondRound { seat: next }
            } else {
                BidOutcome::Redeal
            }
        }
        (AuctionRound::First, BidAction::TakeTurnedCard) => BidOutcome::Taken {
            taker: who,
            trump: turned.suit,
        },
        (AuctionRound::Second, BidAction::ChooseTrump { suit }) => {
            if suit == turned.suit {
                return Err(DomainError::illegal_action(
                    round_id,
                    format!("trump must differ from the turned suit {turned} in round 2"),
                ));
            }
            BidOutcome::Taken { taker: who, trump: suit }
        }
        (AuctionRound::First, BidAction::ChooseTrump { .. }) => {
            return Err(DomainError::illegal_action(
                round_id,
                "naming a trump is only allowed in round 2",
            ))
        }
        (AuctionRound::Second, BidAction::TakeTurnedCard) => {
            return Err(DomainError::illegal_action(
                round_id,
                "the turned card can only be taken in round 1",
            ))
        }
    };

    let bid_order = u8::try_from(state.bids.len())
        .map_err(|_| DomainError::invariant(format!("round {round_id}: auction log overflow")))?;
    state.bids.push(Bid {
        round_id,
        bid_order,
        seat: who,
        action,
        created_at: at,
    });

    match outcome {
        BidOutcome::NextBidder { seat } => state.advance_turn(Some(seat)),
        BidOutcome::SecondRound { seat } => {
            state.round.auction_round = AuctionRound::Second;
            state.advance_turn(Some(seat));
        }
        BidOutcome::Taken { taker, trump } => fix_contract(state, taker, trump),
        BidOutcome::Redeal => {
            state.round.status = RoundStatus::Redealt;
            state.round.completed_at = Some(at);
            state.advance_turn(None);
        }
    }
    Ok(outcome)
}

/// Record taker and trump, run the completion deal and open trick 1 with the
/// seat left of the dealer on lead.
fn fix_contract(state: &mut RoundState, taker: Seat, trump: Suit) {
    state.round.taker = Some(taker);
    state.round.trump = Some(trump);
    state.round.status = RoundStatus::Playing;

    let extra = state.round.deck.completion_for(taker);
    for (hand, cards) in state.hands.iter_mut().zip(extra) {
        hand.extend(cards);
    }
    debug_assert!(state.hands.iter().all(|h| h.len() == 8));
    debug_assert_eq!(state.hands.len(), PLAYERS);

    let leader = first_actor(state.round.dealer);
    state.tricks.push(Trick::open(1, leader));
    state.advance_turn(Some(leader));
}
