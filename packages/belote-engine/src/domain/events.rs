//! Domain events emitted after a state change is committed.
//!
//! Round-level events are derived from a before/after pair of the round
//! aggregate, so every mutation path reports the same facts.

use serde::{Deserialize, Serialize};

use crate::domain::bidding::{AuctionState, BidAction};
use crate::domain::scoring::RoundScore;
use crate::domain::state::{GameId, RoundId, RoundState, Seat, Team};
use crate::domain::tricks::BeloteCall;
use crate::domain::{Card, Rank, Suit};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStarted {
        game_id: GameId,
        round_id: RoundId,
        round_no: u16,
        dealer: Seat,
        turned_card: Card,
        first_bidder: Seat,
    },
    BidPlaced {
        round_id: RoundId,
        bid_order: u8,
        seat: Seat,
        action: BidAction,
    },
    AuctionChanged {
        round_id: RoundId,
        state: AuctionState,
        turn: Option<Seat>,
    },
    ContractTaken {
        round_id: RoundId,
        taker: Seat,
        trump: Suit,
    },
    CardPlayed {
        round_id: RoundId,
        trick_no: u8,
        position: u8,
        seat: Seat,
        card: Card,
    },
    BeloteAnnounced {
        round_id: RoundId,
        seat: Seat,
        call: BeloteCall,
    },
    TrickClosed {
        round_id: RoundId,
        trick_no: u8,
        winner: Seat,
        team: Team,
        points: u16,
    },
    HandCompleted {
        round_id: RoundId,
        score: RoundScore,
    },
    RoundRedealt {
        round_id: RoundId,
        round_no: u16,
    },
    GameOver {
        game_id: GameId,
        winner: Team,
        scores_total: [u32; 2],
    },
}

impl GameEvent {
    pub fn round_started(state: &RoundState) -> Self {
        GameEvent::RoundStarted {
            game_id: state.round.game_id,
            round_id: state.round.id,
            round_no: state.round.round_no,
            dealer: state.round.dealer,
            turned_card: state.round.turned_card(),
            first_bidder: state.round.first_actor(),
        }
    }

    /// Stable name of the variant, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::RoundStarted { .. } => "round_started",
            GameEvent::BidPlaced { .. } => "bid_placed",
            GameEvent::AuctionChanged { .. } => "auction_changed",
            GameEvent::ContractTaken { .. } => "contract_taken",
            GameEvent::CardPlayed { .. } => "card_played",
            GameEvent::BeloteAnnounced { .. } => "belote_announced",
            GameEvent::TrickClosed { .. } => "trick_closed",
            GameEvent::HandCompleted { .. } => "hand_completed",
            GameEvent::RoundRedealt { .. } => "round_redealt",
            GameEvent::GameOver { .. } => "game_over",
        }
    }
}

/// Events describing how one round moved from `before` to `after`.
pub fn derive_round_events(before: &RoundState, after: &RoundState) -> Vec<GameEvent> {
    let round_id = after.round.id;
    let mut events = Vec::new();

    for bid in after.bids.iter().skip(before.bids.len()) {
        events.push(GameEvent::BidPlaced {
            round_id,
            bid_order: bid.bid_order,
            seat: bid.seat,
            action: bid.action,
        });
    }

    let auction = after.auction_state();
    if auction != before.auction_state() {
        events.push(GameEvent::AuctionChanged {
            round_id,
            state: auction,
            turn: after.round.turn,
        });
    }

    if let (None, Some(taker), Some(trump)) =
        (before.round.taker, after.round.taker, after.round.trump)
    {
        events.push(GameEvent::ContractTaken {
            round_id,
            taker,
            trump,
        });
    }

    let mut declarer = before.round.belote;
    for (idx, trick) in after.tricks.iter().enumerate() {
        let prior = before.tricks.get(idx);
        let seen = prior.map_or(0, |t| t.plays.len());
        for play in trick.plays.iter().skip(seen) {
            events.push(GameEvent::CardPlayed {
                round_id,
                trick_no: trick.trick_no,
                position: play.position,
                seat: play.seat,
                card: play.card,
            });
            let honour = after.round.trump == Some(play.card.suit)
                && matches!(play.card.rank, Rank::King | Rank::Queen);
            if !honour {
                continue;
            }
            match (declarer, after.round.belote) {
                (None, Some(seat)) if seat == play.seat => {
                    declarer = Some(seat);
                    events.push(GameEvent::BeloteAnnounced {
                        round_id,
                        seat,
                        call: BeloteCall::Belote,
                    });
                }
                (Some(seat), _) if seat == play.seat => {
                    events.push(GameEvent::BeloteAnnounced {
                        round_id,
                        seat,
                        call: BeloteCall::Rebelote,
                    });
                }
                _ => {}
            }
        }

        let newly_closed = trick.is_closed() && !prior.is_some_and(|t| t.is_closed());
        if let (true, Some(winner), Some(trump)) = (newly_closed, trick.winner, after.round.trump) {
            events.push(GameEvent::TrickClosed {
                round_id,
                trick_no: trick.trick_no,
                winner,
                team: Team::of(winner),
                points: trick.points(trump),
            });
        }
    }

    if let (None, Some(score)) = (&before.score, &after.score) {
        events.push(GameEvent::HandCompleted {
            round_id,
            score: score.clone(),
        });
    }

    if auction == AuctionState::Redealt && before.auction_state() != AuctionState::Redealt {
        events.push(GameEvent::RoundRedealt {
            round_id,
            round_no: after.round.round_no,
        });
    }

    events
}
