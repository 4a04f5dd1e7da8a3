//! Read-only per-seat view of a round, safe to hand to a transport layer.
//! Other seats' hands are reduced to card counts.

use serde::{Deserialize, Serialize};

use crate::domain::bidding::{legal_bids, AuctionState, Bid, BidAction};
use crate::domain::game::{Game, GameStatus};
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::{live_points, RoundScore};
use crate::domain::state::{RoundId, RoundState, RoundStatus, Seat};
use crate::domain::tricks::{legal_moves, Trick};
use crate::domain::{Card, Suit};

/// Game-level facts present in every snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameHeader {
    pub status: GameStatus,
    pub scores_total: [u32; 2],
    pub score_threshold: u32,
    pub active_round_id: Option<RoundId>,
}

/// Public round facts (no private hands).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundPublic {
    pub round_id: RoundId,
    pub round_no: u16,
    pub dealer: Seat,
    pub turned_card: Card,
    pub turn: Option<Seat>,
    pub turn_seq: u32,
    pub taker: Option<Seat>,
    pub trump: Option<Suit>,
    pub belote: Option<Seat>,
    pub hand_sizes: [u8; PLAYERS],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiddingSnapshot {
    pub auction: AuctionState,
    pub bids: Vec<Bid>,
    /// Filled only when the viewer is to act.
    pub legal_bids: Vec<BidAction>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrickSnapshot {
    /// Open trick, if one is accepting plays.
    pub current_trick: Option<Trick>,
    pub last_trick: Option<Trick>,
    /// Filled only when the viewer is to act.
    pub playable: Vec<Card>,
    /// Trick points won so far per team.
    pub live_points: [u16; 2],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "data")]
pub enum PhaseSnapshot {
    Bidding(BiddingSnapshot),
    Trick(TrickSnapshot),
    Scored(RoundScore),
    Redealt,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub game: GameHeader,
    pub round: RoundPublic,
    pub viewer: Seat,
    pub hand: Vec<Card>,
    pub phase: PhaseSnapshot,
}

/// Build the view of `state` for `viewer`. Never fails; inconsistent rounds
/// show what they hold.
pub fn snapshot(game: &Game, state: &RoundState, viewer: Seat) -> RoundSnapshot {
    let header = GameHeader {
        status: game.status,
        scores_total: game.scores_total,
        score_threshold: game.score_threshold,
        active_round_id: game.active_round_id,
    };

    let mut hand_sizes = [0u8; PLAYERS];
    for (size, hand) in hand_sizes.iter_mut().zip(&state.hands) {
        *size = hand.len() as u8;
    }
    let round = RoundPublic {
        round_id: state.round.id,
        round_no: state.round.round_no,
        dealer: state.round.dealer,
        turned_card: state.round.turned_card(),
        turn: state.round.turn,
        turn_seq: state.round.turn_seq,
        taker: state.round.taker,
        trump: state.round.trump,
        belote: state.round.belote,
        hand_sizes,
    };

    let phase = match (state.round.status, &state.score) {
        (_, Some(score)) => PhaseSnapshot::Scored(score.clone()),
        (RoundStatus::Redealt, _) => PhaseSnapshot::Redealt,
        (RoundStatus::Bidding, _) => PhaseSnapshot::Bidding(BiddingSnapshot {
            auction: state.auction_state(),
            bids: state.bids.clone(),
            legal_bids: legal_bids(state, viewer),
        }),
        (RoundStatus::Playing | RoundStatus::Completed, _) => {
            let playable = if state.round.turn == Some(viewer) {
                legal_moves(state, viewer)
            } else {
                Vec::new()
            };
            PhaseSnapshot::Trick(TrickSnapshot {
                current_trick: state.current_trick().cloned(),
                last_trick: state.last_closed_trick().cloned(),
                playable,
                live_points: live_points(state),
            })
        }
    };

    RoundSnapshot {
        game: header,
        round,
        viewer,
        hand: state
            .hands
            .get(viewer as usize)
            .cloned()
            .unwrap_or_default(),
        phase,
    }
}
