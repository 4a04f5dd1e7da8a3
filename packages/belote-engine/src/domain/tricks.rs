//! Trick engine: accept one play, close the trick on the fourth card,
//! advance the leader, and detect belote/rebelote.

use serde::{Deserialize, Serialize};

use crate::domain::cards_logic::card_points;
use crate::domain::rules::{current_winner, legal_plays, CARDS_PER_TRICK, TRICKS_PER_ROUND};
use crate::domain::state::{next_seat, RoundState, RoundStatus, Seat, Team};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
    /// 0..=3 within the trick.
    pub position: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    /// 1..=8 within the round.
    pub trick_no: u8,
    pub leader: Seat,
    pub plays: Vec<Play>,
    /// Fixed once the fourth card lands.
    pub winner: Option<Seat>,
}

impl Trick {
    pub fn open(trick_no: u8, leader: Seat) -> Self {
        Self {
            trick_no,
            leader,
            plays: Vec::with_capacity(CARDS_PER_TRICK),
            winner: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.winner.is_some()
    }

    pub fn asked_suit(&self) -> Option<Suit> {
        self.plays.first().map(|p| p.card.suit)
    }

    pub fn winning_team(&self) -> Option<Team> {
        self.winner.map(Team::of)
    }

    /// Card points held in this trick.
    pub fn points(&self, trump: Suit) -> u16 {
        self.plays.iter().map(|p| card_points(p.card, trump)).sum()
    }

    /// Seat whose card is expected next.
    pub fn expected_seat(&self) -> Seat {
        let mut seat = self.leader;
        for _ in 0..self.plays.len() {
            seat = next_seat(seat);
        }
        seat
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeloteCall {
    Belote,
    Rebelote,
}

/// What changed when a card was played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    pub trick_no: u8,
    pub position: u8,
    /// Set when the play closed the trick.
    pub trick_winner: Option<Seat>,
    pub trick_points: Option<u16>,
    /// Eighth trick closed; the hand awaits scoring.
    pub hand_complete: bool,
    pub belote: Option<BeloteCall>,
    pub next_turn: Option<Seat>,
}

/// Legal cards for `who` right now, independent of turn enforcement.
/// Empty when the round is not in trick play or no trick is open.
pub fn legal_moves(state: &RoundState, who: Seat) -> Vec<Card> {
    if state.round.status != RoundStatus::Playing {
        return Vec::new();
    }
    let (Some(trick), Some(trump)) = (state.current_trick(), state.round.trump) else {
        return Vec::new();
    };
    let Some(hand) = state.hands.get(who as usize) else {
        return Vec::new();
    };
    legal_plays(hand, &trick.plays, trump, who)
}

/// Play a card into the current trick, enforcing status, turn and legality.
pub fn play_card(
    state: &mut RoundState,
    who: Seat,
    card: Card,
) -> Result<PlayCardResult, DomainError> {
    let round_id = state.round.id;
    match state.round.status {
        RoundStatus::Playing => {}
        RoundStatus::Bidding => {
            return Err(DomainError::illegal_action(
                round_id,
                "cards cannot be played before a taker is fixed",
            ))
        }
        RoundStatus::Redealt | RoundStatus::Completed => {
            return Err(DomainError::already_resolved(round_id, "round is over"))
        }
    }
    if state.hand_complete() {
        return Err(DomainError::already_resolved(
            round_id,
            "all eight tricks are closed",
        ));
    }

    let turn = state.require_turn()?;
    if turn != who {
        return Err(DomainError::OutOfTurn {
            round_id,
            expected: Some(turn),
            actual: who,
        });
    }
    let trump = state.require_trump()?;

    let legal = legal_moves(state, who);
    if !legal.contains(&card) {
        return Err(DomainError::IllegalCard {
            round_id,
            card,
            legal,
        });
    }

    let belote = detect_belote(state, who, card, trump);
    if belote == Some(BeloteCall::Belote) {
        state.round.belote = Some(who);
    }

    let hand = &mut state.hands[who as usize];
    if let Some(pos) = hand.iter().position(|&c| c == card) {
        hand.remove(pos);
    }

    let trick = state
        .tricks
        .last_mut()
        .filter(|t| !t.is_closed())
        .ok_or_else(|| DomainError::invariant(format!("round {round_id}: no open trick")))?;
    let position = trick.plays.len() as u8;
    trick.plays.push(Play {
        seat: who,
        card,
        position,
    });
    let trick_no = trick.trick_no;

    let mut result = PlayCardResult {
        trick_no,
        position,
        trick_winner: None,
        trick_points: None,
        hand_complete: false,
        belote,
        next_turn: None,
    };

    if trick.plays.len() < CARDS_PER_TRICK {
        let next = next_seat(who);
        state.advance_turn(Some(next));
        result.next_turn = Some(next);
        return Ok(result);
    }

    let winner = close_trick(trick, trump)?;
    result.trick_winner = Some(winner);
    result.trick_points = Some(trick.points(trump));

    if (trick_no as usize) < TRICKS_PER_ROUND {
        state.tricks.push(Trick::open(trick_no + 1, winner));
        state.advance_turn(Some(winner));
        result.next_turn = Some(winner);
    } else {
        state.advance_turn(None);
        result.hand_complete = true;
    }

    Ok(result)
}

/// Fix the winner of a four-card trick.
pub fn close_trick(trick: &mut Trick, trump: Suit) -> Result<Seat, DomainError> {
    if trick.is_closed() {
        return Err(DomainError::invariant(format!(
            "trick {} is already closed",
            trick.trick_no
        )));
    }
    if trick.plays.len() != CARDS_PER_TRICK {
        return Err(DomainError::invariant(format!(
            "trick {} has {} plays, need {CARDS_PER_TRICK}",
            trick.trick_no,
            trick.plays.len()
        )));
    }
    let winner = resolve_trick(&trick.plays, trump)
        .ok_or_else(|| DomainError::invariant("complete trick without a winner"))?;
    trick.winner = Some(winner);
    Ok(winner)
}

/// Winner of a complete trick.
pub fn resolve_trick(plays: &[Play], trump: Suit) -> Option<Seat> {
    if plays.len() < CARDS_PER_TRICK {
        return None;
    }
    current_winner(plays, trump)
}

/// Belote when the first of the trump king/queen leaves a hand holding both;
/// rebelote when the declarer plays the second.
fn detect_belote(state: &RoundState, who: Seat, card: Card, trump: Suit) -> Option<BeloteCall> {
    if card.suit != trump || !matches!(card.rank, Rank::King | Rank::Queen) {
        return None;
    }
    match state.round.belote {
        None => {
            let hand = &state.hands[who as usize];
            let king = Card::new(trump, Rank::King);
            let queen = Card::new(trump, Rank::Queen);
            (hand.contains(&king) && hand.contains(&queen)).then_some(BeloteCall::Belote)
        }
        Some(declarer) if declarer == who => Some(BeloteCall::Rebelote),
        Some(_) => None,
    }
}
