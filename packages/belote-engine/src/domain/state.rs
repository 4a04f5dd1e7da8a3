//! Seats, teams, the round header and the per-round aggregate the rule
//! engines operate on.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::bidding::{AuctionState, Bid};
use crate::domain::dealing::Deck;
use crate::domain::rules::{INITIAL_HAND_SIZE, PLAYERS, TRICKS_PER_ROUND};
use crate::domain::scoring::RoundScore;
use crate::domain::tricks::Trick;
use crate::domain::{Card, Suit};
use crate::errors::domain::DomainError;

pub type GameId = i64;
pub type RoundId = i64;
pub type Seat = u8; // 0..=3

/// Partnership. Seats 0 and 2 form team A, seats 1 and 3 team B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    #[inline]
    pub fn of(seat: Seat) -> Team {
        if seat % 2 == 0 {
            Team::A
        } else {
            Team::B
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }

    #[inline]
    pub fn other(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

/// Seat / turn math helpers (4 fixed seats: 0..=3).
///
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    ((seat_i + delta_i).rem_euclid(PLAYERS as i16)) as Seat
}

/// Returns the next seat clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    seat_offset(seat, 1)
}

/// Seat to the left of the dealer: first to bid and first to lead trick 1.
#[inline]
pub fn first_actor(dealer: Seat) -> Seat {
    next_seat(dealer)
}

#[inline]
pub fn same_team(a: Seat, b: Seat) -> bool {
    Team::of(a) == Team::of(b)
}

pub fn require_seat(seat: Seat) -> Result<Seat, DomainError> {
    if (seat as usize) < PLAYERS {
        Ok(seat)
    } else {
        Err(DomainError::validation(format!("Seat {seat} out of range 0..=3")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundStatus {
    /// Auction in progress.
    Bidding,
    /// Taker fixed, tricks being played (or waiting to be scored).
    Playing,
    /// Everyone passed twice; superseded by a fresh deal.
    Redealt,
    /// Hand scored.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionRound {
    First,
    Second,
}

impl AuctionRound {
    pub fn number(self) -> u8 {
        match self {
            AuctionRound::First => 1,
            AuctionRound::Second => 2,
        }
    }
}

/// Persisted round header ("manche").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub game_id: GameId,
    /// Sequential number within the game, 1-based. Redeals consume a number.
    pub round_no: u16,
    pub dealer: Seat,
    pub deck: Deck,
    pub status: RoundStatus,
    pub auction_round: AuctionRound,
    /// Seat expected to act; `None` once nothing can be done in this round.
    pub turn: Option<Seat>,
    /// Incremented on every accepted action; identifies a turn.
    pub turn_seq: u32,
    pub taker: Option<Seat>,
    pub trump: Option<Suit>,
    pub belote: Option<Seat>,
    pub created_at: OffsetDateTime,
    pub completed_at: Option<OffsetDateTime>,
}

impl Round {
    pub fn turned_card(&self) -> Card {
        self.deck.turned_card()
    }

    pub fn first_actor(&self) -> Seat {
        first_actor(self.dealer)
    }

    /// Whether actions may still be applied to this round.
    pub fn is_live(&self) -> bool {
        matches!(self.status, RoundStatus::Bidding | RoundStatus::Playing)
    }
}

/// Everything the rule engines need about one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub round: Round,
    /// Cards not yet played, per seat.
    pub hands: [Vec<Card>; PLAYERS],
    /// Append-only auction log.
    pub bids: Vec<Bid>,
    /// Tricks in order; the last one may be open.
    pub tricks: Vec<Trick>,
    pub score: Option<RoundScore>,
}

impl RoundState {
    /// Fresh round after the initial 5-card deal; the turned card is exposed.
    pub fn deal(
        id: RoundId,
        game_id: GameId,
        round_no: u16,
        dealer: Seat,
        deck: Deck,
        at: OffsetDateTime,
    ) -> Self {
        let hands = deck.initial_hands();
        let round = Round {
            id,
            game_id,
            round_no,
            dealer,
            deck,
            status: RoundStatus::Bidding,
            auction_round: AuctionRound::First,
            turn: Some(first_actor(dealer)),
            turn_seq: 0,
            taker: None,
            trump: None,
            belote: None,
            created_at: at,
            completed_at: None,
        };
        Self {
            round,
            hands,
            bids: Vec::new(),
            tricks: Vec::new(),
            score: None,
        }
    }

    pub fn id(&self) -> RoundId {
        self.round.id
    }

    pub fn auction_state(&self) -> AuctionState {
        match self.round.status {
            RoundStatus::Bidding => match self.round.auction_round {
                AuctionRound::First => AuctionState::Round1,
                AuctionRound::Second => AuctionState::Round2,
            },
            RoundStatus::Playing | RoundStatus::Completed => AuctionState::Taken,
            RoundStatus::Redealt => AuctionState::Redealt,
        }
    }

    /// The trick accepting plays, if any.
    pub fn current_trick(&self) -> Option<&Trick> {
        self.tricks.last().filter(|t| !t.is_closed())
    }

    pub fn closed_tricks(&self) -> impl Iterator<Item = &Trick> {
        self.tricks.iter().filter(|t| t.is_closed())
    }

    /// Most recently closed trick.
    pub fn last_closed_trick(&self) -> Option<&Trick> {
        self.tricks.iter().rev().find(|t| t.is_closed())
    }

    /// All eight tricks are closed.
    pub fn hand_complete(&self) -> bool {
        self.tricks.len() == TRICKS_PER_ROUND && self.tricks.iter().all(Trick::is_closed)
    }

    pub fn played_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.tricks
            .iter()
            .flat_map(|t| t.plays.iter().map(|p| p.card))
    }

    /// Cards of `seat` already played this round.
    pub fn played_by(&self, seat: Seat) -> usize {
        self.tricks
            .iter()
            .flat_map(|t| t.plays.iter())
            .filter(|p| p.seat == seat)
            .count()
    }

    /// Set the next actor and open a new turn.
    pub fn advance_turn(&mut self, next: Option<Seat>) {
        self.round.turn = next;
        self.round.turn_seq = self.round.turn_seq.wrapping_add(1);
    }

    pub fn require_turn(&self) -> Result<Seat, DomainError> {
        self.round.turn.ok_or_else(|| {
            DomainError::invariant(format!(
                "round {} is live but has no current turn",
                self.round.id
            ))
        })
    }

    pub fn require_trump(&self) -> Result<Suit, DomainError> {
        self.round.trump.ok_or_else(|| {
            DomainError::invariant(format!("round {} is playing without trump", self.round.id))
        })
    }

    pub fn require_taker(&self) -> Result<Seat, DomainError> {
        self.round.taker.ok_or_else(|| {
            DomainError::invariant(format!("round {} is playing without taker", self.round.id))
        })
    }

    /// Check that the round's cards partition its deck: every card is in
    /// exactly one of {a hand, a played trick, the undealt remainder incl.
    /// the turned card}, and hand sizes match the phase.
    pub fn verify_card_partition(&self) -> Result<(), DomainError> {
        let round_id = self.round.id;
        let deck = &self.round.deck;
        let dealt_complete = matches!(
            self.round.status,
            RoundStatus::Playing | RoundStatus::Completed
        );

        let mut seen: HashSet<Card> = HashSet::with_capacity(deck.cards().len());
        let mut insert = |card: Card, origin: &str| -> Result<(), DomainError> {
            if !seen.insert(card) {
                return Err(DomainError::invariant(format!(
                    "round {round_id}: card {card} appears twice ({origin})"
                )));
            }
            Ok(())
        };

        for hand in &self.hands {
            for &card in hand {
                insert(card, "hand")?;
            }
        }
        for card in self.played_cards() {
            insert(card, "trick")?;
        }
        if !dealt_complete {
            for &card in deck.undealt_after_initial() {
                insert(card, "undealt")?;
            }
        }

        if seen.len() != deck.cards().len() || deck.cards().iter().any(|c| !seen.contains(c)) {
            return Err(DomainError::invariant(format!(
                "round {round_id}: dealt cards do not partition the deck ({} of {})",
                seen.len(),
                deck.cards().len()
            )));
        }

        let expected = if dealt_complete {
            TRICKS_PER_ROUND
        } else {
            INITIAL_HAND_SIZE
        };
        for (seat, hand) in self.hands.iter().enumerate() {
            let total = hand.len() + self.played_by(seat as Seat);
            if total != expected {
                return Err(DomainError::invariant(format!(
                    "round {round_id}: seat {seat} holds {total} cards, expected {expected}"
                )));
            }
        }
        Ok(())
    }
}
