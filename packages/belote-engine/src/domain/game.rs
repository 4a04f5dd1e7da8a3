//! The match-level entity: cumulative totals, the single active round and
//! game-over detection.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::scoring::RoundScore;
use crate::domain::state::{next_seat, GameId, RoundId, Seat, Team};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    InProgress,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub status: GameStatus,
    pub score_threshold: u32,
    /// Cumulative points, indexed by `Team::index()`.
    pub scores_total: [u32; 2],
    /// The only round actions may target.
    pub active_round_id: Option<RoundId>,
    pub active_round_no: u16,
    /// Dealer of the active round.
    pub dealer: Seat,
    pub rng_seed: i64,
    /// Optimistic concurrency marker, bumped on every commit.
    pub lock_version: i32,
    pub winner: Option<Team>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Game {
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Reject actions on a finished game. The error names `requested`, the
    /// round the caller addressed; a finished game has no active round.
    pub fn require_in_progress(&self, requested: RoundId) -> Result<(), DomainError> {
        if self.is_finished() {
            return Err(DomainError::IllegalAction {
                round_id: requested,
                detail: format!("game {} is finished", self.id),
            });
        }
        Ok(())
    }

    /// Reject actions addressed to anything but the active round.
    pub fn ensure_active_round(&self, requested: RoundId) -> Result<RoundId, DomainError> {
        match self.active_round_id {
            Some(active) if active == requested => Ok(active),
            Some(active) => Err(DomainError::StaleRound {
                requested,
                active_round_id: active,
                active_round_no: self.active_round_no,
            }),
            None => Err(DomainError::not_found(
                NotFoundKind::Round,
                format!("game {} has no active round", self.id),
            )),
        }
    }

    /// Number and dealer of the round that follows the active one. Redeals
    /// and normal advances both rotate the dealer one seat clockwise.
    pub fn next_round_slot(&self) -> (u16, Seat) {
        (self.active_round_no + 1, next_seat(self.dealer))
    }

    /// Point the game at a freshly dealt round.
    pub fn activate_round(&mut self, round_id: RoundId, round_no: u16, dealer: Seat) {
        self.active_round_id = Some(round_id);
        self.active_round_no = round_no;
        self.dealer = dealer;
    }

    /// Fold a scored hand into the totals and decide whether the game is
    /// over. Returns the winner when it is.
    pub fn record_round(&mut self, score: &RoundScore) -> Option<Team> {
        for team in Team::ALL {
            self.scores_total[team.index()] += u32::from(score.team(team).total());
        }
        let winner = game_winner(self.scores_total, self.score_threshold);
        if let Some(team) = winner {
            self.status = GameStatus::Finished;
            self.winner = Some(team);
            self.active_round_id = None;
        }
        winner
    }
}

/// Winner once some team reached the threshold; a tie keeps the game going.
pub fn game_winner(totals: [u32; 2], threshold: u32) -> Option<Team> {
    let [a, b] = totals;
    if a.max(b) < threshold || a == b {
        return None;
    }
    Some(if a > b { Team::A } else { Team::B })
}
