//! Read-only queries. They report committed state, each from a single
//! consistent read, and take no lock.

use serde::Serialize;
use time::OffsetDateTime;

use super::{now, GameFlowService};
use crate::domain::bidding::{legal_bids, BidAction};
use crate::domain::deadline::{window_expired, TurnTicket};
use crate::domain::game::Game;
use crate::domain::replay::verify_round;
use crate::domain::scoring::{live_points, RoundScore};
use crate::domain::snapshot::{snapshot, RoundSnapshot};
use crate::domain::state::{require_seat, GameId, Round, RoundId, RoundState, Seat};
use crate::domain::tricks::{legal_moves, Trick};
use crate::domain::Card;
use crate::errors::domain::DomainError;
use crate::repos::games::require_game;
use crate::repos::rounds::{load_round_state, load_stored_round};
use crate::repos::StoredRound;

/// One round of a game with its score, if scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub round: Round,
    pub score: Option<RoundScore>,
}

impl GameFlowService {
    pub async fn game(&self, game_id: GameId) -> Result<Game, DomainError> {
        require_game(&*self.store, game_id).await
    }

    /// Full committed aggregate of a round, hands included. Not for clients;
    /// use [`Self::round_snapshot`] for a per-seat view.
    pub async fn load_round(&self, round_id: RoundId) -> Result<RoundState, DomainError> {
        load_round_state(&*self.store, round_id).await
    }

    /// Cards `seat` could legally play into the open trick, whether or not it
    /// is their turn. Empty outside trick play.
    pub async fn legal_plays(&self, round_id: RoundId, seat: Seat) -> Result<Vec<Card>, DomainError> {
        require_seat(seat)?;
        let state = self.load_round(round_id).await?;
        Ok(legal_moves(&state, seat))
    }

    /// Auction actions open to `seat`; empty unless it is their turn to bid.
    pub async fn legal_bids(
        &self,
        round_id: RoundId,
        seat: Seat,
    ) -> Result<Vec<BidAction>, DomainError> {
        require_seat(seat)?;
        let state = self.load_round(round_id).await?;
        Ok(legal_bids(&state, seat))
    }

    pub async fn current_trick(&self, round_id: RoundId) -> Result<Option<Trick>, DomainError> {
        let state = self.load_round(round_id).await?;
        Ok(state.current_trick().cloned())
    }

    /// Trick points each team has won so far, bonuses excluded.
    pub async fn live_score(&self, round_id: RoundId) -> Result<[u16; 2], DomainError> {
        let state = self.load_round(round_id).await?;
        Ok(live_points(&state))
    }

    pub async fn round_snapshot(
        &self,
        round_id: RoundId,
        viewer: Seat,
    ) -> Result<RoundSnapshot, DomainError> {
        require_seat(viewer)?;
        let StoredRound { game, state } = load_stored_round(&*self.store, round_id).await?;
        Ok(snapshot(&game, &state, viewer))
    }

    /// The turn currently open in `round_id`, or `None` once the round is
    /// taken out of play (redealt, scored or superseded).
    pub async fn turn_ticket(&self, round_id: RoundId) -> Result<Option<TurnTicket>, DomainError> {
        let StoredRound { game, state } = load_stored_round(&*self.store, round_id).await?;
        if game.active_round_id != Some(round_id) {
            return Ok(None);
        }
        Ok(TurnTicket::current(&state))
    }

    /// Whether the turn named by `ticket` is still open and `deadline` has
    /// not passed. A timeout collaborator checks this before acting, then
    /// acts with [`super::TurnRequest::for_ticket`] so a late human action
    /// and the automatic one cannot both land.
    pub async fn turn_still_valid(
        &self,
        ticket: TurnTicket,
        deadline: OffsetDateTime,
    ) -> Result<bool, DomainError> {
        if window_expired(now(), deadline) {
            return Ok(false);
        }
        Ok(self.turn_ticket(ticket.round_id).await? == Some(ticket))
    }

    /// Replay the stored logs from the stored deck and check they agree with
    /// what was persisted.
    pub async fn audit_round(&self, round_id: RoundId) -> Result<(), DomainError> {
        let state = self.load_round(round_id).await?;
        state.verify_card_partition()?;
        verify_round(&state).map(|_| ()).inspect_err(|err| {
            tracing::error!(round_id, error = %err, "round audit failed");
        })
    }

    /// Every round of a game in deal order, with scores where present.
    pub async fn round_history(&self, game_id: GameId) -> Result<Vec<RoundSummary>, DomainError> {
        require_game(&*self.store, game_id).await?;
        let rounds = self.store.find_rounds_by_game(game_id).await?;
        let mut history = Vec::with_capacity(rounds.len());
        for round in rounds {
            let score = self.store.find_score(round.id).await?;
            history.push(RoundSummary { round, score });
        }
        Ok(history)
    }
}
