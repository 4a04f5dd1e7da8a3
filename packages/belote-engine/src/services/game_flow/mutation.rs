use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

use super::{now, GameFlowService, TurnRequest};
use crate::domain::deadline::window_expired;
use crate::domain::events::{derive_round_events, GameEvent};
use crate::domain::game::Game;
use crate::domain::scoring::apply_round_scoring;
use crate::domain::state::{require_seat, GameId, RoundId, RoundState, RoundStatus, Seat, Team};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::games::require_game;
use crate::repos::rounds::load_stored_round;
use crate::repos::{StoredRound, UnitOfWork};

/// Result of an accepted, committed operation.
#[derive(Debug, Clone)]
pub struct ActionOutcome<T> {
    /// What the domain operation reported.
    pub result: T,
    /// The game as committed.
    pub game: Game,
    /// The round the operation applied to (for `start_game`, the first round).
    pub round_id: RoundId,
    /// A round dealt by this operation (after a redeal or a scored hand).
    pub next_round_id: Option<RoundId>,
    /// Events published for this operation, in order.
    pub events: Vec<GameEvent>,
}

/// Transitions that follow a domain operation in the same commit.
#[derive(Debug, Default)]
struct Settled {
    next_round: Option<RoundState>,
    winner: Option<Team>,
}

impl GameFlowService {
    /// Load, apply `op` to a copy of the round, settle, commit, publish.
    ///
    /// `actor` carries the acting seat and its turn window; `None` for
    /// engine-driven transitions such as explicit scoring.
    pub(super) async fn run_round_mutation<T, F>(
        &self,
        round_id: RoundId,
        actor: Option<&TurnRequest>,
        op: F,
    ) -> Result<ActionOutcome<T>, DomainError>
    where
        F: FnOnce(&mut RoundState, OffsetDateTime) -> Result<T, DomainError> + Send,
        T: Send,
    {
        if let Some(req) = actor {
            require_seat(req.seat)?;
        }
        let now = now();

        let StoredRound {
            mut game,
            state: before,
        } = load_stored_round(&*self.store, round_id).await?;
        game.require_in_progress(round_id)?;
        game.ensure_active_round(round_id)?;

        if let Err(err) = before.verify_card_partition() {
            error!(game_id = game.id, round_id, error = %err, "stored round is corrupt");
            return Err(err);
        }
        if let Some(req) = actor {
            check_turn_window(&before, req, now)?;
        }

        let expected_version = game.lock_version;
        let mut after = before.clone();
        let result = op(&mut after, now).map_err(|err| {
            debug!(
                game_id = game.id,
                round_id,
                seat = actor.map(|r| r.seat),
                code = err.code().as_str(),
                "action rejected"
            );
            err
        })?;

        let settled = self.settle(&mut game, &before, &mut after, now).await?;
        game.updated_at = now;

        let mut work = UnitOfWork::new(expected_version, game);
        work.record_round_diff(Some(&before), &after);
        let mut events = derive_round_events(&before, &after);
        if let Some(next) = &settled.next_round {
            work.insert_round(next);
            events.push(GameEvent::round_started(next));
        }

        let game_id = work.game.id;
        let committed = match self.store.commit(work).await {
            Ok(game) => game,
            Err(DomainError::Conflict {
                kind: ConflictKind::OptimisticLock,
                detail,
            }) => {
                warn!(game_id, round_id, %detail, "concurrent update lost the race");
                return Err(self
                    .resolve_conflict(game_id, round_id, actor.map(|r| r.seat))
                    .await);
            }
            Err(err) => return Err(err),
        };

        if let Some(winner) = settled.winner {
            events.push(GameEvent::GameOver {
                game_id,
                winner,
                scores_total: committed.scores_total,
            });
        }
        self.publish(game_id, &events);

        info!(
            game_id,
            round_id,
            seat = actor.map(|r| r.seat),
            lock_version = committed.lock_version,
            events = events.len(),
            "action applied"
        );

        Ok(ActionOutcome {
            result,
            game: committed,
            round_id,
            next_round_id: settled.next_round.as_ref().map(RoundState::id),
            events,
        })
    }

    /// Redeal after a voided auction; score a complete hand when configured
    /// to, fold a fresh score into the totals, and deal the next hand unless
    /// the game is over.
    async fn settle(
        &self,
        game: &mut Game,
        before: &RoundState,
        after: &mut RoundState,
        now: OffsetDateTime,
    ) -> Result<Settled, DomainError> {
        let mut settled = Settled::default();

        if after.round.status == RoundStatus::Redealt && before.round.status != RoundStatus::Redealt
        {
            info!(game_id = game.id, round_id = after.round.id, "everyone passed, redealing");
            settled.next_round = Some(self.deal_next(game, now).await?);
            return Ok(settled);
        }

        if self.config.auto_score && after.hand_complete() && after.score.is_none() {
            apply_round_scoring(after, now)?;
        }

        if before.score.is_none() {
            if let Some(score) = after.score.clone() {
                settled.winner = game.record_round(&score);
                match settled.winner {
                    Some(winner) => info!(game_id = game.id, ?winner, "game over"),
                    None => settled.next_round = Some(self.deal_next(game, now).await?),
                }
            }
        }
        Ok(settled)
    }

    /// Turn a lost optimistic race into the rejection the caller would have
    /// seen had it arrived second.
    async fn resolve_conflict(
        &self,
        game_id: GameId,
        round_id: RoundId,
        seat: Option<Seat>,
    ) -> DomainError {
        if seat.is_none() {
            if let Ok(Some(_)) = self.store.find_score(round_id).await {
                return DomainError::already_resolved(round_id, "round already scored");
            }
        }
        let game = match require_game(&*self.store, game_id).await {
            Ok(game) => game,
            Err(err) => return err,
        };
        if let Err(err) = game
            .require_in_progress(round_id)
            .and_then(|_| game.ensure_active_round(round_id))
        {
            return err;
        }
        match (seat, self.store.find_round(round_id).await) {
            (Some(actual), Ok(Some(round))) => DomainError::OutOfTurn {
                round_id,
                expected: round.turn,
                actual,
            },
            (_, Err(err)) => err,
            _ => DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!("round {round_id} changed concurrently; reload and retry"),
            ),
        }
    }

    pub(super) fn publish(&self, game_id: GameId, events: &[GameEvent]) {
        for event in events {
            self.sink.emit(game_id, event.clone());
        }
    }
}

/// Reject requests for a turn that has moved on or whose window closed.
fn check_turn_window(
    state: &RoundState,
    req: &TurnRequest,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    let out_of_turn = || DomainError::OutOfTurn {
        round_id: state.round.id,
        expected: state.round.turn,
        actual: req.seat,
    };
    if req
        .expected_turn_seq
        .is_some_and(|seq| seq != state.round.turn_seq)
    {
        return Err(out_of_turn());
    }
    if req.deadline.is_some_and(|d| window_expired(now, d)) {
        debug!(round_id = state.round.id, seat = req.seat, "turn window expired");
        return Err(out_of_turn());
    }
    Ok(())
}
