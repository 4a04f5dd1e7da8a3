use time::OffsetDateTime;
use tracing::{debug, info};

use super::{now, ActionOutcome, GameFlowService};
use crate::domain::events::GameEvent;
use crate::domain::game::Game;
use crate::domain::scoring::{apply_round_scoring, RoundScore};
use crate::domain::seed_derivation::fresh_game_seed;
use crate::domain::state::{RoundId, RoundState, Seat};
use crate::errors::domain::DomainError;
use crate::repos::{NewGame, UnitOfWork};

impl GameFlowService {
    /// Create a game from the service configuration and deal its first
    /// round. The outcome's `round_id` is that first round.
    pub async fn start_game(&self) -> Result<ActionOutcome<()>, DomainError> {
        self.config.validate()?;
        let now = now();
        let rng_seed = self.config.rng_seed.unwrap_or_else(fresh_game_seed);

        let mut game = self
            .store
            .create_game(NewGame {
                score_threshold: self.config.score_threshold,
                starting_dealer: self.config.starting_dealer,
                rng_seed,
                created_at: now,
            })
            .await?;
        let expected_version = game.lock_version;

        let first = self
            .deal_round(&mut game, 1, self.config.starting_dealer, now)
            .await?;
        game.updated_at = now;

        let mut work = UnitOfWork::new(expected_version, game);
        work.insert_round(&first);
        let committed = self.store.commit(work).await?;

        let events = vec![GameEvent::round_started(&first)];
        self.publish(committed.id, &events);
        info!(
            game_id = committed.id,
            round_id = first.id(),
            dealer = first.round.dealer,
            "game started"
        );

        Ok(ActionOutcome {
            result: (),
            game: committed,
            round_id: first.id(),
            next_round_id: None,
            events,
        })
    }

    /// Score a hand whose eighth trick has closed. Only needed when
    /// `auto_score` is off; a second call is rejected as `AlreadyResolved`.
    pub async fn score_round(
        &self,
        round_id: RoundId,
    ) -> Result<ActionOutcome<RoundScore>, DomainError> {
        // Checked before the active-round guard: a scored round has usually
        // been superseded already.
        if self.store.find_score(round_id).await?.is_some() {
            debug!(round_id, "round already scored");
            return Err(DomainError::already_resolved(round_id, "round already scored"));
        }
        let outcome = self
            .run_round_mutation(round_id, None, |state, at| {
                apply_round_scoring(state, at).cloned()
            })
            .await;
        match outcome {
            // A concurrent scorer may have committed and moved the game on
            // between the check above and the load.
            Err(err @ (DomainError::StaleRound { .. } | DomainError::IllegalAction { .. })) => {
                match self.store.find_score(round_id).await? {
                    Some(_) => Err(DomainError::already_resolved(round_id, "round already scored")),
                    None => Err(err),
                }
            }
            other => other,
        }
    }

    /// Deal the round after the active one, rotating the dealer.
    pub(super) async fn deal_next(
        &self,
        game: &mut Game,
        now: OffsetDateTime,
    ) -> Result<RoundState, DomainError> {
        let (round_no, dealer) = game.next_round_slot();
        self.deal_round(game, round_no, dealer, now).await
    }

    /// Shuffle, deal five cards each, expose the turned card and make the new
    /// round the game's active one. Nothing is written until the caller
    /// commits.
    async fn deal_round(
        &self,
        game: &mut Game,
        round_no: u16,
        dealer: Seat,
        now: OffsetDateTime,
    ) -> Result<RoundState, DomainError> {
        let round_id = self.store.allocate_round_id().await?;
        let deck = self.decks.deck_for(game.rng_seed, round_no);
        let state = RoundState::deal(round_id, game.id, round_no, dealer, deck, now);
        state.verify_card_partition()?;
        game.activate_round(round_id, round_no, dealer);
        debug!(
            game_id = game.id,
            round_id,
            round_no,
            dealer,
            turned_card = %state.round.turned_card(),
            "round dealt"
        );
        Ok(state)
    }
}
