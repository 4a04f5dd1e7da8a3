//! Game flow orchestration service: bridges the pure domain rules with the
//! store and the event sink.
//!
//! Every mutating call loads the committed aggregate, applies one domain
//! operation to a copy, settles follow-up transitions (scoring, redeal, next
//! deal, game over), and commits the difference as a single unit guarded by
//! the game's lock version. Events are published only after the commit.

mod mutation;
mod player_actions;
mod queries;
mod round_lifecycle;

use std::sync::Arc;

use time::OffsetDateTime;

use crate::config::EngineConfig;
use crate::domain::deadline::TurnTicket;
use crate::domain::dealing::{DeckSource, SeededDeckSource};
use crate::domain::state::{RoundId, Seat};
use crate::repos::GameStore;
use crate::services::event_sink::{EventSink, NoopSink};

pub use mutation::ActionOutcome;
pub use queries::RoundSummary;

/// Who wants to act, on which round, and until when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnRequest {
    pub round_id: RoundId,
    pub seat: Seat,
    /// Externally imposed end of the turn window. Requests arriving at or
    /// after it are rejected as out of turn.
    pub deadline: Option<OffsetDateTime>,
    /// When set, the request only applies to this exact turn.
    pub expected_turn_seq: Option<u32>,
}

impl TurnRequest {
    pub fn new(round_id: RoundId, seat: Seat) -> Self {
        Self {
            round_id,
            seat,
            deadline: None,
            expected_turn_seq: None,
        }
    }

    /// Act on exactly the turn named by `ticket`.
    pub fn for_ticket(ticket: TurnTicket) -> Self {
        Self {
            round_id: ticket.round_id,
            seat: ticket.seat,
            deadline: None,
            expected_turn_seq: Some(ticket.turn_seq),
        }
    }

    pub fn with_deadline(mut self, deadline: OffsetDateTime) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

pub struct GameFlowService {
    store: Arc<dyn GameStore>,
    sink: Arc<dyn EventSink>,
    decks: Arc<dyn DeckSource>,
    config: EngineConfig,
}

impl GameFlowService {
    pub fn new(
        store: Arc<dyn GameStore>,
        sink: Arc<dyn EventSink>,
        decks: Arc<dyn DeckSource>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            sink,
            decks,
            config,
        }
    }

    /// Seeded decks, no event delivery, default configuration.
    pub fn with_store(store: Arc<dyn GameStore>) -> Self {
        Self::new(
            store,
            Arc::new(NoopSink),
            Arc::new(SeededDeckSource),
            EngineConfig::default(),
        )
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn GameStore> {
        &self.store
    }
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
