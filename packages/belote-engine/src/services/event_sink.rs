//! Where committed domain events go. Delivery to clients belongs to the
//! host; the engine only calls [`EventSink::emit`] after a successful commit.

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::domain::events::GameEvent;
use crate::domain::state::GameId;

pub trait EventSink: Send + Sync {
    fn emit(&self, game_id: GameId, event: GameEvent);
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _game_id: GameId, _event: GameEvent) {}
}

/// Logs each event as a structured `info` line with its JSON payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, game_id: GameId, event: GameEvent) {
        let payload = serde_json::to_string(&event).unwrap_or_default();
        info!(game_id, event = event.name(), %payload, "game event");
    }
}

/// Fans events out over a tokio broadcast channel. Each message carries the
/// game id so subscribers can filter.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    tx: broadcast::Sender<(GameId, GameEvent)>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<(GameId, GameEvent)> {
        self.tx.subscribe()
    }
}

impl EventSink for BroadcastSink {
    fn emit(&self, game_id: GameId, event: GameEvent) {
        // No subscribers is not an error.
        if self.tx.send((game_id, event)).is_err() {
            debug!(game_id, "no event subscribers");
        }
    }
}

/// Keeps every event in memory, for tests and audits.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<(GameId, GameEvent)>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().iter().map(|(_, e)| e.clone()).collect()
    }

    pub fn events_for(&self, game_id: GameId) -> Vec<GameEvent> {
        self.events
            .lock()
            .iter()
            .filter(|(g, _)| *g == game_id)
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// Remove and return everything collected so far.
    pub fn drain(&self) -> Vec<GameEvent> {
        self.events.lock().drain(..).map(|(_, e)| e).collect()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, game_id: GameId, event: GameEvent) {
        self.events.lock().push((game_id, event));
    }
}
