//! Orchestration services: load state, run the pure domain operation,
//! commit, then publish events.

pub mod event_sink;
pub mod game_flow;

pub use event_sink::{BroadcastSink, CollectingSink, EventSink, NoopSink, TracingSink};
pub use game_flow::{ActionOutcome, GameFlowService, RoundSummary, TurnRequest};
