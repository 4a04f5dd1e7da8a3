#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Rule engine and state machine for four-player Belote: auction, legal
//! plays, trick resolution, hand scoring, and the optimistic-concurrency
//! orchestration that keeps one writer per turn.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod repos;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use adapters::MemoryStore;
pub use config::EngineConfig;
pub use domain::{
    BidAction, BidOutcome, Card, Game, GameEvent, GameId, RoundId, RoundScore, RoundSnapshot,
    RoundState, Seat, Suit, Team, TurnTicket,
};
pub use errors::{DomainError, ErrorCode};
pub use repos::{GameStore, StoredRound, UnitOfWork};
pub use services::{
    ActionOutcome, BroadcastSink, CollectingSink, EventSink, GameFlowService, NoopSink,
    TracingSink, TurnRequest,
};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    belote_test_support::test_logging::init();
}
