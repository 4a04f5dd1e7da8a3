//! Domain layer: pure Belote rules and state transitions. Nothing here
//! performs I/O.

pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deadline;
pub mod dealing;
pub mod events;
pub mod game;
pub mod replay;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_domain_dealing;
#[cfg(test)]
mod tests_events;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_props_scoring;
#[cfg(test)]
mod tests_props_trick_winner;
#[cfg(test)]
mod tests_snapshot;

// Re-exports for ergonomics
pub use bidding::{AuctionState, Bid, BidAction, BidOutcome};
pub use cards_logic::{card_beats, card_points, hand_has_suit};
pub use cards_types::{Card, Rank, Suit};
pub use dealing::{Deck, DeckSource, EntropyDeckSource, ScriptedDeckSource, SeededDeckSource};
pub use deadline::{window_expired, TurnTicket};
pub use events::GameEvent;
pub use game::{Game, GameStatus};
pub use scoring::{Bonus, BonusKind, ContractOutcome, RoundScore, TeamScore};
pub use snapshot::RoundSnapshot;
pub use state::{GameId, Round, RoundId, RoundState, RoundStatus, Seat, Team};
pub use tricks::{BeloteCall, Play, PlayCardResult, Trick};
