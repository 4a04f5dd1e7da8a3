//! Error codes for the Belote engine.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and are what a transport layer
//! forwards to clients.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Round not found
    RoundNotFound,
    /// Trick not found
    TrickNotFound,
    /// Card not found
    CardNotFound,
    /// General not found error
    NotFound,

    // Rule rejections
    /// Actor is not on turn
    OutOfTurn,
    /// Action not allowed in the current auction round
    IllegalAction,
    /// Card not in the legal set
    IllegalCard,
    /// Round superseded by redeal or next hand
    StaleRound,
    /// Scoring or trick already resolved
    AlreadyResolved,

    // Input validation
    /// General validation error
    ValidationError,

    // Conflicts
    /// Optimistic lock failure
    OptimisticLock,
    /// General conflict
    Conflict,

    // Infrastructure
    /// Stored data breaks an engine invariant
    DataCorruption,
    /// Store timed out
    StoreTimeout,
    /// Store unavailable
    StoreUnavailable,
    /// Other infrastructure error
    InfraError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::TrickNotFound => "TRICK_NOT_FOUND",
            Self::CardNotFound => "CARD_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::IllegalAction => "ILLEGAL_ACTION",
            Self::IllegalCard => "ILLEGAL_CARD",
            Self::StaleRound => "STALE_ROUND",
            Self::AlreadyResolved => "ALREADY_RESOLVED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::StoreTimeout => "STORE_TIMEOUT",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::InfraError => "INFRA_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
