//! Domain-level error type used across the engine.
//!
//! Every rule rejection is a value of [`DomainError`]; the engine never leaves
//! round state half-applied. Callers (a transport layer) match on the variant
//! or use [`DomainError::code`] for a stable string.

use thiserror::Error;

use crate::domain::state::{RoundId, Seat};
use crate::domain::Card;
use crate::errors::ErrorCode;

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    StoreUnavailable,
    Other(String),
}

/// Entities that can be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Round,
    Trick,
    Card,
    Other(String),
}

/// Conflicts reported by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    OptimisticLock,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Referenced game, round, trick or card does not exist.
    #[error("not found {kind:?}: {detail}")]
    NotFound { kind: NotFoundKind, detail: String },

    /// Actor is not the round's current-turn player, or their turn window has passed.
    #[error("out of turn in round {round_id}: seat {actual} acted, expected {expected:?}")]
    OutOfTurn {
        round_id: RoundId,
        expected: Option<Seat>,
        actual: Seat,
    },

    /// Action not valid for the current auction round or game state.
    #[error("illegal action in round {round_id}: {detail}")]
    IllegalAction { round_id: RoundId, detail: String },

    /// Requested card is not in the legal set.
    #[error("illegal card {card} in round {round_id}")]
    IllegalCard {
        round_id: RoundId,
        card: Card,
        legal: Vec<Card>,
    },

    /// Action targets a round that is no longer live.
    #[error("stale round {requested}: active round is {active_round_id} (round #{active_round_no})")]
    StaleRound {
        requested: RoundId,
        active_round_id: RoundId,
        active_round_no: u16,
    },

    /// Scoring or trick closing was already applied.
    #[error("already resolved in round {round_id}: {detail}")]
    AlreadyResolved { round_id: RoundId, detail: String },

    /// Stored data breaks an engine invariant (a bug in deal/redeal or storage).
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// Store-level conflict (optimistic lock).
    #[error("conflict {kind:?}: {detail}")]
    Conflict { kind: ConflictKind, detail: String },

    /// Malformed input (card text, configuration values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Store or other infrastructure failure.
    #[error("infra {kind:?}: {detail}")]
    Infra { kind: InfraErrorKind, detail: String },
}

impl DomainError {
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            detail: detail.into(),
        }
    }

    pub fn illegal_action(round_id: RoundId, detail: impl Into<String>) -> Self {
        Self::IllegalAction {
            round_id,
            detail: detail.into(),
        }
    }

    pub fn already_resolved(round_id: RoundId, detail: impl Into<String>) -> Self {
        Self::AlreadyResolved {
            round_id,
            detail: detail.into(),
        }
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict {
            kind,
            detail: detail.into(),
        }
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }

    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra {
            kind,
            detail: detail.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::NotFound { kind, .. } => match kind {
                NotFoundKind::Game => ErrorCode::GameNotFound,
                NotFoundKind::Round => ErrorCode::RoundNotFound,
                NotFoundKind::Trick => ErrorCode::TrickNotFound,
                NotFoundKind::Card => ErrorCode::CardNotFound,
                NotFoundKind::Other(_) => ErrorCode::NotFound,
            },
            DomainError::OutOfTurn { .. } => ErrorCode::OutOfTurn,
            DomainError::IllegalAction { .. } => ErrorCode::IllegalAction,
            DomainError::IllegalCard { .. } => ErrorCode::IllegalCard,
            DomainError::StaleRound { .. } => ErrorCode::StaleRound,
            DomainError::AlreadyResolved { .. } => ErrorCode::AlreadyResolved,
            DomainError::Invariant(_) => ErrorCode::DataCorruption,
            DomainError::Conflict { kind, .. } => match kind {
                ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                ConflictKind::Other(_) => ErrorCode::Conflict,
            },
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::Infra { kind, .. } => match kind {
                InfraErrorKind::Timeout => ErrorCode::StoreTimeout,
                InfraErrorKind::StoreUnavailable => ErrorCode::StoreUnavailable,
                InfraErrorKind::Other(_) => ErrorCode::InfraError,
            },
        }
    }

    /// Rule rejections are recoverable by resynchronising; corruption and
    /// infrastructure failures are not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DomainError::Invariant(_) | DomainError::Infra { .. })
    }
}
