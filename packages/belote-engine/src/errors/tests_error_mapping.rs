// Unit tests for error mapping - pure domain values, no store involved
use std::collections::HashSet;

use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::ErrorCode;

#[test]
fn maps_rule_rejections() {
    let e = DomainError::OutOfTurn {
        round_id: 7,
        expected: Some(2),
        actual: 1,
    };
    assert_eq!(e.code(), ErrorCode::OutOfTurn);
    assert!(e.is_recoverable());

    let e = DomainError::IllegalCard {
        round_id: 7,
        card: Card::new(Suit::Hearts, Rank::Ace),
        legal: vec![Card::new(Suit::Spades, Rank::Nine)],
    };
    assert_eq!(e.code().as_str(), "ILLEGAL_CARD");
    assert!(e.to_string().contains("AH"));

    let e = DomainError::StaleRound {
        requested: 3,
        active_round_id: 4,
        active_round_no: 2,
    };
    assert_eq!(e.code().as_str(), "STALE_ROUND");
    assert!(e.is_recoverable());

    let e = DomainError::already_resolved(4, "scored");
    assert_eq!(e.code(), ErrorCode::AlreadyResolved);
}

#[test]
fn maps_not_found_kinds() {
    assert_eq!(
        DomainError::not_found(NotFoundKind::Game, "g").code(),
        ErrorCode::GameNotFound
    );
    assert_eq!(
        DomainError::not_found(NotFoundKind::Round, "r").code(),
        ErrorCode::RoundNotFound
    );
    assert_eq!(
        DomainError::not_found(NotFoundKind::Other("x".into()), "x").code(),
        ErrorCode::NotFound
    );
}

#[test]
fn corruption_and_infra_are_fatal() {
    let e = DomainError::invariant("deck is not a partition");
    assert_eq!(e.code(), ErrorCode::DataCorruption);
    assert!(!e.is_recoverable());

    let e = DomainError::infra(InfraErrorKind::Timeout, "slow");
    assert_eq!(e.code().as_str(), "STORE_TIMEOUT");
    assert!(!e.is_recoverable());

    let e = DomainError::conflict(ConflictKind::OptimisticLock, "version");
    assert_eq!(e.code(), ErrorCode::OptimisticLock);
    assert!(e.is_recoverable());
}

#[test]
fn error_codes_are_unique() {
    let all = [
        ErrorCode::GameNotFound,
        ErrorCode::RoundNotFound,
        ErrorCode::TrickNotFound,
        ErrorCode::CardNotFound,
        ErrorCode::NotFound,
        ErrorCode::OutOfTurn,
        ErrorCode::IllegalAction,
        ErrorCode::IllegalCard,
        ErrorCode::StaleRound,
        ErrorCode::AlreadyResolved,
        ErrorCode::ValidationError,
        ErrorCode::OptimisticLock,
        ErrorCode::Conflict,
        ErrorCode::DataCorruption,
        ErrorCode::StoreTimeout,
        ErrorCode::StoreUnavailable,
        ErrorCode::InfraError,
    ];

    let mut seen = HashSet::new();
    for code in all {
        let s = code.as_str();
        assert!(seen.insert(s), "Duplicate error code string: {s}");
        assert_eq!(s, s.to_uppercase());
    }
}
