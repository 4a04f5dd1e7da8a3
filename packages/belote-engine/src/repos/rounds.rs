//! Round lookups over a [`GameStore`].

use crate::domain::state::{RoundId, RoundState};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::{GameStore, StoredRound};

/// Load a round aggregate and its game from one consistent read.
pub async fn load_stored_round(
    store: &dyn GameStore,
    round_id: RoundId,
) -> Result<StoredRound, DomainError> {
    store
        .load_round(round_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Round, format!("round {round_id}")))
}

/// Load the full aggregate of a round: header, bid log, tricks, hands and
/// score.
pub async fn load_round_state(
    store: &dyn GameStore,
    round_id: RoundId,
) -> Result<RoundState, DomainError> {
    Ok(load_stored_round(store, round_id).await?.state)
}
