//! Game lookups over a [`GameStore`].

use crate::domain::game::Game;
use crate::domain::state::GameId;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::GameStore;

/// Find game by id or fail with `NotFound`.
pub async fn require_game(store: &dyn GameStore, game_id: GameId) -> Result<Game, DomainError> {
    store
        .find_game(game_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("game {game_id}")))
}
