use tracing::debug;

use super::{ActionOutcome, GameFlowService, TurnRequest};
use crate::domain::bidding::{self, BidAction, BidOutcome};
use crate::domain::tricks::{self, PlayCardResult};
use crate::domain::Card;
use crate::errors::domain::DomainError;

impl GameFlowService {
    /// Submit an auction action for the seat in `req`.
    ///
    /// A pass that voids the deal redeals in the same commit; the new round
    /// is reported in [`ActionOutcome::next_round_id`].
    pub async fn place_bid(
        &self,
        req: TurnRequest,
        action: BidAction,
    ) -> Result<ActionOutcome<BidOutcome>, DomainError> {
        debug!(round_id = req.round_id, seat = req.seat, ?action, "placing bid");
        self.run_round_mutation(req.round_id, Some(&req), move |state, at| {
            bidding::place_bid(state, req.seat, action, at)
        })
        .await
    }

    /// Play a card for the seat in `req`.
    ///
    /// With `auto_score` on, the play that closes the eighth trick also
    /// scores the hand and deals the next one (or ends the game).
    pub async fn play_card(
        &self,
        req: TurnRequest,
        card: Card,
    ) -> Result<ActionOutcome<PlayCardResult>, DomainError> {
        debug!(round_id = req.round_id, seat = req.seat, %card, "playing card");
        self.run_round_mutation(req.round_id, Some(&req), move |state, _at| {
            tricks::play_card(state, req.seat, card)
        })
        .await
    }
}
