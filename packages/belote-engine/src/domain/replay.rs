//! Deterministic replay of a round from its deck and action logs.

use crate::domain::bidding::{place_bid, Bid};
use crate::domain::scoring::score_round;
use crate::domain::state::{Round, RoundState, RoundStatus};
use crate::domain::tricks::{play_card, Trick};
use crate::errors::domain::DomainError;

/// Rebuild a round by re-applying its bid log and then every play in trick
/// order, starting from a fresh deal of the stored deck. The hand is scored
/// when all eight tricks are present.
pub fn replay_round(
    round: &Round,
    bids: &[Bid],
    tricks: &[Trick],
) -> Result<RoundState, DomainError> {
    let mut state = RoundState::deal(
        round.id,
        round.game_id,
        round.round_no,
        round.dealer,
        round.deck.clone(),
        round.created_at,
    );

    for bid in bids {
        place_bid(&mut state, bid.seat, bid.action, bid.created_at)?;
    }
    for trick in tricks {
        for play in &trick.plays {
            play_card(&mut state, play.seat, play.card)?;
        }
    }

    if state.hand_complete() {
        state.score = Some(score_round(&state)?);
        state.round.status = RoundStatus::Completed;
        state.round.completed_at = round.completed_at;
    }
    Ok(state)
}

/// Replay `stored` and check that the outcome matches what was persisted:
/// taker, trump, belote declarer, trick winners and score.
pub fn verify_round(stored: &RoundState) -> Result<RoundState, DomainError> {
    let replayed = replay_round(&stored.round, &stored.bids, &stored.tricks)?;
    let round_id = stored.round.id;
    let mismatch = |what: &str| {
        DomainError::invariant(format!("round {round_id}: replay disagrees on {what}"))
    };

    if replayed.round.taker != stored.round.taker {
        return Err(mismatch("taker"));
    }
    if replayed.round.trump != stored.round.trump {
        return Err(mismatch("trump"));
    }
    if replayed.round.belote != stored.round.belote {
        return Err(mismatch("belote declarer"));
    }
    let winners = |s: &RoundState| s.tricks.iter().map(|t| t.winner).collect::<Vec<_>>();
    if winners(&replayed) != winners(stored) {
        return Err(mismatch("trick winners"));
    }
    if stored.score.is_some() && replayed.score != stored.score {
        return Err(mismatch("score"));
    }
    if replayed.hands != stored.hands {
        return Err(mismatch("hands"));
    }
    Ok(replayed)
}
