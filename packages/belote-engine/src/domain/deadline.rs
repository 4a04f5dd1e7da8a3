//! Turn identity and the deadline predicate used by timeout collaborators.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::state::{RoundId, RoundState, Seat};

/// Identifies one turn: who is to act, in which round, at which step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnTicket {
    pub round_id: RoundId,
    pub seat: Seat,
    pub turn_seq: u32,
}

impl TurnTicket {
    /// Ticket for the turn currently open in `state`, if any.
    pub fn current(state: &RoundState) -> Option<Self> {
        if !state.round.is_live() {
            return None;
        }
        state.round.turn.map(|seat| Self {
            round_id: state.round.id,
            seat,
            turn_seq: state.round.turn_seq,
        })
    }

    /// Whether this ticket still names the open turn of `state`.
    pub fn matches(&self, state: &RoundState) -> bool {
        Self::current(state).as_ref() == Some(self)
    }
}

/// Has the window closed? A deadline is exclusive: acting exactly at the
/// deadline is already too late.
#[inline]
pub fn window_expired(now: OffsetDateTime, deadline: OffsetDateTime) -> bool {
    now >= deadline
}
