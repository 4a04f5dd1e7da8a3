//! Hand scoring: base trick points per team, bonuses, contract evaluation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::rules::{
    BELOTE_BONUS, CAPOT_BONUS, CONTRACT_THRESHOLD, LAST_TRICK_BONUS, TRICKS_PER_ROUND,
};
use crate::domain::state::{RoundId, RoundState, RoundStatus, Team};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BonusKind {
    /// "Dix de der".
    LastTrick,
    Capot,
    Belote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub kind: BonusKind,
    pub points: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamScore {
    /// Trick points after contract evaluation.
    pub base: u16,
    pub bonuses: Vec<Bonus>,
}

impl TeamScore {
    pub fn bonus_total(&self) -> u16 {
        self.bonuses.iter().map(|b| b.points).sum()
    }

    pub fn total(&self) -> u16 {
        self.base + self.bonus_total()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractOutcome {
    Made,
    /// Chute: the defenders take the whole base mass.
    Failed,
}

/// Persisted result of one hand, indexed by `Team::index()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub round_id: RoundId,
    pub teams: [TeamScore; 2],
    /// Trick points as won, before any failure override.
    pub raw_base: [u16; 2],
    pub taker_team: Team,
    pub contract: ContractOutcome,
}

impl RoundScore {
    pub fn team(&self, team: Team) -> &TeamScore {
        &self.teams[team.index()]
    }

    pub fn totals(&self) -> [u16; 2] {
        [self.teams[0].total(), self.teams[1].total()]
    }
}

/// Trick points per team over the closed tricks so far.
pub fn live_points(state: &RoundState) -> [u16; 2] {
    let mut points = [0u16; 2];
    let Some(trump) = state.round.trump else {
        return points;
    };
    for trick in state.closed_tricks() {
        if let Some(team) = trick.winning_team() {
            points[team.index()] += trick.points(trump);
        }
    }
    points
}

/// Compute the score of a complete hand. Pure: the same tricks always give
/// the same result.
pub fn score_round(state: &RoundState) -> Result<RoundScore, DomainError> {
    let round_id = state.round.id;
    if !state.hand_complete() {
        return Err(DomainError::illegal_action(
            round_id,
            format!(
                "hand is not complete ({} of {TRICKS_PER_ROUND} tricks closed)",
                state.closed_tricks().count()
            ),
        ));
    }
    let taker = state.require_taker()?;
    let taker_team = Team::of(taker);

    let raw_base = live_points(state);
    let mut teams: [TeamScore; 2] = Default::default();

    let last_team = state
        .last_closed_trick()
        .and_then(|t| t.winning_team())
        .ok_or_else(|| {
            DomainError::invariant(format!("round {round_id}: last trick has no winner"))
        })?;
    teams[last_team.index()].bonuses.push(Bonus {
        kind: BonusKind::LastTrick,
        points: LAST_TRICK_BONUS,
    });

    for team in Team::ALL {
        let won_all = state
            .closed_tricks()
            .all(|t| t.winning_team() == Some(team));
        if won_all {
            teams[team.index()].bonuses.push(Bonus {
                kind: BonusKind::Capot,
                points: CAPOT_BONUS,
            });
        }
    }

    if let Some(declarer) = state.round.belote {
        teams[Team::of(declarer).index()].bonuses.push(Bonus {
            kind: BonusKind::Belote,
            points: BELOTE_BONUS,
        });
    }

    let contract = if raw_base[taker_team.index()] < CONTRACT_THRESHOLD {
        let mass = raw_base[0] + raw_base[1];
        teams[taker_team.index()].base = 0;
        teams[taker_team.other().index()].base = mass;
        ContractOutcome::Failed
    } else {
        teams[0].base = raw_base[0];
        teams[1].base = raw_base[1];
        ContractOutcome::Made
    };

    Ok(RoundScore {
        round_id,
        teams,
        raw_base,
        taker_team,
        contract,
    })
}

/// Score the hand into the round and mark it completed. A second call is
/// rejected.
pub fn apply_round_scoring(
    state: &mut RoundState,
    at: OffsetDateTime,
) -> Result<&RoundScore, DomainError> {
    let round_id = state.round.id;
    if state.score.is_some() || state.round.status == RoundStatus::Completed {
        return Err(DomainError::already_resolved(round_id, "hand already scored"));
    }
    if state.round.status != RoundStatus::Playing {
        return Err(DomainError::illegal_action(
            round_id,
            "only a played hand can be scored",
        ));
    }
    let score = score_round(state)?;
    state.round.status = RoundStatus::Completed;
    state.round.completed_at = Some(at);
    Ok(state.score.insert(score))
}
