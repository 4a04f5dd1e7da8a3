//! Property-based tests for hand scoring over random complete hands.

use proptest::prelude::*;

use crate::domain::rules::{CONTRACT_THRESHOLD, DECK_POINTS};
use crate::domain::scoring::{score_round, BonusKind, ContractOutcome};
use crate::domain::state::{RoundState, Seat, Team};
use crate::domain::test_state_helpers::{play_out, taken_round};
use crate::domain::{test_gens, test_prelude, Deck};

fn random_hand(
    deck: Deck,
    dealer: Seat,
    taker: Seat,
    picks: Vec<prop::sample::Index>,
) -> RoundState {
    let mut state = taken_round(deck, dealer, taker);
    let mut picks = picks.into_iter().cycle();
    play_out(&mut state, |legal| *picks.next().expect("cycled").get(legal));
    state
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_base_mass_conserved_or_redistributed(
        deck in test_gens::deck(),
        dealer in test_gens::seat(),
        taker in test_gens::seat(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 32),
    ) {
        let state = random_hand(deck, dealer, taker, picks);
        let score = score_round(&state).unwrap();

        prop_assert_eq!(score.raw_base[0] + score.raw_base[1], DECK_POINTS);
        let taker_team = Team::of(taker);
        prop_assert_eq!(score.taker_team, taker_team);
        match score.contract {
            ContractOutcome::Made => {
                prop_assert!(score.raw_base[taker_team.index()] >= CONTRACT_THRESHOLD);
                prop_assert_eq!(score.team(Team::A).base, score.raw_base[0]);
                prop_assert_eq!(score.team(Team::B).base, score.raw_base[1]);
            }
            ContractOutcome::Failed => {
                prop_assert!(score.raw_base[taker_team.index()] < CONTRACT_THRESHOLD);
                prop_assert_eq!(score.team(taker_team).base, 0);
                prop_assert_eq!(score.team(taker_team.other()).base, DECK_POINTS);
            }
        }
    }

    #[test]
    fn prop_bonuses_follow_the_tricks(
        deck in test_gens::deck(),
        dealer in test_gens::seat(),
        taker in test_gens::seat(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 32),
    ) {
        let state = random_hand(deck, dealer, taker, picks);
        let score = score_round(&state).unwrap();

        let last = state.last_closed_trick().and_then(|t| t.winning_team()).unwrap();
        let has = |team: Team, kind: BonusKind| {
            score.team(team).bonuses.iter().any(|b| b.kind == kind)
        };
        prop_assert!(has(last, BonusKind::LastTrick));
        prop_assert!(!has(last.other(), BonusKind::LastTrick));
        prop_assert!(!(has(Team::A, BonusKind::Capot) && has(Team::B, BonusKind::Capot)));
        for team in Team::ALL {
            let won_all = state.tricks.iter().all(|t| t.winning_team() == Some(team));
            prop_assert_eq!(has(team, BonusKind::Capot), won_all);
            let belote = state.round.belote.map(Team::of) == Some(team);
            prop_assert_eq!(has(team, BonusKind::Belote), belote);
        }
        // Deterministic.
        prop_assert_eq!(score_round(&state).unwrap(), score);
    }
}
