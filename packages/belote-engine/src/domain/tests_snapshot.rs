use time::OffsetDateTime;

use crate::domain::bidding::BidAction;
use crate::domain::dealing::shuffle_with_seed;
use crate::domain::game::{Game, GameStatus};
use crate::domain::snapshot::{snapshot, PhaseSnapshot};
use crate::domain::test_state_helpers::{
    bidding_round, capot_hands, first_legal, play_out, playing_round,
};

fn game() -> Game {
    Game {
        id: 1,
        status: GameStatus::InProgress,
        score_threshold: 1000,
        scores_total: [120, 40],
        active_round_id: Some(100),
        active_round_no: 1,
        dealer: 0,
        rng_seed: 7,
        lock_version: 3,
        winner: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

#[test]
fn bidding_snapshot_shows_legal_bids_only_to_actor() {
    let state = bidding_round(shuffle_with_seed(2), 0);
    let snap = snapshot(&game(), &state, 1);
    assert_eq!(snap.hand, state.hands[1]);
    assert_eq!(snap.round.hand_sizes, [5, 5, 5, 5]);
    assert_eq!(snap.game.scores_total, [120, 40]);
    match &snap.phase {
        PhaseSnapshot::Bidding(b) => {
            assert_eq!(b.legal_bids, vec![BidAction::Pass, BidAction::TakeTurnedCard]);
        }
        other => panic!("expected bidding phase, got {other:?}"),
    }

    let other = snapshot(&game(), &state, 2);
    match other.phase {
        PhaseSnapshot::Bidding(b) => assert!(b.legal_bids.is_empty()),
        other => panic!("expected bidding phase, got {other:?}"),
    }
}

#[test]
fn trick_snapshot_shows_playable_cards_for_actor() {
    let state = playing_round(&capot_hands(), 3, 0);
    let snap = snapshot(&game(), &state, 0);
    match snap.phase {
        PhaseSnapshot::Trick(t) => {
            assert_eq!(t.playable.len(), 8);
            assert_eq!(t.current_trick.map(|t| t.trick_no), Some(1));
            assert!(t.last_trick.is_none());
            assert_eq!(t.live_points, [0, 0]);
        }
        other => panic!("expected trick phase, got {other:?}"),
    }
}

#[test]
fn scored_snapshot_carries_round_score() {
    let mut state = playing_round(&capot_hands(), 3, 0);
    play_out(&mut state, first_legal);
    crate::domain::scoring::apply_round_scoring(&mut state, OffsetDateTime::UNIX_EPOCH).unwrap();
    let snap = snapshot(&game(), &state, 3);
    assert!(snap.hand.is_empty());
    match snap.phase {
        PhaseSnapshot::Scored(score) => assert_eq!(score.totals(), [252, 0]),
        other => panic!("expected scored phase, got {other:?}"),
    }
    let json = serde_json::to_value(snapshot(&game(), &state, 3)).unwrap();
    assert_eq!(json["phase"]["phase"], "Scored");
}
