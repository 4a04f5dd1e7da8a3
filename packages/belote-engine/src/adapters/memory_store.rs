//! In-process [`GameStore`]. One mutex guards every table, so a commit is
//! validated and applied as a single critical section.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::domain::bidding::Bid;
use crate::domain::game::{Game, GameStatus};
use crate::domain::scoring::RoundScore;
use crate::domain::state::{GameId, Round, RoundId, RoundState};
use crate::domain::tricks::Trick;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::{GameStore, Hands, NewGame, StoredRound, UnitOfWork};

#[derive(Debug, Default)]
struct Tables {
    games: HashMap<GameId, Game>,
    rounds: HashMap<RoundId, Round>,
    bids: HashMap<RoundId, Vec<Bid>>,
    tricks: HashMap<RoundId, BTreeMap<u8, Trick>>,
    hands: HashMap<RoundId, Hands>,
    scores: HashMap<RoundId, RoundScore>,
}

#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    next_game_id: AtomicI64,
    next_round_id: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            next_game_id: AtomicI64::new(1),
            next_round_id: AtomicI64::new(1),
        }
    }

    /// Number of commits applied to a game so far (its lock version minus
    /// the initial one).
    pub fn commits_for(&self, game_id: GameId) -> Option<i32> {
        self.tables
            .lock()
            .games
            .get(&game_id)
            .map(|g| g.lock_version - 1)
    }
}

/// Check `work` against the current tables without touching them.
fn validate(tables: &Tables, work: &UnitOfWork) -> Result<(), DomainError> {
    let game_id = work.game.id;
    let stored = tables.games.get(&game_id).ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("game {game_id}"))
    })?;
    if stored.lock_version != work.expected_lock_version {
        return Err(DomainError::conflict(
            ConflictKind::OptimisticLock,
            format!(
                "game {game_id}: expected lock version {}, found {}",
                work.expected_lock_version, stored.lock_version
            ),
        ));
    }

    let mut next_order: HashMap<RoundId, usize> = HashMap::new();
    for bid in &work.bids {
        let expected = next_order
            .entry(bid.round_id)
            .or_insert_with(|| tables.bids.get(&bid.round_id).map_or(0, Vec::len));
        if bid.bid_order as usize != *expected {
            return Err(DomainError::conflict(
                ConflictKind::Other("bid log".into()),
                format!(
                    "round {}: bid order {} does not continue the log at {}",
                    bid.round_id, bid.bid_order, expected
                ),
            ));
        }
        *expected += 1;
    }

    for (round_id, trick) in &work.tricks {
        let existing = tables
            .tricks
            .get(round_id)
            .and_then(|t| t.get(&trick.trick_no));
        if let Some(existing) = existing.filter(|t| t.is_closed()) {
            if existing != trick {
                return Err(DomainError::already_resolved(
                    *round_id,
                    format!("trick {} is already closed", trick.trick_no),
                ));
            }
        }
    }

    if let Some(score) = &work.score {
        if tables.scores.contains_key(&score.round_id) {
            return Err(DomainError::already_resolved(
                score.round_id,
                "round already scored",
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn create_game(&self, new: NewGame) -> Result<Game, DomainError> {
        let id = self.next_game_id.fetch_add(1, Ordering::Relaxed);
        let game = Game {
            id,
            status: GameStatus::InProgress,
            score_threshold: new.score_threshold,
            scores_total: [0, 0],
            active_round_id: None,
            active_round_no: 0,
            dealer: new.starting_dealer,
            rng_seed: new.rng_seed,
            lock_version: 1,
            winner: None,
            created_at: new.created_at,
            updated_at: new.created_at,
        };
        self.tables.lock().games.insert(id, game.clone());
        debug!(game_id = id, "game created");
        Ok(game)
    }

    async fn allocate_round_id(&self) -> Result<RoundId, DomainError> {
        Ok(self.next_round_id.fetch_add(1, Ordering::Relaxed))
    }

    async fn find_game(&self, game_id: GameId) -> Result<Option<Game>, DomainError> {
        Ok(self.tables.lock().games.get(&game_id).cloned())
    }

    async fn find_round(&self, round_id: RoundId) -> Result<Option<Round>, DomainError> {
        Ok(self.tables.lock().rounds.get(&round_id).cloned())
    }

    async fn find_bids(&self, round_id: RoundId) -> Result<Vec<Bid>, DomainError> {
        Ok(self
            .tables
            .lock()
            .bids
            .get(&round_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_tricks(&self, round_id: RoundId) -> Result<Vec<Trick>, DomainError> {
        Ok(self
            .tables
            .lock()
            .tricks
            .get(&round_id)
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_hands(&self, round_id: RoundId) -> Result<Option<Hands>, DomainError> {
        Ok(self.tables.lock().hands.get(&round_id).cloned())
    }

    async fn find_score(&self, round_id: RoundId) -> Result<Option<RoundScore>, DomainError> {
        Ok(self.tables.lock().scores.get(&round_id).cloned())
    }

    async fn load_round(&self, round_id: RoundId) -> Result<Option<StoredRound>, DomainError> {
        let tables = self.tables.lock();
        let Some(round) = tables.rounds.get(&round_id).cloned() else {
            return Ok(None);
        };
        let game = tables.games.get(&round.game_id).cloned().ok_or_else(|| {
            DomainError::invariant(format!(
                "round {round_id} belongs to missing game {}",
                round.game_id
            ))
        })?;
        let hands = tables.hands.get(&round_id).cloned().ok_or_else(|| {
            DomainError::invariant(format!("round {round_id} has a header but no hands"))
        })?;
        let state = RoundState {
            round,
            hands,
            bids: tables.bids.get(&round_id).cloned().unwrap_or_default(),
            tricks: tables
                .tricks
                .get(&round_id)
                .map(|t| t.values().cloned().collect())
                .unwrap_or_default(),
            score: tables.scores.get(&round_id).cloned(),
        };
        Ok(Some(StoredRound { game, state }))
    }

    async fn find_rounds_by_game(&self, game_id: GameId) -> Result<Vec<Round>, DomainError> {
        let tables = self.tables.lock();
        let mut rounds: Vec<Round> = tables
            .rounds
            .values()
            .filter(|r| r.game_id == game_id)
            .cloned()
            .collect();
        rounds.sort_by_key(|r| r.round_no);
        Ok(rounds)
    }

    async fn commit(&self, work: UnitOfWork) -> Result<Game, DomainError> {
        let mut tables = self.tables.lock();
        if let Err(err) = validate(&tables, &work) {
            warn!(game_id = work.game.id, error = %err, "commit rejected");
            return Err(err);
        }

        let UnitOfWork {
            expected_lock_version,
            mut game,
            rounds,
            bids,
            tricks,
            hands,
            score,
        } = work;

        game.lock_version = expected_lock_version + 1;
        for round in rounds {
            tables.rounds.insert(round.id, round);
        }
        for bid in bids {
            tables.bids.entry(bid.round_id).or_default().push(bid);
        }
        for (round_id, trick) in tricks {
            tables
                .tricks
                .entry(round_id)
                .or_default()
                .insert(trick.trick_no, trick);
        }
        for (round_id, h) in hands {
            tables.hands.insert(round_id, h);
        }
        if let Some(score) = score {
            tables.scores.insert(score.round_id, score);
        }
        tables.games.insert(game.id, game.clone());

        debug!(
            game_id = game.id,
            lock_version = game.lock_version,
            "commit applied"
        );
        Ok(game)
    }
}
