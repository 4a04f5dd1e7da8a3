//! Persistence seam. The engine reads through [`GameStore`] and writes only
//! by committing a [`UnitOfWork`].

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::bidding::Bid;
use crate::domain::game::Game;
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::RoundScore;
use crate::domain::state::{GameId, Round, RoundId, RoundState, Seat};
use crate::domain::tricks::Trick;
use crate::domain::Card;
use crate::errors::domain::DomainError;

pub mod games;
pub mod rounds;

pub type Hands = [Vec<Card>; PLAYERS];

/// Fields needed to insert a game; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub score_threshold: u32,
    pub starting_dealer: Seat,
    pub rng_seed: i64,
    pub created_at: OffsetDateTime,
}

/// A round aggregate together with its game, read at a single lock version.
#[derive(Debug, Clone)]
pub struct StoredRound {
    pub game: Game,
    pub state: RoundState,
}

/// Everything one engine operation writes, applied all-or-nothing.
///
/// The commit succeeds only if the stored game still has
/// `expected_lock_version`; the stored version then becomes
/// `expected_lock_version + 1`.
#[derive(Debug, Clone)]
pub struct UnitOfWork {
    pub expected_lock_version: i32,
    pub game: Game,
    /// Round headers to insert or replace.
    pub rounds: Vec<Round>,
    /// Bids to append; `bid_order` must continue the stored log.
    pub bids: Vec<Bid>,
    /// Tricks to insert or replace, keyed by (round, trick_no). A closed
    /// trick is never replaced.
    pub tricks: Vec<(RoundId, Trick)>,
    pub hands: Vec<(RoundId, Hands)>,
    /// Score to insert; rejected if the round already has one.
    pub score: Option<RoundScore>,
}

impl UnitOfWork {
    pub fn new(expected_lock_version: i32, game: Game) -> Self {
        Self {
            expected_lock_version,
            game,
            rounds: Vec::new(),
            bids: Vec::new(),
            tricks: Vec::new(),
            hands: Vec::new(),
            score: None,
        }
    }

    /// Record a freshly dealt round.
    pub fn insert_round(&mut self, state: &RoundState) {
        self.record_round_diff(None, state);
    }

    /// Record what changed in a round between two snapshots of the
    /// aggregate. `before = None` writes the whole round.
    pub fn record_round_diff(&mut self, before: Option<&RoundState>, after: &RoundState) {
        let round_id = after.round.id;

        if before.map(|b| &b.round) != Some(&after.round) {
            self.rounds.push(after.round.clone());
        }

        let known_bids = before.map_or(0, |b| b.bids.len());
        self.bids.extend(after.bids.iter().skip(known_bids).cloned());

        for (idx, trick) in after.tricks.iter().enumerate() {
            if before.and_then(|b| b.tricks.get(idx)) != Some(trick) {
                self.tricks.push((round_id, trick.clone()));
            }
        }

        if before.map(|b| &b.hands) != Some(&after.hands) {
            self.hands.push((round_id, after.hands.clone()));
        }

        if let (None, Some(score)) = (before.and_then(|b| b.score.as_ref()), &after.score) {
            self.score = Some(score.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
            && self.bids.is_empty()
            && self.tricks.is_empty()
            && self.hands.is_empty()
            && self.score.is_none()
    }
}

/// Storage collaborator. Reads report committed state only; `commit` must
/// be atomic and serialised per game.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn create_game(&self, new: NewGame) -> Result<Game, DomainError>;

    /// Reserve an id for a round about to be dealt.
    async fn allocate_round_id(&self) -> Result<RoundId, DomainError>;

    async fn find_game(&self, game_id: GameId) -> Result<Option<Game>, DomainError>;

    async fn find_round(&self, round_id: RoundId) -> Result<Option<Round>, DomainError>;

    /// Bid log in `bid_order`.
    async fn find_bids(&self, round_id: RoundId) -> Result<Vec<Bid>, DomainError>;

    /// Tricks in `trick_no` order.
    async fn find_tricks(&self, round_id: RoundId) -> Result<Vec<Trick>, DomainError>;

    async fn find_hands(&self, round_id: RoundId) -> Result<Option<Hands>, DomainError>;

    async fn find_score(&self, round_id: RoundId) -> Result<Option<RoundScore>, DomainError>;

    /// Header, bid log, tricks, hands and score of a round plus its owning
    /// game, read in one step so no commit can land between the parts.
    /// `None` when the round does not exist.
    async fn load_round(&self, round_id: RoundId) -> Result<Option<StoredRound>, DomainError>;

    /// Round headers of a game in `round_no` order.
    async fn find_rounds_by_game(&self, game_id: GameId) -> Result<Vec<Round>, DomainError>;

    /// Apply `work` atomically. Fails with `Conflict{OptimisticLock}` when the
    /// stored lock version differs, `AlreadyResolved` when a score already
    /// exists for the round, and writes nothing in either case. Returns the
    /// game as stored.
    async fn commit(&self, work: UnitOfWork) -> Result<Game, DomainError>;
}
