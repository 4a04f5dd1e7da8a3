//! Deck permutations, shuffling and the two-stage deal.
//!
//! Deck layout: indices 0..20 are the initial deal (five cards per seat, in
//! seat order), index 20 is the turned card, indices 21..32 are the
//! completion deal.

use std::collections::{HashSet, VecDeque};

use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{ALL_CARDS, DECK_SIZE};
use crate::domain::rules::{
    INITIAL_HAND_SIZE, OTHERS_COMPLETION, PLAYERS, TAKER_COMPLETION, TURNED_CARD_INDEX,
};
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::state::Seat;
use crate::domain::Card;
use crate::errors::domain::DomainError;

/// A permutation of the 32 cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Deck(Vec<Card>);

impl Deck {
    /// Validate that `cards` is a permutation of the full pack.
    pub fn new(cards: Vec<Card>) -> Result<Self, DomainError> {
        if cards.len() != DECK_SIZE {
            return Err(DomainError::invariant(format!(
                "deck holds {} cards, expected {DECK_SIZE}",
                cards.len()
            )));
        }
        let unique: HashSet<Card> = cards.iter().copied().collect();
        if unique.len() != DECK_SIZE {
            return Err(DomainError::invariant("deck contains duplicate cards"));
        }
        Ok(Self(cards))
    }

    /// Canonical, unshuffled order.
    pub fn ordered() -> Self {
        Self(ALL_CARDS.to_vec())
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    pub fn turned_card(&self) -> Card {
        self.0[TURNED_CARD_INDEX]
    }

    /// Five cards per seat from indices 0..20, seat order.
    pub fn initial_hands(&self) -> [Vec<Card>; PLAYERS] {
        let mut hands: [Vec<Card>; PLAYERS] = Default::default();
        for (seat, hand) in hands.iter_mut().enumerate() {
            let start = seat * INITIAL_HAND_SIZE;
            *hand = self.0[start..start + INITIAL_HAND_SIZE].to_vec();
        }
        hands
    }

    /// Turned card plus completion remainder (indices 20..32).
    pub fn undealt_after_initial(&self) -> &[Card] {
        &self.0[TURNED_CARD_INDEX..]
    }

    /// Cards each seat receives in the completion deal. The taker gets the
    /// turned card plus two; everyone else three, drawn from index 21 on in
    /// seat order.
    pub fn completion_for(&self, taker: Seat) -> [Vec<Card>; PLAYERS] {
        let mut out: [Vec<Card>; PLAYERS] = Default::default();
        let mut cursor = TURNED_CARD_INDEX + 1;
        for (seat, extra) in out.iter_mut().enumerate() {
            let n = if seat as Seat == taker {
                extra.push(self.turned_card());
                TAKER_COMPLETION
            } else {
                OTHERS_COMPLETION
            };
            extra.extend_from_slice(&self.0[cursor..cursor + n]);
            cursor += n;
        }
        out
    }
}

impl TryFrom<Vec<Card>> for Deck {
    type Error = DomainError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Deck::new(cards)
    }
}

impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}

/// Fisher-Yates shuffle of the full pack, deterministic for a seed.
pub fn shuffle_with_seed(seed: u64) -> Deck {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut cards = ALL_CARDS.to_vec();
    cards.shuffle(&mut rng);
    Deck(cards)
}

/// Source of a fresh permutation for each round or redeal.
pub trait DeckSource: Send + Sync {
    fn deck_for(&self, game_seed: i64, round_no: u16) -> Deck;
}

/// Reproducible decks derived from the game seed and round number.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeededDeckSource;

impl DeckSource for SeededDeckSource {
    fn deck_for(&self, game_seed: i64, round_no: u16) -> Deck {
        shuffle_with_seed(derive_dealing_seed(game_seed, round_no))
    }
}

/// Fresh OS-seeded randomness on every call; ignores the game seed.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropyDeckSource;

impl DeckSource for EntropyDeckSource {
    fn deck_for(&self, _game_seed: i64, _round_no: u16) -> Deck {
        let mut cards = ALL_CARDS.to_vec();
        cards.shuffle(&mut rand::rng());
        Deck(cards)
    }
}

/// Serves prepared decks in order, then falls back to seeded decks.
#[derive(Debug, Default)]
pub struct ScriptedDeckSource {
    queue: Mutex<VecDeque<Deck>>,
}

impl ScriptedDeckSource {
    pub fn new(decks: impl IntoIterator<Item = Deck>) -> Self {
        Self {
            queue: Mutex::new(decks.into_iter().collect()),
        }
    }

    pub fn push(&self, deck: Deck) {
        self.queue.lock().push_back(deck);
    }
}

impl DeckSource for ScriptedDeckSource {
    fn deck_for(&self, game_seed: i64, round_no: u16) -> Deck {
        self.queue
            .lock()
            .pop_front()
            .unwrap_or_else(|| SeededDeckSource.deck_for(game_seed, round_no))
    }
}
