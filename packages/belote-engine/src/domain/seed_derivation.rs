//! RNG seed derivation utilities for deterministic dealing.
//!
//! Every round's deck is derived from the game seed so a whole game can be
//! reproduced from that one number.

/// Derive a seed for dealing cards in a round.
///
/// Unique per (game, round) combination. Redeals consume a round number, so
/// the redeal deck differs from the voided one.
pub fn derive_dealing_seed(game_seed: i64, round_no: u16) -> u64 {
    // Cast i64 to u64 for RNG (sign doesn't matter for seed)
    let base = game_seed as u64;
    base.wrapping_add((round_no as u64).wrapping_mul(1_000_003))
        .wrapping_add(2)
}

/// Fresh game seed from OS entropy.
pub fn fresh_game_seed() -> i64 {
    rand::random::<i64>()
}
