//! Group stage schedule: every entrant meets every other entrant once.

use crate::models::{Entrant, Match, Round};
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate the round-robin fixture list.
///
/// 1. Build all unordered pairs in registry order (N·(N−1)/2 of them).
/// 2. Flip home/away at random per pair (orientation is cosmetic).
/// 3. Shuffle the play order.
///
/// Deterministic for a seeded `rng`.
pub fn generate_schedule<R: Rng + ?Sized>(entrants: &[Entrant], rng: &mut R) -> Vec<Match> {
    let mut matches = Vec::with_capacity(entrants.len() * entrants.len().saturating_sub(1) / 2);
    for (i, first) in entrants.iter().enumerate() {
        for second in &entrants[i + 1..] {
            let (home, away) = if rng.gen_bool(0.5) {
                (first, second)
            } else {
                (second, first)
            };
            matches.push(Match::new(home.name.as_str(), away.name.as_str(), Round::Group));
        }
    }
    matches.shuffle(rng);
    matches
}
