/**
 * Choose the questions for a round based on past mistakes.
 *
 * When the round is shuffled, every term is placed in a pool once, plus once more for
 * each time it has been missed in its worse direction, up to `MAX_WEIGHT` copies. The
 * pool is shuffled and the round is taken from the front, so a term that is often
 * missed is both more likely to be asked and may be asked more than once.
 *
 * Version: October 2026
 */
use std::cmp;

use rand::seq::SliceRandom;
use rand::Rng;

use super::mistakes::{signature, MistakeStats};
use super::quiz::TermPair;


/// The most copies of a single term that can be placed in the pool.
pub const MAX_WEIGHT: u64 = 5;


/// Choose `count` terms from `pairs` for the next round. A `count` of zero means as
/// many terms as there are in `pairs`.
///
/// If `shuffle` is false the terms are taken in table order. Otherwise they are drawn
/// from the weighted pool described at the top of this module.
pub fn build_round<R: Rng + ?Sized>(
    pairs: &[TermPair],
    shuffle: bool,
    count: usize,
    stats: &MistakeStats,
    rng: &mut R,
) -> Vec<TermPair> {
    let count = if count == 0 { pairs.len() } else { count };

    if !shuffle {
        return pairs.iter().take(count).cloned().collect();
    }

    let mut pool = expand_pool(pairs, stats);
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}


/// Return every term in `pairs` repeated according to its weight, in table order.
pub fn expand_pool(pairs: &[TermPair], stats: &MistakeStats) -> Vec<TermPair> {
    let mut pool = Vec::new();
    for pair in pairs.iter() {
        for _ in 0..weight(pair, stats) {
            pool.push(pair.clone());
        }
    }
    pool
}


/// Return how many copies of `pair` go into the pool: one plus the mistakes in its
/// worse direction, capped at `MAX_WEIGHT`.
pub fn weight(pair: &TermPair, stats: &MistakeStats) -> u64 {
    let forward = errors(stats, &pair.designation, &pair.meaning);
    let backward = errors(stats, &pair.meaning, &pair.designation);
    cmp::min(1 + cmp::max(forward, backward), MAX_WEIGHT)
}


fn errors(stats: &MistakeStats, prompt: &str, solution: &str) -> u64 {
    stats.get(&signature(prompt, solution)).copied().unwrap_or(0)
}
