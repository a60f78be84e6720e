//! Randomized-weighted exact integer partition.
//!
//! Contract:
//! - `sum(result) == total` exactly, every element ≥ 0.
//! - Weights are random integers in 10..=100, so sibling districts get
//!   organic variance rather than a uniform split.
//! - Floor allocation first; the rounding remainder goes one unit at a time
//!   to the largest-weight parts (stable by input index).
//!
//! The exact-sum invariant is hard: downstream population-tier lookups
//! consume these partitions.

use pol_core::SimRng;

const WEIGHT_MIN: u64 = 10;
const WEIGHT_MAX: u64 = 100;

/// Partition `total` into `parts` non-negative integers summing exactly to
/// `total`. `parts == 0` yields an empty vector.
pub fn distribute_proportionally(total: u64, parts: usize, rng: &mut SimRng) -> Vec<u64> {
    if parts == 0 {
        return Vec::new();
    }

    let weights: Vec<u64> =
        (0..parts).map(|_| rng.range_inclusive(WEIGHT_MIN, WEIGHT_MAX)).collect();
    let weight_sum: u128 = weights.iter().map(|&w| w as u128).sum();

    let mut shares: Vec<u64> = weights
        .iter()
        .map(|&w| ((total as u128 * w as u128) / weight_sum) as u64)
        .collect();

    let allocated: u128 = shares.iter().map(|&s| s as u128).sum();
    let mut remainder = (total as u128 - allocated) as u64;

    // Largest weights first, stable by input index.
    let mut order: Vec<usize> = (0..parts).collect();
    order.sort_by(|&a, &b| weights[b].cmp(&weights[a]).then(a.cmp(&b)));

    let mut cursor = 0usize;
    while remainder > 0 {
        shares[order[cursor % parts]] += 1;
        remainder -= 1;
        cursor += 1;
    }

    debug_assert_eq!(shares.iter().sum::<u64>(), total);
    shares
}

/// Partition where every part must receive at least one unit (district
/// populations). Requires `total >= parts`; callers below that floor get an
/// even split of what exists (some parts may then be zero).
pub fn distribute_proportionally_min_one(total: u64, parts: usize, rng: &mut SimRng) -> Vec<u64> {
    if parts == 0 {
        return Vec::new();
    }
    if total < parts as u64 {
        // Degenerate input; keep the exact-sum invariant and give the first
        // `total` parts one unit each.
        let mut out = vec![0u64; parts];
        for slot in out.iter_mut().take(total as usize) {
            *slot = 1;
        }
        return out;
    }
    let reserved = parts as u64;
    let mut shares = distribute_proportionally(total - reserved, parts, rng);
    for s in shares.iter_mut() {
        *s += 1;
    }
    debug_assert_eq!(shares.iter().sum::<u64>(), total);
    shares
}
