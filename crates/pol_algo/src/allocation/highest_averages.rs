//! Highest-averages proportional seat allocation (D'Hondt / Sainte-Laguë).
//!
//! Contract:
//! - Apply the eligibility threshold on the party vote totals first.
//! - Award `seats` sequentially to the party with the current largest
//!   quotient v / d(s): D'Hondt d(s) = s+1, Sainte-Laguë d(s) = 2s+1.
//! - Pure integers; quotients compared by u128 cross-multiplication.
//! - Exact ties break by input party order (stable), never randomly.
//! - Conservation: the returned counts always sum to `seats` when at least
//!   one party survives the threshold.

use std::collections::BTreeMap;

use pol_core::ids::PartyId;
use pol_core::system::AllocationMethod;

/// Divisor for `s` seats already assigned; always ≥ 1.
#[inline]
fn divisor(method: AllocationMethod, s_assigned: u32) -> u128 {
    match method {
        AllocationMethod::DHondt => u128::from(s_assigned) + 1,
        AllocationMethod::SainteLague => (u128::from(s_assigned) << 1) + 1,
    }
}

/// Compare v1/d1 vs v2/d2 without division.
#[inline]
fn cmp_quotients(v1: u64, d1: u128, v2: u64, d2: u128) -> core::cmp::Ordering {
    let left = (v1 as u128).saturating_mul(d2);
    let right = (v2 as u128).saturating_mul(d1);
    left.cmp(&right)
}

/// Allocate `seats` across `parties` (stable order slice) from `votes`.
/// Parties below `threshold_pct` percent of the total vote are excluded.
/// Parties absent from `votes` count zero. Returns seats per party id,
/// seeded for every *eligible* party (zero-seat parties retained).
pub fn allocate_highest_averages(
    seats: u32,
    parties: &[PartyId],
    votes: &BTreeMap<PartyId, u64>,
    method: AllocationMethod,
    threshold_pct: u8,
) -> BTreeMap<PartyId, u32> {
    if seats == 0 || parties.is_empty() {
        return BTreeMap::new();
    }

    let total: u128 = parties.iter().map(|p| *votes.get(p).unwrap_or(&0) as u128).sum();

    // Threshold on natural totals, kept in input order.
    let eligible: Vec<&PartyId> = parties
        .iter()
        .filter(|p| {
            let v = *votes.get(*p).unwrap_or(&0) as u128;
            if threshold_pct == 0 {
                return true;
            }
            v.saturating_mul(100) >= (threshold_pct as u128).saturating_mul(total)
        })
        .collect();

    let mut alloc: BTreeMap<PartyId, u32> =
        eligible.iter().map(|p| ((*p).clone(), 0u32)).collect();
    if eligible.is_empty() {
        return alloc;
    }

    // All-zero corner case: even round-robin in input order.
    let eligible_total: u128 =
        eligible.iter().map(|p| *votes.get(*p).unwrap_or(&0) as u128).sum();
    if eligible_total == 0 {
        for (p, _) in eligible.iter().cycle().zip(0..seats) {
            if let Some(x) = alloc.get_mut(*p) {
                *x += 1;
            }
        }
        return alloc;
    }

    for _seat in 0..seats {
        let mut best: Option<(usize, u64, u128)> = None;
        for (idx, p) in eligible.iter().enumerate() {
            let v = *votes.get(*p).unwrap_or(&0);
            let s = *alloc.get(*p).unwrap_or(&0);
            let d = divisor(method, s);
            match best {
                None => best = Some((idx, v, d)),
                Some((_, bv, bd)) => {
                    // Strictly greater wins; equal keeps the earlier party.
                    if cmp_quotients(v, d, bv, bd) == core::cmp::Ordering::Greater {
                        best = Some((idx, v, d));
                    }
                }
            }
        }
        if let Some((idx, _, _)) = best {
            if let Some(x) = alloc.get_mut(eligible[idx]) {
                *x += 1;
            }
        }
    }

    debug_assert_eq!(alloc.values().map(|&s| s as u64).sum::<u64>(), seats as u64);
    alloc
}
