//! Vote simulation and polling normalization.
//!
//! Votes are apportioned proportional to each candidate's base score, then
//! perturbed with bounded permille noise, then re-normalized so the assigned
//! votes sum to exactly the votes cast (remainder to the highest-score
//! candidates, mirroring the apportion remainder policy).

use std::collections::BTreeMap;

use pol_core::election::Candidate;
use pol_core::ids::{CandidateId, PartyId};
use pol_core::system::{JurisdictionLevel, PartyStanding};
use pol_core::SimRng;

/// Noise applied to each candidate's weighted share, ±permille.
const VOTE_NOISE_SPREAD: u32 = 120;

/// One "undecided" score unit per this many eligible adults when normalizing
/// displayed polling against the population baseline.
const ADULTS_PER_SCORE_UNIT: u64 = 1000;

/// Assign `total_votes` across `candidates` proportional to base score plus
/// bounded noise. Exact: the assigned votes always sum to `total_votes`.
pub fn distribute_votes_to_candidates(
    candidates: &mut [Candidate],
    total_votes: u64,
    rng: &mut SimRng,
) {
    if candidates.is_empty() {
        return;
    }

    // Perturbed weights; a zero-score field degrades to an even split.
    let weights: Vec<u128> = candidates
        .iter()
        .map(|c| (c.base_score as u128) * (rng.noise_permille(VOTE_NOISE_SPREAD) as u128))
        .collect();
    let weight_sum: u128 = weights.iter().sum();

    let mut shares: Vec<u64> = if weight_sum == 0 {
        let n = candidates.len() as u64;
        candidates.iter().map(|_| total_votes / n).collect()
    } else {
        weights.iter().map(|&w| ((total_votes as u128 * w) / weight_sum) as u64).collect()
    };

    let allocated: u128 = shares.iter().map(|&s| s as u128).sum();
    let mut remainder = (total_votes as u128 - allocated) as u64;

    // Remainder to the highest base scores first, stable by input index.
    let n = shares.len();
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        candidates[b].base_score.cmp(&candidates[a].base_score).then(a.cmp(&b))
    });
    let mut cursor = 0usize;
    while remainder > 0 {
        shares[order[cursor % n]] += 1;
        remainder -= 1;
        cursor += 1;
    }

    for (candidate, share) in candidates.iter_mut().zip(shares) {
        candidate.votes = Some(share);
    }

    debug_assert_eq!(
        candidates.iter().map(|c| c.votes.unwrap_or(0)).sum::<u64>(),
        total_votes
    );
}

/// Split a party-ballot total across parties proportional to popularity
/// baseline plus bounded noise. Used for list-only contests (no candidate
/// votes to derive a party vote from) and for the separately tracked MMP
/// party ballot. Exact: shares sum to `total_votes`.
pub fn distribute_party_votes(
    standings: &[PartyStanding],
    total_votes: u64,
    rng: &mut SimRng,
) -> BTreeMap<PartyId, u64> {
    if standings.is_empty() {
        return BTreeMap::new();
    }

    let weights: Vec<u128> = standings
        .iter()
        .map(|s| {
            (s.popularity_permille.max(1) as u128) * (rng.noise_permille(VOTE_NOISE_SPREAD) as u128)
        })
        .collect();
    let weight_sum: u128 = weights.iter().sum();

    let mut shares: Vec<u64> =
        weights.iter().map(|&w| ((total_votes as u128 * w) / weight_sum) as u64).collect();

    let allocated: u128 = shares.iter().map(|&s| s as u128).sum();
    let mut remainder = (total_votes as u128 - allocated) as u64;
    let n = shares.len();
    let mut order: Vec<usize> = (0..standings.len()).collect();
    order.sort_by(|&a, &b| {
        standings[b]
            .popularity_permille
            .cmp(&standings[a].popularity_permille)
            .then(a.cmp(&b))
    });
    let mut cursor = 0usize;
    while remainder > 0 {
        shares[order[cursor % n]] += 1;
        remainder -= 1;
        cursor += 1;
    }

    standings.iter().zip(shares).map(|(s, v)| (s.party.clone(), v)).collect()
}

/// Displayed polling for one candidate, integer percent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollingLine {
    pub candidate: CandidateId,
    pub percent: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollingReport {
    pub lines: Vec<PollingLine>,
    /// Undecided/other absorbs whatever the field does not account for.
    pub undecided_percent: u8,
}

/// Normalize raw base scores into displayed polling percentages against the
/// eligible-adult baseline. The lines sum to ≤ 100; each is clamped to
/// [0, 100].
pub fn normalize_polling(candidates: &[Candidate], adult_population: u64) -> PollingReport {
    let score_sum: u128 = candidates.iter().map(|c| c.base_score as u128).sum();
    // Small fields in large jurisdictions leave a bigger undecided share.
    let baseline = (adult_population / ADULTS_PER_SCORE_UNIT) as u128;
    let denom = score_sum.max(baseline).max(1);

    let mut lines = Vec::with_capacity(candidates.len());
    let mut accounted: u32 = 0;
    for c in candidates {
        let pct = ((c.base_score as u128 * 100) / denom).min(100) as u8;
        accounted = (accounted + pct as u32).min(100);
        lines.push(PollingLine { candidate: c.id.clone(), percent: pct });
    }

    PollingReport { lines, undecided_percent: (100 - accounted) as u8 }
}

/// Turnout share (permille of eligible voters) for an office level, drawn
/// uniformly from a plausible range.
pub fn draw_turnout_permille(level: JurisdictionLevel, rng: &mut SimRng) -> u32 {
    let (lo, hi) = match level {
        JurisdictionLevel::City => (350, 550),
        JurisdictionLevel::State => (400, 650),
        JurisdictionLevel::National => (550, 750),
    };
    rng.range_u32(lo, hi)
}
