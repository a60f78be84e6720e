//! Plurality winner selection: FPTP and its top-N generalization (SNTV,
//! block vote, at-large councils).
//!
//! No RNG here. Ties in vote count break by stable input order — randomness
//! belongs to vote distribution, never to allocation.

use pol_core::election::Candidate;

/// Indices of the top `seats` candidates by simulated votes, ties by input
/// order. Candidates without simulated votes count as zero.
pub fn take_top_n(candidates: &[Candidate], seats: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        let va = candidates[a].votes.unwrap_or(0);
        let vb = candidates[b].votes.unwrap_or(0);
        vb.cmp(&va).then(a.cmp(&b))
    });
    order.truncate(seats);
    order
}
