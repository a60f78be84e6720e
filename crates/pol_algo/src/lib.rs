//! pol_algo — pure algorithm layer for the election engine.
//!
//! Everything here is a state-free function over in-memory values:
//! - `apportion` — exact-sum randomized integer partitions
//! - `voting` — vote distribution over base scores, polling, turnout draws
//! - `allocation` — seat allocation per electoral system (plurality top-N,
//!   highest-averages PR, MMP)
//!
//! Determinism rules (shared with the rest of the workspace):
//! - Randomness only through an injected `SimRng`, and only where the
//!   contract calls for it (vote noise, weights, turnout). Seat allocation
//!   itself is RNG-free; ties break by stable input order.
//! - Integer-first arithmetic: u128 accumulation and cross-multiplied
//!   quotient comparisons, no float division.

#![forbid(unsafe_code)]

pub mod apportion;
pub mod voting;

pub mod allocation {
    pub mod highest_averages;
    pub mod mmp;
    pub mod plurality;

    pub use highest_averages::allocate_highest_averages;
    pub use mmp::{allocate_mmp, MmpSeats};
    pub use plurality::take_top_n;
}

pub use apportion::{distribute_proportionally, distribute_proportionally_min_one};
pub use voting::{
    distribute_party_votes, distribute_votes_to_candidates, draw_turnout_permille,
    normalize_polling,
};
