//! Election lifecycle engine.
//!
//! All campaign mutation flows through three write entry points
//! (`generate_scheduled_elections`, `declare_candidacy`,
//! `process_election_results`) plus the monthly tick that orchestrates them.
//! Every entry point takes `&mut CampaignState` and `&mut SimRng`; the state
//! is a plain owned aggregate with no interior mutability, so the operations
//! are atomic relative to each other by construction.

#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod candidates;
pub mod errors;
pub mod lifecycle;
pub mod schedule;
pub mod state;
pub mod stats;

pub use bootstrap::CampaignBuilder;
pub use errors::{DeclareError, EngineError};
pub use lifecycle::{
    advance_month, declare_candidacy, process_election_results, setup_election_night,
};
pub use schedule::generate_scheduled_elections;
pub use state::{CampaignState, WorldState};
pub use stats::{NoopStats, StatsEngine};
