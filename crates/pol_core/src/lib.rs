//! pol_core — Core types, domains, calendar dates, and deterministic RNG.
//!
//! This crate is **I/O-free**. It defines the stable data model shared across
//! the engine (`pol_algo`, `pol_worldgen`, `pol_engine`, `pol_io`, `pol_cli`):
//!
//! - Identifier newtypes (`InstanceIdBase`, `PartyId`, `CandidateId`, …)
//! - Electoral-system domains (`ElectoralSystem`, `AllocationMethod`, seat
//!   policies, office kinds) — explicit enums, never inferred from display
//!   strings
//! - Game calendar (`GameDate`) with term arithmetic
//! - World/election/office entities, including the frozen entity snapshot
//!   an in-progress race keeps when the world moves on
//! - Seedable RNG (`SimRng`, ChaCha20) injected into every randomized path
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod date;
pub mod election;
pub mod entities;
pub mod errors;
pub mod ids;
pub mod office;
pub mod rng;
pub mod system;

pub use date::GameDate;
pub use rng::SimRng;

/// Convenience prelude for downstream crates.
pub mod prelude {
    pub use crate::date::GameDate;
    pub use crate::election::{
        Candidate, ElectionInstance, ElectionOutcome, ElectionStatus, PartyList, PartyResult,
        SystemData,
    };
    pub use crate::entities::{
        BudgetSnapshot, CityEntity, CompositeScores, CountryEntity, District, EconomicOutlook,
        EconomicProfile, EntitySnapshot, Party, Politician, RegionEntity,
    };
    pub use crate::ids::{
        CandidateId, CityId, CountryId, DistrictId, ElectionId, InstanceIdBase, OfficeId, PartyId,
        RegionId,
    };
    pub use crate::office::{GovernmentOffice, OfficeHold, SeatHolder};
    pub use crate::rng::SimRng;
    pub use crate::system::{
        AllocationMethod, ContestScope, CountryTag, ElectionTypeDef, ElectoralSystem,
        JurisdictionLevel, OfficeKind, SeatPolicy,
    };
}
