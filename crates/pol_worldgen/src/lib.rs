//! pol_worldgen — chamber/district structure generation.
//!
//! Given regions with populations and tiered seat tables, these builders
//! decide how many legislative districts each region is entitled to and
//! materialize district entities whose populations partition the region's
//! population exactly.
//!
//! Failure posture: world generation must always complete. Missing or empty
//! tier data logs a warning and degrades to one district carrying the full
//! regional population — never an error.

#![forbid(unsafe_code)]

pub mod chambers;
pub mod countries;
pub mod tiers;

pub use chambers::build_districts;
pub use countries::{
    japan_representatives_districts, korea_assembly_districts, philippines_chambers,
    usa_state_house_districts, PhilippineChambers,
};
