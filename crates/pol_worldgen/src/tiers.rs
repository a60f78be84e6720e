//! Default seat-count tier tables per country/chamber.
//!
//! Tables are sorted descending by population threshold; the last tier is
//! the floor every region falls back to, so even a region below every
//! threshold gets at least one district.

use pol_core::system::{Tier, TierTable};

#[inline]
fn tier(pop_threshold: u64, min_districts: u32, max_districts: u32) -> Tier {
    Tier { pop_threshold, min_districts, max_districts }
}

/// USA: state lower-house districts per state.
pub fn usa_state_house() -> TierTable {
    TierTable::new(vec![
        tier(8_000_000, 60, 80),
        tier(4_000_000, 40, 60),
        tier(1_500_000, 25, 40),
        tier(500_000, 12, 25),
        tier(0, 5, 12),
    ])
}

/// Japan: House of Representatives single-member districts per prefecture.
pub fn japan_representatives() -> TierTable {
    TierTable::new(vec![
        tier(8_000_000, 15, 25),
        tier(3_000_000, 8, 15),
        tier(1_500_000, 4, 8),
        tier(0, 1, 4),
    ])
}

/// Japan: House of Councillors seats contested *per cycle* per prefecture
/// (half the chamber each cycle, so the counts are small).
pub fn japan_councillors_cycle() -> TierTable {
    TierTable::new(vec![
        tier(8_000_000, 3, 4),
        tier(3_000_000, 2, 3),
        tier(1_000_000, 1, 2),
        tier(0, 1, 1),
    ])
}

/// Korea: National Assembly constituencies per province/metropolitan city.
pub fn korea_assembly() -> TierTable {
    TierTable::new(vec![
        tier(9_000_000, 35, 49),
        tier(3_000_000, 12, 20),
        tier(1_000_000, 4, 10),
        tier(0, 2, 4),
    ])
}

/// Philippines: provincial-board districts per province.
pub fn philippines_provincial_board() -> TierTable {
    TierTable::new(vec![
        tier(2_000_000, 3, 4),
        tier(500_000, 2, 3),
        tier(0, 1, 2),
    ])
}

/// Philippines: House of Representatives districts contributed per province.
pub fn philippines_house() -> TierTable {
    TierTable::new(vec![
        tier(2_500_000, 4, 7),
        tier(1_000_000, 2, 4),
        tier(250_000, 1, 2),
        tier(0, 1, 1),
    ])
}
