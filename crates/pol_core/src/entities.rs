//! World entities and the statistics/budget collaborator contract.
//!
//! The election engine reads entity figures (population, eligible voters,
//! economic profile) but does not compute them: the budget/statistics
//! recalculation engine is an external collaborator whose *outputs* are the
//! types below. The engine never mutates them.

use crate::date::GameDate;
use crate::ids::{CityId, CountryId, DistrictId, PartyId, RegionId};
use crate::system::{CountryTag, JurisdictionLevel, PartyStanding};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EconomicOutlook {
    Recession,
    Stagnant,
    Steady,
    Booming,
}

/// Per-entity economic figures produced by the budget collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EconomicProfile {
    pub gdp_per_capita: u64,
    pub unemployment_permille: u32,
    pub outlook: EconomicOutlook,
}

impl Default for EconomicProfile {
    fn default() -> Self {
        Self { gdp_per_capita: 30_000, unemployment_permille: 50, outlook: EconomicOutlook::Steady }
    }
}

/// Monthly income/expense balance produced by the budget collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BudgetSnapshot {
    pub income: i64,
    pub expenses: i64,
}

impl BudgetSnapshot {
    pub fn balance(&self) -> i64 {
        self.income - self.expenses
    }
}

/// Composite demographic scores (0..=100) from the statistics collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompositeScores {
    pub education: u8,
    pub crime: u8,
    pub poverty: u8,
}

impl Default for CompositeScores {
    fn default() -> Self {
        Self { education: 50, crime: 50, poverty: 50 }
    }
}

/// Shared stats block every jurisdiction entity carries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityStats {
    pub economy: EconomicProfile,
    pub budget: BudgetSnapshot,
    pub composites: CompositeScores,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountryEntity {
    pub id: CountryId,
    pub tag: CountryTag,
    pub name: String,
    pub population: u64,
    pub stats: EntityStats,
}

/// State / prefecture / province, depending on the country.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionEntity {
    pub id: RegionId,
    pub country: CountryId,
    pub name: String,
    pub population: u64,
    pub stats: EntityStats,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CityEntity {
    pub id: CityId,
    pub region: RegionId,
    pub name: String,
    pub population: u64,
    pub stats: EntityStats,
}

/// One legislative district/seat produced by chamber generation. District
/// populations are an exact integer partition of the parent's population;
/// no district receives zero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct District {
    pub id: DistrictId,
    pub name: String,
    pub parent_region: RegionId,
    pub population: u64,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    pub popularity_permille: u32,
}

impl Party {
    pub fn standing(&self) -> PartyStanding {
        PartyStanding { party: self.id.clone(), popularity_permille: self.popularity_permille }
    }
}

/// A politician record. Only the player's persists across election
/// instances; AI candidates live and die with one contest.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Politician {
    pub name: String,
    pub party: Option<PartyId>,
    /// 0..=100 attribute aggregate the base score starts from.
    pub attribute_score: u8,
}

/// Entity data **frozen** at instance creation. Later world mutation must
/// not retroactively change an in-progress race, so the instance carries a
/// copy rather than a reference.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntitySnapshot {
    pub jurisdiction_name: String,
    pub level: JurisdictionLevel,
    pub population: u64,
    /// Eligible adult voters; the polling baseline and the turnout cap.
    pub eligible_voters: u64,
    pub economy: EconomicProfile,
    pub taken_at: GameDate,
}

/// Fraction of population counted as eligible adults when an entity does not
/// carry an explicit roll (permille).
pub const ELIGIBLE_ADULT_PERMILLE: u64 = 760;

pub fn eligible_voters_from_population(population: u64) -> u64 {
    population.saturating_mul(ELIGIBLE_ADULT_PERMILLE) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligible_voters_are_a_fixed_share() {
        assert_eq!(eligible_voters_from_population(100_000), 76_000);
        assert_eq!(eligible_voters_from_population(0), 0);
    }

    #[test]
    fn budget_balance() {
        let b = BudgetSnapshot { income: 1_200, expenses: 900 };
        assert_eq!(b.balance(), 300);
    }
}
