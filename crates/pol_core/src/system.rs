//! Electoral-system domains and static election-type definitions.
//!
//! Everything a contest needs to know about *how* it is decided lives here as
//! closed enums fixed at definition time. Nothing downstream classifies an
//! office by matching on its display name.

use crate::ids::PartyId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tabulation/allocation family for a contest.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElectoralSystem {
    /// Single-winner plurality.
    Fptp,
    /// Multi-member district, one vote per voter, top-N win.
    SntvMmd,
    /// Multi-member plurality where each voter casts N votes (modeled as
    /// top-N over individual totals, same resolution as SNTV).
    BlockVote,
    /// Party-list proportional representation (highest averages).
    PartyListPr,
    /// Mixed-member proportional: constituency FPTP + compensatory lists.
    Mmp,
    /// At-large plurality body; candidate-based, no lists.
    PluralityMmd,
}

impl ElectoralSystem {
    /// True for the candidate-based plurality family that can be exploded
    /// into conceptual single seats.
    pub fn is_plurality_multi_member(self) -> bool {
        matches!(self, Self::SntvMmd | Self::BlockVote | Self::PluralityMmd)
    }

    pub fn uses_party_lists(self) -> bool {
        matches!(self, Self::PartyListPr | Self::Mmp)
    }
}

/// Highest-averages divisor sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AllocationMethod {
    DHondt,
    SainteLague,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JurisdictionLevel {
    City,
    State,
    National,
}

/// Whether the office seats one holder or a membership roll. Decided at
/// definition time, not inferred from strings.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OfficeKind {
    SingleHolder,
    Legislature,
}

/// How many seats a jurisdiction is entitled to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SeatPolicy {
    Fixed(u32),
    /// Tier table consumed by `pol_worldgen`; the chosen tier's range is
    /// sampled at generation time.
    PopulationTiered(TierTable),
}

/// One seat-count tier: met when population >= `pop_threshold`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tier {
    pub pop_threshold: u64,
    pub min_districts: u32,
    pub max_districts: u32,
}

/// Tiers sorted descending by threshold; the *last* tier is the floor every
/// region falls back to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TierTable {
    pub tiers: Vec<Tier>,
}

impl TierTable {
    pub fn new(tiers: Vec<Tier>) -> Self {
        debug_assert!(
            tiers.windows(2).all(|w| w[0].pop_threshold >= w[1].pop_threshold),
            "tier table must be sorted descending by threshold"
        );
        Self { tiers }
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// First tier the population meets; below every threshold, the lowest
    /// tier still applies.
    pub fn pick(&self, population: u64) -> Option<&Tier> {
        self.tiers
            .iter()
            .find(|t| population >= t.pop_threshold)
            .or_else(|| self.tiers.last())
    }
}

/// Whether one contest covers the whole jurisdiction entity or one contest
/// is held per legislative district of the matching chamber.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ContestScope {
    WholeJurisdiction,
    PerDistrict,
}

/// Countries whose chamber structures the world generator knows how to build.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CountryTag {
    Usa,
    Japan,
    Korea,
    Philippines,
}

/// Static definition of a recurring contest. Immutable reference data loaded
/// at campaign start; one `ElectionInstance` per jurisdiction per cycle is
/// derived from it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElectionTypeDef {
    /// Short token, e.g. "mayor", "city_council", "nat_house".
    pub id: String,
    pub level: JurisdictionLevel,
    /// Display template; `{jurisdiction}` is replaced with the entity name.
    pub office_name_template: String,
    pub system: ElectoralSystem,
    pub office_kind: OfficeKind,
    pub scope: ContestScope,
    /// Term length and scheduling frequency, in years.
    pub term_years: u32,
    /// For MMP this is the *compensatory list* seat count; constituency
    /// seats come from the chamber's district count.
    pub seats: SeatPolicy,
    /// PR eligibility threshold, percent of valid party votes.
    pub pr_threshold_pct: u8,
    pub allocation_method: AllocationMethod,
    /// When false, an at-large plurality body is exploded into independent
    /// single-seat contests ("numbered seats"). Configuration, not a
    /// hard-coded office list.
    pub model_as_single_contest: bool,
    /// Calendar month elections of this type are held in.
    pub election_month: u8,
    /// Months between the filing deadline and election day.
    pub filing_lead_months: u32,
}

impl ElectionTypeDef {
    pub fn office_name(&self, jurisdiction_name: &str) -> String {
        self.office_name_template.replace("{jurisdiction}", jurisdiction_name)
    }

    pub fn generates_one_winner(&self) -> bool {
        matches!(self.office_kind, OfficeKind::SingleHolder)
    }
}

/// Party standing the candidate generator reads (baseline popularity is a
/// permille share of the notional electorate).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartyStanding {
    pub party: PartyId,
    pub popularity_permille: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TierTable {
        TierTable::new(vec![
            Tier { pop_threshold: 1_000_000, min_districts: 8, max_districts: 12 },
            Tier { pop_threshold: 250_000, min_districts: 3, max_districts: 6 },
            Tier { pop_threshold: 50_000, min_districts: 1, max_districts: 2 },
        ])
    }

    #[test]
    fn pick_takes_first_met_tier() {
        let t = table();
        assert_eq!(t.pick(2_000_000).unwrap().min_districts, 8);
        assert_eq!(t.pick(300_000).unwrap().min_districts, 3);
    }

    #[test]
    fn below_every_threshold_falls_back_to_last_tier() {
        let t = table();
        assert_eq!(t.pick(10_000).unwrap().min_districts, 1);
    }

    #[test]
    fn office_name_interpolates_jurisdiction() {
        let def = ElectionTypeDef {
            id: "mayor".into(),
            level: JurisdictionLevel::City,
            office_name_template: "Mayor of {jurisdiction}".into(),
            system: ElectoralSystem::Fptp,
            office_kind: OfficeKind::SingleHolder,
            scope: ContestScope::WholeJurisdiction,
            term_years: 4,
            seats: SeatPolicy::Fixed(1),
            pr_threshold_pct: 0,
            allocation_method: AllocationMethod::DHondt,
            model_as_single_contest: true,
            election_month: 11,
            filing_lead_months: 2,
        };
        assert_eq!(def.office_name("Springfield"), "Mayor of Springfield");
    }
}
