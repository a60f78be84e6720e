//! The campaign aggregate.
//!
//! One owned value holds the whole campaign: world entities, static election
//! definitions, live and historical election instances, government offices
//! and the per-contest last-election-year ledger. There is no global store;
//! callers own the state and pass `&mut` into the engine's entry points.

use std::collections::BTreeMap;

use pol_core::election::{ElectionInstance, JurisdictionRef};
use pol_core::entities::{
    CityEntity, CountryEntity, District, EconomicProfile, Party, Politician, RegionEntity,
};
use pol_core::ids::{ElectionId, InstanceIdBase};
use pol_core::office::GovernmentOffice;
use pol_core::system::ElectionTypeDef;
use pol_core::GameDate;
use serde::{Deserialize, Serialize};

/// World entities the engine reads. The budget/statistics collaborator owns
/// the figures inside `stats`; the engine never recomputes them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldState {
    pub country: CountryEntity,
    /// States / prefectures / provinces, depending on the country.
    pub regions: Vec<RegionEntity>,
    pub cities: Vec<CityEntity>,
    pub parties: Vec<Party>,
    /// Legislative districts keyed by the election-type id of the chamber
    /// they belong to.
    pub districts_by_chamber: BTreeMap<String, Vec<District>>,
}

/// Everything a saved campaign is. Serialized whole by `pol_io`; no partial
/// updates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignState {
    pub seed: u64,
    pub date: GameDate,
    pub world: WorldState,
    pub election_defs: Vec<ElectionTypeDef>,
    /// Live and concluded instances; concluded ones are kept as history.
    pub elections: Vec<ElectionInstance>,
    pub offices: Vec<GovernmentOffice>,
    /// Due-date ledger, keyed by stable contest identity.
    pub last_election_year: BTreeMap<InstanceIdBase, i32>,
    /// The player's persistent politician record. AI candidates live and die
    /// with a single instance; this one survives across cycles.
    pub player: Politician,
}

/// Resolved jurisdiction figures used to freeze an entity snapshot.
#[derive(Clone, Debug)]
pub struct JurisdictionInfo {
    pub name: String,
    pub population: u64,
    pub economy: EconomicProfile,
}

impl CampaignState {
    pub fn election(&self, id: &ElectionId) -> Option<&ElectionInstance> {
        self.elections.iter().find(|e| &e.id == id)
    }

    pub fn election_mut(&mut self, id: &ElectionId) -> Option<&mut ElectionInstance> {
        self.elections.iter_mut().find(|e| &e.id == id)
    }

    /// Name, population and economic profile for any jurisdiction reference.
    /// Districts report their parent region's economy.
    pub fn resolve_jurisdiction(&self, j: &JurisdictionRef) -> Option<JurisdictionInfo> {
        match j {
            JurisdictionRef::Country(id) => {
                let c = &self.world.country;
                (&c.id == id).then(|| JurisdictionInfo {
                    name: c.name.clone(),
                    population: c.population,
                    economy: c.stats.economy,
                })
            }
            JurisdictionRef::Region(id) => {
                self.world.regions.iter().find(|r| &r.id == id).map(|r| JurisdictionInfo {
                    name: r.name.clone(),
                    population: r.population,
                    economy: r.stats.economy,
                })
            }
            JurisdictionRef::City(id) => {
                self.world.cities.iter().find(|c| &c.id == id).map(|c| JurisdictionInfo {
                    name: c.name.clone(),
                    population: c.population,
                    economy: c.stats.economy,
                })
            }
            JurisdictionRef::District(id) => {
                let district = self
                    .world
                    .districts_by_chamber
                    .values()
                    .flat_map(|ds| ds.iter())
                    .find(|d| &d.id == id)?;
                let economy = self
                    .world
                    .regions
                    .iter()
                    .find(|r| r.id == district.parent_region)
                    .map(|r| r.stats.economy)
                    .unwrap_or_default();
                Some(JurisdictionInfo {
                    name: district.name.clone(),
                    population: district.population,
                    economy,
                })
            }
        }
    }

    pub fn party_popularity_permille(&self, party: &pol_core::ids::PartyId) -> u32 {
        self.world
            .parties
            .iter()
            .find(|p| &p.id == party)
            .map(|p| p.popularity_permille)
            .unwrap_or(0)
    }
}
