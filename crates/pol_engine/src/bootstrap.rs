//! Campaign bootstrap.
//!
//! Builds a small synthetic world (country, regions, cities, parties,
//! chamber districts) plus the country's default election-type table, all
//! from one seed. Entity naming is deliberately plain and numbered; the
//! interesting part is the structure, which exercises every chamber
//! generator and electoral system the engine supports.

use std::collections::BTreeMap;

use pol_algo::distribute_proportionally_min_one;
use pol_core::entities::{CityEntity, CountryEntity, EntityStats, Party, Politician, RegionEntity};
use pol_core::ids::{CityId, CountryId, PartyId, RegionId};
use pol_core::system::{
    AllocationMethod, ContestScope, CountryTag, ElectionTypeDef, ElectoralSystem,
    JurisdictionLevel, OfficeKind, SeatPolicy,
};
use pol_core::{GameDate, SimRng};
use pol_worldgen::countries::{
    japan_representatives_districts, korea_assembly_districts, philippines_chambers,
    usa_state_house_districts,
};
use pol_worldgen::tiers;

use crate::state::{CampaignState, WorldState};

/// City population as a share of its region, permille bounds.
const CITY_SHARE_MIN: u64 = 250;
const CITY_SHARE_MAX: u64 = 450;

const DEFAULT_PLAYER_ATTRIBUTE: u8 = 60;

pub struct CampaignBuilder {
    seed: u64,
    country: CountryTag,
    start: GameDate,
    player_name: String,
    player_party: Option<PartyId>,
}

impl CampaignBuilder {
    pub fn new(seed: u64, country: CountryTag) -> Self {
        Self {
            seed,
            country,
            start: GameDate::ymd(2030, 1, 1),
            player_name: "Player".to_string(),
            player_party: None,
        }
    }

    pub fn starting(mut self, date: GameDate) -> Self {
        self.start = date;
        self
    }

    pub fn player(mut self, name: impl Into<String>, party: Option<PartyId>) -> Self {
        self.player_name = name.into();
        self.player_party = party;
        self
    }

    pub fn build(self) -> CampaignState {
        let mut rng = SimRng::from_seed(self.seed);
        let plan = country_plan(self.country);

        let country = CountryEntity {
            id: CountryId::new(plan.id),
            tag: self.country,
            name: plan.name.to_string(),
            population: plan.population,
            stats: EntityStats::default(),
        };

        let region_pops =
            distribute_proportionally_min_one(plan.population, plan.region_count, &mut rng);
        let mut regions: Vec<RegionEntity> = region_pops
            .into_iter()
            .enumerate()
            .map(|(i, pop)| RegionEntity {
                id: RegionId::new(format!("{}_{}_{}", plan.id, plan.region_prefix, i + 1)),
                country: country.id.clone(),
                name: format!("{} {}", plan.region_label, i + 1),
                population: pop,
                stats: EntityStats::default(),
            })
            .collect();

        let mut districts_by_chamber = BTreeMap::new();
        match self.country {
            CountryTag::Usa => {
                districts_by_chamber
                    .insert("state_house".to_string(), usa_state_house_districts(&regions, &mut rng));
            }
            CountryTag::Japan => {
                districts_by_chamber.insert(
                    "nat_house".to_string(),
                    japan_representatives_districts(&regions, &mut rng),
                );
            }
            CountryTag::Korea => {
                districts_by_chamber
                    .insert("assembly".to_string(), korea_assembly_districts(&regions, &mut rng));
            }
            CountryTag::Philippines => {
                // Administrative regions are split into provinces first; the
                // provinces are the region-level entities from here on.
                let chambers = philippines_chambers(&regions, &mut rng);
                regions = chambers.provinces;
                districts_by_chamber.insert("board".to_string(), chambers.board_districts);
                districts_by_chamber.insert("house".to_string(), chambers.house_districts);
            }
        }

        let cities: Vec<CityEntity> = regions
            .iter()
            .map(|r| {
                let share = rng.range_inclusive(CITY_SHARE_MIN, CITY_SHARE_MAX);
                CityEntity {
                    id: CityId::new(format!("{}_city", r.id.as_str())),
                    region: r.id.clone(),
                    name: format!("{} City", r.name),
                    population: (r.population * share / 1000).max(1),
                    stats: EntityStats::default(),
                }
            })
            .collect();

        let parties = default_parties(self.country);

        CampaignState {
            seed: self.seed,
            date: self.start,
            world: WorldState { country, regions, cities, parties, districts_by_chamber },
            election_defs: default_election_defs(self.country),
            elections: Vec::new(),
            offices: Vec::new(),
            last_election_year: BTreeMap::new(),
            player: Politician {
                name: self.player_name,
                party: self.player_party,
                attribute_score: DEFAULT_PLAYER_ATTRIBUTE,
            },
        }
    }
}

struct CountryPlan {
    id: &'static str,
    name: &'static str,
    population: u64,
    region_count: usize,
    region_prefix: &'static str,
    region_label: &'static str,
}

fn country_plan(tag: CountryTag) -> CountryPlan {
    match tag {
        CountryTag::Usa => CountryPlan {
            id: "us",
            name: "United States",
            population: 24_000_000,
            region_count: 6,
            region_prefix: "st",
            region_label: "State",
        },
        CountryTag::Japan => CountryPlan {
            id: "jp",
            name: "Japan",
            population: 18_000_000,
            region_count: 6,
            region_prefix: "pref",
            region_label: "Prefecture",
        },
        CountryTag::Korea => CountryPlan {
            id: "kr",
            name: "Korea",
            population: 10_000_000,
            region_count: 5,
            region_prefix: "prov",
            region_label: "Province",
        },
        CountryTag::Philippines => CountryPlan {
            id: "ph",
            name: "Philippines",
            population: 14_000_000,
            region_count: 4,
            region_prefix: "reg",
            region_label: "Region",
        },
    }
}

fn party(id: &str, name: &str, popularity_permille: u32) -> Party {
    Party { id: PartyId::new(id), name: name.to_string(), popularity_permille }
}

pub fn default_parties(tag: CountryTag) -> Vec<Party> {
    match tag {
        CountryTag::Usa => vec![
            party("dem", "Democratic Party", 380),
            party("gop", "Republican Party", 370),
        ],
        CountryTag::Japan => vec![
            party("ldp", "Liberal Democratic Party", 420),
            party("cdp", "Constitutional Democratic Party", 220),
            party("kom", "Komeito", 90),
        ],
        CountryTag::Korea => vec![
            party("dpk", "Democratic Party", 350),
            party("ppp", "People Power Party", 340),
            party("jus", "Justice Party", 70),
        ],
        CountryTag::Philippines => vec![
            party("pdp", "PDP-Laban", 280),
            party("lp", "Liberal Party", 250),
            party("np", "Nacionalista Party", 180),
        ],
    }
}

/// The recurring contests a country runs, as static configuration. Ids
/// double as the chamber keys in `WorldState::districts_by_chamber` for
/// per-district and MMP contests.
pub fn default_election_defs(tag: CountryTag) -> Vec<ElectionTypeDef> {
    fn def(
        id: &str,
        level: JurisdictionLevel,
        template: &str,
        system: ElectoralSystem,
        office_kind: OfficeKind,
        scope: ContestScope,
        term_years: u32,
        seats: SeatPolicy,
        election_month: u8,
    ) -> ElectionTypeDef {
        ElectionTypeDef {
            id: id.to_string(),
            level,
            office_name_template: template.to_string(),
            system,
            office_kind,
            scope,
            term_years,
            seats,
            pr_threshold_pct: 0,
            allocation_method: AllocationMethod::DHondt,
            model_as_single_contest: true,
            election_month,
            filing_lead_months: 3,
        }
    }

    use ContestScope::{PerDistrict, WholeJurisdiction};
    use ElectoralSystem::*;
    use JurisdictionLevel::*;
    use OfficeKind::{Legislature, SingleHolder};

    match tag {
        CountryTag::Usa => vec![
            def(
                "mayor",
                City,
                "Mayor of {jurisdiction}",
                Fptp,
                SingleHolder,
                WholeJurisdiction,
                4,
                SeatPolicy::Fixed(1),
                11,
            ),
            // At-large council run as numbered seats, not one combined race.
            ElectionTypeDef {
                model_as_single_contest: false,
                ..def(
                    "city_council",
                    City,
                    "{jurisdiction} Council",
                    PluralityMmd,
                    Legislature,
                    WholeJurisdiction,
                    4,
                    SeatPolicy::Fixed(6),
                    11,
                )
            },
            def(
                "governor",
                State,
                "Governor of {jurisdiction}",
                Fptp,
                SingleHolder,
                WholeJurisdiction,
                4,
                SeatPolicy::Fixed(1),
                11,
            ),
            def(
                "state_house",
                State,
                "State Representative, {jurisdiction}",
                Fptp,
                Legislature,
                PerDistrict,
                2,
                SeatPolicy::Fixed(1),
                11,
            ),
        ],
        CountryTag::Japan => vec![
            def(
                "mayor",
                City,
                "Mayor of {jurisdiction}",
                Fptp,
                SingleHolder,
                WholeJurisdiction,
                4,
                SeatPolicy::Fixed(1),
                4,
            ),
            def(
                "governor",
                State,
                "Governor of {jurisdiction}",
                Fptp,
                SingleHolder,
                WholeJurisdiction,
                4,
                SeatPolicy::Fixed(1),
                4,
            ),
            def(
                "nat_house",
                National,
                "Representative, {jurisdiction}",
                Fptp,
                Legislature,
                PerDistrict,
                4,
                SeatPolicy::Fixed(1),
                10,
            ),
            // Half the chamber renews each cycle; the tier table holds the
            // per-cycle seat counts.
            def(
                "councillors",
                State,
                "Councillors for {jurisdiction}",
                SntvMmd,
                Legislature,
                WholeJurisdiction,
                3,
                SeatPolicy::PopulationTiered(tiers::japan_councillors_cycle()),
                7,
            ),
        ],
        CountryTag::Korea => vec![
            def(
                "mayor",
                City,
                "Mayor of {jurisdiction}",
                Fptp,
                SingleHolder,
                WholeJurisdiction,
                4,
                SeatPolicy::Fixed(1),
                6,
            ),
            ElectionTypeDef {
                pr_threshold_pct: 3,
                allocation_method: AllocationMethod::SainteLague,
                ..def(
                    "assembly",
                    National,
                    "National Assembly",
                    Mmp,
                    Legislature,
                    WholeJurisdiction,
                    4,
                    // Compensatory list seats; constituency seats come from
                    // the chamber's district table.
                    SeatPolicy::Fixed(14),
                    4,
                )
            },
        ],
        CountryTag::Philippines => vec![
            def(
                "mayor",
                City,
                "Mayor of {jurisdiction}",
                Fptp,
                SingleHolder,
                WholeJurisdiction,
                3,
                SeatPolicy::Fixed(1),
                5,
            ),
            // One combined block-vote race, not numbered seats.
            def(
                "city_council",
                City,
                "{jurisdiction} Council",
                BlockVote,
                Legislature,
                WholeJurisdiction,
                3,
                SeatPolicy::Fixed(6),
                5,
            ),
            def(
                "board",
                State,
                "Board Member, {jurisdiction}",
                SntvMmd,
                Legislature,
                PerDistrict,
                3,
                SeatPolicy::Fixed(2),
                5,
            ),
            def(
                "house",
                National,
                "Representative, {jurisdiction}",
                Fptp,
                Legislature,
                PerDistrict,
                3,
                SeatPolicy::Fixed(1),
                5,
            ),
            ElectionTypeDef {
                pr_threshold_pct: 2,
                ..def(
                    "party_list",
                    National,
                    "Party-List Representatives",
                    PartyListPr,
                    Legislature,
                    WholeJurisdiction,
                    3,
                    SeatPolicy::Fixed(12),
                    5,
                )
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_per_district_def_has_a_chamber_table() {
        for tag in
            [CountryTag::Usa, CountryTag::Japan, CountryTag::Korea, CountryTag::Philippines]
        {
            let state = CampaignBuilder::new(7, tag).build();
            for def in &state.election_defs {
                let needs_table = matches!(def.scope, ContestScope::PerDistrict)
                    || matches!(def.system, ElectoralSystem::Mmp);
                if needs_table {
                    let table = state.world.districts_by_chamber.get(&def.id);
                    assert!(
                        table.is_some_and(|d| !d.is_empty()),
                        "chamber {} missing districts",
                        def.id
                    );
                }
            }
        }
    }

    #[test]
    fn regions_partition_country_population() {
        let state = CampaignBuilder::new(3, CountryTag::Usa).build();
        let total: u64 = state.world.regions.iter().map(|r| r.population).sum();
        assert_eq!(total, state.world.country.population);
    }

    #[test]
    fn philippine_regions_are_provinces() {
        let state = CampaignBuilder::new(5, CountryTag::Philippines).build();
        assert!(state.world.regions.iter().all(|r| r.id.as_str().contains("_prov_")));
        // Cities hang off provinces, one each.
        assert_eq!(state.world.cities.len(), state.world.regions.len());
    }

    #[test]
    fn builder_honors_start_date_and_player() {
        let state = CampaignBuilder::new(9, CountryTag::Korea)
            .starting(GameDate::ymd(2032, 5, 1))
            .player("Kim", Some(PartyId::new("dpk")))
            .build();
        assert_eq!(state.date, GameDate::ymd(2032, 5, 1));
        assert_eq!(state.player.name, "Kim");
        assert_eq!(state.player.party, Some(PartyId::new("dpk")));
    }

    #[test]
    fn same_seed_builds_identical_worlds() {
        let a = CampaignBuilder::new(42, CountryTag::Japan).build();
        let b = CampaignBuilder::new(42, CountryTag::Japan).build();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
