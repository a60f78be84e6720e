//! Election scheduling.
//!
//! For each static `ElectionTypeDef`, enumerate the jurisdiction entities at
//! its level (or the districts of its chamber) and create one instance per
//! due contest. Identity is the `instance_id_base`; the due rule is
//! `current_year - last_election_year[base] >= term_years` (first occurrence
//! is always due), and an instance with the same base and year is never
//! duplicated. Entity data is frozen into the instance at creation.

use pol_algo::distribute_proportionally_min_one;
use pol_core::election::{
    ConstituencyRace, ElectionInstance, ElectionStatus, JurisdictionRef, SystemData,
};
use pol_core::entities::{eligible_voters_from_population, District, EntitySnapshot};
use pol_core::ids::{ElectionId, InstanceIdBase};
use pol_core::office::{find_office_index, OfficeHold, SeatHolder};
use pol_core::system::{ContestScope, ElectionTypeDef, ElectoralSystem, SeatPolicy};
use pol_core::{GameDate, SimRng};
use tracing::{debug, warn};

use crate::state::{CampaignState, JurisdictionInfo};
use crate::candidates;

/// Day of the month every contest is held on.
const ELECTION_DAY: u8 = 8;

pub fn generate_scheduled_elections(state: &mut CampaignState, rng: &mut SimRng) {
    let defs = state.election_defs.clone();
    for def in &defs {
        match def.scope {
            ContestScope::WholeJurisdiction => schedule_whole_jurisdiction(state, def, rng),
            ContestScope::PerDistrict => schedule_per_district(state, def, rng),
        }
    }
}

fn is_due(state: &CampaignState, base: &InstanceIdBase, term_years: u32) -> bool {
    match state.last_election_year.get(base) {
        None => true,
        Some(&last) => state.date.year - last >= term_years as i32,
    }
}

fn already_scheduled(state: &CampaignState, base: &InstanceIdBase, year: i32) -> bool {
    state
        .elections
        .iter()
        .any(|e| &e.instance_id_base == base && e.election_date.year == year)
}

/// Seat count under the policy, for this population. Tiered policies draw
/// uniformly from the matched tier's range.
fn drawn_seats(policy: &SeatPolicy, population: u64, rng: &mut SimRng) -> u32 {
    match policy {
        SeatPolicy::Fixed(n) => *n,
        SeatPolicy::PopulationTiered(table) => match table.pick(population) {
            Some(t) => rng.range_u32(t.min_districts.max(1), t.max_districts.max(t.min_districts)),
            None => {
                warn!("empty seat tier table; defaulting to 1 seat");
                1
            }
        },
    }
}

/// The sitting holder for a single-seat contest identity, if any. The
/// office record is the only incumbency store.
fn incumbent_for(
    state: &CampaignState,
    base: &InstanceIdBase,
    office_name: &str,
    def: &ElectionTypeDef,
    jurisdiction: &JurisdictionRef,
) -> Option<SeatHolder> {
    let i = find_office_index(&state.offices, base, office_name, def.level, jurisdiction)?;
    match &state.offices[i].hold {
        OfficeHold::Holder(h) => Some(h.clone()),
        // A one-seat roll (per-district or conceptual seat) still names an
        // unambiguous incumbent; larger rolls do not map seats to candidates.
        OfficeHold::Members { members, .. } if members.len() == 1 => Some(members[0].clone()),
        OfficeHold::Members { .. } => None,
    }
}

fn jurisdictions_at_level(state: &CampaignState, def: &ElectionTypeDef) -> Vec<JurisdictionRef> {
    match def.level {
        pol_core::system::JurisdictionLevel::City => {
            state.world.cities.iter().map(|c| JurisdictionRef::City(c.id.clone())).collect()
        }
        pol_core::system::JurisdictionLevel::State => {
            state.world.regions.iter().map(|r| JurisdictionRef::Region(r.id.clone())).collect()
        }
        pol_core::system::JurisdictionLevel::National => {
            vec![JurisdictionRef::Country(state.world.country.id.clone())]
        }
    }
}

fn schedule_whole_jurisdiction(state: &mut CampaignState, def: &ElectionTypeDef, rng: &mut SimRng) {
    let year = state.date.year;
    for jurisdiction in jurisdictions_at_level(state, def) {
        let base = InstanceIdBase::new(format!("{}_{}", jurisdiction.token(), def.id));
        if !is_due(state, &base, def.term_years) {
            continue;
        }
        if already_scheduled(state, &base, year) {
            debug!(base = base.as_str(), year, "instance already scheduled; skipping");
            continue;
        }
        let Some(info) = state.resolve_jurisdiction(&jurisdiction) else {
            warn!(token = jurisdiction.token(), "unknown jurisdiction entity; skipping");
            continue;
        };

        let seats = drawn_seats(&def.seats, info.population, rng);
        if seats == 0 {
            warn!(base = base.as_str(), "jurisdiction computes 0 seats; skipping");
            continue;
        }

        // The ledger key stays the parent contest base even when the
        // contest is exploded into conceptual seats.
        state.last_election_year.insert(base.clone(), year);

        if def.system.is_plurality_multi_member() && !def.model_as_single_contest && seats > 1 {
            expand_conceptual_seats(state, def, &base, &jurisdiction, &info, seats, rng);
        } else {
            let id = ElectionId::for_cycle(&base, year);
            let office_name = def.office_name(&info.name);
            let incumbent = incumbent_for(state, &base, &office_name, def, &jurisdiction);
            let data = build_payload(state, def, &id, seats, incumbent.as_ref(), &info, rng);
            push_instance(
                state,
                def,
                id,
                base,
                office_name,
                jurisdiction,
                &info,
                info.population,
                seats,
                def.system,
                data,
            );
        }
    }
}

fn schedule_per_district(state: &mut CampaignState, def: &ElectionTypeDef, rng: &mut SimRng) {
    let year = state.date.year;
    let Some(districts) = state.world.districts_by_chamber.get(&def.id).cloned() else {
        warn!(chamber = def.id.as_str(), "no district table for chamber; skipping");
        return;
    };
    for district in &districts {
        let base = InstanceIdBase::new(format!("{}_{}", district.id.as_str(), def.id));
        if !is_due(state, &base, def.term_years) {
            continue;
        }
        if already_scheduled(state, &base, year) {
            debug!(base = base.as_str(), year, "instance already scheduled; skipping");
            continue;
        }
        let jurisdiction = JurisdictionRef::District(district.id.clone());
        let Some(info) = state.resolve_jurisdiction(&jurisdiction) else { continue };

        let seats = drawn_seats(&def.seats, district.population, rng);
        if seats == 0 {
            warn!(base = base.as_str(), "district computes 0 seats; skipping");
            continue;
        }

        let id = ElectionId::for_cycle(&base, year);
        let office_name = def.office_name(&district.name);
        let incumbent = incumbent_for(state, &base, &office_name, def, &jurisdiction);
        let field = candidates::candidate_field(
            id.as_str(),
            &state.world.parties,
            seats,
            incumbent.as_ref(),
            info.economy.outlook,
            rng,
        );
        push_instance(
            state,
            def,
            id,
            base.clone(),
            office_name,
            jurisdiction,
            &info,
            district.population,
            seats,
            def.system,
            SystemData::Candidates { candidates: field },
        );
        state.last_election_year.insert(base, year);
    }
}

/// System payload for a whole-jurisdiction contest, with candidates or
/// lists generated in place.
fn build_payload(
    state: &CampaignState,
    def: &ElectionTypeDef,
    id: &ElectionId,
    seats: u32,
    incumbent: Option<&SeatHolder>,
    info: &JurisdictionInfo,
    rng: &mut SimRng,
) -> SystemData {
    match def.system {
        ElectoralSystem::PartyListPr => SystemData::PartyLists {
            lists: candidates::party_lists(id.as_str(), &state.world.parties, seats, rng),
            party_votes: Default::default(),
        },
        ElectoralSystem::Mmp => {
            let districts: Vec<District> = state
                .world
                .districts_by_chamber
                .get(&def.id)
                .cloned()
                .unwrap_or_default();
            if districts.is_empty() {
                warn!(chamber = def.id.as_str(), "mmp contest has no constituency table");
            }
            let constituencies = districts
                .iter()
                .map(|d| ConstituencyRace {
                    district: d.id.clone(),
                    eligible_voters: eligible_voters_from_population(d.population),
                    candidates: candidates::candidate_field(
                        d.id.as_str(),
                        &state.world.parties,
                        1,
                        None,
                        info.economy.outlook,
                        rng,
                    ),
                })
                .collect();
            SystemData::Mixed {
                constituencies,
                lists: candidates::party_lists(id.as_str(), &state.world.parties, seats, rng),
                party_votes: Default::default(),
                list_seats: seats,
            }
        }
        _ => SystemData::Candidates {
            candidates: candidates::candidate_field(
                id.as_str(),
                &state.world.parties,
                seats,
                incumbent,
                info.economy.outlook,
                rng,
            ),
        },
    }
}

/// Explode an at-large multi-member contest into independent single-seat
/// instances, each over its own exact population slice.
fn expand_conceptual_seats(
    state: &mut CampaignState,
    def: &ElectionTypeDef,
    base: &InstanceIdBase,
    jurisdiction: &JurisdictionRef,
    info: &JurisdictionInfo,
    seats: u32,
    rng: &mut SimRng,
) {
    let year = state.date.year;
    let slices = distribute_proportionally_min_one(info.population, seats as usize, rng);
    for (i, slice_pop) in slices.into_iter().enumerate() {
        let seat_base = InstanceIdBase::new(format!("{}_seat{}", base.as_str(), i + 1));
        if already_scheduled(state, &seat_base, year) {
            continue;
        }
        let id = ElectionId::for_cycle(&seat_base, year);
        let office_name = format!("{}, Seat {}", def.office_name(&info.name), i + 1);
        let incumbent = incumbent_for(state, &seat_base, &office_name, def, jurisdiction);
        let field = candidates::candidate_field(
            id.as_str(),
            &state.world.parties,
            1,
            incumbent.as_ref(),
            info.economy.outlook,
            rng,
        );
        push_instance(
            state,
            def,
            id,
            seat_base,
            office_name,
            jurisdiction.clone(),
            info,
            slice_pop,
            1,
            ElectoralSystem::Fptp,
            SystemData::Candidates { candidates: field },
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn push_instance(
    state: &mut CampaignState,
    def: &ElectionTypeDef,
    id: ElectionId,
    base: InstanceIdBase,
    office_name: String,
    jurisdiction: JurisdictionRef,
    info: &JurisdictionInfo,
    population: u64,
    seats: u32,
    system: ElectoralSystem,
    data: SystemData,
) {
    let election_date = GameDate::ymd(state.date.year, def.election_month, ELECTION_DAY);
    let snapshot = EntitySnapshot {
        jurisdiction_name: info.name.clone(),
        level: def.level,
        population,
        eligible_voters: eligible_voters_from_population(population),
        economy: info.economy,
        taken_at: state.date,
    };
    state.elections.push(ElectionInstance {
        id,
        instance_id_base: base,
        type_id: def.id.clone(),
        office_name,
        level: def.level,
        jurisdiction,
        snapshot,
        seats_to_fill: seats,
        filing_deadline: election_date.minus_months(def.filing_lead_months),
        election_date,
        system,
        data,
        status: ElectionStatus::Upcoming,
        outcome: None,
    });
}
