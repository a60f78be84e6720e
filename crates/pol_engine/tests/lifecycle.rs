//! Lifecycle scenarios over a hand-rolled single-city world, plus full
//! bootstrapped campaigns for the cross-country smoke and determinism
//! checks.

use std::collections::BTreeMap;

use pol_core::election::{Candidate, ElectionStatus, SystemData};
use pol_core::entities::{
    eligible_voters_from_population, CityEntity, CountryEntity, District, EntityStats, Party,
    Politician, RegionEntity,
};
use pol_core::ids::{CandidateId, CityId, CountryId, DistrictId, ElectionId, PartyId, RegionId};
use pol_core::office::OfficeHold;
use pol_core::system::{
    AllocationMethod, ContestScope, CountryTag, ElectionTypeDef, ElectoralSystem,
    JurisdictionLevel, OfficeKind, SeatPolicy,
};
use pol_core::{GameDate, SimRng};
use pol_engine::{
    advance_month, declare_candidacy, generate_scheduled_elections, process_election_results,
    setup_election_night, CampaignBuilder, CampaignState, DeclareError, NoopStats, WorldState,
};

fn def(
    id: &str,
    system: ElectoralSystem,
    office_kind: OfficeKind,
    term_years: u32,
    seats: SeatPolicy,
    model_as_single_contest: bool,
) -> ElectionTypeDef {
    ElectionTypeDef {
        id: id.to_string(),
        level: JurisdictionLevel::City,
        office_name_template: format!("{id} of {{jurisdiction}}"),
        system,
        office_kind,
        scope: ContestScope::WholeJurisdiction,
        term_years,
        seats,
        pr_threshold_pct: 0,
        allocation_method: AllocationMethod::DHondt,
        model_as_single_contest,
        election_month: 11,
        filing_lead_months: 3,
    }
}

/// One country, one region, one 100k city, two parties.
fn single_city_state(defs: Vec<ElectionTypeDef>) -> CampaignState {
    let country = CountryEntity {
        id: CountryId::new("us"),
        tag: CountryTag::Usa,
        name: "United States".into(),
        population: 1_000_000,
        stats: EntityStats::default(),
    };
    let region = RegionEntity {
        id: RegionId::new("us_st_1"),
        country: country.id.clone(),
        name: "State 1".into(),
        population: 1_000_000,
        stats: EntityStats::default(),
    };
    let city = CityEntity {
        id: CityId::new("us_st_1_city"),
        region: region.id.clone(),
        name: "Anytown".into(),
        population: 100_000,
        stats: EntityStats::default(),
    };
    CampaignState {
        seed: 1,
        date: GameDate::ymd(2030, 1, 1),
        world: WorldState {
            country,
            regions: vec![region],
            cities: vec![city],
            parties: vec![
                Party { id: PartyId::new("dem"), name: "Democratic Party".into(), popularity_permille: 380 },
                Party { id: PartyId::new("gop"), name: "Republican Party".into(), popularity_permille: 370 },
            ],
            districts_by_chamber: BTreeMap::new(),
        },
        election_defs: defs,
        elections: Vec::new(),
        offices: Vec::new(),
        last_election_year: BTreeMap::new(),
        player: Politician { name: "Player".into(), party: None, attribute_score: 60 },
    }
}

fn mayor_def() -> ElectionTypeDef {
    def("mayor", ElectoralSystem::Fptp, OfficeKind::SingleHolder, 4, SeatPolicy::Fixed(1), true)
}

#[test]
fn mayoral_fptp_resolves_with_exact_vote_conservation() {
    let mut state = single_city_state(vec![mayor_def()]);
    let mut rng = SimRng::from_seed(100);
    generate_scheduled_elections(&mut state, &mut rng);
    assert_eq!(state.elections.len(), 1);
    let id = state.elections[0].id.clone();

    // Pin the field to the classic two-way 60/40 race with 50k votes cast.
    if let SystemData::Candidates { candidates } = &mut state.elections[0].data {
        *candidates = vec![
            Candidate {
                id: CandidateId::new("strong"),
                name: "Strong".into(),
                party: Some(PartyId::new("dem")),
                base_score: 60,
                votes: None,
                is_incumbent: false,
                is_player: false,
            },
            Candidate {
                id: CandidateId::new("weak"),
                name: "Weak".into(),
                party: Some(PartyId::new("gop")),
                base_score: 40,
                votes: None,
                is_incumbent: false,
                is_player: false,
            },
        ];
        pol_algo::distribute_votes_to_candidates(candidates, 50_000, &mut rng);
    } else {
        panic!("mayoral race must carry a flat candidate field");
    }

    process_election_results(&mut state, &id, None, &mut rng).unwrap();

    let e = state.election(&id).unwrap();
    assert_eq!(e.status, ElectionStatus::Concluded);
    let outcome = e.outcome.as_ref().unwrap();
    assert_eq!(outcome.turnout_votes, 50_000);
    let sum: u64 = outcome.results_by_candidate.iter().map(|r| r.votes).sum();
    assert_eq!(sum, 50_000);
    // ±12% noise cannot flip a 60/40 score split.
    assert_eq!(outcome.winners.len(), 1);
    assert_eq!(outcome.winners[0].candidate.as_str(), "strong");

    assert_eq!(state.offices.len(), 1);
    let office = &state.offices[0];
    match &office.hold {
        OfficeHold::Holder(h) => assert_eq!(h.candidate.as_str(), "strong"),
        other => panic!("expected single holder, got {other:?}"),
    }
    assert_eq!(office.term_ends, e.election_date.term_end(4));
}

#[test]
fn resolution_is_idempotent() {
    let mut state = single_city_state(vec![mayor_def()]);
    let mut rng = SimRng::from_seed(200);
    generate_scheduled_elections(&mut state, &mut rng);
    let id = state.elections[0].id.clone();

    process_election_results(&mut state, &id, None, &mut rng).unwrap();
    let offices_after_first = state.offices.clone();
    let outcome_after_first = state.election(&id).unwrap().outcome.clone();

    process_election_results(&mut state, &id, None, &mut rng).unwrap();
    assert_eq!(state.offices, offices_after_first);
    assert_eq!(state.election(&id).unwrap().outcome, outcome_after_first);
    assert_eq!(state.elections.len(), 1);
}

#[test]
fn supplied_tallies_rerun_a_concluded_resolution() {
    let mut state = single_city_state(vec![mayor_def()]);
    let mut rng = SimRng::from_seed(250);
    generate_scheduled_elections(&mut state, &mut rng);
    let id = state.elections[0].id.clone();
    process_election_results(&mut state, &id, None, &mut rng).unwrap();
    assert!(state.election(&id).unwrap().is_concluded());

    // A recount with explicit tallies replaces the committed result.
    let recount = SystemData::Candidates {
        candidates: vec![
            Candidate {
                id: CandidateId::new("upset"),
                name: "Upset".into(),
                party: Some(PartyId::new("gop")),
                base_score: 50,
                votes: Some(30_000),
                is_incumbent: false,
                is_player: false,
            },
            Candidate {
                id: CandidateId::new("runner"),
                name: "Runner".into(),
                party: Some(PartyId::new("dem")),
                base_score: 50,
                votes: Some(20_000),
                is_incumbent: false,
                is_player: false,
            },
        ],
    };
    process_election_results(&mut state, &id, Some(recount), &mut rng).unwrap();

    let outcome = state.election(&id).unwrap().outcome.as_ref().unwrap();
    assert_eq!(outcome.turnout_votes, 50_000);
    assert_eq!(outcome.winners[0].candidate.as_str(), "upset");
    // The office record follows the recount, still without duplication.
    assert_eq!(state.offices.len(), 1);
    match &state.offices[0].hold {
        OfficeHold::Holder(h) => assert_eq!(h.candidate.as_str(), "upset"),
        other => panic!("expected single holder, got {other:?}"),
    }
}

#[test]
fn instance_identity_is_stable_across_years() {
    let mut state = single_city_state(vec![ElectionTypeDef { term_years: 1, ..mayor_def() }]);
    let mut rng = SimRng::from_seed(300);

    generate_scheduled_elections(&mut state, &mut rng);
    assert_eq!(state.elections.len(), 1);
    // Re-running within the year never duplicates the instance.
    generate_scheduled_elections(&mut state, &mut rng);
    assert_eq!(state.elections.len(), 1);

    state.date = GameDate::ymd(2031, 1, 1);
    generate_scheduled_elections(&mut state, &mut rng);
    assert_eq!(state.elections.len(), 2);

    assert_eq!(state.elections[0].instance_id_base, state.elections[1].instance_id_base);
    assert_ne!(state.elections[0].id, state.elections[1].id);
    assert_ne!(state.elections[0].election_date, state.elections[1].election_date);
}

#[test]
fn at_large_council_expands_into_conceptual_seats() {
    let council = def(
        "city_council",
        ElectoralSystem::PluralityMmd,
        OfficeKind::Legislature,
        4,
        SeatPolicy::Fixed(4),
        false,
    );
    let mut state = single_city_state(vec![council]);
    let mut rng = SimRng::from_seed(400);
    generate_scheduled_elections(&mut state, &mut rng);

    assert_eq!(state.elections.len(), 4);
    let pop_sum: u64 = state.elections.iter().map(|e| e.snapshot.population).sum();
    assert_eq!(pop_sum, 100_000);
    for (i, e) in state.elections.iter().enumerate() {
        assert_eq!(e.seats_to_fill, 1);
        assert_eq!(e.system, ElectoralSystem::Fptp);
        assert!(e.instance_id_base.as_str().ends_with(&format!("_seat{}", i + 1)));
        assert!(e.snapshot.population >= 1);
        assert_eq!(e.snapshot.eligible_voters, eligible_voters_from_population(e.snapshot.population));
    }
}

#[test]
fn office_is_upserted_not_duplicated_across_cycles() {
    let mut state = single_city_state(vec![ElectionTypeDef { term_years: 1, ..mayor_def() }]);
    let mut rng = SimRng::from_seed(500);

    generate_scheduled_elections(&mut state, &mut rng);
    let first = state.elections[0].id.clone();
    process_election_results(&mut state, &first, None, &mut rng).unwrap();
    assert_eq!(state.offices.len(), 1);
    let first_term_end = state.offices[0].term_ends;

    state.date = GameDate::ymd(2031, 1, 1);
    generate_scheduled_elections(&mut state, &mut rng);
    let second = state
        .elections
        .iter()
        .find(|e| !e.is_concluded())
        .map(|e| e.id.clone())
        .expect("second cycle scheduled");
    process_election_results(&mut state, &second, None, &mut rng).unwrap();

    assert_eq!(state.offices.len(), 1, "same contest identity must upsert");
    assert!(state.offices[0].term_ends > first_term_end);
    // Concluded instances are retained as history.
    assert_eq!(state.elections.len(), 2);
    assert!(state.elections.iter().all(|e| e.is_concluded()));
}

#[test]
fn incumbent_reappears_in_the_next_cycle_field() {
    let mut state = single_city_state(vec![ElectionTypeDef { term_years: 1, ..mayor_def() }]);
    let mut rng = SimRng::from_seed(600);

    generate_scheduled_elections(&mut state, &mut rng);
    let first = state.elections[0].id.clone();
    process_election_results(&mut state, &first, None, &mut rng).unwrap();
    let holder = match &state.offices[0].hold {
        OfficeHold::Holder(h) => h.clone(),
        other => panic!("expected holder, got {other:?}"),
    };

    state.date = GameDate::ymd(2031, 1, 1);
    generate_scheduled_elections(&mut state, &mut rng);
    let next = state.elections.iter().find(|e| !e.is_concluded()).unwrap();
    let incumbents: Vec<&Candidate> = next
        .data
        .candidates()
        .into_iter()
        .filter(|c| c.is_incumbent)
        .collect();
    assert_eq!(incumbents.len(), 1);
    assert_eq!(incumbents[0].id, holder.candidate);
}

#[test]
fn single_seat_district_incumbent_carries_forward() {
    let house = ElectionTypeDef {
        scope: ContestScope::PerDistrict,
        level: JurisdictionLevel::State,
        ..def(
            "state_house",
            ElectoralSystem::Fptp,
            OfficeKind::Legislature,
            1,
            SeatPolicy::Fixed(1),
            true,
        )
    };
    let mut state = single_city_state(vec![house]);
    state.world.districts_by_chamber.insert(
        "state_house".to_string(),
        vec![District {
            id: DistrictId::new("us_st_1_house_1"),
            name: "State 1 House District 1".into(),
            parent_region: RegionId::new("us_st_1"),
            population: 80_000,
        }],
    );
    let mut rng = SimRng::from_seed(1000);

    generate_scheduled_elections(&mut state, &mut rng);
    assert_eq!(state.elections.len(), 1);
    let first = state.elections[0].id.clone();
    process_election_results(&mut state, &first, None, &mut rng).unwrap();
    let member = match &state.offices[0].hold {
        OfficeHold::Members { members, .. } => {
            assert_eq!(members.len(), 1);
            members[0].clone()
        }
        other => panic!("expected members, got {other:?}"),
    };

    state.date = GameDate::ymd(2031, 1, 1);
    generate_scheduled_elections(&mut state, &mut rng);
    let next = state.elections.iter().find(|e| !e.is_concluded()).unwrap();
    let incumbents: Vec<&Candidate> = next
        .data
        .candidates()
        .into_iter()
        .filter(|c| c.is_incumbent)
        .collect();
    assert_eq!(incumbents.len(), 1);
    assert_eq!(incumbents[0].id, member.candidate);
}

#[test]
fn declaration_validation_paths() {
    let mut state = single_city_state(vec![mayor_def()]);
    let mut rng = SimRng::from_seed(700);
    generate_scheduled_elections(&mut state, &mut rng);
    let id = state.elections[0].id.clone();

    assert_eq!(
        declare_candidacy(&mut state, &ElectionId::new("ghost_2030"), &mut rng),
        Err(DeclareError::NoSuchElection(ElectionId::new("ghost_2030")))
    );

    // Valid declaration, then a duplicate.
    declare_candidacy(&mut state, &id, &mut rng).unwrap();
    assert!(state.election(&id).unwrap().data.candidates().iter().any(|c| c.is_player));
    assert_eq!(declare_candidacy(&mut state, &id, &mut rng), Err(DeclareError::AlreadyDeclared));

    // Past the filing deadline.
    let deadline = state.election(&id).unwrap().filing_deadline;
    state.date = deadline.next_month();
    let before = state.election(&id).unwrap().data.candidates().len();
    assert_eq!(
        declare_candidacy(&mut state, &id, &mut rng),
        Err(DeclareError::FilingDeadlinePassed { deadline })
    );
    assert_eq!(state.election(&id).unwrap().data.candidates().len(), before);

    // Concluded race.
    process_election_results(&mut state, &id, None, &mut rng).unwrap();
    assert_eq!(declare_candidacy(&mut state, &id, &mut rng), Err(DeclareError::ElectionConcluded));
}

#[test]
fn party_list_contest_rejects_individual_filing() {
    let pr = ElectionTypeDef {
        pr_threshold_pct: 2,
        ..def(
            "party_list",
            ElectoralSystem::PartyListPr,
            OfficeKind::Legislature,
            3,
            SeatPolicy::Fixed(8),
            true,
        )
    };
    let mut state = single_city_state(vec![pr]);
    let mut rng = SimRng::from_seed(800);
    generate_scheduled_elections(&mut state, &mut rng);
    let id = state.elections[0].id.clone();

    assert_eq!(
        declare_candidacy(&mut state, &id, &mut rng),
        Err(DeclareError::PartyListContest)
    );
}

#[test]
fn party_list_seats_are_conserved_and_winners_come_off_lists() {
    let pr = def(
        "party_list",
        ElectoralSystem::PartyListPr,
        OfficeKind::Legislature,
        3,
        SeatPolicy::Fixed(8),
        true,
    );
    let mut state = single_city_state(vec![pr]);
    let mut rng = SimRng::from_seed(900);
    generate_scheduled_elections(&mut state, &mut rng);
    let id = state.elections[0].id.clone();

    let election_date = state.election(&id).unwrap().election_date;
    setup_election_night(&mut state, election_date, &mut rng);
    process_election_results(&mut state, &id, None, &mut rng).unwrap();

    let outcome = state.election(&id).unwrap().outcome.as_ref().unwrap();
    assert_eq!(outcome.seats_by_party.values().sum::<u32>(), 8);
    assert_eq!(outcome.winners.len(), 8);
    match &state.offices[0].hold {
        OfficeHold::Members { members, composition_by_party } => {
            assert_eq!(members.len(), 8);
            assert_eq!(composition_by_party.values().sum::<u32>(), 8);
        }
        other => panic!("expected members, got {other:?}"),
    }
}

#[test]
fn monthly_tick_runs_full_campaigns_in_every_country() {
    for tag in [CountryTag::Usa, CountryTag::Japan, CountryTag::Korea, CountryTag::Philippines] {
        let mut state = CampaignBuilder::new(77, tag).build();
        let mut rng = SimRng::from_seed(77);
        let mut stats = NoopStats;
        for _ in 0..13 {
            advance_month(&mut state, &mut stats, &mut rng);
        }
        assert!(
            state.elections.iter().any(|e| e.is_concluded()),
            "{tag:?}: a year of ticks must conclude at least one contest"
        );
        for e in state.elections.iter().filter(|e| e.is_concluded()) {
            let outcome = e.outcome.as_ref().unwrap();
            assert!(!outcome.winners.is_empty(), "{}: concluded without winners", e.id);
            if e.system == ElectoralSystem::PartyListPr {
                assert_eq!(outcome.seats_by_party.values().sum::<u32>(), e.seats_to_fill);
            }
        }
        assert!(!state.offices.is_empty());
    }
}

#[test]
fn same_seed_reproduces_the_same_campaign() {
    let run = |seed: u64| {
        let mut state = CampaignBuilder::new(seed, CountryTag::Usa).build();
        let mut rng = SimRng::from_seed(seed);
        let mut stats = NoopStats;
        for _ in 0..24 {
            advance_month(&mut state, &mut stats, &mut rng);
        }
        serde_json::to_string(&state).unwrap()
    };
    assert_eq!(run(12345), run(12345));
    assert_ne!(run(12345), run(54321));
}
