//! Lifecycle transitions: declaration, election night, resolution, tick.
//!
//! Instances move `Upcoming -> Concluded` in a single resolution step;
//! election night only writes simulated vote numbers into the payload.
//! Resolution is guarded for idempotency (re-resolving a concluded instance
//! is a silent no-op) and commits winners into government-office records by
//! upsert, never by creating a duplicate record for the same contest
//! identity.

use std::collections::BTreeMap;

use pol_algo::allocation::{allocate_highest_averages, allocate_mmp, take_top_n};
use pol_algo::{distribute_party_votes, distribute_votes_to_candidates, draw_turnout_permille};
use pol_core::election::{
    CandidateResult, ElectionInstance, ElectionOutcome, ElectionStatus, PartyResult, SystemData,
    WinnerRecord,
};
use pol_core::ids::{ElectionId, OfficeId, PartyId};
use pol_core::office::{find_office_index, GovernmentOffice, OfficeHold, SeatHolder};
use pol_core::system::{AllocationMethod, OfficeKind, PartyStanding};
use pol_core::{GameDate, SimRng};
use tracing::{debug, warn};

use crate::candidates;
use crate::errors::{DeclareError, EngineError};
use crate::schedule::generate_scheduled_elections;
use crate::state::CampaignState;
use crate::stats::StatsEngine;

/// Term length assumed when an instance's type definition has gone missing
/// from the campaign config.
const FALLBACK_TERM_YEARS: u32 = 4;

/// File the player into a contest. Rejected (state untouched) after the
/// filing deadline, on a concluded race, on a second declaration, and on
/// list-decided payloads.
pub fn declare_candidacy(
    state: &mut CampaignState,
    id: &ElectionId,
    rng: &mut SimRng,
) -> Result<(), DeclareError> {
    let Some(idx) = state.elections.iter().position(|e| &e.id == id) else {
        return Err(DeclareError::NoSuchElection(id.clone()));
    };
    let e = &state.elections[idx];
    if e.is_concluded() {
        return Err(DeclareError::ElectionConcluded);
    }
    if state.date > e.filing_deadline {
        return Err(DeclareError::FilingDeadlinePassed { deadline: e.filing_deadline });
    }
    match &e.data {
        SystemData::Candidates { candidates } => {
            if candidates.iter().any(|c| c.is_player) {
                return Err(DeclareError::AlreadyDeclared);
            }
        }
        SystemData::PartyLists { .. } | SystemData::Mixed { .. } => {
            return Err(DeclareError::PartyListContest);
        }
    }

    let baseline = state
        .player
        .party
        .as_ref()
        .map(|p| state.party_popularity_permille(p))
        .unwrap_or(0);
    let candidate = candidates::player_candidate(&state.player, baseline, rng);
    if let SystemData::Candidates { candidates } = &mut state.elections[idx].data {
        candidates.push(candidate);
    }
    Ok(())
}

fn party_standings(state: &CampaignState) -> Vec<PartyStanding> {
    state.world.parties.iter().map(|p| p.standing()).collect()
}

fn is_simulated(e: &ElectionInstance) -> bool {
    match &e.data {
        SystemData::Candidates { candidates } => {
            candidates.first().is_some_and(|c| c.votes.is_some())
        }
        SystemData::PartyLists { party_votes, .. } => !party_votes.is_empty(),
        SystemData::Mixed { party_votes, .. } => !party_votes.is_empty(),
    }
}

/// Simulate turnout and raw votes for one instance, in place.
fn simulate_instance(e: &mut ElectionInstance, standings: &[PartyStanding], rng: &mut SimRng) {
    let turnout = draw_turnout_permille(e.level, rng);
    match &mut e.data {
        SystemData::Candidates { candidates } => {
            let total = e.snapshot.eligible_voters * turnout as u64 / 1000;
            distribute_votes_to_candidates(candidates, total, rng);
        }
        SystemData::PartyLists { party_votes, .. } => {
            let total = e.snapshot.eligible_voters * turnout as u64 / 1000;
            *party_votes = distribute_party_votes(standings, total, rng);
        }
        SystemData::Mixed { constituencies, party_votes, .. } => {
            let mut total: u64 = 0;
            for race in constituencies.iter_mut() {
                let cast = race.eligible_voters * draw_turnout_permille(e.level, rng) as u64 / 1000;
                distribute_votes_to_candidates(&mut race.candidates, cast, rng);
                total += cast;
            }
            // The separately tracked party ballot covers the same electorate.
            *party_votes = distribute_party_votes(standings, total, rng);
        }
    }
}

/// Simulate every upcoming contest whose election day has arrived. Leaves
/// status untouched; resolution flips it.
pub fn setup_election_night(state: &mut CampaignState, date: GameDate, rng: &mut SimRng) {
    let standings = party_standings(state);
    for e in state.elections.iter_mut() {
        if !e.is_concluded() && e.election_date <= date && !is_simulated(e) {
            simulate_instance(e, &standings, rng);
        }
    }
}

struct Resolution {
    outcome: ElectionOutcome,
    seat_holders: Vec<SeatHolder>,
}

fn holder_from(c: &pol_core::election::Candidate) -> SeatHolder {
    SeatHolder {
        candidate: c.id.clone(),
        name: c.name.clone(),
        party: c.party.clone(),
        is_player: c.is_player,
    }
}

fn winner_from(h: &SeatHolder) -> WinnerRecord {
    WinnerRecord { candidate: h.candidate.clone(), name: h.name.clone(), party: h.party.clone() }
}

fn candidate_results_sorted(candidates: &[pol_core::election::Candidate]) -> Vec<CandidateResult> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        candidates[b]
            .votes
            .unwrap_or(0)
            .cmp(&candidates[a].votes.unwrap_or(0))
            .then(a.cmp(&b))
    });
    order
        .into_iter()
        .map(|i| {
            let c = &candidates[i];
            CandidateResult {
                candidate: c.id.clone(),
                name: c.name.clone(),
                party: c.party.clone(),
                votes: c.votes.unwrap_or(0),
            }
        })
        .collect()
}

fn party_results_from(votes: &BTreeMap<PartyId, u64>, total: u64) -> Vec<PartyResult> {
    let mut rows: Vec<PartyResult> = votes
        .iter()
        .map(|(party, &v)| PartyResult {
            party: party.clone(),
            votes: v,
            percentage_tenths: if total == 0 { 0 } else { (v * 1000 / total) as u32 },
        })
        .collect();
    rows.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.party.cmp(&b.party)));
    rows
}

fn aggregate_candidate_votes(candidates: &[pol_core::election::Candidate]) -> BTreeMap<PartyId, u64> {
    let mut out: BTreeMap<PartyId, u64> = BTreeMap::new();
    for c in candidates {
        if let Some(party) = &c.party {
            *out.entry(party.clone()).or_insert(0) += c.votes.unwrap_or(0);
        }
    }
    out
}

fn turnout_permille_of(total: u64, eligible: u64) -> u32 {
    if eligible == 0 {
        return 0;
    }
    (total * 1000 / eligible) as u32
}

fn resolve_payload(
    e: &ElectionInstance,
    method: AllocationMethod,
    threshold_pct: u8,
) -> Resolution {
    match &e.data {
        SystemData::Candidates { candidates } => {
            let total: u64 = candidates.iter().map(|c| c.votes.unwrap_or(0)).sum();
            let top = take_top_n(candidates, e.seats_to_fill as usize);
            let seat_holders: Vec<SeatHolder> =
                top.iter().map(|&i| holder_from(&candidates[i])).collect();
            let mut seats_by_party: BTreeMap<PartyId, u32> = BTreeMap::new();
            for h in &seat_holders {
                if let Some(p) = &h.party {
                    *seats_by_party.entry(p.clone()).or_insert(0) += 1;
                }
            }
            let party_votes = aggregate_candidate_votes(candidates);
            Resolution {
                outcome: ElectionOutcome {
                    turnout_votes: total,
                    turnout_permille: turnout_permille_of(total, e.snapshot.eligible_voters),
                    winners: seat_holders.iter().map(winner_from).collect(),
                    results_by_candidate: candidate_results_sorted(candidates),
                    results_by_party: party_results_from(&party_votes, total),
                    seats_by_party,
                },
                seat_holders,
            }
        }
        SystemData::PartyLists { lists, party_votes } => {
            let total: u64 = party_votes.values().sum();
            let party_order: Vec<PartyId> = lists.iter().map(|l| l.party.clone()).collect();
            let seats = allocate_highest_averages(
                e.seats_to_fill,
                &party_order,
                party_votes,
                method,
                threshold_pct,
            );
            // Winners come off each qualifying list top-down, in list order.
            let mut seat_holders = Vec::new();
            for list in lists {
                let Some(&n) = seats.get(&list.party) else { continue };
                for c in list.ranked.iter().take(n as usize) {
                    seat_holders.push(holder_from(c));
                }
            }
            Resolution {
                outcome: ElectionOutcome {
                    turnout_votes: total,
                    turnout_permille: turnout_permille_of(total, e.snapshot.eligible_voters),
                    winners: seat_holders.iter().map(winner_from).collect(),
                    results_by_candidate: Vec::new(),
                    results_by_party: party_results_from(party_votes, total),
                    seats_by_party: seats,
                },
                seat_holders,
            }
        }
        SystemData::Mixed { constituencies, lists, party_votes, list_seats } => {
            let party_order: Vec<PartyId> = lists.iter().map(|l| l.party.clone()).collect();
            let mmp = allocate_mmp(
                constituencies,
                lists,
                party_votes,
                *list_seats,
                &party_order,
                method,
                threshold_pct,
            );

            let mut seat_holders = Vec::new();
            let mut seats_by_party: BTreeMap<PartyId, u32> = BTreeMap::new();
            for &(ci, wi) in &mmp.constituency_winners {
                let c = &constituencies[ci].candidates[wi];
                seat_holders.push(holder_from(c));
                if let Some(p) = &c.party {
                    *seats_by_party.entry(p.clone()).or_insert(0) += 1;
                }
            }
            for &(li, mi) in &mmp.list_winners {
                let c = &lists[li].ranked[mi];
                seat_holders.push(holder_from(c));
                if let Some(p) = &c.party {
                    *seats_by_party.entry(p.clone()).or_insert(0) += 1;
                }
            }

            let all_constituency: Vec<pol_core::election::Candidate> =
                constituencies.iter().flat_map(|r| r.candidates.iter().cloned()).collect();
            let total: u64 = all_constituency.iter().map(|c| c.votes.unwrap_or(0)).sum();
            Resolution {
                outcome: ElectionOutcome {
                    turnout_votes: total,
                    turnout_permille: turnout_permille_of(total, e.snapshot.eligible_voters),
                    winners: seat_holders.iter().map(winner_from).collect(),
                    results_by_candidate: candidate_results_sorted(&all_constituency),
                    results_by_party: party_results_from(
                        &mmp.party_votes_used,
                        mmp.party_votes_used.values().sum(),
                    ),
                    seats_by_party,
                },
                seat_holders,
            }
        }
    }
}

/// Upsert the winner(s) into the government-office record for this contest
/// identity.
fn commit_office(
    state: &mut CampaignState,
    idx: usize,
    seat_holders: Vec<SeatHolder>,
    office_kind: OfficeKind,
    term_years: u32,
) {
    let e = &state.elections[idx];
    let mut holders = seat_holders.into_iter();
    let hold = match office_kind {
        OfficeKind::SingleHolder => match holders.next() {
            Some(h) => OfficeHold::Holder(h),
            None => {
                warn!(election = e.id.as_str(), "no winners to commit; office left unchanged");
                return;
            }
        },
        OfficeKind::Legislature => {
            let members: Vec<SeatHolder> = holders.collect();
            if members.is_empty() {
                warn!(election = e.id.as_str(), "no winners to commit; office left unchanged");
                return;
            }
            OfficeHold::members_from(members)
        }
    };
    let term_ends = e.election_date.term_end(term_years);

    match find_office_index(
        &state.offices,
        &e.instance_id_base,
        &e.office_name,
        e.level,
        &e.jurisdiction,
    ) {
        Some(i) => {
            let office = &mut state.offices[i];
            office.hold = hold;
            office.term_ends = term_ends;
            office.instance_id_base = e.instance_id_base.clone();
            office.office_name = e.office_name.clone();
        }
        None => {
            state.offices.push(GovernmentOffice {
                id: OfficeId::new(format!("office_{}", e.instance_id_base.as_str())),
                type_id: e.type_id.clone(),
                office_name: e.office_name.clone(),
                instance_id_base: e.instance_id_base.clone(),
                level: e.level,
                jurisdiction: e.jurisdiction.clone(),
                hold,
                term_ends,
            });
        }
    }
}

/// Resolve one contest: compute turnout and winners, commit the outcome and
/// the office record, mark the instance concluded. Re-invoking on a
/// concluded instance is a no-op unless `simulated` supplies replacement
/// vote data, which re-resolves the contest from those tallies.
pub fn process_election_results(
    state: &mut CampaignState,
    id: &ElectionId,
    simulated: Option<SystemData>,
    rng: &mut SimRng,
) -> Result<(), EngineError> {
    let Some(idx) = state.elections.iter().position(|e| &e.id == id) else {
        return Err(EngineError::NoSuchElection(id.clone()));
    };
    if let Some(data) = simulated {
        state.elections[idx].data = data;
    } else if state.elections[idx].is_concluded() {
        debug!(election = id.as_str(), "already concluded; resolution is a no-op");
        return Ok(());
    }

    if !is_simulated(&state.elections[idx]) {
        let standings = party_standings(state);
        simulate_instance(&mut state.elections[idx], &standings, rng);
    }

    let def = state
        .election_defs
        .iter()
        .find(|d| d.id == state.elections[idx].type_id)
        .cloned();
    let (method, threshold, office_kind, term_years) = match &def {
        Some(d) => (d.allocation_method, d.pr_threshold_pct, d.office_kind, d.term_years),
        None => {
            warn!(
                type_id = state.elections[idx].type_id.as_str(),
                "missing election type definition; falling back to defaults"
            );
            (AllocationMethod::DHondt, 0, OfficeKind::SingleHolder, FALLBACK_TERM_YEARS)
        }
    };

    let resolution = resolve_payload(&state.elections[idx], method, threshold);
    commit_office(state, idx, resolution.seat_holders, office_kind, term_years);

    let e = &mut state.elections[idx];
    e.outcome = Some(resolution.outcome);
    e.status = ElectionStatus::Concluded;
    Ok(())
}

/// The monthly tick: advance the calendar, let the statistics collaborator
/// recalculate, schedule due contests, then simulate and resolve everything
/// whose election day has passed.
pub fn advance_month(state: &mut CampaignState, stats: &mut dyn StatsEngine, rng: &mut SimRng) {
    state.date = state.date.next_month();
    stats.recalculate_monthly(&mut state.world, state.date);
    generate_scheduled_elections(state, rng);
    setup_election_night(state, state.date, rng);

    let due: Vec<ElectionId> = state
        .elections
        .iter()
        .filter(|e| !e.is_concluded() && e.election_date <= state.date)
        .map(|e| e.id.clone())
        .collect();
    for id in due {
        // Ids were just collected from the state; resolution cannot miss.
        let _ = process_election_results(state, &id, None, rng);
    }
}
