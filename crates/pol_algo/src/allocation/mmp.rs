//! Mixed-member proportional resolution.
//!
//! Constituency seats are filled by FPTP per single-member district; the
//! compensatory list seats are allocated by highest averages over the party
//! vote. When no dual-ballot data exists, the party vote falls back to the
//! aggregated constituency votes. List-seat winners are deduplicated against
//! already-elected constituency winners.

use std::collections::{BTreeMap, BTreeSet};

use pol_core::election::{ConstituencyRace, PartyList};
use pol_core::ids::{CandidateId, PartyId};
use pol_core::system::AllocationMethod;

use crate::allocation::highest_averages::allocate_highest_averages;
use crate::allocation::plurality::take_top_n;

/// Resolution of an MMP contest, as indices into the caller's payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MmpSeats {
    /// `(constituency index, candidate index)` per district winner.
    pub constituency_winners: Vec<(usize, usize)>,
    /// `(list index, candidate index)` per list-seat winner, in award order.
    pub list_winners: Vec<(usize, usize)>,
    /// Compensatory list seats allocated per party (eligible parties only).
    pub list_seats_by_party: BTreeMap<PartyId, u32>,
    /// The party vote actually used (supplied or derived).
    pub party_votes_used: BTreeMap<PartyId, u64>,
}

/// Sum constituency candidate votes per party (independents excluded).
fn derive_party_votes(constituencies: &[ConstituencyRace]) -> BTreeMap<PartyId, u64> {
    let mut out: BTreeMap<PartyId, u64> = BTreeMap::new();
    for race in constituencies {
        for c in &race.candidates {
            if let Some(party) = &c.party {
                *out.entry(party.clone()).or_insert(0) += c.votes.unwrap_or(0);
            }
        }
    }
    out
}

/// Resolve an MMP contest. `parties` fixes the stable order for allocation
/// tie-breaks; `party_votes` may be empty (fallback applies). Constituency
/// candidate votes must already be simulated.
pub fn allocate_mmp(
    constituencies: &[ConstituencyRace],
    lists: &[PartyList],
    party_votes: &BTreeMap<PartyId, u64>,
    list_seats: u32,
    parties: &[PartyId],
    method: AllocationMethod,
    threshold_pct: u8,
) -> MmpSeats {
    // Constituency pass: plain FPTP per district.
    let mut constituency_winners = Vec::with_capacity(constituencies.len());
    let mut elected: BTreeSet<CandidateId> = BTreeSet::new();
    for (ci, race) in constituencies.iter().enumerate() {
        if let Some(&wi) = take_top_n(&race.candidates, 1).first() {
            elected.insert(race.candidates[wi].id.clone());
            constituency_winners.push((ci, wi));
        }
    }

    // Party vote: supplied dual-ballot data, or derived from constituencies.
    let party_votes_used = if party_votes.is_empty() {
        derive_party_votes(constituencies)
    } else {
        party_votes.clone()
    };

    let list_seats_by_party =
        allocate_highest_averages(list_seats, parties, &party_votes_used, method, threshold_pct);

    // Fill list seats top-down per party order, skipping constituency winners.
    let mut list_winners = Vec::new();
    for party in parties {
        let Some(&seats) = list_seats_by_party.get(party) else { continue };
        let Some(li) = lists.iter().position(|l| &l.party == party) else { continue };
        let mut filled = 0u32;
        for (mi, member) in lists[li].ranked.iter().enumerate() {
            if filled == seats {
                break;
            }
            if elected.contains(&member.id) {
                continue; // already holds a constituency seat
            }
            elected.insert(member.id.clone());
            list_winners.push((li, mi));
            filled += 1;
        }
        // An exhausted list leaves its remaining seats unfilled.
    }

    MmpSeats { constituency_winners, list_winners, list_seats_by_party, party_votes_used }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pol_core::election::Candidate;
    use pol_core::ids::DistrictId;

    fn cand(id: &str, party: Option<&str>, votes: u64) -> Candidate {
        Candidate {
            id: CandidateId::new(id),
            name: id.to_string(),
            party: party.map(PartyId::new),
            base_score: 0,
            votes: Some(votes),
            is_incumbent: false,
            is_player: false,
        }
    }

    fn race(district: &str, candidates: Vec<Candidate>) -> ConstituencyRace {
        ConstituencyRace { district: DistrictId::new(district), eligible_voters: 10_000, candidates }
    }

    fn list(party: &str, names: &[&str]) -> PartyList {
        PartyList {
            party: PartyId::new(party),
            ranked: names.iter().map(|n| cand(n, Some(party), 0)).collect(),
        }
    }

    #[test]
    fn constituency_winners_are_per_district_fptp() {
        let races = vec![
            race("d1", vec![cand("a1", Some("A"), 500), cand("b1", Some("B"), 400)]),
            race("d2", vec![cand("a2", Some("A"), 300), cand("b2", Some("B"), 600)]),
        ];
        let parties = vec![PartyId::new("A"), PartyId::new("B")];
        let out = allocate_mmp(
            &races,
            &[list("A", &["aL1"]), list("B", &["bL1"])],
            &BTreeMap::new(),
            2,
            &parties,
            AllocationMethod::DHondt,
            0,
        );
        assert_eq!(out.constituency_winners, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn party_vote_falls_back_to_aggregated_constituency_votes() {
        let races = vec![
            race("d1", vec![cand("a1", Some("A"), 500), cand("b1", Some("B"), 400)]),
            race("d2", vec![cand("a2", Some("A"), 300), cand("b2", Some("B"), 600)]),
        ];
        let parties = vec![PartyId::new("A"), PartyId::new("B")];
        let out = allocate_mmp(
            &races,
            &[list("A", &["aL1", "aL2"]), list("B", &["bL1", "bL2"])],
            &BTreeMap::new(),
            2,
            &parties,
            AllocationMethod::DHondt,
            0,
        );
        assert_eq!(out.party_votes_used.get(&PartyId::new("A")), Some(&800));
        assert_eq!(out.party_votes_used.get(&PartyId::new("B")), Some(&1000));
    }

    #[test]
    fn list_winners_dedupe_against_constituency_winners() {
        // a1 wins d1 and also heads A's list; the list seat must pass over it.
        let races = vec![race("d1", vec![cand("a1", Some("A"), 500), cand("b1", Some("B"), 100)])];
        let a_list = PartyList {
            party: PartyId::new("A"),
            ranked: vec![cand("a1", Some("A"), 0), cand("a2", Some("A"), 0)],
        };
        let parties = vec![PartyId::new("A"), PartyId::new("B")];
        let out = allocate_mmp(
            &races,
            &[a_list, list("B", &["bL1"])],
            &BTreeMap::from([(PartyId::new("A"), 900u64), (PartyId::new("B"), 100u64)]),
            1,
            &parties,
            AllocationMethod::DHondt,
            0,
        );
        // A takes the single list seat; winner is a2, not the already-elected a1.
        assert_eq!(out.list_winners, vec![(0, 1)]);
    }

    #[test]
    fn list_seats_total_matches_request() {
        let races = vec![race("d1", vec![cand("a1", Some("A"), 500), cand("b1", Some("B"), 400)])];
        let parties = vec![PartyId::new("A"), PartyId::new("B")];
        let out = allocate_mmp(
            &races,
            &[list("A", &["aL1", "aL2", "aL3"]), list("B", &["bL1", "bL2", "bL3"])],
            &BTreeMap::from([(PartyId::new("A"), 600u64), (PartyId::new("B"), 400u64)]),
            5,
            &parties,
            AllocationMethod::SainteLague,
            0,
        );
        assert_eq!(out.list_seats_by_party.values().sum::<u32>(), 5);
    }
}
