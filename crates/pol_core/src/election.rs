//! Election instances, candidates, and the per-system payload union.
//!
//! The per-system payload is a tagged union keyed by the electoral system:
//! a plurality race carries a flat candidate field, a PR race carries ordered
//! party lists, an MMP race carries both. No optional field soup.

use std::collections::BTreeMap;

use crate::date::GameDate;
use crate::entities::EntitySnapshot;
use crate::ids::{CandidateId, CityId, CountryId, DistrictId, ElectionId, InstanceIdBase, PartyId, RegionId};
use crate::system::{ElectoralSystem, JurisdictionLevel};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Exactly one jurisdiction id, chosen by level.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JurisdictionRef {
    City(CityId),
    Region(RegionId),
    District(DistrictId),
    Country(CountryId),
}

impl JurisdictionRef {
    pub fn token(&self) -> &str {
        match self {
            JurisdictionRef::City(id) => id.as_str(),
            JurisdictionRef::Region(id) => id.as_str(),
            JurisdictionRef::District(id) => id.as_str(),
            JurisdictionRef::Country(id) => id.as_str(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElectionStatus {
    Upcoming,
    Concluded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    /// `None` = independent.
    pub party: Option<PartyId>,
    /// Strength proxy; sole input to vote distribution.
    pub base_score: u32,
    /// Populated only after vote simulation.
    pub votes: Option<u64>,
    pub is_incumbent: bool,
    pub is_player: bool,
}

/// Ordered list for PR/MMP; list order determines who takes allocated seats.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartyList {
    pub party: PartyId,
    pub ranked: Vec<Candidate>,
}

/// One single-member constituency inside an MMP contest.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstituencyRace {
    pub district: DistrictId,
    /// Electorate of this single-member district, frozen at scheduling.
    pub eligible_voters: u64,
    pub candidates: Vec<Candidate>,
}

/// System-specific payload, keyed by the electoral system of the instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SystemData {
    /// FPTP / SNTV / block vote / at-large plurality.
    Candidates { candidates: Vec<Candidate> },
    /// Party-list PR. `party_votes` is empty until election night.
    PartyLists { lists: Vec<PartyList>, party_votes: BTreeMap<PartyId, u64> },
    /// MMP: constituency races plus compensatory lists. `party_votes` is the
    /// separately tracked "party ballot"; empty until election night.
    Mixed {
        constituencies: Vec<ConstituencyRace>,
        lists: Vec<PartyList>,
        party_votes: BTreeMap<PartyId, u64>,
        list_seats: u32,
    },
}

impl SystemData {
    /// All candidates in the payload, in payload order.
    pub fn candidates(&self) -> Vec<&Candidate> {
        match self {
            SystemData::Candidates { candidates } => candidates.iter().collect(),
            SystemData::PartyLists { lists, .. } => {
                lists.iter().flat_map(|l| l.ranked.iter()).collect()
            }
            SystemData::Mixed { constituencies, lists, .. } => constituencies
                .iter()
                .flat_map(|c| c.candidates.iter())
                .chain(lists.iter().flat_map(|l| l.ranked.iter()))
                .collect(),
        }
    }

    pub fn contains_candidate(&self, id: &CandidateId) -> bool {
        self.candidates().iter().any(|c| &c.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WinnerRecord {
    pub candidate: CandidateId,
    pub name: String,
    pub party: Option<PartyId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidateResult {
    pub candidate: CandidateId,
    pub name: String,
    pub party: Option<PartyId>,
    pub votes: u64,
}

/// Per-party vote line; percentage kept integer-first in tenths.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartyResult {
    pub party: PartyId,
    pub votes: u64,
    pub percentage_tenths: u32,
}

/// Write-once outcome committed at resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElectionOutcome {
    pub turnout_votes: u64,
    /// Turnout as permille of eligible voters.
    pub turnout_permille: u32,
    /// Ordered, deduplicated by candidate id.
    pub winners: Vec<WinnerRecord>,
    /// Sorted by votes descending, ties by payload order.
    pub results_by_candidate: Vec<CandidateResult>,
    pub results_by_party: Vec<PartyResult>,
    pub seats_by_party: BTreeMap<PartyId, u32>,
}

/// One concrete contest in one cycle. The entity snapshot is frozen at
/// creation; only `data` (votes) and `outcome`/`status` mutate afterwards.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElectionInstance {
    pub id: ElectionId,
    pub instance_id_base: InstanceIdBase,
    /// Id of the `ElectionTypeDef` this instance was derived from.
    pub type_id: String,
    pub office_name: String,
    pub level: JurisdictionLevel,
    pub jurisdiction: JurisdictionRef,
    pub snapshot: EntitySnapshot,
    pub seats_to_fill: u32,
    pub filing_deadline: GameDate,
    pub election_date: GameDate,
    /// Effective system; may differ from the type when a multi-member
    /// district collapsed into conceptual single-seat contests.
    pub system: ElectoralSystem,
    pub data: SystemData,
    pub status: ElectionStatus,
    pub outcome: Option<ElectionOutcome>,
}

impl ElectionInstance {
    pub fn is_concluded(&self) -> bool {
        matches!(self.status, ElectionStatus::Concluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(id: &str, score: u32) -> Candidate {
        Candidate {
            id: CandidateId::new(id),
            name: id.to_string(),
            party: None,
            base_score: score,
            votes: None,
            is_incumbent: false,
            is_player: false,
        }
    }

    #[test]
    fn mixed_payload_lists_all_candidates() {
        let data = SystemData::Mixed {
            constituencies: vec![ConstituencyRace {
                district: DistrictId::new("d1"),
                eligible_voters: 40_000,
                candidates: vec![cand("a", 10), cand("b", 20)],
            }],
            lists: vec![PartyList {
                party: PartyId::new("p1"),
                ranked: vec![cand("c", 30)],
            }],
            party_votes: BTreeMap::new(),
            list_seats: 2,
        };
        let ids: Vec<&str> = data.candidates().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(data.contains_candidate(&CandidateId::new("c")));
        assert!(!data.contains_candidate(&CandidateId::new("z")));
    }
}
