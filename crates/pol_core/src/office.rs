//! Persistent government-office records.
//!
//! Offices are created on first result commit and *mutated* on every later
//! winning cycle for the same contest identity — never recreated. Lookup is
//! by `instance_id_base` first, then by (office name, level, jurisdiction),
//! which prevents duplicate records for the same recurring seat.

use std::collections::BTreeMap;

use crate::date::GameDate;
use crate::election::JurisdictionRef;
use crate::ids::{CandidateId, InstanceIdBase, OfficeId, PartyId};
use crate::system::JurisdictionLevel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeatHolder {
    pub candidate: CandidateId,
    pub name: String,
    pub party: Option<PartyId>,
    pub is_player: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OfficeHold {
    /// Single-winner office.
    Holder(SeatHolder),
    /// Legislative body: the full membership roll plus its party composition.
    Members { members: Vec<SeatHolder>, composition_by_party: BTreeMap<PartyId, u32> },
}

impl OfficeHold {
    pub fn members_from(seats: Vec<SeatHolder>) -> Self {
        let mut composition: BTreeMap<PartyId, u32> = BTreeMap::new();
        for seat in &seats {
            if let Some(party) = &seat.party {
                *composition.entry(party.clone()).or_insert(0) += 1;
            }
        }
        OfficeHold::Members { members: seats, composition_by_party: composition }
    }

    pub fn seat_holders(&self) -> Vec<&SeatHolder> {
        match self {
            OfficeHold::Holder(h) => vec![h],
            OfficeHold::Members { members, .. } => members.iter().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GovernmentOffice {
    pub id: OfficeId,
    /// Id of the `ElectionTypeDef` that fills this office.
    pub type_id: String,
    pub office_name: String,
    pub instance_id_base: InstanceIdBase,
    pub level: JurisdictionLevel,
    pub jurisdiction: JurisdictionRef,
    pub hold: OfficeHold,
    pub term_ends: GameDate,
}

impl GovernmentOffice {
    /// Fallback identity when `instance_id_base` does not match (legacy
    /// records from before a rename).
    pub fn matches_name_level_jurisdiction(
        &self,
        office_name: &str,
        level: JurisdictionLevel,
        jurisdiction: &JurisdictionRef,
    ) -> bool {
        self.office_name == office_name && self.level == level && &self.jurisdiction == jurisdiction
    }
}

/// Resolve the office record for a contest identity, `instance_id_base`
/// first, then the (name, level, jurisdiction) fallback. Returns an index so
/// the caller can mutate in place.
pub fn find_office_index(
    offices: &[GovernmentOffice],
    base: &InstanceIdBase,
    office_name: &str,
    level: JurisdictionLevel,
    jurisdiction: &JurisdictionRef,
) -> Option<usize> {
    if let Some(i) = offices.iter().position(|o| &o.instance_id_base == base) {
        return Some(i);
    }
    offices
        .iter()
        .position(|o| o.matches_name_level_jurisdiction(office_name, level, jurisdiction))
}
