//! Candidate and party-list generation.
//!
//! AI candidates are produced when an instance is scheduled and never
//! outlive it. Base score is the sole input to vote distribution, built from
//! the party popularity baseline, a drawn attribute aggregate, and the
//! incumbency bonus adjusted by the jurisdiction's economic outlook. All
//! draws go through the injected rng, so one seed gives one field.

use pol_core::election::{Candidate, PartyList};
use pol_core::entities::{EconomicOutlook, Party, Politician};
use pol_core::ids::CandidateId;
use pol_core::office::SeatHolder;
use pol_core::SimRng;

// Scoring tuning. Baseline contributes 0..=50 from a 0..=1000 permille
// popularity; the attribute draw carries the rest of the spread.
const ATTRIBUTE_MIN: u32 = 35;
const ATTRIBUTE_MAX: u32 = 85;
const INCUMBENCY_BONUS: u32 = 15;
const SCORE_NOISE_SPREAD: u32 = 150;

/// Minimum plausible field size; filler independents top the field up.
const MIN_FIELD: usize = 3;
const MAX_EXTRA_INDEPENDENTS: u32 = 2;

/// Extra names past the seat count on each ordered list, so a list rarely
/// exhausts during compensatory fill.
const LIST_DEPTH_MARGIN: u32 = 2;

fn apply_outlook(score: u32, outlook: EconomicOutlook) -> u32 {
    let adjusted = match outlook {
        EconomicOutlook::Recession => score.saturating_sub(12),
        EconomicOutlook::Stagnant => score.saturating_sub(5),
        EconomicOutlook::Steady => score,
        EconomicOutlook::Booming => score + 8,
    };
    adjusted.max(1)
}

fn base_score(
    baseline_permille: u32,
    incumbent: bool,
    outlook: EconomicOutlook,
    rng: &mut SimRng,
) -> u32 {
    let attribute = rng.range_u32(ATTRIBUTE_MIN, ATTRIBUTE_MAX);
    let mut score = baseline_permille / 20 + attribute;
    if incumbent {
        score = apply_outlook(score + INCUMBENCY_BONUS, outlook);
    }
    let noised = (score as u64 * rng.noise_permille(SCORE_NOISE_SPREAD)) / 1000;
    (noised as u32).max(1)
}

/// One candidate per party in scope, the incumbent kept in their party's
/// slot, plus filler independents up to a plausible field. The field is
/// always larger than `seats`, so a multi-seat contest never runs
/// uncontested.
///
/// `prefix` scopes generated candidate ids to the instance (or to one
/// constituency of an MMP contest).
pub fn candidate_field(
    prefix: &str,
    parties: &[Party],
    seats: u32,
    incumbent: Option<&SeatHolder>,
    outlook: EconomicOutlook,
    rng: &mut SimRng,
) -> Vec<Candidate> {
    let mut field = Vec::with_capacity(parties.len() + 2);

    for (i, party) in parties.iter().enumerate() {
        if let Some(h) = incumbent.filter(|h| h.party.as_ref() == Some(&party.id)) {
            field.push(Candidate {
                id: h.candidate.clone(),
                name: h.name.clone(),
                party: h.party.clone(),
                base_score: base_score(party.popularity_permille, true, outlook, rng),
                votes: None,
                is_incumbent: true,
                is_player: h.is_player,
            });
        } else {
            field.push(Candidate {
                id: CandidateId::new(format!("{prefix}_c{}", i + 1)),
                name: format!("{} Candidate", party.name),
                party: Some(party.id.clone()),
                base_score: base_score(party.popularity_permille, false, outlook, rng),
                votes: None,
                is_incumbent: false,
                is_player: false,
            });
        }
    }

    // An independent incumbent sits outside every party slot.
    if let Some(h) = incumbent.filter(|h| h.party.is_none()) {
        field.push(Candidate {
            id: h.candidate.clone(),
            name: h.name.clone(),
            party: None,
            base_score: base_score(0, true, outlook, rng),
            votes: None,
            is_incumbent: true,
            is_player: h.is_player,
        });
    }

    let extra = rng.range_u32(0, MAX_EXTRA_INDEPENDENTS) as usize;
    let target = (field.len() + extra).max(MIN_FIELD).max(seats as usize + 1);
    let mut n = 0usize;
    while field.len() < target {
        n += 1;
        field.push(Candidate {
            id: CandidateId::new(format!("{prefix}_i{n}")),
            name: format!("Independent {n}"),
            party: None,
            base_score: base_score(0, false, outlook, rng),
            votes: None,
            is_incumbent: false,
            is_player: false,
        });
    }

    field
}

/// The player's candidate record for one contest. Scored like any other
/// candidate except the attribute aggregate comes from the persistent
/// politician record instead of a draw.
pub fn player_candidate(player: &Politician, baseline_permille: u32, rng: &mut SimRng) -> Candidate {
    let score = baseline_permille / 20 + player.attribute_score as u32;
    let noised = (score as u64 * rng.noise_permille(SCORE_NOISE_SPREAD)) / 1000;
    Candidate {
        id: CandidateId::new("player"),
        name: player.name.clone(),
        party: player.party.clone(),
        base_score: (noised as u32).max(1),
        votes: None,
        is_incumbent: false,
        is_player: true,
    }
}

/// Ordered lists for PR/MMP contests. List order is significant: allocated
/// seats are taken top-down.
pub fn party_lists(prefix: &str, parties: &[Party], seats: u32, rng: &mut SimRng) -> Vec<PartyList> {
    let depth = seats + LIST_DEPTH_MARGIN;
    parties
        .iter()
        .map(|party| {
            let ranked = (1..=depth)
                .map(|rank| Candidate {
                    id: CandidateId::new(format!("{prefix}_{}_l{rank}", party.id)),
                    name: format!("{} List {rank}", party.name),
                    party: Some(party.id.clone()),
                    base_score: base_score(
                        party.popularity_permille,
                        false,
                        EconomicOutlook::Steady,
                        rng,
                    ),
                    votes: None,
                    is_incumbent: false,
                    is_player: false,
                })
                .collect();
            PartyList { party: party.id.clone(), ranked }
        })
        .collect()
}
