//! Offline campaign runner over `pol_engine` + `pol_io`.

#![forbid(unsafe_code)]

mod args;

use clap::Parser;
use pol_core::election::SystemData;
use pol_core::ids::PartyId;
use pol_core::office::OfficeHold;
use pol_core::SimRng;
use pol_engine::{advance_month, CampaignBuilder, CampaignState, NoopStats};
use pol_io::IoError;
use thiserror::Error;

use crate::args::{Args, Command};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Io(#[from] IoError),
}

fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Session RNG: the campaign seed folded with the month index, so reloading
/// a save and advancing again replays the exact same months.
fn session_rng(state: &CampaignState) -> SimRng {
    let month_index = state.date.year as i64 * 12 + state.date.month as i64;
    SimRng::from_seed(state.seed ^ month_index as u64)
}

fn run(args: Args) -> Result<(), CliError> {
    let dir = &args.save_dir;
    match args.command {
        Command::New { id, seed, country, player, party } => {
            let state = CampaignBuilder::new(seed, country.into())
                .player(player, party.map(PartyId::new))
                .build();
            pol_io::save_campaign(dir, &id, &state)?;
            println!(
                "created campaign {id:?}: {} ({} regions, {} cities), seed {seed}, {}",
                state.world.country.name,
                state.world.regions.len(),
                state.world.cities.len(),
                state.date,
            );
        }
        Command::Advance { id, months } => {
            let mut state = pol_io::load_campaign(dir, &id)?;
            let mut rng = session_rng(&state);
            let mut stats = NoopStats;
            for _ in 0..months {
                advance_month(&mut state, &mut stats, &mut rng);
            }
            let concluded = state.elections.iter().filter(|e| e.is_concluded()).count();
            println!(
                "advanced to {}: {} elections on the books ({} concluded), {} offices",
                state.date,
                state.elections.len(),
                concluded,
                state.offices.len(),
            );
            pol_io::save_campaign(dir, &id, &state)?;
        }
        Command::Polls { id } => {
            let state = pol_io::load_campaign(dir, &id)?;
            let mut shown = 0usize;
            for e in state.elections.iter().filter(|e| !e.is_concluded()) {
                let SystemData::Candidates { candidates } = &e.data else { continue };
                shown += 1;
                let report = pol_algo::normalize_polling(candidates, e.snapshot.eligible_voters);
                println!("{} — {} (files by {})", e.election_date, e.office_name, e.filing_deadline);
                for line in &report.lines {
                    let name = candidates
                        .iter()
                        .find(|c| c.id == line.candidate)
                        .map(|c| c.name.as_str())
                        .unwrap_or_else(|| line.candidate.as_str());
                    println!("  {name}: {}%", line.percent);
                }
                println!("  undecided/other: {}%", report.undecided_percent);
            }
            if shown == 0 {
                println!("no upcoming candidate-based contests");
            }
        }
        Command::Results { id, year } => {
            let state = pol_io::load_campaign(dir, &id)?;
            let mut shown = 0usize;
            for e in state.elections.iter().filter(|e| e.is_concluded()) {
                if year.is_some_and(|y| e.election_date.year != y) {
                    continue;
                }
                let Some(outcome) = &e.outcome else { continue };
                shown += 1;
                println!(
                    "{} — {} ({} seats, turnout {}.{}%)",
                    e.election_date,
                    e.office_name,
                    e.seats_to_fill,
                    outcome.turnout_permille / 10,
                    outcome.turnout_permille % 10,
                );
                for w in &outcome.winners {
                    let party = w
                        .party
                        .as_ref()
                        .map(|p| p.as_str().to_string())
                        .unwrap_or_else(|| "independent".to_string());
                    println!("  won: {} ({party})", w.name);
                }
                for row in &outcome.results_by_party {
                    println!(
                        "  {}: {} votes ({}.{}%)",
                        row.party,
                        row.votes,
                        row.percentage_tenths / 10,
                        row.percentage_tenths % 10,
                    );
                }
            }
            if shown == 0 {
                println!("no concluded elections{}", year.map(|y| format!(" in {y}")).unwrap_or_default());
            }
        }
        Command::Offices { id } => {
            let state = pol_io::load_campaign(dir, &id)?;
            if state.offices.is_empty() {
                println!("no offices held yet");
            }
            for office in &state.offices {
                match &office.hold {
                    OfficeHold::Holder(h) => {
                        println!("{} — {} (until {})", office.office_name, h.name, office.term_ends);
                    }
                    OfficeHold::Members { members, composition_by_party } => {
                        println!(
                            "{} — {} members (until {})",
                            office.office_name,
                            members.len(),
                            office.term_ends,
                        );
                        for (party, seats) in composition_by_party {
                            println!("  {party}: {seats}");
                        }
                    }
                }
            }
        }
        Command::List => {
            let ids = pol_io::list_campaigns(dir)?;
            if ids.is_empty() {
                println!("no saved campaigns in {}", dir.display());
            }
            for id in ids {
                println!("{id}");
            }
        }
        Command::Delete { id } => {
            pol_io::delete_campaign(dir, &id)?;
            println!("deleted {id:?}");
        }
    }
    Ok(())
}
