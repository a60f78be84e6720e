//! CLI argument surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pol_core::system::CountryTag;

#[derive(Debug, Parser)]
#[command(name = "pol", about = "Offline, deterministic campaign simulator")]
pub struct Args {
    /// Directory holding saved campaigns.
    #[arg(long, default_value = "saves")]
    pub save_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new campaign and save it.
    New {
        /// Save id (file key).
        id: String,
        /// World seed; identical seeds reproduce identical campaigns.
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = CountryArg::Usa)]
        country: CountryArg,
        /// Player politician name.
        #[arg(long, default_value = "Player")]
        player: String,
        /// Party id the player runs under (omit for independent).
        #[arg(long)]
        party: Option<String>,
    },
    /// Advance a saved campaign by whole months.
    Advance {
        id: String,
        #[arg(long, default_value_t = 1)]
        months: u32,
    },
    /// Print polling for upcoming candidate-based contests.
    Polls { id: String },
    /// Print concluded election results.
    Results {
        id: String,
        /// Restrict to one election year.
        #[arg(long)]
        year: Option<i32>,
    },
    /// Print current government offices and their holders.
    Offices { id: String },
    /// List saved campaigns.
    List,
    /// Delete a saved campaign.
    Delete { id: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CountryArg {
    Usa,
    Japan,
    Korea,
    Philippines,
}

impl From<CountryArg> for CountryTag {
    fn from(c: CountryArg) -> Self {
        match c {
            CountryArg::Usa => CountryTag::Usa,
            CountryArg::Japan => CountryTag::Japan,
            CountryArg::Korea => CountryTag::Korea,
            CountryArg::Philippines => CountryTag::Philippines,
        }
    }
}
