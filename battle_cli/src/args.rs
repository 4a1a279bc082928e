//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

/// Fight a demon battle in the terminal
#[derive(Parser, Debug)]
#[command(name = "battle", version, about)]
pub struct Args {
    /// Demon controlled by you
    #[arg(default_value = "Pixie")]
    pub player: String,

    /// Demon controlled by the AI
    #[arg(default_value = "Jack Frost")]
    pub enemy: String,

    /// Seed for a reproducible battle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seconds you get per turn
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Let the AI play both sides
    #[arg(long)]
    pub auto: bool,

    /// Directory with moves.toml, status_effects.toml, demons.toml and
    /// optionally constants.toml
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// List the demon roster and exit
    #[arg(long)]
    pub list: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
