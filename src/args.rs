//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "beam_barrage", version, about = "Terminal shoot-'em-up")]
pub struct Args {
    /// TOML file overriding the default game tunables
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed the RNG for a reproducible session
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (the terminal is taken over by the game)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
