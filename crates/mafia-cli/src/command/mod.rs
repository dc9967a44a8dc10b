use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::{logging, schema::preset::SetupPreset, util};

use self::{deal::DealArg, play::PlayArg};

mod deal;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    /// Write logs to this file (logging is off without it)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Maximum log level
    #[clap(long, global = true, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run a game: setup, role reveal, timed rounds and summary
    Play(#[clap(flatten)] PlayArg),
    /// Deal roles once and print the result
    Deal(#[clap(flatten)] DealArg),
}

/// Setup fields accepted by every command that deals roles.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SetupArg {
    /// Number of players
    #[clap(long)]
    players: Option<u32>,
    /// Number of mafia
    #[clap(long)]
    mafia: Option<u32>,
    /// Round length in minutes (1 to 30)
    #[clap(long)]
    minutes: Option<u32>,
    /// Include the doctor
    #[clap(long)]
    doctor: bool,
    /// Include the seer
    #[clap(long)]
    seer: bool,
    /// JSON file with setup values; flags win over it
    #[clap(long)]
    preset: Option<PathBuf>,
}

impl SetupArg {
    pub(crate) fn load_preset(&self) -> anyhow::Result<SetupPreset> {
        let from_flags = SetupPreset {
            players: self.players,
            mafia: self.mafia,
            minutes: self.minutes,
            doctor: self.doctor.then_some(true),
            seer: self.seer.then_some(true),
        };
        let from_file = match &self.preset {
            Some(path) => read_preset(path)?,
            None => SetupPreset::default(),
        };
        Ok(from_flags.or(from_file))
    }
}

fn read_preset(path: &Path) -> anyhow::Result<SetupPreset> {
    let preset = util::read_json_file("preset", path)?;
    tracing::debug!(path = %path.display(), ?preset, "preset loaded");
    Ok(preset)
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.log_file.as_deref(), args.log_level)?;
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Deal(arg) => deal::run(&arg)?,
    }
    Ok(())
}
