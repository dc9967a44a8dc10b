use std::path::PathBuf;

use mafia_engine::{DealSeed, Game, READY_SECONDS, RoundLimit};
use ratatui_runtime::{RenderMode, Runtime, ScreenStack};

use crate::{DEFAULT_FRAME_RATE, command::SetupArg, util::Output};

use self::{screens::SetupScreen, state::PlayState};

mod screens;
mod state;

const DEFAULT_SUMMARY_DIR: &str = "./data/summaries/";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    setup: SetupArg,
    /// Hex seed (32 digits) used for every deal of the session
    #[clap(long)]
    seed: Option<DealSeed>,
    /// Fixed number of rounds (default: one per non-mafia player)
    #[clap(long)]
    max_rounds: Option<u32>,
    /// Length of the countdown before each round, in seconds
    #[clap(long, default_value_t = READY_SECONDS)]
    ready_seconds: u32,
    /// Save the session summary to a file when it is shown
    #[clap(long)]
    save_summary: bool,
    /// Directory to save summary files
    #[clap(long, default_value = DEFAULT_SUMMARY_DIR)]
    summary_dir: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            setup: SetupArg::default(),
            seed: None,
            max_rounds: None,
            ready_seconds: READY_SECONDS,
            save_summary: false,
            summary_dir: PathBuf::from(DEFAULT_SUMMARY_DIR),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        setup,
        seed,
        max_rounds,
        ready_seconds,
        save_summary,
        summary_dir,
    } = arg;

    let form = setup.load_preset()?.to_form();
    let limit = max_rounds.map_or(RoundLimit::NonMafiaPlayers, RoundLimit::Fixed);
    let game = Game::new(limit)
        .with_seed(*seed)
        .with_ready_seconds(*ready_seconds);
    let state = PlayState::new(game, form);
    let summaries = state.summaries();

    tracing::info!(?limit, ready_seconds, fixed_seed = seed.is_some(), "session started");
    let mut stack = ScreenStack::new(Box::new(SetupScreen::new(state)));
    let mut runtime = Runtime::new();
    runtime.set_render_mode(RenderMode::throttled_from_rate(DEFAULT_FRAME_RATE));
    runtime.run(&mut stack)?;

    if *save_summary {
        for summary in summaries.borrow().iter() {
            let path = summary_dir.join(summary.file_name());
            Output::save_json(summary, Some(path.clone()))?;
            eprintln!("Summary saved to {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;
    use crate::command::{CommandArgs, Mode};

    #[test]
    fn test_default_matches_parsed_defaults() {
        let args = CommandArgs::parse_from(["mafia", "play"]);
        let Some(Mode::Play(parsed)) = args.mode else {
            panic!("expected play");
        };
        let default = PlayArg::default();
        assert_eq!(parsed.ready_seconds, default.ready_seconds);
        assert_eq!(parsed.summary_dir, default.summary_dir);
        assert_eq!(parsed.max_rounds, None);
    }

    #[test]
    fn test_parses_session_options() {
        let args = CommandArgs::parse_from([
            "mafia",
            "play",
            "--max-rounds",
            "3",
            "--ready-seconds",
            "5",
            "--seed",
            "000102030405060708090a0b0c0d0e0f",
        ]);
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play");
        };
        assert_eq!(arg.max_rounds, Some(3));
        assert_eq!(arg.ready_seconds, 5);
        assert_eq!(
            arg.seed.map(|seed| seed.to_string()).as_deref(),
            Some("000102030405060708090a0b0c0d0e0f")
        );
    }
}
