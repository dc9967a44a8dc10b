use std::io::Write as _;

use anyhow::Context as _;
use mafia_engine::{
    DealSeed, Game, Role, RoleAssignment, RoleCounts, RoundLimit, SystemClock, ValidatedConfig,
};
use serde::Serialize;

use crate::{command::SetupArg, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DealArg {
    #[clap(flatten)]
    pub(crate) setup: SetupArg,
    /// Hex seed (32 digits) for a reproducible deal
    #[clap(long)]
    seed: Option<DealSeed>,
    /// Print the role of every player slot, not only the composition
    #[clap(long)]
    show_roles: bool,
    /// Print JSON instead of text
    #[clap(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct DealReport<'a> {
    seed: DealSeed,
    config: &'a ValidatedConfig,
    counts: RoleCounts,
    max_rounds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    roles: Option<&'a RoleAssignment>,
}

pub(crate) fn run(arg: &DealArg) -> anyhow::Result<()> {
    let DealArg {
        setup,
        seed,
        show_roles,
        json,
    } = arg;

    let form = setup.load_preset()?.to_form();
    let limit = RoundLimit::default();
    let mut game = Game::<SystemClock>::new(limit).with_seed(*seed);
    let deal = game.deal(&form).context("Invalid setup")?;
    let config = deal.config();
    let report = DealReport {
        seed: deal.seed(),
        config,
        counts: deal.assignment().counts(),
        max_rounds: limit.max_rounds(config.players(), config.mafia()),
        roles: show_roles.then_some(deal.assignment()),
    };

    let mut output = Output::stdout();
    if *json {
        output.write_json(&report)?;
    } else {
        write_text(&mut output, &report)?;
    }
    Ok(())
}

fn write_text(output: &mut Output, report: &DealReport<'_>) -> anyhow::Result<()> {
    writeln!(output, "Seed: {}", report.seed)?;
    writeln!(output, "Players: {}", report.config.players())?;
    for role in Role::ALL {
        writeln!(output, "  {role}: {}", report.counts.get(role))?;
    }
    writeln!(output, "Rounds: {}", report.max_rounds)?;
    if let Some(roles) = report.roles {
        writeln!(output)?;
        for (slot, role) in roles.iter().enumerate() {
            writeln!(output, "Player {}: {role}", slot + 1)?;
        }
    }
    output.flush()?;
    Ok(())
}
