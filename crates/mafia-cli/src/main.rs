mod command;
mod logging;
mod schema;
mod util;
mod view;

const DEFAULT_FRAME_RATE: f64 = 30.0;

fn main() -> anyhow::Result<()> {
    command::run()
}
