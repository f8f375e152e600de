use std::io;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sweeper_core::GameConfig;

use crate::command::MAX_GRID_SIZE;
use crate::session::Session;

mod command;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Find every hidden hazard without stepping on one", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Number of rows and columns
    #[arg(short = 'n', long, default_value_t = GameConfig::DEFAULT.grid_size,
          value_parser = clap::value_parser!(u8).range(1..=i64::from(MAX_GRID_SIZE)))]
    size: u8,

    /// Number of hidden hazards
    #[arg(short = 'm', long, default_value_t = GameConfig::DEFAULT.hazards)]
    hazards: u16,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("seed: {}", seed);

    let config = GameConfig::new(args.size, args.hazards);
    log::debug!("config: {:?}", config);

    let mut session = Session::new(config, SmallRng::seed_from_u64(seed));
    session.run(io::stdin().lock(), io::stdout().lock())?;
    log::info!("finished after {}s: {:?}", session.elapsed_secs(), session.board().status());
    Ok(())
}
