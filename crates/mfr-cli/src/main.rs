use anyhow::Result;
use clap::Parser;

use mfr_core::listing::RedditClient;
use mfr_core::transfer::CurlTransfer;
use mfr_core::{config, logging, run};

mod cli;

use crate::cli::Cli;

fn main() {
    if let Err(err) = run_from_args() {
        eprintln!("mfr error: {:#}", err);
        std::process::exit(1);
    }
}

fn run_from_args() -> Result<()> {
    let cli = Cli::parse();

    // A bad level name must fail before any network or filesystem work.
    let level = logging::parse_level(&cli.loglevel)?;
    if logging::init_logging(level).is_err() {
        logging::init_logging_stderr(level);
    }

    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    let target = cli.path.unwrap_or(cfg.target_dir);
    let boards = if cli.subreddits.is_empty() {
        cfg.boards
    } else {
        cli.subreddits
    };

    let mut forum = RedditClient::new(&cfg.user_agent);
    if let (Some(user), Some(passwd)) = (&cli.user, &cli.passwd) {
        forum.login(user, passwd)?;
    }
    let transfer = CurlTransfer::default();

    let stored = run::run(&forum, &transfer, &boards, cfg.listing_limit, &target)?;
    println!("Stored {} new photos", stored);
    Ok(())
}
