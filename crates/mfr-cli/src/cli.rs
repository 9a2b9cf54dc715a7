//! CLI for the MFR photo-frame refresher.

use clap::Parser;
use std::path::PathBuf;

/// One flat invocation, no subcommands: every run is a full refresh pass.
#[derive(Debug, Parser)]
#[command(name = "mfr")]
#[command(about = "MFR: scrape forum images and refresh a photo frame", long_about = None)]
pub struct Cli {
    /// Forum username.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Forum password.
    #[arg(short, long)]
    pub passwd: Option<String>,

    /// Directory to refresh with the downloaded images.
    #[arg(short = 'c', long = "path")]
    pub path: Option<PathBuf>,

    /// Boards to crawl.
    #[arg(short, long = "subreddits", num_args = 1..)]
    pub subreddits: Vec<String>,

    /// Log level: DEBUG, INFO, WARNING, ERROR, CRITICAL.
    #[arg(short, long, default_value = "WARN")]
    pub loglevel: String,
}
