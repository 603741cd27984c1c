use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use spotctl::cli::{self, Args};
use spotctl::Spotify;

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug {
        "spotctl=debug"
    } else {
        "spotctl=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if args.debug {
        tracing::debug!(platform = std::env::consts::OS, "platform detected");
    }

    let spotify = Spotify::new().context("no automation backend for this platform")?;

    cli::run(args.command, &spotify)
}
