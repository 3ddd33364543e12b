use anyhow::Result;
use clap::Parser;

use reefsite::cli::{Cli, Commands};
use reefsite::commands::assess;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Assess(args) => assess::run(&cli, args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "reefsite=info",
        1 => "reefsite=debug",
        _ => "reefsite=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
