mod commands;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    cli.run()
}

/// Log to stderr, filtered by `TESSERA_LOG` or the `-v` count.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "tessera=debug,tessera_pipeline=debug",
        _ => "tessera=trace,tessera_pipeline=trace,tessera_document=trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("TESSERA_LOG").unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}
