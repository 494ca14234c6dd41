mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use support_console::{Console, ConsoleConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = ConsoleConfig::from_env().context("failed to load console configuration")?;
    if cli.instant {
        config = config.latency_scale(0.0);
    }
    if let Some(dir) = &cli.fixtures {
        config = config.fixtures_dir(dir);
    }

    let console = Console::open(config).context("failed to seed console store")?;
    cli::commands::run(cli, &console).await
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
