use std::process::ExitCode;

use anyhow::Context;
use ask_client::{AskClientConfig, HttpAskService, telemetry};
use clap::Parser;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod terminal;

use crate::{cli::Cli, config::AgentConfig};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // A missing .env is fine; everything has a default.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let cfg = AgentConfig::from_env()
        .context("invalid agent configuration")?
        .with_cli(&cli);

    // Dependencies log through the plain layer; the agent crates get the
    // compact library layer at their own level.
    let deps_only = filter::filter_fn(|meta| !telemetry::is_own_target(meta.target()));
    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("warn", cfg.log_level))
        .with(telemetry::layer())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(deps_only),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    let service = HttpAskService::new(AskClientConfig::default())
        .context("failed to build the backend client")?;

    terminal::run(service, &cfg, cli.query).await
}
