// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries JSON results only
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = cli::Cli::parse();
    let config = cli.driver_config()?;
    tracing::info!(
        host = %config.credentials.host,
        database = %config.credentials.database,
        "Starting ch-sqltools"
    );

    commands::run(config, cli.command).await
}
