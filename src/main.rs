// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

mod api;
mod config;
mod currencies;
mod error;
mod exchange_rates;
mod log;
mod models;
mod sync;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::api::ReqwestTransport;
use crate::config::{Config, DEFAULT_ENV_FILE};

/// Sync currencies and exchange rates from openexchangerates.org into econumo.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Fetch rates for this date instead of the latest ones (e.g. 2023-09-14)
    #[arg(short, long, value_parser = config::parse_date)]
    date: Option<NaiveDate>,

    /// Settings file to seed the environment from
    #[arg(short, long, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    log::init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", report_failure(&e));
            ExitCode::FAILURE
        }
    }
}

/// Logs the whole error chain and returns the line printed to stderr.
fn report_failure(e: &anyhow::Error) -> String {
    let chain = format!("{:#}", e);
    tracing::error!(error = %chain, "Sync failed");
    format!("Error: {}", chain)
}

async fn run(cli: Cli) -> Result<()> {
    config::load_env_file(&cli.env_file);

    let config = Config::from_env()?.with_date(cli.date);

    let transport = ReqwestTransport::new();
    let summary = sync::run(&config, &transport).await?;
    println!(
        "Data sent to econumo API successfully ({} currencies, {} rates for {} at {})",
        summary.currencies, summary.rates, summary.base, summary.timestamp
    );
    Ok(())
}
