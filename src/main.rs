//! CLI entry point for newshelf.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use newshelf_core::{page_for, renderer_for, run};
use tracing::{debug, error, info};

mod app_config;
mod cli;
mod config_runtime;

use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = config_runtime::resolve_default_log_level(&args);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(output = %args.output.display(), config = ?args.config, "CLI arguments parsed");
    info!("Newshelf starting");

    let file_config = app_config::load_file_config(args.config.as_deref())?;
    let settings = config_runtime::resolve_settings(&args, file_config.as_ref());
    let credentials = config_runtime::resolve_credentials(&args, file_config.as_ref())?;

    let today = chrono::Local::now().date_naive();
    let result = run(&settings, credentials, today).await;
    let failed = match &result {
        Ok(outcome) => {
            info!(tiles = outcome.tile_count(), "Titles rendered");
            false
        }
        Err(err) => {
            error!(error = %err, "Run failed");
            true
        }
    };

    let page = page_for(result);
    let index = renderer_for(&settings)
        .render(&page)
        .write_to(&args.output)
        .await
        .with_context(|| format!("Failed to write page to '{}'", args.output.display()))?;
    println!("{}", index.display());

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
