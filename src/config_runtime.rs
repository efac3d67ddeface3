//! Merges CLI flags, the config file and built-in defaults.
//!
//! Precedence, highest first: CLI flag (or its environment variable), config
//! file value, default.

use std::time::Duration;

use anyhow::{Result, bail};
use newshelf_core::{Credentials, Settings};

use crate::app_config::FileConfig;
use crate::cli::Args;

/// Default tracing level when `RUST_LOG` is unset.
pub(crate) fn resolve_default_log_level(args: &Args) -> &'static str {
    if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Builds run settings from the CLI and the optional config file.
pub(crate) fn resolve_settings(args: &Args, file: Option<&FileConfig>) -> Settings {
    let mut settings = Settings::default();
    if let Some(file) = file {
        apply_file_config(&mut settings, file);
    }
    apply_cli_overrides(&mut settings, args);
    settings
}

fn apply_file_config(settings: &mut Settings, file: &FileConfig) {
    let file = file.clone();

    if let Some(value) = file.token_url {
        settings.token_url = value;
    }
    if let Some(value) = file.scope {
        settings.scope = value;
    }

    let catalog = &mut settings.catalog;
    if let Some(value) = file.catalog_url {
        catalog.url = value;
    }
    if let Some(value) = file.limit {
        catalog.limit = value;
    }
    if let Some(value) = file.lookback_days {
        catalog.lookback_days = value;
    }
    if !file.held_by_symbols.is_empty() {
        catalog.held_by_symbols = file.held_by_symbols;
    }
    if let Some(value) = file.item_type {
        catalog.item_type = value;
    }
    if let Some(value) = file.order_by {
        catalog.order_by = value;
    }
    if file.topic.is_some() {
        catalog.topic = file.topic;
    }

    if let Some(value) = file.rows {
        settings.grid.rows = value;
    }
    if let Some(value) = file.columns {
        settings.grid.columns = value;
    }

    let covers = &mut settings.covers;
    if let Some(value) = file.cover_width {
        covers.size.width = value;
    }
    if let Some(value) = file.cover_height {
        covers.size.height = value;
    }
    if let Some(value) = file.use_primary_lookup {
        covers.use_primary = value;
    }
    if let Some(value) = file.primary_lookup_url {
        covers.primary_url = value;
    }
    if let Some(value) = file.secondary_lookup_url {
        covers.secondary_url = value;
    }
    if file.placeholder_url.is_some() {
        covers.placeholder_url = file.placeholder_url;
    }
    if file.default_cover_path.is_some() {
        covers.default_cover_path = file.default_cover_path;
    }
    if let Some(secs) = file.secondary_timeout_secs {
        covers.secondary_timeout = Duration::from_secs(secs);
    }
    if let Some(value) = file.cover_concurrency {
        covers.concurrency = value;
    }

    if let Some(value) = file.link_template {
        settings.link_template = value;
    }
    if let Some(value) = file.page_title {
        settings.page_title = value;
    }
    if let Some(secs) = file.http_connect_timeout_secs {
        settings.timeouts.connect = Duration::from_secs(secs);
    }
    if let Some(secs) = file.http_timeout_secs {
        settings.timeouts.request = Duration::from_secs(secs);
    }
}

fn apply_cli_overrides(settings: &mut Settings, args: &Args) {
    if let Some(limit) = args.limit {
        settings.catalog.limit = limit;
    }
    if let Some(days) = args.lookback_days {
        settings.catalog.lookback_days = days;
    }
    if let Some(rows) = args.rows {
        settings.grid.rows = rows;
    }
    if let Some(columns) = args.columns {
        settings.grid.columns = columns;
    }
    if args.secondary_only {
        settings.covers.use_primary = false;
    }
    if let Some(concurrency) = args.cover_concurrency {
        settings.covers.concurrency = usize::from(concurrency);
    }
}

/// Picks the client id and secret: CLI or environment first, then the
/// config file.
pub(crate) fn resolve_credentials(args: &Args, file: Option<&FileConfig>) -> Result<Credentials> {
    let client_id = args
        .client_id
        .clone()
        .or_else(|| file.and_then(|f| f.client_id.clone()))
        .filter(|value| !value.trim().is_empty());
    let client_secret = args
        .client_secret
        .clone()
        .or_else(|| file.and_then(|f| f.client_secret.clone()))
        .filter(|value| !value.trim().is_empty());

    match (client_id, client_secret) {
        (Some(id), Some(secret)) => Ok(Credentials::new(id, secret)),
        (None, _) => bail!(
            "Missing client id: pass --client-id, set NEWSHELF_CLIENT_ID, or add client_id to the config file"
        ),
        (_, None) => bail!(
            "Missing client secret: pass --client-secret, set NEWSHELF_CLIENT_SECRET, or add client_secret to the config file"
        ),
    }
}
