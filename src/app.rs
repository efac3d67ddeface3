//! One end-to-end run: token, catalog query, covers, tiles.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::auth::{AuthError, Credentials, TokenProvider};
use crate::catalog::{CatalogClient, CatalogError};
use crate::config::{ConfigError, Settings};
use crate::cover::{CoverPipeline, build_default_cover_chain, load_default_cover};
use crate::render::{DisplayTile, Page, PageRenderer};

/// Fatal errors that end a run.
///
/// Cover lookup failures never appear here; they are absorbed per record.
#[derive(Debug, Error)]
pub enum RunError {
    /// Settings failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The token exchange failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The catalog query failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// One tile per shown record, in catalog order.
    Tiles(Vec<DisplayTile>),
    /// The catalog returned no records. No cover lookups were made.
    NoNewTitles,
}

impl RunOutcome {
    /// Number of tiles produced.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        match self {
            Self::Tiles(tiles) => tiles.len(),
            Self::NoNewTitles => 0,
        }
    }
}

impl From<RunOutcome> for Page {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Tiles(tiles) => Page::Grid(tiles),
            RunOutcome::NoNewTitles => Page::NoNewTitles,
        }
    }
}

/// The page to show for a finished run, successful or not.
#[must_use]
pub fn page_for(result: Result<RunOutcome, RunError>) -> Page {
    match result {
        Ok(outcome) => outcome.into(),
        Err(err) => Page::Error(err.to_string()),
    }
}

/// The renderer matching `settings`.
#[must_use]
pub fn renderer_for(settings: &Settings) -> PageRenderer {
    PageRenderer::new(settings.grid, settings.page_title.clone())
}

/// Runs the pipeline once, using `today` as the end of the lookback window.
///
/// Records beyond the grid's capacity are dropped before any cover lookup.
///
/// # Errors
///
/// Returns [`RunError`] for invalid settings or a failed token exchange or
/// catalog query. A failed token exchange means no catalog request is sent.
#[tracing::instrument(skip_all, fields(today = %today, client_id = credentials.client_id()))]
pub async fn run(
    settings: &Settings,
    credentials: Credentials,
    today: NaiveDate,
) -> Result<RunOutcome, RunError> {
    settings.validate()?;

    let token = TokenProvider::new(
        credentials,
        settings.token_url.clone(),
        settings.scope.clone(),
        settings.timeouts,
    )?
    .fetch_token()
    .await?;

    let mut records = CatalogClient::new(settings.catalog.clone(), settings.timeouts)?
        .fetch_new_titles(&token, today)
        .await?;

    if records.is_empty() {
        info!("No new titles in lookback window");
        return Ok(RunOutcome::NoNewTitles);
    }

    let capacity = settings.grid.capacity();
    if records.len() > capacity {
        info!(
            records = records.len(),
            capacity, "More records than grid cells; extra records dropped"
        );
        records.truncate(capacity);
    }

    let default_cover = load_default_cover(&settings.covers, settings.timeouts).await;
    let chain = build_default_cover_chain(&settings.covers, settings.timeouts);
    let pipeline = CoverPipeline::new(chain, default_cover, settings.covers.size)
        .with_concurrency(settings.covers.concurrency);

    let covers = pipeline.resolve_all(&records).await;
    let tiles: Vec<DisplayTile> = records
        .iter()
        .zip(covers)
        .map(|(record, cover)| DisplayTile::new(record, cover, &settings.link_template))
        .collect();

    info!(tiles = tiles.len(), "Run complete");
    Ok(RunOutcome::Tiles(tiles))
}
