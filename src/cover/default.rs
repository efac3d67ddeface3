//! The run's default cover.
//!
//! Loaded once per run. Sources are tried in order: the configured
//! placeholder URL, the configured local file, then the asset compiled into
//! the binary. The bundled asset cannot go missing, so loading always
//! produces a cover.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::HttpTimeouts;
use crate::http_client::build_http_client;

use super::fetch::fetch_cover_bytes;
use super::normalize::{TargetSize, normalize_cover};
use super::{CoverError, CoverImage, CoverSettings, CoverSource, LookupStep};

/// Default cover compiled into the binary.
pub const BUNDLED_DEFAULT_COVER: &[u8] = include_bytes!("../../assets/default-cover.png");

/// Loads and normalizes the default cover for this run.
#[tracing::instrument(skip_all, fields(size = ?settings.size))]
pub async fn load_default_cover(settings: &CoverSettings, timeouts: HttpTimeouts) -> CoverImage {
    if let Some(url) = &settings.placeholder_url {
        match fetch_placeholder(url, settings.size, timeouts).await {
            Ok(png) => {
                info!(placeholder_url = %url, "Using remote placeholder as default cover");
                return CoverImage::new(png, settings.size, CoverSource::Default);
            }
            Err(err) => warn!(placeholder_url = %url, error = %err, "Placeholder cover unavailable"),
        }
    }

    if let Some(path) = &settings.default_cover_path {
        match read_local(path, settings.size).await {
            Ok(png) => {
                info!(path = %path.display(), "Using local file as default cover");
                return CoverImage::new(png, settings.size, CoverSource::Default);
            }
            Err(err) => warn!(path = %path.display(), error = %err, "Local default cover unusable"),
        }
    }

    debug!("Using bundled default cover");
    bundled_default_cover(settings.size)
}

/// The bundled asset normalized to `size`.
///
/// If normalization ever fails the raw bundled PNG is used as-is.
#[must_use]
pub fn bundled_default_cover(size: TargetSize) -> CoverImage {
    let bytes = normalize_cover(BUNDLED_DEFAULT_COVER, size).unwrap_or_else(|err| {
        warn!(error = %err, "Bundled default cover could not be resized");
        BUNDLED_DEFAULT_COVER.to_vec()
    });
    CoverImage::new(bytes, size, CoverSource::Default)
}

async fn fetch_placeholder(
    url: &str,
    size: TargetSize,
    timeouts: HttpTimeouts,
) -> Result<Vec<u8>, CoverError> {
    let client = build_http_client("placeholder", timeouts).map_err(|source| {
        CoverError::ClientBuild {
            provider: "placeholder".to_string(),
            source,
        }
    })?;
    match fetch_cover_bytes(&client, "placeholder", "-", url).await? {
        LookupStep::Found(fetched) => normalize_cover(&fetched.bytes, size),
        LookupStep::NotFound(err) => Err(err),
    }
}

async fn read_local(path: &Path, size: TargetSize) -> Result<Vec<u8>, CoverError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CoverError::Io {
        path: path.display().to_string(),
        source,
    })?;
    normalize_cover(&bytes, size)
}
