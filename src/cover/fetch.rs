//! Image download shared by the providers.

use reqwest::Client;
use tracing::debug;

use super::{CoverError, FetchedCover, LookupStep};

/// Downloads the image at `url`.
///
/// Transport errors are returned as `Err`; a non-success status or an empty
/// body is a `NotFound` step.
pub(crate) async fn fetch_cover_bytes(
    client: &Client,
    provider: &str,
    isbn: &str,
    url: &str,
) -> Result<LookupStep, CoverError> {
    debug!(provider, isbn, cover_url = %url, "Fetching cover image");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CoverError::network(provider, url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Ok(LookupStep::NotFound(CoverError::http_status(
            provider,
            url,
            status.as_u16(),
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| CoverError::network(provider, url, e))?;
    if bytes.is_empty() {
        return Ok(LookupStep::NotFound(CoverError::not_found(
            provider,
            isbn,
            "cover image body was empty",
        )));
    }

    Ok(LookupStep::Found(FetchedCover {
        bytes: bytes.to_vec(),
        url: url.to_string(),
    }))
}
