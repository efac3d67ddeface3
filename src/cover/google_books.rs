//! Secondary cover lookup via the Google Books volumes search.
//!
//! `GET {base}/books/v1/volumes?q=isbn:{isbn}`; the cover is
//! `items[0].volumeInfo.imageLinks.thumbnail` when present.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::HttpTimeouts;
use crate::http_client::build_http_client;

use super::fetch::fetch_cover_bytes;
use super::{CoverError, CoverProvider, LookupStep, ProviderPriority};

const NAME: &str = "google-books";

// ==================== Volumes API Response Types ====================

#[derive(Debug, Default, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl VolumesResponse {
    /// Thumbnail of the first result only; later results are ignored.
    fn first_thumbnail(&self) -> Option<&str> {
        self.items
            .first()?
            .volume_info
            .as_ref()?
            .image_links
            .as_ref()?
            .thumbnail
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

// ==================== GoogleBooksProvider ====================

/// Looks covers up through a books-metadata search keyed on `isbn:`.
pub struct GoogleBooksProvider {
    client: Client,
    base_url: String,
}

impl GoogleBooksProvider {
    /// Creates a provider rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CoverError::ClientBuild`] if HTTP client construction fails.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeouts: HttpTimeouts,
    ) -> Result<Self, CoverError> {
        let client = build_http_client(NAME, timeouts).map_err(|source| CoverError::ClientBuild {
            provider: NAME.to_string(),
            source,
        })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl std::fmt::Debug for GoogleBooksProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleBooksProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CoverProvider for GoogleBooksProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn priority(&self) -> ProviderPriority {
        ProviderPriority::Secondary
    }

    #[tracing::instrument(skip(self), fields(provider = NAME))]
    async fn lookup(&self, isbn: &str) -> Result<LookupStep, CoverError> {
        let url = format!(
            "{}/books/v1/volumes?q=isbn:{}",
            self.base_url,
            urlencoding::encode(isbn)
        );
        debug!(api_url = %url, "Calling Google Books API");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CoverError::network(NAME, &url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(LookupStep::NotFound(CoverError::http_status(
                NAME,
                &url,
                status.as_u16(),
            )));
        }

        let body = match response.json::<VolumesResponse>().await {
            Ok(parsed) => parsed,
            Err(e) => {
                return Ok(LookupStep::NotFound(CoverError::not_found(
                    NAME,
                    isbn,
                    format!("unexpected response body: {e}"),
                )));
            }
        };

        match body.first_thumbnail() {
            Some(thumbnail) => fetch_cover_bytes(&self.client, NAME, isbn, thumbnail).await,
            None if body.items.is_empty() => Ok(LookupStep::NotFound(CoverError::not_found(
                NAME,
                isbn,
                "no volumes matched",
            ))),
            None => Ok(LookupStep::NotFound(CoverError::not_found(
                NAME,
                isbn,
                "first volume has no thumbnail",
            ))),
        }
    }
}
