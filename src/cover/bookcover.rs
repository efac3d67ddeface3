//! Primary cover lookup via the bookcover API.
//!
//! `GET {base}/bookcover/{isbn}` answers 200 with `{"url": "<image url>"}`
//! when a cover is known. The image is then downloaded from that URL.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::HttpTimeouts;
use crate::http_client::build_http_client;

use super::fetch::fetch_cover_bytes;
use super::{CoverError, CoverProvider, LookupStep, ProviderPriority};

const NAME: &str = "bookcover";

#[derive(Debug, Deserialize)]
struct BookcoverResponse {
    url: Option<String>,
}

/// Looks covers up by ISBN path segment.
pub struct BookcoverProvider {
    client: Client,
    base_url: String,
}

impl BookcoverProvider {
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

impl std::fmt::Debug for BookcoverProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookcoverProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CoverProvider for BookcoverProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn priority(&self) -> ProviderPriority {
        ProviderPriority::Primary
    }

    #[tracing::instrument(skip(self), fields(provider = NAME))]
    async fn lookup(&self, isbn: &str) -> Result<LookupStep, CoverError> {
        let url = format!("{}/bookcover/{}", self.base_url, urlencoding::encode(isbn));
        debug!(api_url = %url, "Calling bookcover API");

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

        let body = match response.json::<BookcoverResponse>().await {
            Ok(parsed) => parsed,
            Err(e) => {
                return Ok(LookupStep::NotFound(CoverError::not_found(
                    NAME,
                    isbn,
                    format!("unexpected response body: {e}"),
                )));
            }
        };

        match body.url.filter(|u| !u.trim().is_empty()) {
            Some(cover_url) => fetch_cover_bytes(&self.client, NAME, isbn, &cover_url).await,
            None => Ok(LookupStep::NotFound(CoverError::not_found(
                NAME,
                isbn,
                "response has no url field",
            ))),
        }
    }
}
