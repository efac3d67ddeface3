//! New-titles catalog query.
//!
//! [`CatalogClient`] issues one authenticated GET to the provider's
//! new-titles endpoint and yields the brief records in response order. A
//! response without a `briefRecords` array is an empty result, not an error.

mod error;
mod record;

pub use error::CatalogError;
pub use record::{MISSING_TITLE, TitleRecord};

use chrono::{Days, NaiveDate};
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, info, warn};
use url::Url;

use crate::auth::AccessToken;
use crate::config::HttpTimeouts;
use crate::http_client::build_http_client;

use record::NewTitlesEnvelope;

/// Default new-titles endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://discovery.api.oclc.org/new-titles";

/// Format of the `startDate` parameter.
const START_DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed query parameters for the new-titles request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Endpoint URL.
    pub url: String,
    /// Maximum number of records requested.
    pub limit: u32,
    /// Size of the lookback window in days; `startDate` is today minus this.
    pub lookback_days: u32,
    /// Holding-library symbols; each becomes one `heldBySymbol` parameter.
    pub held_by_symbols: Vec<String>,
    /// Item-type filter.
    pub item_type: String,
    /// Sort order.
    pub order_by: String,
    /// Optional subject filter.
    pub topic: Option<String>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
            limit: 48,
            lookback_days: 30,
            held_by_symbols: vec!["U@M".to_string()],
            item_type: "book".to_string(),
            order_by: "DateAddedDsc".to_string(),
            topic: None,
        }
    }
}

impl CatalogQuery {
    /// Inclusive lower bound of the lookback window.
    #[must_use]
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(u64::from(self.lookback_days)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Query parameters in request order.
    #[must_use]
    pub fn query_pairs(&self, today: NaiveDate) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            (
                "startDate",
                self.start_date(today).format(START_DATE_FORMAT).to_string(),
            ),
        ];
        pairs.extend(
            self.held_by_symbols
                .iter()
                .map(|symbol| ("heldBySymbol", symbol.clone())),
        );
        pairs.push(("itemType", self.item_type.clone()));
        pairs.push(("orderBy", self.order_by.clone()));
        if let Some(topic) = &self.topic {
            pairs.push(("topic", topic.clone()));
        }
        pairs
    }

    /// Full request URL with the query string applied.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] when the endpoint does not parse.
    pub fn request_url(&self, today: NaiveDate) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&self.url).map_err(|e| CatalogError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .extend_pairs(self.query_pairs(today).iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }
}

/// Client for the new-titles endpoint.
pub struct CatalogClient {
    client: Client,
    query: CatalogQuery,
}

impl CatalogClient {
    /// Creates a client for the given query.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ClientBuild`] if HTTP client construction fails.
    pub fn new(query: CatalogQuery, timeouts: HttpTimeouts) -> Result<Self, CatalogError> {
        let client = build_http_client("catalog", timeouts)
            .map_err(|source| CatalogError::ClientBuild { source })?;
        Ok(Self { client, query })
    }

    /// Fetches titles added in the lookback window ending at `today`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport failure, non-success status, or
    /// an undecodable body.
    #[tracing::instrument(skip_all, fields(catalog_url = %self.query.url, today = %today))]
    pub async fn fetch_new_titles(
        &self,
        token: &AccessToken,
        today: NaiveDate,
    ) -> Result<Vec<TitleRecord>, CatalogError> {
        let url = self.query.request_url(today)?;
        debug!(request_url = %url, "Querying new titles");

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(token.secret())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::network(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::http_status(url.as_str(), status.as_u16()));
        }

        let envelope = response
            .json::<NewTitlesEnvelope>()
            .await
            .map_err(|e| CatalogError::decode(url.as_str(), e.to_string()))?;

        if envelope.brief_records.is_none() {
            info!("No briefRecords in catalog response");
        }
        let reported = envelope.number_of_records;
        let (records, skipped) = envelope.into_records();
        if skipped > 0 {
            warn!(skipped, "Skipped malformed brief records");
        }
        info!(records = records.len(), reported = ?reported, "New titles received");
        Ok(records)
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}
