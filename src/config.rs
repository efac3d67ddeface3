//! Run settings for a single newshelf invocation.
//!
//! Every deployment-specific constant (endpoints, fetch limit, grid size,
//! cover size, whether the primary lookup runs) lives in [`Settings`] and is
//! passed explicitly into the components that need it.

use std::time::Duration;

use thiserror::Error;

use crate::catalog::CatalogQuery;
use crate::cover::CoverSettings;
use crate::render::GridLayout;

/// Default OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://oauth.oclc.org/token";

/// Default OAuth2 scope requested for the new-titles API.
pub const DEFAULT_SCOPE: &str = "new-titles";

/// Default catalog link template; `{oclc}` is replaced by the OCLC number.
pub const DEFAULT_LINK_TEMPLATE: &str = "https://mmu.on.worldcat.org/oclc/{oclc}";

/// Placeholder substituted into [`Settings::link_template`].
pub const LINK_PLACEHOLDER: &str = "{oclc}";

/// Default heading shown on the rendered page.
pub const DEFAULT_PAGE_TITLE: &str = "New Books";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connect and whole-request timeouts for one HTTP client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    /// Maximum time to establish a connection.
    pub connect: Duration,
    /// Maximum time for the whole request, body included.
    pub request: Duration,
}

impl HttpTimeouts {
    /// Creates a timeout pair.
    #[must_use]
    pub fn new(connect: Duration, request: Duration) -> Self {
        Self { connect, request }
    }

    /// Returns a copy with the request timeout replaced.
    #[must_use]
    pub fn with_request(self, request: Duration) -> Self {
        Self { request, ..self }
    }
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Everything a run needs apart from the client credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// OAuth2 token endpoint.
    pub token_url: String,
    /// OAuth2 scope requested with the client-credentials grant.
    pub scope: String,
    /// New-titles query parameters.
    pub catalog: CatalogQuery,
    /// Grid dimensions for the rendered page.
    pub grid: GridLayout,
    /// Cover lookup and normalization settings.
    pub covers: CoverSettings,
    /// Catalog link template containing [`LINK_PLACEHOLDER`].
    pub link_template: String,
    /// Heading shown on the rendered page.
    pub page_title: String,
    /// Timeouts for the token, catalog and primary cover clients.
    pub timeouts: HttpTimeouts,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            catalog: CatalogQuery::default(),
            grid: GridLayout::default(),
            covers: CoverSettings::default(),
            link_template: DEFAULT_LINK_TEMPLATE.to_string(),
            page_title: DEFAULT_PAGE_TITLE.to_string(),
            timeouts: HttpTimeouts::default(),
        }
    }
}

impl Settings {
    /// Checks the settings for values that would make a run meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_http_url("token_url", &self.token_url)?;
        require_http_url("catalog_url", &self.catalog.url)?;
        require_http_url("primary_lookup_url", &self.covers.primary_url)?;
        require_http_url("secondary_lookup_url", &self.covers.secondary_url)?;
        if let Some(placeholder) = &self.covers.placeholder_url {
            require_http_url("placeholder_url", placeholder)?;
        }

        if self.scope.trim().is_empty() {
            return Err(ConfigError::invalid("scope", "must not be empty"));
        }
        if self.catalog.held_by_symbols.is_empty() {
            return Err(ConfigError::invalid(
                "held_by_symbol",
                "at least one holding library symbol is required",
            ));
        }
        if !self.link_template.contains(LINK_PLACEHOLDER) {
            return Err(ConfigError::invalid(
                "link_template",
                &format!("must contain the {LINK_PLACEHOLDER} placeholder"),
            ));
        }

        require_range("limit", u64::from(self.catalog.limit), 1, 50)?;
        require_range("lookback_days", u64::from(self.catalog.lookback_days), 1, 365)?;
        require_range("rows", u64::from(self.grid.rows), 1, 100)?;
        require_range("columns", u64::from(self.grid.columns), 1, 100)?;
        require_range("cover_width", u64::from(self.covers.size.width), 1, 2000)?;
        require_range("cover_height", u64::from(self.covers.size.height), 1, 2000)?;
        require_range(
            "cover_concurrency",
            u64::try_from(self.covers.concurrency).unwrap_or(u64::MAX),
            1,
            16,
        )?;
        Ok(())
    }
}

fn require_http_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(ConfigError::invalid(
            field,
            &format!("unsupported URL scheme '{}'", parsed.scheme()),
        )),
        Err(error) => Err(ConfigError::invalid(field, &format!("invalid URL: {error}"))),
    }
}

fn require_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Errors raised by [`Settings::validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A field holds an unusable value.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Offending setting name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A numeric field is outside its accepted range.
    #[error("invalid value for `{field}`: {value}. Expected range: {min}..={max}")]
    OutOfRange {
        /// Offending setting name.
        field: &'static str,
        /// Value supplied.
        value: u64,
        /// Inclusive lower bound.
        min: u64,
        /// Inclusive upper bound.
        max: u64,
    },
}

impl ConfigError {
    /// Creates an `Invalid` error.
    #[must_use]
    pub fn invalid(field: &'static str, reason: &str) -> Self {
        Self::Invalid {
            field,
            reason: reason.to_string(),
        }
    }
}
