//! Error types for cover lookups.
//!
//! Cover errors never leave the pipeline: they are logged and the next
//! candidate (provider or ISBN) is tried.

use thiserror::Error;

/// Why a single cover candidate failed.
#[derive(Debug, Error)]
pub enum CoverError {
    /// The HTTP client for a provider could not be constructed.
    #[error("cannot build HTTP client for {provider}: {source}")]
    ClientBuild {
        /// Provider name.
        provider: String,
        /// The underlying client construction error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level failure, including timeouts.
    #[error("{provider}: network error requesting {url}: {source}")]
    Network {
        /// Provider name.
        provider: String,
        /// The request URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status.
    #[error("{provider}: HTTP {status} from {url}")]
    HttpStatus {
        /// Provider name.
        provider: String,
        /// The request URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The provider answered but had no cover for this ISBN.
    #[error("{provider}: no cover for ISBN {isbn}: {reason}")]
    NotFound {
        /// Provider name.
        provider: String,
        /// The ISBN looked up.
        isbn: String,
        /// What was missing.
        reason: String,
    },

    /// The image bytes could not be decoded or re-encoded.
    #[error("cannot decode cover image: {source}")]
    Image {
        /// The underlying image error.
        #[from]
        source: image::ImageError,
    },

    /// A local default cover file could not be read.
    #[error("cannot read default cover {path}: {source}")]
    Io {
        /// The file path.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl CoverError {
    /// Creates a network error.
    pub fn network(provider: &str, url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            provider: provider.to_string(),
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(provider: &str, url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            provider: provider.to_string(),
            url: url.into(),
            status,
        }
    }

    /// Creates a `NotFound` error.
    pub fn not_found(provider: &str, isbn: &str, reason: impl Into<String>) -> Self {
        Self::NotFound {
            provider: provider.to_string(),
            isbn: isbn.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true for timeouts, which providers report at `warn`.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { source, .. } if source.is_timeout())
    }
}
