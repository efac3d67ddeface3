//! Error types for the token exchange.

use thiserror::Error;

/// Errors that can occur while obtaining an access token.
///
/// Every variant is fatal for the run: the token exchange is attempted once
/// and never retried.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The HTTP client could not be constructed.
    #[error("cannot build token client: {source}")]
    ClientBuild {
        /// The underlying client construction error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level failure reaching the token endpoint.
    #[error("cannot reach token endpoint {url}: {source}\n  Suggestion: Check your network connection")]
    Network {
        /// The token endpoint URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint refused the client credentials (HTTP 400, 401 or 403).
    #[error(
        "token endpoint {url} rejected the client credentials (HTTP {status})\n  Suggestion: Check client_id and client_secret"
    )]
    Rejected {
        /// The token endpoint URL.
        url: String,
        /// The HTTP status code returned.
        status: u16,
    },

    /// Any other non-success status.
    #[error("token endpoint {url} returned HTTP {status}")]
    HttpStatus {
        /// The token endpoint URL.
        url: String,
        /// The HTTP status code returned.
        status: u16,
    },

    /// The endpoint answered 2xx but the body carried no usable token.
    #[error("unexpected token response from {url}: {reason}")]
    MalformedResponse {
        /// The token endpoint URL.
        url: String,
        /// What was wrong with the body.
        reason: String,
    },
}

impl AuthError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Maps a non-success status to `Rejected` or `HttpStatus`.
    pub fn from_status(url: impl Into<String>, status: u16) -> Self {
        let url = url.into();
        match status {
            400 | 401 | 403 => Self::Rejected { url, status },
            _ => Self::HttpStatus { url, status },
        }
    }

    /// Creates a `MalformedResponse` error.
    pub fn malformed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status when the endpoint answered with one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
