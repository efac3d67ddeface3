//! Error types for the new-titles query.

use thiserror::Error;

/// Errors that abort the catalog query. None of them are retried.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The HTTP client could not be constructed.
    #[error("cannot build catalog client: {source}")]
    ClientBuild {
        /// The underlying client construction error.
        #[source]
        source: reqwest::Error,
    },

    /// The configured endpoint is not a valid URL.
    #[error("invalid catalog URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Network-level failure reaching the catalog.
    #[error("cannot reach catalog {url}: {source}\n  Suggestion: Check your network connection")]
    Network {
        /// The request URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The catalog answered with a non-success status.
    #[error("catalog query {url} failed with HTTP {status}")]
    HttpStatus {
        /// The request URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The body was not the expected JSON envelope.
    #[error("unexpected catalog response from {url}: {reason}")]
    Decode {
        /// The request URL.
        url: String,
        /// Decoder message.
        reason: String,
    },
}

impl CatalogError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a decode error.
    pub fn decode(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message() {
        let err = CatalogError::http_status("https://catalog.example/new-titles", 503);
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("catalog.example"));
    }

    #[test]
    fn test_decode_message_contains_reason() {
        let err = CatalogError::decode("https://catalog.example", "expected value at line 1");
        assert!(err.to_string().contains("expected value"));
    }
}
