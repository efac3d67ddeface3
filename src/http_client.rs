//! Shared HTTP client construction policy.
//!
//! The token, catalog and cover clients are all built here so they stay
//! consistent on timeouts, user-agent and compression.

use reqwest::Client;
use tracing::debug;

use crate::config::HttpTimeouts;
use crate::user_agent;

/// Builds an HTTP client using the shared project policy.
///
/// `purpose` is only used for logging, never in request headers.
///
/// # Errors
///
/// Returns the underlying [`reqwest::Error`] when the TLS backend or
/// system configuration prevents client construction.
pub(crate) fn build_http_client(
    purpose: &str,
    timeouts: HttpTimeouts,
) -> Result<Client, reqwest::Error> {
    debug!(
        purpose,
        connect_timeout_ms = timeouts.connect.as_millis(),
        request_timeout_ms = timeouts.request.as_millis(),
        "Building HTTP client"
    );
    Client::builder()
        .connect_timeout(timeouts.connect)
        .timeout(timeouts.request)
        .user_agent(user_agent::default_user_agent())
        .gzip(true)
        .build()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_build_http_client_with_default_timeouts() {
        assert!(build_http_client("test", HttpTimeouts::default()).is_ok());
    }

    #[test]
    fn test_build_http_client_with_short_timeouts() {
        let timeouts = HttpTimeouts::new(Duration::from_millis(250), Duration::from_secs(1));
        assert!(build_http_client("short", timeouts).is_ok());
    }
}
