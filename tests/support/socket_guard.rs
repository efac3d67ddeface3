//! Lets wiremock-based tests skip in sandboxes that forbid localhost sockets.
//!
//! Shared by the unit tests in `src/` (via `#[path]`) and the integration
//! tests under `tests/`.

use std::net::TcpListener;

use wiremock::MockServer;

const REQUIRE_SOCKETS_ENV: &str = "NEWSHELF_REQUIRE_SOCKET_TESTS";

fn sockets_required() -> bool {
    std::env::var(REQUIRE_SOCKETS_ENV)
        .is_ok_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Starts a mock server, or returns `None` when no localhost socket can be
/// bound. With `NEWSHELF_REQUIRE_SOCKET_TESTS=1` that case fails instead.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return Some(MockServer::start().await);
    }
    assert!(
        !sockets_required(),
        "cannot bind a localhost socket and {REQUIRE_SOCKETS_ENV} is set"
    );
    eprintln!(
        "skipping mock-server test: cannot bind a localhost socket \
         (set {REQUIRE_SOCKETS_ENV}=1 to fail instead)"
    );
    None
}
