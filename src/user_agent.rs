//! Shared User-Agent string for every outbound request.
//!
//! Token, catalog and cover traffic all identify the tool the same way so
//! providers see one consistent client.

/// Product token sent ahead of the version.
const PRODUCT: &str = "newshelf";

/// Default User-Agent for all HTTP clients built by this crate.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{PRODUCT}/{version} (library-display; reqwest)")
}
