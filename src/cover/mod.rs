//! Cover resolution pipeline.
//!
//! Every title record ends up with exactly one [`CoverImage`]. For each of
//! the record's ISBNs, in order, the registered [`CoverProvider`]s are tried
//! in priority order; the first provider to return decodable image bytes
//! wins. When no candidate succeeds (or the record has no ISBNs) the run's
//! default cover is used.
//!
//! # Architecture
//!
//! - [`CoverProvider`] - Async trait implemented by each image-lookup service
//! - [`CoverChain`] - Priority-ordered providers with the first-success-wins loop
//! - [`BookcoverProvider`] - Primary lookup (bookcover API, lookup by path)
//! - [`GoogleBooksProvider`] - Secondary lookup (Google Books volume search)
//! - [`CoverPipeline`] - Chain plus default cover, one record or many
//! - [`load_default_cover`] - Placeholder URL, local file, then bundled asset

mod bookcover;
mod chain;
mod default;
mod error;
mod fetch;
mod google_books;
mod normalize;
mod pipeline;

pub use bookcover::BookcoverProvider;
pub use chain::CoverChain;
pub use default::{BUNDLED_DEFAULT_COVER, bundled_default_cover, load_default_cover};
pub use error::CoverError;
pub use google_books::GoogleBooksProvider;
pub use normalize::{TargetSize, normalize_cover};
pub use pipeline::CoverPipeline;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::config::HttpTimeouts;

/// Default base URL of the primary lookup service.
pub const DEFAULT_PRIMARY_LOOKUP_URL: &str = "http://bookcover.longitood.com";

/// Default base URL of the secondary lookup service.
pub const DEFAULT_SECONDARY_LOOKUP_URL: &str = "https://www.googleapis.com";

const DEFAULT_SECONDARY_TIMEOUT_SECS: u64 = 5;

/// Settings for cover lookup, fallback and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverSettings {
    /// Whether the primary lookup runs at all. Some deployments use only
    /// the secondary service.
    pub use_primary: bool,
    /// Base URL of the primary lookup service.
    pub primary_url: String,
    /// Base URL of the secondary lookup service.
    pub secondary_url: String,
    /// Whole-request timeout for the secondary lookup and its image fetch.
    pub secondary_timeout: Duration,
    /// Size every cover is normalized to.
    pub size: TargetSize,
    /// Remote placeholder tried first when no cover is found.
    pub placeholder_url: Option<String>,
    /// Local image tried after the placeholder URL.
    pub default_cover_path: Option<PathBuf>,
    /// Records resolved at once; 1 keeps requests strictly sequential.
    pub concurrency: usize,
}

impl Default for CoverSettings {
    fn default() -> Self {
        Self {
            use_primary: true,
            primary_url: DEFAULT_PRIMARY_LOOKUP_URL.to_string(),
            secondary_url: DEFAULT_SECONDARY_LOOKUP_URL.to_string(),
            secondary_timeout: Duration::from_secs(DEFAULT_SECONDARY_TIMEOUT_SECS),
            size: TargetSize::default(),
            placeholder_url: None,
            default_cover_path: None,
            concurrency: 1,
        }
    }
}

/// Builds the provider chain for the given settings.
///
/// The primary provider is registered only when enabled; a provider whose
/// client cannot be built is skipped with a warning, leaving the default
/// cover as the worst case.
#[must_use]
pub fn build_default_cover_chain(settings: &CoverSettings, timeouts: HttpTimeouts) -> CoverChain {
    let mut chain = CoverChain::new();

    if settings.use_primary {
        match BookcoverProvider::with_base_url(&settings.primary_url, timeouts) {
            Ok(provider) => chain.register(Box::new(provider)),
            Err(error) => warn!(
                error = %error,
                "Primary cover lookup unavailable; continuing with secondary lookup"
            ),
        }
    }

    let secondary_timeouts = timeouts.with_request(settings.secondary_timeout);
    match GoogleBooksProvider::with_base_url(&settings.secondary_url, secondary_timeouts) {
        Ok(provider) => chain.register(Box::new(provider)),
        Err(error) => warn!(
            error = %error,
            "Secondary cover lookup unavailable; covers will use the default image"
        ),
    }

    chain
}

/// Priority level for provider ordering within one ISBN.
///
/// Derives `Ord` so that `Primary < Secondary` when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProviderPriority {
    /// Tried first for every ISBN.
    Primary = 0,
    /// Tried when the primary lookup fails for the same ISBN.
    Secondary = 1,
}

/// Raw image bytes as downloaded by a provider.
#[derive(Debug, Clone)]
pub struct FetchedCover {
    /// Undecoded image bytes.
    pub bytes: Vec<u8>,
    /// Where the bytes were fetched from.
    pub url: String,
}

/// Result of a single provider lookup.
#[derive(Debug)]
pub enum LookupStep {
    /// Image bytes were downloaded.
    Found(FetchedCover),
    /// The provider answered but had nothing usable.
    NotFound(CoverError),
}

/// Trait that all cover providers implement.
///
/// Uses `async_trait` so the chain can hold `Box<dyn CoverProvider>`.
#[async_trait]
pub trait CoverProvider: Send + Sync {
    /// Provider name used in logs and [`CoverSource`].
    fn name(&self) -> &str;

    /// Ordering within a single ISBN.
    fn priority(&self) -> ProviderPriority;

    /// Looks up and downloads a cover for one ISBN.
    ///
    /// `Err` is reserved for transport-level failures; an answer without a
    /// cover is `Ok(LookupStep::NotFound(..))`.
    async fn lookup(&self, isbn: &str) -> Result<LookupStep, CoverError>;
}

/// Where a resolved cover came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverSource {
    /// A provider lookup succeeded for this ISBN.
    Provider {
        /// Provider name.
        provider: String,
        /// The ISBN that matched.
        isbn: String,
    },
    /// The run's default cover.
    Default,
}

/// A normalized cover ready for rendering (PNG bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    bytes: Arc<[u8]>,
    size: TargetSize,
    source: CoverSource,
}

impl CoverImage {
    /// Wraps normalized PNG bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Arc<[u8]>>, size: TargetSize, source: CoverSource) -> Self {
        Self {
            bytes: bytes.into(),
            size,
            source,
        }
    }

    /// Encoded PNG bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Pixel size.
    #[must_use]
    pub fn size(&self) -> TargetSize {
        self.size
    }

    /// Where the cover came from.
    #[must_use]
    pub fn source(&self) -> &CoverSource {
        &self.source
    }

    /// True when this is the run's default cover.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.source == CoverSource::Default
    }
}
