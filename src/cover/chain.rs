//! Provider chain with the first-success-wins resolution loop.
//!
//! The [`CoverChain`] holds the registered providers and walks them for each
//! candidate ISBN: ISBNs in record order, providers in priority order.

use tracing::{debug, info, warn};

use super::normalize::{TargetSize, normalize_cover};
use super::{CoverImage, CoverProvider, CoverSource, LookupStep};

/// A priority-ordered collection of cover providers.
///
/// Within the same priority level, providers are tried in registration
/// order.
pub struct CoverChain {
    providers: Vec<Box<dyn CoverProvider>>,
}

impl CoverChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Registers a provider with the chain.
    #[tracing::instrument(skip(self, provider), fields(provider_name))]
    pub fn register(&mut self, provider: Box<dyn CoverProvider>) {
        tracing::Span::current().record("provider_name", provider.name());
        debug!(
            name = provider.name(),
            priority = ?provider.priority(),
            "Registering cover provider"
        );
        self.providers.push(provider);
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no providers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Providers in the order they are tried for each ISBN.
    #[must_use]
    pub fn ordered(&self) -> Vec<&dyn CoverProvider> {
        let mut ordered: Vec<&dyn CoverProvider> =
            self.providers.iter().map(AsRef::as_ref).collect();
        ordered.sort_by_key(|p| p.priority());
        ordered
    }

    /// Finds the first cover any provider can deliver for `isbns`.
    ///
    /// Returns `None` when every candidate fails or `isbns` has no usable
    /// entry. Provider failures and undecodable images are logged and
    /// skipped; nothing escapes this loop.
    #[tracing::instrument(skip(self, isbns), fields(isbn_count = isbns.len()))]
    pub async fn resolve(&self, isbns: &[&str], size: TargetSize) -> Option<CoverImage> {
        let providers = self.ordered();

        for isbn in isbns {
            for provider in &providers {
                debug!(provider = provider.name(), isbn, "Trying cover provider");

                match provider.lookup(isbn).await {
                    Ok(LookupStep::Found(fetched)) => match normalize_cover(&fetched.bytes, size) {
                        Ok(png) => {
                            info!(
                                provider = provider.name(),
                                isbn,
                                cover_url = %fetched.url,
                                "Cover found"
                            );
                            return Some(CoverImage::new(
                                png,
                                size,
                                CoverSource::Provider {
                                    provider: provider.name().to_string(),
                                    isbn: (*isbn).to_string(),
                                },
                            ));
                        }
                        Err(err) => {
                            warn!(
                                provider = provider.name(),
                                isbn,
                                cover_url = %fetched.url,
                                error = %err,
                                "Cover image unusable, trying next"
                            );
                        }
                    },
                    Ok(LookupStep::NotFound(err)) => {
                        debug!(
                            provider = provider.name(),
                            isbn,
                            error = %err,
                            "No cover from provider, trying next"
                        );
                    }
                    Err(err) => {
                        warn!(
                            provider = provider.name(),
                            isbn,
                            error = %err,
                            timeout = err.is_timeout(),
                            "Cover provider request failed"
                        );
                    }
                }
            }
        }

        None
    }
}

impl std::fmt::Debug for CoverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("CoverChain")
            .field("provider_count", &self.providers.len())
            .field("providers", &names)
            .finish()
    }
}

impl Default for CoverChain {
    fn default() -> Self {
        Self::new()
    }
}
