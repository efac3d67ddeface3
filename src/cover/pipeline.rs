//! One cover per title record.

use futures_util::StreamExt;
use futures_util::stream;
use tracing::{debug, info};

use crate::catalog::TitleRecord;

use super::normalize::TargetSize;
use super::{CoverChain, CoverImage};

/// Resolves covers for title records, falling back to the default cover.
///
/// Built once per run; holds no state between records beyond the
/// preloaded default cover.
#[derive(Debug)]
pub struct CoverPipeline {
    chain: CoverChain,
    default_cover: CoverImage,
    size: TargetSize,
    concurrency: usize,
}

impl CoverPipeline {
    /// Creates a sequential pipeline.
    #[must_use]
    pub fn new(chain: CoverChain, default_cover: CoverImage, size: TargetSize) -> Self {
        Self {
            chain,
            default_cover,
            size,
            concurrency: 1,
        }
    }

    /// Resolves up to `concurrency` records at once. Output order is
    /// unaffected.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// The cover used whenever no provider succeeds.
    #[must_use]
    pub fn default_cover(&self) -> &CoverImage {
        &self.default_cover
    }

    /// Resolves exactly one cover for `record`.
    #[tracing::instrument(skip_all, fields(oclc = record.oclc_number()))]
    pub async fn resolve(&self, record: &TitleRecord) -> CoverImage {
        let isbns: Vec<&str> = record.candidate_isbns().collect();
        if isbns.is_empty() {
            debug!("Record has no ISBNs, using default cover");
            return self.default_cover.clone();
        }

        match self.chain.resolve(&isbns, self.size).await {
            Some(cover) => cover,
            None => {
                debug!(isbns = isbns.len(), "No provider had a cover, using default");
                self.default_cover.clone()
            }
        }
    }

    /// Resolves covers for all records, returned in input order.
    pub async fn resolve_all(&self, records: &[TitleRecord]) -> Vec<CoverImage> {
        let covers: Vec<CoverImage> = stream::iter(records.iter().map(|record| self.resolve(record)))
            .buffered(self.concurrency)
            .collect()
            .await;

        let defaults = covers.iter().filter(|cover| cover.is_default()).count();
        info!(
            records = records.len(),
            found = covers.len() - defaults,
            defaults,
            "Covers resolved"
        );
        covers
    }
}
