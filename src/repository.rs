//! Cached lookups over the normalized category grids.
//!
//! Every fetch or parse failure stops here: a category that cannot be read
//! behaves as an empty grid, and a missing rate is `None`. Callers render a
//! "not available" state for either outcome.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::GridCache;
use crate::error::{Result, SdkError};
use crate::models::{CardSummary, Category, NormalizedGrid, Program};
use crate::normalize::normalize;
use crate::source::{GridSource, RawGrid};

// ---------------------------------------------------------------------------
// RateRepository
// ---------------------------------------------------------------------------

/// Wraps a [`GridSource`] with normalization and a TTL cache.
pub struct RateRepository<S> {
    source: S,
    cache: GridCache,
    timeout: Duration,
}

impl<S: GridSource> RateRepository<S> {
    /// Create a repository over `source`.
    ///
    /// Grids are cached for `ttl`; a raw fetch that takes longer than
    /// `timeout` counts as failed.
    pub fn new(source: S, ttl: Duration, timeout: Duration) -> Self {
        Self {
            source,
            cache: GridCache::new(ttl),
            timeout,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &GridCache {
        &self.cache
    }

    /// Return the normalized grid for a category, fetching on a cache miss.
    ///
    /// Failed fetches yield an empty grid and are not cached, so the next
    /// call tries again.
    pub async fn fetch_category_grid(&self, category: Category) -> Arc<NormalizedGrid> {
        if let Some(grid) = self.cache.get(category) {
            debug!(%category, "Using cached data");
            return grid;
        }

        match self.fetch_raw(category).await {
            Ok(raw) => {
                info!(%category, rows = raw.len(), "Fetched sheet data");
                self.cache.insert(category, normalize(&raw))
            }
            Err(e) => {
                warn!(%category, error = %e, "Failed to fetch sheet data");
                Arc::new(NormalizedGrid::empty())
            }
        }
    }

    async fn fetch_raw(&self, category: Category) -> Result<RawGrid> {
        let fetch = self.source.fetch_raw_grid(category.sheet_name());
        tokio::time::timeout(self.timeout, fetch)
            .await
            .map_err(|_| SdkError::Timeout(self.timeout))?
    }

    /// Every card across all categories, deduplicated by bank and name.
    ///
    /// Categories are fetched concurrently and merged in [`Category::ALL`]
    /// order; the first occurrence of a card wins. A category that fails to
    /// load contributes nothing.
    pub async fn all_cards(&self) -> Vec<CardSummary> {
        let (airlines, hotels, cash) = tokio::join!(
            self.fetch_category_grid(Category::Airlines),
            self.fetch_category_grid(Category::Hotels),
            self.fetch_category_grid(Category::Cash),
        );

        let mut seen = HashSet::new();
        let cards: Vec<CardSummary> = [airlines, hotels, cash]
            .iter()
            .flat_map(|grid| grid.cards.iter())
            .filter(|card| seen.insert(card.merge_key()))
            .map(CardSummary::from)
            .collect();

        debug!(count = cards.len(), "Merged credit cards");
        cards
    }

    /// Cards whose name or bank contains `query`, ignoring case.
    ///
    /// A blank query returns every card.
    pub async fn search_cards(&self, query: &str) -> Vec<CardSummary> {
        let cards = self.all_cards().await;
        let query = query.trim();
        if query.is_empty() {
            return cards;
        }
        cards.into_iter().filter(|c| c.matches(query)).collect()
    }

    /// Reward programs for a category, in sheet row order.
    pub async fn programs_for_category(&self, category: Category) -> Vec<Program> {
        self.fetch_category_grid(category).await.programs.clone()
    }

    /// Conversion rate for a card under a program.
    ///
    /// Returns `None` when the program is unknown, or when it defines no
    /// rate for the card.
    pub async fn rate_for(
        &self,
        category: Category,
        program_id: &str,
        card_id: &str,
    ) -> Option<f64> {
        let grid = self.fetch_category_grid(category).await;
        let rate = grid.program(program_id).and_then(|p| p.rate(card_id));
        if rate.is_none() {
            debug!(%category, program_id, card_id, "No conversion value found");
        }
        rate
    }

    /// Categories currently held in the cache.
    pub fn cached_categories(&self) -> Vec<Category> {
        self.cache.categories()
    }

    /// Empty the cache so the next lookup refetches.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
