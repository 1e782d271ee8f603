//! Credit card points value SDK.
//!
//! Reads a spreadsheet of "program × card → rate" grids, one sheet per
//! redemption category, normalizes them into cards and programs, caches the
//! result for a few minutes, and values a number of points as
//! `points × rate`.
//!
//! Lookups never fail: an unreachable or malformed sheet reads as empty and a
//! missing rate is `None`.
//!
//! # Quick start
//!
//! ```no_run
//! use card_points_sdk::{Category, PointsCalculator};
//!
//! # async fn run() -> card_points_sdk::Result<()> {
//! let calc = PointsCalculator::builder().api_key_from_env().build()?;
//!
//! let cards = calc.cards().await;
//! let programs = calc.programs(Category::Airlines).await;
//! if let (Some(card), Some(program)) = (cards.first(), programs.first()) {
//!     let valuation = calc
//!         .value_of(Category::Airlines, &program.id, &card.id, 10_000.0)
//!         .await;
//!     println!("{:?}", valuation);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod repository;
pub mod source;
pub mod valuation;

pub use cache::GridCache;
pub use error::{Result, SdkError};
pub use models::{Card, CardSummary, Category, NormalizedGrid, Program, ProgramFamily};
pub use repository::RateRepository;
pub use source::{GridSource, SheetsApiSource, StaticGridSource};
pub use valuation::Valuation;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// PointsCalculatorBuilder
// ---------------------------------------------------------------------------

/// Builder for a [`PointsCalculator`] backed by the Google Sheets API.
///
/// Use [`PointsCalculator::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PointsCalculatorBuilder::build).
pub struct PointsCalculatorBuilder {
    api_key: Option<String>,
    spreadsheet_id: String,
    range: String,
    base_url: String,
    cache_ttl: Duration,
    timeout: Duration,
}

impl Default for PointsCalculatorBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            spreadsheet_id: config::DEFAULT_SPREADSHEET_ID.to_string(),
            range: config::DEFAULT_RANGE.to_string(),
            base_url: config::SHEETS_API_BASE.to_string(),
            cache_ttl: config::DEFAULT_CACHE_TTL,
            timeout: config::DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl PointsCalculatorBuilder {
    /// Set the Sheets API key.
    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    /// Read the API key from the `SHEETS_API_KEY` environment variable, if set.
    pub fn api_key_from_env(mut self) -> Self {
        if let Ok(key) = std::env::var(config::API_KEY_ENV) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn spreadsheet_id(mut self, id: &str) -> Self {
        self.spreadsheet_id = id.to_string();
        self
    }

    /// Cell range read from each sheet. Defaults to `A1:Z1000`.
    pub fn range(mut self, range: &str) -> Self {
        self.range = range.to_string();
        self
    }

    /// Override the API base URL, e.g. to point at a proxy serving the same shape.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// How long a fetched grid stays valid. Defaults to 5 minutes.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Upper bound on a single sheet fetch. Defaults to 5 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the calculator.
    ///
    /// Fails only if no API key was given or the HTTP client cannot be
    /// constructed; no data is fetched until the first lookup.
    pub fn build(self) -> Result<PointsCalculator<SheetsApiSource>> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                SdkError::InvalidArgument(format!(
                    "Sheets API key missing; call api_key() or set {}",
                    config::API_KEY_ENV
                ))
            })?;
        let source = SheetsApiSource::new(
            &self.base_url,
            &self.spreadsheet_id,
            &self.range,
            &api_key,
            self.timeout,
        )?;
        Ok(PointsCalculator {
            repo: RateRepository::new(source, self.cache_ttl, self.timeout),
        })
    }
}

// ---------------------------------------------------------------------------
// PointsCalculator
// ---------------------------------------------------------------------------

/// The main entry point: card, program and rate lookups plus valuation.
///
/// Owns a [`RateRepository`] and its cache. Construct one per process (or per
/// test) and share it by reference.
pub struct PointsCalculator<S> {
    repo: RateRepository<S>,
}

impl PointsCalculator<SheetsApiSource> {
    /// Create a new builder for a Sheets-backed calculator.
    pub fn builder() -> PointsCalculatorBuilder {
        PointsCalculatorBuilder::default()
    }
}

impl<S: GridSource> PointsCalculator<S> {
    /// Build a calculator over any grid source with the default TTL and timeout.
    pub fn with_source(source: S) -> Self {
        Self {
            repo: RateRepository::new(
                source,
                config::DEFAULT_CACHE_TTL,
                config::DEFAULT_FETCH_TIMEOUT,
            ),
        }
    }

    /// Build a calculator around a repository configured by the caller, e.g.
    /// with a custom TTL or timeout.
    pub fn with_repository(repo: RateRepository<S>) -> Self {
        Self { repo }
    }

    /// Every card across all categories, deduplicated.
    pub async fn cards(&self) -> Vec<CardSummary> {
        self.repo.all_cards().await
    }

    /// Cards whose name or bank contains `query`.
    pub async fn search_cards(&self, query: &str) -> Vec<CardSummary> {
        self.repo.search_cards(query).await
    }

    /// Reward programs offered in a category.
    pub async fn programs(&self, category: Category) -> Vec<Program> {
        self.repo.programs_for_category(category).await
    }

    /// The normalized grid for a category.
    pub async fn grid(&self, category: Category) -> Arc<NormalizedGrid> {
        self.repo.fetch_category_grid(category).await
    }

    /// Conversion rate for a card under a program, or `None` if not available.
    pub async fn rate(
        &self,
        category: Category,
        program_id: &str,
        card_id: &str,
    ) -> Option<f64> {
        self.repo.rate_for(category, program_id, card_id).await
    }

    /// Value `points` for a card under a program.
    ///
    /// Returns `None` when no rate is defined or `points` is negative or not
    /// a finite number.
    pub async fn value_of(
        &self,
        category: Category,
        program_id: &str,
        card_id: &str,
        points: f64,
    ) -> Option<Valuation> {
        let rate = self.rate(category, program_id, card_id).await?;
        Valuation::compute(points, rate)
    }

    /// Drop all cached grids so the next lookup refetches.
    pub fn refresh(&self) {
        self.repo.clear_cache();
    }

    /// Return a reference to the underlying [`RateRepository`].
    pub fn repository(&self) -> &RateRepository<S> {
        &self.repo
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl<S: GridSource> fmt::Display for PointsCalculator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached: Vec<&str> = self
            .repo
            .cached_categories()
            .iter()
            .map(|c| c.as_str())
            .collect();
        write!(
            f,
            "PointsCalculator(ttl={:?}, cached=[{}])",
            self.repo.cache().ttl(),
            cached.join(", ")
        )
    }
}
