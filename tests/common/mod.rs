//! Shared fixtures for the points SDK integration tests.
//!
//! Provides small sample grids for each category sheet plus grid sources that
//! count, delay or fail their fetches.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use card_points_sdk::source::{GridSource, RawGrid, StaticGridSource};
use card_points_sdk::{Result, SdkError};

/// Build a raw grid from string literals.
pub fn grid(rows: &[&[&str]]) -> RawGrid {
    rows.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

pub fn airlines_grid() -> RawGrid {
    grid(&[
        &["", "", "Chase", "American Express", "HDFC Bank"],
        &["", "", "Sapphire", "Gold Card", "Regalia"],
        &["Air India", "Miles", "0.75", "₹0.50", ""],
        &["", "orphan", "9", "9", "9"],
        &["Vistara", "", "$1.25", "0", "abc"],
    ])
}

pub fn hotels_grid() -> RawGrid {
    grid(&[
        &["", "", "chase", "Marriott"],
        &["", "", "SAPPHIRE", "Bonvoy"],
        &["Taj", "Points", "0.9", "1,200"],
    ])
}

pub fn cash_grid() -> RawGrid {
    grid(&[
        &["", "", "Chase", "Amex"],
        &["", "", "Sapphire", "Gold"],
        &["Cash Back", "Cash", "0.01", "0.006"],
    ])
}

/// A static source holding all three sample sheets.
pub fn sample_source() -> StaticGridSource {
    StaticGridSource::new()
        .with_sheet("Airlines", airlines_grid())
        .with_sheet("Hotels", hotels_grid())
        .with_sheet("Cash", cash_grid())
}

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Wraps a source and counts raw fetches.
pub struct CountingSource<S> {
    inner: S,
    fetches: AtomicUsize,
}

impl<S> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl<S: GridSource + Sync> GridSource for CountingSource<S> {
    async fn fetch_raw_grid(&self, sheet: &str) -> Result<RawGrid> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_raw_grid(sheet).await
    }
}

/// Fails every fetch for the named sheet; serves the rest from the sample source.
pub struct FailingSource {
    pub failing_sheet: &'static str,
    inner: StaticGridSource,
}

impl FailingSource {
    pub fn new(failing_sheet: &'static str) -> Self {
        Self {
            failing_sheet,
            inner: sample_source(),
        }
    }
}

impl GridSource for FailingSource {
    async fn fetch_raw_grid(&self, sheet: &str) -> Result<RawGrid> {
        if sheet == self.failing_sheet {
            return Err(SdkError::Status(503));
        }
        self.inner.fetch_raw_grid(sheet).await
    }
}

/// Sleeps before answering from the sample source.
pub struct SlowSource {
    pub delay: Duration,
    inner: StaticGridSource,
}

impl SlowSource {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: sample_source(),
        }
    }
}

impl GridSource for SlowSource {
    async fn fetch_raw_grid(&self, sheet: &str) -> Result<RawGrid> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_raw_grid(sheet).await
    }
}
