//! Upstream providers of raw category grids.
//!
//! The repository only needs rows of string cells per sheet name, so any
//! backend (the Sheets values API, a server-side proxy, a fixed snapshot)
//! plugs in behind [`GridSource`].

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, SdkError};

/// Rows of string cells as read from a sheet. Rows may be ragged.
pub type RawGrid = Vec<Vec<String>>;

/// Something that can fetch the raw grid for a named sheet.
pub trait GridSource {
    fn fetch_raw_grid(&self, sheet: &str) -> impl Future<Output = Result<RawGrid>> + Send;
}

// ---------------------------------------------------------------------------
// SheetsApiSource
// ---------------------------------------------------------------------------

/// Reads sheets through the Google Sheets `values` endpoint.
#[derive(Debug, Clone)]
pub struct SheetsApiSource {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    range: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl SheetsApiSource {
    /// Create a source with an HTTP client whose requests give up after `timeout`.
    pub fn new(
        base_url: &str,
        spreadsheet_id: &str,
        range: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// URL of the `values` request for a sheet.
    pub fn url_for(&self, sheet: &str) -> String {
        let range = format!("{}!{}", sheet, self.range);
        format!(
            "{}/{}/values/{}?key={}",
            self.base_url,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(&range),
            urlencoding::encode(&self.api_key)
        )
    }
}

impl GridSource for SheetsApiSource {
    async fn fetch_raw_grid(&self, sheet: &str) -> Result<RawGrid> {
        let url = self.url_for(sheet);
        debug!(sheet, "Fetching sheet values");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SdkError::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        parse_value_range(&body)
    }
}

/// Parse a `values` response body into a raw grid.
///
/// A body without `values` (an empty sheet) is an empty grid. Non-string cells
/// are rendered to text; nulls become empty cells.
pub fn parse_value_range(body: &str) -> Result<RawGrid> {
    let payload: serde_json::Value = serde_json::from_str(body)?;
    if !payload.is_object() {
        return Err(SdkError::MalformedPayload(
            "expected a JSON object with a `values` array".to_string(),
        ));
    }
    let range: ValueRange = serde_json::from_value(payload)
        .map_err(|e| SdkError::MalformedPayload(e.to_string()))?;

    Ok(range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// StaticGridSource
// ---------------------------------------------------------------------------

/// Serves grids from memory. Unknown sheets read as empty grids.
#[derive(Debug, Clone, Default)]
pub struct StaticGridSource {
    sheets: HashMap<String, RawGrid>,
}

impl StaticGridSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the grid for a sheet.
    pub fn with_sheet<R, C>(mut self, sheet: &str, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let grid = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.sheets.insert(sheet.to_string(), grid);
        self
    }
}

impl GridSource for StaticGridSource {
    async fn fetch_raw_grid(&self, sheet: &str) -> Result<RawGrid> {
        Ok(self.sheets.get(sheet).cloned().unwrap_or_default())
    }
}
