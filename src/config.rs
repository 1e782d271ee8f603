use std::time::Duration;

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const DEFAULT_SPREADSHEET_ID: &str = "1QznZhNzCxeijnnct6n_eauTtHElBlW25c2iQMmWRiUY";

/// Cell range read from every category sheet.
pub const DEFAULT_RANGE: &str = "A1:Z1000";

/// Environment variable consulted by [`PointsCalculatorBuilder::api_key_from_env`](crate::PointsCalculatorBuilder::api_key_from_env).
pub const API_KEY_ENV: &str = "SHEETS_API_KEY";

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// First grid column holding card data; columns before it describe programs.
pub const FIRST_CARD_COLUMN: usize = 2;

/// First grid row holding program data; rows before it are card headers.
pub const FIRST_PROGRAM_ROW: usize = 2;

/// Characters removed from a rate cell before it is parsed as a number.
pub fn is_rate_noise(c: char) -> bool {
    matches!(c, '₹' | '$' | ',') || c.is_whitespace()
}
