//! Spreadsheet grid to card/program model transformation.
//!
//! A category grid is laid out as:
//!
//! | row | col 0        | col 1      | col 2..       |
//! |-----|--------------|------------|---------------|
//! | 0   |              |            | bank names    |
//! | 1   |              |            | card names    |
//! | 2.. | program name | point name | rate per card |
//!
//! Rows may be ragged; a missing cell reads as an empty string.

use tracing::debug;

use crate::config::{self, FIRST_CARD_COLUMN, FIRST_PROGRAM_ROW};
use crate::models::{Card, NormalizedGrid, Program};

/// Normalize a raw grid of cells into cards and programs.
///
/// Grids with fewer than three rows carry no program data and yield an empty
/// result. Blank header columns, unnamed program rows and unusable rate cells
/// are skipped silently.
pub fn normalize<R: AsRef<[String]>>(grid: &[R]) -> NormalizedGrid {
    if grid.len() <= FIRST_PROGRAM_ROW {
        debug!(rows = grid.len(), "Not enough rows in sheet data");
        return NormalizedGrid::empty();
    }

    let cards = extract_cards(grid[0].as_ref(), grid[1].as_ref());
    let programs = grid
        .iter()
        .enumerate()
        .skip(FIRST_PROGRAM_ROW)
        .filter_map(|(row, cells)| extract_program(row, cells.as_ref(), &cards))
        .collect();

    NormalizedGrid { cards, programs }
}

fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(|s| s.trim()).unwrap_or("")
}

fn extract_cards(bank_row: &[String], card_row: &[String]) -> Vec<Card> {
    let width = bank_row.len().max(card_row.len());
    (FIRST_CARD_COLUMN..width)
        .filter_map(|column| {
            let bank = cell(bank_row, column);
            let name = cell(card_row, column);
            if bank.is_empty() && name.is_empty() {
                return None;
            }
            Some(Card {
                id: card_id(bank, name),
                bank: bank.to_string(),
                name: name.to_string(),
                column,
            })
        })
        .collect()
}

fn extract_program(row: usize, cells: &[String], cards: &[Card]) -> Option<Program> {
    let name = cell(cells, 0);
    if name.is_empty() {
        return None;
    }
    let point_name = match cell(cells, 1) {
        "" => name,
        p => p,
    };

    let mut program = Program {
        id: format!("program_{}", row),
        name: name.to_string(),
        point_name: point_name.to_string(),
        rates: Default::default(),
    };

    for card in cards {
        let raw = cell(cells, card.column);
        match parse_rate(raw) {
            // Duplicate card ids keep the first column's rate.
            Some(rate) => {
                program.rates.entry(card.id.clone()).or_insert(rate);
            }
            None if !raw.is_empty() => {
                debug!(program = name, card = %card.id, raw, "Skipping unusable rate cell");
            }
            None => {}
        }
    }

    Some(program)
}

/// Parse a rate cell, stripping currency symbols, commas and whitespace.
///
/// The longest leading number is used, so trailing annotations such as
/// `"0.5pts"` or `"25%"` still yield a rate. Returns `None` for blank,
/// non-numeric, non-finite and non-positive values.
pub fn parse_rate(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !config::is_rate_noise(*c)).collect();
    let number = numeric_prefix(&cleaned);
    if number.is_empty() {
        return None;
    }
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Leading `[+-]digits[.digits][e[+-]digits]` of `s`, or `""` if it has no digits.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return "";
    }

    // An exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &s[..end]
}

/// Build the card id slug from a bank and card name.
///
/// ```
/// use card_points_sdk::normalize::card_id;
/// assert_eq!(card_id("American Express", "Gold Card"), "american_express_gold_card");
/// ```
pub fn card_id(bank: &str, name: &str) -> String {
    format!("{}_{}", slug(bank), slug(name))
}

/// Lowercase, turn whitespace runs into `_`, drop anything outside
/// `[a-z0-9_]`, collapse repeated `_` and trim `_` from both ends.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        let c = if c.is_whitespace() { '_' } else { c };
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
            continue;
        }
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('_').to_string()
}
