use std::fmt;

use serde::{Deserialize, Serialize};

/// The monetary value of a number of points at a given rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub points: f64,
    pub rate: f64,
    pub value: f64,
}

impl Valuation {
    /// Value `points` at `rate`.
    ///
    /// Returns `None` for negative or non-finite point counts and for rates
    /// that are not strictly positive.
    pub fn compute(points: f64, rate: f64) -> Option<Self> {
        if !points.is_finite() || points < 0.0 || !rate.is_finite() || rate <= 0.0 {
            return None;
        }
        Some(Self {
            points,
            rate,
            value: points * rate,
        })
    }

    /// One-line summary such as `"10,000 miles = ₹2500.00"`.
    pub fn describe(&self, point_name: &str) -> String {
        format!(
            "{} {} = {}",
            group_thousands(self.points),
            point_name.to_lowercase(),
            self
        )
    }
}

/// Render a non-negative number with `,` between thousands groups.
fn group_thousands(n: f64) -> String {
    let text = n.to_string();
    let (int, frac) = match text.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + int.len() / 3);
    for (i, digit) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac) = frac {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

impl fmt::Display for Valuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{:.2}", self.value)
    }
}
