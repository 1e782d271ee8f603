use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SdkError;

/// A redemption domain backed by its own sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Airlines,
    Hotels,
    Cash,
}

impl Category {
    /// Every category, in the order cards are merged across them.
    pub const ALL: [Category; 3] = [Category::Airlines, Category::Hotels, Category::Cash];

    /// Name of the sheet holding this category's grid.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Category::Airlines => "Airlines",
            Category::Hotels => "Hotels",
            Category::Cash => "Cash",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Airlines => "airlines",
            Category::Hotels => "hotels",
            Category::Cash => "cash",
        }
    }

    /// Parse a category name, falling back to `Airlines` for anything unknown.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or(Category::Airlines)
    }
}

impl FromStr for Category {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "airlines" => Ok(Category::Airlines),
            "hotels" => Ok(Category::Hotels),
            "cash" => Ok(Category::Cash),
            other => Err(SdkError::InvalidArgument(format!(
                "Unknown category: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
