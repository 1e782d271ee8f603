use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Card — one column of a category grid
// ---------------------------------------------------------------------------

/// A credit card read from the two header rows of a category grid.
///
/// `id` is a slug derived from `bank` and `name` (see
/// [`card_id`](crate::normalize::card_id)). `column` is the grid column the
/// card came from; it only matters while rates are being read and is not part
/// of the card's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub bank: String,
    pub name: String,
    pub column: usize,
}

impl Card {
    /// Key used to merge the same card seen in several categories.
    pub fn merge_key(&self) -> String {
        format!("{}_{}", self.bank, self.name).to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// CardSummary — a card as listed across every category
// ---------------------------------------------------------------------------

/// A deduplicated card with the loyalty program family inferred from its bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSummary {
    pub id: String,
    pub name: String,
    pub bank: String,
    pub program: ProgramFamily,
}

impl From<&Card> for CardSummary {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            bank: card.bank.clone(),
            program: ProgramFamily::from_bank(&card.bank),
        }
    }
}

impl CardSummary {
    /// Case-insensitive substring match against the card name or bank.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.bank.to_lowercase().contains(&query)
    }
}

// ---------------------------------------------------------------------------
// ProgramFamily
// ---------------------------------------------------------------------------

/// Loyalty program family a card's points belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgramFamily {
    Chase,
    Amex,
    CapitalOne,
    Citi,
    Marriott,
    Hilton,
    Other,
}

impl ProgramFamily {
    /// Infer the family from a bank name. Unrecognized banks map to `Other`.
    pub fn from_bank(bank: &str) -> Self {
        match bank.to_lowercase().as_str() {
            "chase" => Self::Chase,
            "american express" | "amex" => Self::Amex,
            "capital one" => Self::CapitalOne,
            "citi" => Self::Citi,
            "marriott" => Self::Marriott,
            "hilton" => Self::Hilton,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chase => "chase",
            Self::Amex => "amex",
            Self::CapitalOne => "capital-one",
            Self::Citi => "citi",
            Self::Marriott => "marriott",
            Self::Hilton => "hilton",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ProgramFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
