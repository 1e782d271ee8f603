use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Card;

/// A redemption program read from one body row of a category grid.
///
/// `rates` is sparse: a card without an entry has no defined conversion for
/// this program, which is not the same thing as a rate of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub name: String,
    pub point_name: String,
    #[serde(default)]
    pub rates: BTreeMap<String, f64>,
}

impl Program {
    /// Rate for a card, or `None` when the program defines none.
    pub fn rate(&self, card_id: &str) -> Option<f64> {
        self.rates.get(card_id).copied()
    }
}

/// The normalized form of one category grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedGrid {
    pub cards: Vec<Card>,
    pub programs: Vec<Program>,
}

impl NormalizedGrid {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.programs.is_empty()
    }

    pub fn program(&self, program_id: &str) -> Option<&Program> {
        self.programs.iter().find(|p| p.id == program_id)
    }
}
