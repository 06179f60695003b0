//! Deck-file card records.
//!
//! A `CardRecord` is the serialized shape of one card in a deck file:
//!
//! ```json
//! { "level": 0, "points": 1, "feature": "None",
//!   "requirements": { "white": 2, "green": 2 }, "output": { "red": 1 }, "crowns": 0 }
//! ```
//!
//! Capitalized keys (`"Level"`, `"Points"`, ...) are accepted too. A feature
//! of `"None"` or `""` means the card has no feature. Cards receive ids in
//! file order.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, Level};
use crate::core::TokenQuantity;
use crate::error::CardSpecError;

/// One card as it appears in a deck file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(alias = "Level")]
    pub level: u8,
    #[serde(alias = "Points")]
    pub points: u32,
    #[serde(default, alias = "Feature")]
    pub feature: Option<String>,
    #[serde(default, alias = "Requirements")]
    pub requirements: TokenQuantity,
    #[serde(default, alias = "Output")]
    pub output: TokenQuantity,
    #[serde(default, alias = "Crowns")]
    pub crowns: u32,
}

impl CardRecord {
    /// Validate the record and build a card with the given id.
    pub fn into_card(self, id: CardId) -> Result<Card, CardSpecError> {
        let level = Level::try_from(self.level)?;
        let mut card = Card::new(id, level, self.points)
            .with_requirements(self.requirements)
            .with_output(self.output)
            .with_crowns(self.crowns);

        if let Some(feature) = self.feature {
            let feature = feature.trim();
            if !feature.is_empty() && !feature.eq_ignore_ascii_case("none") {
                card = card.with_feature(feature);
            }
        }
        Ok(card)
    }
}

/// Build cards from records, numbering them in order.
pub fn cards_from_records(
    records: impl IntoIterator<Item = CardRecord>,
) -> Result<Vec<Card>, CardSpecError> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| record.into_card(CardId::new(i as u32)))
        .collect()
}

/// Parse a JSON array of card records.
pub fn cards_from_json(json: &str) -> Result<Vec<Card>, CardSpecError> {
    let records: Vec<CardRecord> =
        serde_json::from_str(json).map_err(|e| CardSpecError::Json(e.to_string()))?;
    cards_from_records(records)
}
