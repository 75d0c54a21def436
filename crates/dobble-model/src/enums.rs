//! Form selections: what the numeric input means and how symbols are labelled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Selects which deck parameter the raw numeric input represents.
///
/// The wire values (`n`, `k`, `sc`) are the ones the validate endpoint expects
/// in its `mode` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GenerationMode {
    /// Input is the order `n` of the deck.
    #[default]
    #[serde(rename = "n")]
    ByOrder,
    /// Input is the total number of cards.
    #[serde(rename = "k")]
    ByCount,
    /// Input is the number of symbols printed on each card.
    #[serde(rename = "sc")]
    BySymbolsPerCard,
}

impl GenerationMode {
    /// Returns the wire value used by the validate endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::ByOrder => "n",
            GenerationMode::ByCount => "k",
            GenerationMode::BySymbolsPerCard => "sc",
        }
    }

    /// Short label shown in place of an empty input.
    pub fn placeholder(&self) -> &'static str {
        match self {
            GenerationMode::ByOrder => "N",
            GenerationMode::ByCount => "C",
            GenerationMode::BySymbolsPerCard => "S/C",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "order" => Ok(GenerationMode::ByOrder),
            "k" | "count" | "cards" => Ok(GenerationMode::ByCount),
            "sc" | "symbols-per-card" => Ok(GenerationMode::BySymbolsPerCard),
            _ => Err(ModelError::UnknownMode(s.to_string())),
        }
    }
}

/// Symbol alphabet used to label cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notation {
    /// Decimal labels `"0"`, `"1"`, ...
    #[default]
    Numeric,
    /// Letters from the fixed 26-letter alphabet.
    Alphabetic,
    /// User-picked images, identified by their source reference.
    Images,
}

impl Notation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Notation::Numeric => "numeric",
            Notation::Alphabetic => "alphabetic",
            Notation::Images => "images",
        }
    }

    /// Whether the notation renders symbols as text rather than images.
    pub fn is_text(&self) -> bool {
        !matches!(self, Notation::Images)
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Notation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "numeric" | "numbers" => Ok(Notation::Numeric),
            "l" | "alphabetic" | "letters" => Ok(Notation::Alphabetic),
            "s" | "images" | "symbols" => Ok(Notation::Images),
            _ => Err(ModelError::UnknownNotation(s.to_string())),
        }
    }
}
