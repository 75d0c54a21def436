//! Construction of the symbol universe for a notation.

use std::collections::HashSet;

use dobble_model::{Notation, SymbolDefinition, letters};

/// Decimal labels `"0"` .. `"count-1"`.
pub fn numbers(count: u32) -> Vec<String> {
    (0..count).map(|i| i.to_string()).collect()
}

/// The identifiers sent to the generator.
///
/// Images use the user's selection verbatim and require exactly `num_cards`
/// entries; `None` means generation must not be attempted.
pub fn build_universe(
    notation: Notation,
    num_cards: u32,
    selection: &[String],
) -> Option<Vec<String>> {
    match notation {
        Notation::Numeric => Some(numbers(num_cards)),
        Notation::Alphabetic => Some(letters(num_cards as usize)),
        Notation::Images => (selection.len() == num_cards as usize).then(|| selection.to_vec()),
    }
}

/// Rendering definitions for every symbol of a deck.
///
/// Text notations get one bold text symbol per label. Images take the first
/// `num_cards` selections, drop repeats and keep the source as the id.
pub fn build_symbol_definitions(
    notation: Notation,
    num_cards: u32,
    selection: &[String],
) -> Vec<SymbolDefinition> {
    match notation {
        Notation::Numeric => numbers(num_cards)
            .into_iter()
            .map(SymbolDefinition::text)
            .collect(),
        Notation::Alphabetic => letters(num_cards as usize)
            .into_iter()
            .map(SymbolDefinition::text)
            .collect(),
        Notation::Images => {
            let mut seen = HashSet::new();
            selection
                .iter()
                .take(num_cards as usize)
                .filter(|src| seen.insert(src.as_str()))
                .map(|src| SymbolDefinition::image(src.as_str()))
                .collect()
        }
    }
}
