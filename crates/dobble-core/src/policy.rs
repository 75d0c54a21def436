//! Client-side feasibility checks the service cannot make.
//!
//! The service validates deck parameters without knowing which notation will
//! label the symbols. Letters are finite, so the client rejects decks that
//! need more distinct symbols than the alphabet holds.

use dobble_model::{ALPHABET, Notation, feasible_orders};

/// Checks that `notation` can supply `num_cards` distinct symbols.
///
/// Returns the message to show the user when it cannot.
pub fn check_symbol_supply(notation: Notation, num_cards: u32) -> Result<(), String> {
    match notation {
        Notation::Alphabetic => check_alphabet(num_cards),
        Notation::Numeric | Notation::Images => Ok(()),
    }
}

fn check_alphabet(need: u32) -> Result<(), String> {
    let have = ALPHABET.len() as u32;
    if need <= have {
        return Ok(());
    }
    let feasible = feasible_orders(have);
    let advice = if feasible.is_empty() {
        "Decrease n or use numbers/symbols.".to_string()
    } else {
        let orders = feasible
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("Try smaller n (∈ {{ {orders} }}) or switch notation.")
    };
    Err(format!(
        "Not enough letters: need {need}, only {have} available. {advice}"
    ))
}
