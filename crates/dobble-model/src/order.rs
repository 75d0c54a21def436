//! Order arithmetic and the finite letter alphabet.
//!
//! A deck of order `n` has `n² + n + 1` cards drawn from as many symbols, with
//! `n + 1` symbols on every card.

/// The fixed alphabet available to the alphabetic notation.
pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Orders suggested to the user when the alphabet is too small.
pub const CANDIDATE_ORDERS: [u32; 8] = [2, 3, 4, 5, 7, 8, 9, 13];

/// Total number of cards (and distinct symbols) in a deck of order `n`.
///
/// Saturates at `u32::MAX`; `n` comes from the service unchecked.
pub const fn cards_for_order(n: u32) -> u32 {
    n.saturating_mul(n).saturating_add(n).saturating_add(1)
}

pub const fn symbols_per_card_for_order(n: u32) -> u32 {
    n.saturating_add(1)
}

/// Candidate orders whose deck needs at most `max_symbols` distinct symbols.
///
/// Returned in ascending order.
pub fn feasible_orders(max_symbols: u32) -> Vec<u32> {
    CANDIDATE_ORDERS
        .iter()
        .copied()
        .filter(|&k| cards_for_order(k) <= max_symbols)
        .collect()
}

/// The first `count` letters of [`ALPHABET`], capped at its length.
pub fn letters(count: usize) -> Vec<String> {
    ALPHABET
        .iter()
        .take(count)
        .map(char::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cards_for_order() {
        assert_eq!(cards_for_order(2), 7);
        assert_eq!(cards_for_order(7), 57);
        assert_eq!(symbols_per_card_for_order(7), 8);
    }

    #[test]
    fn test_order_arithmetic_saturates() {
        assert_eq!(cards_for_order(65_535), 4_294_901_761);
        assert_eq!(cards_for_order(65_536), u32::MAX);
        assert_eq!(cards_for_order(u32::MAX), u32::MAX);
        assert_eq!(symbols_per_card_for_order(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_feasible_orders_for_alphabet() {
        assert_eq!(feasible_orders(ALPHABET.len() as u32), vec![2, 3, 4]);
        assert_eq!(feasible_orders(6), Vec::<u32>::new());
        assert_eq!(feasible_orders(183), vec![2, 3, 4, 5, 7, 8, 9, 13]);
    }

    #[test]
    fn test_letters() {
        assert_eq!(letters(3), vec!["A", "B", "C"]);
        assert_eq!(letters(40).len(), 26);
    }

    proptest! {
        #[test]
        fn feasible_orders_fit_and_are_sorted(max in 0u32..400) {
            let orders = feasible_orders(max);
            for window in orders.windows(2) {
                prop_assert!(window[0] < window[1]);
            }
            for k in CANDIDATE_ORDERS {
                prop_assert_eq!(orders.contains(&k), cards_for_order(k) <= max);
            }
        }
    }
}
