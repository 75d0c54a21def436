use serde::{Deserialize, Serialize};

/// One card: the identifiers of the symbols printed on it, in order.
pub type Card = Vec<String>;

/// A generated deck.
///
/// The service guarantees that any two distinct cards share exactly one
/// symbol and that every card carries the same number of symbols. The client
/// displays and exports whatever it receives without checking either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of symbols on the first card, if any.
    pub fn symbols_per_card(&self) -> Option<usize> {
        self.cards.first().map(Vec::len)
    }

    /// Symbols that cards `a` and `b` have in common, in the order of card `a`.
    ///
    /// Returns `None` when either index is out of range.
    pub fn shared_symbols(&self, a: usize, b: usize) -> Option<Vec<&str>> {
        let first = self.cards.get(a)?;
        let second = self.cards.get(b)?;
        Some(
            first
                .iter()
                .filter(|symbol| second.contains(symbol))
                .map(String::as_str)
                .collect(),
        )
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}
