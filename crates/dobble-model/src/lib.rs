//! Data model for the Dobble deck client.
//!
//! This crate holds the types exchanged with the remote deck service and the
//! small amount of arithmetic the client performs itself:
//!
//! - [`enums`]: Generation mode and symbol notation selections
//! - [`order`]: Order arithmetic, the fixed letter alphabet and feasible orders
//! - [`wire`]: Validate/generate request and response bodies
//! - [`symbol`]: Per-symbol rendering definitions sent to the PDF exporter
//! - [`deck`]: Cards and decks as returned by the generator
//! - [`export`]: The export job snapshot and its page/card/randomization defaults
//!
//! Nothing here performs I/O; the HTTP collaborator lives in `dobble-client`.

pub mod deck;
pub mod enums;
pub mod error;
pub mod export;
pub mod order;
pub mod symbol;
pub mod wire;

pub use deck::{Card, Deck};
pub use enums::{GenerationMode, Notation};
pub use error::{ModelError, Result};
pub use export::{
    CardOptions, ExportJob, ExportSettings, Orientation, PageOptions, RandomizationOptions,
    Range, RenderOptions, RingStrategy, RotationMode,
};
pub use order::{
    ALPHABET, CANDIDATE_ORDERS, cards_for_order, feasible_orders, letters,
    symbols_per_card_for_order,
};
pub use symbol::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_WEIGHT, SymbolDefinition};
pub use wire::{GenerateRequest, GenerateResponse, ValidateResponse, ValidationResult};
