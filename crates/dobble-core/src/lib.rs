//! Deck-building session for the Dobble client.
//!
//! [`Session`] is the explicit form state: mode, notation, raw input, derived
//! deck parameters, the picked images and the generated deck. The
//! [`workflow`] functions run the remote calls against it.

pub mod error;
pub mod policy;
pub mod session;
pub mod universe;
pub mod workflow;

pub use error::{CoreError, Result};
pub use policy::check_symbol_supply;
pub use session::{GenerationTicket, RequestToken, Session, ValidationTicket};
pub use universe::{build_symbol_definitions, build_universe, numbers};
