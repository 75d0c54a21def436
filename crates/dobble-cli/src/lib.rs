//! CLI library components for the Dobble deck client.

pub mod cli;
pub mod logging;
pub mod progress;
pub mod render;
