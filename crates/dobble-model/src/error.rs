use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown generation mode: {0}")]
    UnknownMode(String),
    #[error("unknown notation: {0}")]
    UnknownNotation(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
