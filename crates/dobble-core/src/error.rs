use dobble_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("nothing to export: validate and generate a deck first")]
    NothingToExport,
    #[error(transparent)]
    Client(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
