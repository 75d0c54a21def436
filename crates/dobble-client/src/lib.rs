//! HTTP client for the Dobble deck service.
//!
//! The service owns the combinatorics; this crate only speaks its HTTP
//! contract:
//!
//! - `GET {base}/dobble/validate?mode&how_many` via [`DobbleClient::validate`]
//! - `POST {base}/dobble/generate` via [`DobbleClient::generate`]
//! - `POST {base}/dobble/export/pdf` via [`DobbleClient::export_pdf`], with
//!   upload/processing/download/done progress
//!
//! Image symbols are embedded as data URLs before export, see [`data_url`].
//!
//! # Example
//!
//! ```no_run
//! use dobble_client::{ClientConfig, DobbleClient};
//! use dobble_model::{GenerateRequest, GenerationMode};
//!
//! async fn deck() -> dobble_client::Result<()> {
//!     let client = DobbleClient::new(ClientConfig::from_env())?;
//!
//!     let answer = client.validate(GenerationMode::ByOrder, 2).await?;
//!     if let (true, Some(n)) = (answer.valid, answer.n) {
//!         let symbols = (0..7).map(|i| i.to_string()).collect();
//!         let deck = client.generate(&GenerateRequest { n, symbols }).await?;
//!         println!("{} cards", deck.cards.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod data_url;
pub mod error;
pub mod export;
pub mod progress;

pub use client::DobbleClient;
pub use config::{BASE_URL_ENV, ClientConfig, DEFAULT_BASE_URL};
pub use data_url::{Blob, Credentials, DataUrlResolver, FetchOptions, is_data_url};
pub use error::{ClientError, Result};
pub use export::{DEFAULT_PDF_FILE_NAME, embed_images, save_pdf};
pub use progress::{ExportPhase, ExportProgress, ProgressTracker};
