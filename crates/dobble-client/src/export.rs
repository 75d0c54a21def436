//! PDF export with streaming progress.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::future::try_join_all;
use reqwest::Body;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};

use dobble_model::{ExportJob, SymbolDefinition};

use crate::client::{DobbleClient, EXPORT_PDF_PATH};
use crate::data_url::{DataUrlResolver, is_data_url};
use crate::error::{ClientError, Result, detail_from_body};
use crate::progress::{ExportProgress, ProgressTracker};

/// File name the exported PDF is saved under when none is given.
pub const DEFAULT_PDF_FILE_NAME: &str = "dobble_cards.pdf";

/// Size of the request body chunks used to observe upload progress.
const UPLOAD_CHUNK_SIZE: usize = 16 * 1024;

/// Upper bound on the buffer reserved from an announced `Content-Length`.
const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;

/// Replaces non-embedded image sources with data URLs, keeping every id.
///
/// Images are resolved concurrently; the output order matches the input.
pub async fn embed_images(
    resolver: &DataUrlResolver,
    symbols: Vec<SymbolDefinition>,
) -> Result<Vec<SymbolDefinition>> {
    try_join_all(symbols.into_iter().map(|symbol| async move {
        let symbol = match symbol {
            SymbolDefinition::Image { id, src } if !is_data_url(&src) => {
                let src = resolver.ensure_data_url(&src).await?;
                SymbolDefinition::Image { id, src }
            }
            other => other,
        };
        Ok::<_, ClientError>(symbol)
    }))
    .await
}

/// Writes the exported document to `path`, creating parent directories.
pub fn save_pdf(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)?;
    tracing::info!(path = %path.display(), bytes = data.len(), "PDF saved");
    Ok(())
}

fn with_tracker<F>(tracker: &Mutex<ProgressTracker<F>>, f: impl FnOnce(&mut ProgressTracker<F>)) {
    let mut guard = tracker.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard);
}

fn download_capacity(content_length: Option<u64>) -> usize {
    content_length.unwrap_or(0).min(MAX_PREALLOCATION) as usize
}

fn chunk_body(body: &Bytes) -> Vec<Bytes> {
    (0..body.len())
        .step_by(UPLOAD_CHUNK_SIZE)
        .map(|start| body.slice(start..(start + UPLOAD_CHUNK_SIZE).min(body.len())))
        .collect()
}

impl DobbleClient {
    /// Posts `job` to the PDF exporter and returns the rendered document.
    ///
    /// `on_progress` receives `Upload(0)` first, `Processing` exactly once and
    /// `Done(100)` last on success. Failed exports log the service's error
    /// body and return it; nothing is returned partially.
    pub async fn export_pdf<F>(&self, job: &ExportJob, on_progress: F) -> Result<Bytes>
    where
        F: FnMut(ExportProgress) + Send + 'static,
    {
        let url = self.config.endpoint(EXPORT_PDF_PATH)?;
        let payload = Bytes::from(serde_json::to_vec(job)?);
        let upload_total = payload.len() as u64;

        tracing::info!(
            %url,
            cards = job.cards.len(),
            symbols = job.symbols.len(),
            bytes = upload_total,
            "exporting deck to PDF"
        );

        let tracker = Arc::new(Mutex::new(ProgressTracker::new(on_progress)));
        with_tracker(&tracker, ProgressTracker::start);

        let upload_tracker = Arc::clone(&tracker);
        let mut sent = 0u64;
        let upload = futures_util::stream::iter(chunk_body(&payload)).map(move |chunk| {
            sent += chunk.len() as u64;
            with_tracker(&upload_tracker, |t| t.upload(sent, Some(upload_total)));
            Ok::<_, std::io::Error>(chunk)
        });

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static("application/pdf"))
            .body(Body::wrap_stream(upload))
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Export PDF failed");
                ClientError::from(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Export PDF failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                detail: detail_from_body(&body),
            });
        }

        let download_total = response.content_length();
        let mut data = Vec::with_capacity(download_capacity(download_total));
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| {
                tracing::error!(error = %err, "Export PDF failed while downloading");
                ClientError::Network(err.to_string())
            })?;
            data.extend_from_slice(&chunk);
            with_tracker(&tracker, |t| t.download(data.len() as u64, download_total));
        }

        with_tracker(&tracker, ProgressTracker::finish);
        tracing::info!(bytes = data.len(), "PDF export complete");
        Ok(Bytes::from(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_body_covers_payload() {
        let body = Bytes::from(vec![7u8; UPLOAD_CHUNK_SIZE * 2 + 5]);
        let chunks = chunk_body(&body);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].len(), 5);
        assert_eq!(chunks.iter().map(Bytes::len).sum::<usize>(), body.len());
    }

    #[test]
    fn test_download_capacity_is_capped() {
        assert_eq!(download_capacity(None), 0);
        assert_eq!(download_capacity(Some(1024)), 1024);
        assert_eq!(
            download_capacity(Some(u64::MAX)),
            MAX_PREALLOCATION as usize
        );
    }

    #[test]
    fn test_save_pdf_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("dobble-save-{}", std::process::id()));
        let path = dir.join("nested").join(DEFAULT_PDF_FILE_NAME);
        save_pdf(&path, b"%PDF-1.4").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4");
        fs::remove_dir_all(&dir).unwrap();
    }
}
