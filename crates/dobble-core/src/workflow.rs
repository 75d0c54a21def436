//! Validate → generate → export, driven against a live client.

use bytes::Bytes;

use dobble_client::{DobbleClient, ExportProgress, embed_images};
use dobble_model::ExportSettings;

use crate::error::Result;
use crate::session::Session;

/// Validates the session's input with the service and the local policy.
///
/// Returns whether the session ended up valid. Failures are recorded as the
/// session error; nothing is retried.
pub async fn validate(session: &mut Session, client: &DobbleClient) -> bool {
    let ticket = session.begin_validation();
    let outcome = client.validate(ticket.mode, ticket.how_many).await;
    session.apply_validation(ticket.token, outcome);
    session.is_valid()
}

/// Requests a deck for the validated session.
///
/// Returns `Ok(false)` without contacting the service when generation is not
/// possible, e.g. an image selection of the wrong size.
pub async fn generate(session: &mut Session, client: &DobbleClient) -> Result<bool> {
    let Some(ticket) = session.begin_generation() else {
        tracing::debug!(
            reason = %session.generate_disabled_reason().unwrap_or_default(),
            "generation blocked"
        );
        return Ok(false);
    };
    let outcome = client.generate(&ticket.request).await;
    Ok(session.apply_generation(ticket.token, outcome)?)
}

/// Exports the session's deck as a PDF with embedded images.
pub async fn export<F>(
    session: &Session,
    client: &DobbleClient,
    settings: ExportSettings,
    on_progress: F,
) -> Result<Bytes>
where
    F: FnMut(ExportProgress) + Send + 'static,
{
    let mut job = session.export_job(settings)?;
    let resolver = client.data_urls()?;
    job.symbols = embed_images(&resolver, job.symbols).await?;
    Ok(client.export_pdf(&job, on_progress).await?)
}
