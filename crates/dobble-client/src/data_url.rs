//! Conversion of image references into self-contained `data:` URLs.
//!
//! The PDF service cannot reach the images a user picked, so every image
//! symbol is embedded as `data:<mime>;base64,<payload>` before export.

use std::fs;
use std::io::Read;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use futures_util::future::try_join_all;
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, HeaderValue};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Query parameter carrying the cache-busting timestamp.
pub const CACHE_BUST_PARAM: &str = "_cb";

const FALLBACK_MIME: &str = "application/octet-stream";

/// Returns true iff `src` starts with `data:<mime>;base64,` (case-insensitive).
pub fn is_data_url(src: &str) -> bool {
    let Some(scheme) = src.get(..5) else {
        return false;
    };
    if !scheme.eq_ignore_ascii_case("data:") {
        return false;
    }
    let rest = &src[5..];
    match rest.find(';') {
        Some(idx) if idx > 0 => rest
            .get(idx..idx + 8)
            .is_some_and(|marker| marker.eq_ignore_ascii_case(";base64,")),
        _ => false,
    }
}

/// In-memory binary content with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime: String,
    pub bytes: Bytes,
}

impl Blob {
    pub fn new(mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }
}

pub fn bytes_to_data_url(mime: &str, data: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(data))
}

pub fn blob_to_data_url(blob: &Blob) -> String {
    bytes_to_data_url(&blob.mime, &blob.bytes)
}

/// Reads `reader` to the end and encodes it; fails if the read fails.
pub fn reader_to_data_url<R: Read>(mime: &str, mut reader: R) -> Result<String> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(bytes_to_data_url(mime, &data))
}

/// Reads a local image file, inferring the MIME type from its extension.
pub fn file_to_data_url(path: &Path) -> Result<String> {
    let file = fs::File::open(path)
        .map_err(|e| ClientError::Io(format!("{}: {e}", path.display())))?;
    reader_to_data_url(mime_from_path(path), file)
}

fn mime_from_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => FALLBACK_MIME,
    }
}

/// Whether credentials accompany an image fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Credentials {
    /// Never send the configured `Authorization` header.
    Omit,
    /// Send it only to the origin of the asset base (or the service).
    #[default]
    SameOrigin,
    /// Always send it.
    Include,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// Append a `_cb=<unix millis>` parameter so intermediaries cannot serve a stale copy.
    pub cache_bust: bool,
    pub credentials: Credentials,
}

/// Sets (or replaces) the cache-busting parameter on `url`.
pub fn append_cache_bust(url: &mut Url, timestamp_ms: i64) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != CACHE_BUST_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (key, value) in &kept {
        pairs.append_pair(key, value);
    }
    pairs.append_pair(CACHE_BUST_PARAM, &timestamp_ms.to_string());
}

/// Fetches image references and converts them into data URLs.
#[derive(Debug, Clone)]
pub struct DataUrlResolver {
    http: reqwest::Client,
    asset_base: Option<Url>,
    home: Option<Url>,
    auth_header: Option<HeaderValue>,
}

impl DataUrlResolver {
    pub(crate) fn new(http: reqwest::Client, config: &ClientConfig) -> Result<Self> {
        let asset_base = config.asset_base_url()?;
        let home = match &asset_base {
            Some(base) => Some(base.clone()),
            None => Url::parse(&config.base_url).ok(),
        };
        let auth_header = config
            .auth_header
            .as_deref()
            .map(|value| {
                HeaderValue::from_str(value)
                    .map_err(|e| ClientError::InvalidUrl(format!("invalid auth header: {e}")))
            })
            .transpose()?;
        Ok(Self {
            http,
            asset_base,
            home,
            auth_header,
        })
    }

    /// Resolves `reference` to an absolute URL, joining relative references
    /// onto the asset base.
    pub fn resolve_url(&self, reference: &str) -> Result<Url> {
        match Url::parse(reference) {
            Ok(url) => Ok(url),
            Err(err) => match &self.asset_base {
                Some(base) => base
                    .join(reference)
                    .map_err(|e| ClientError::InvalidUrl(format!("{reference}: {e}"))),
                None => Err(ClientError::InvalidUrl(format!("{reference}: {err}"))),
            },
        }
    }

    /// Fetches `url` and returns its body as a data URL.
    ///
    /// Data URLs are returned unchanged without any request.
    pub async fn url_to_data_url(&self, url: &str, options: &FetchOptions) -> Result<String> {
        if is_data_url(url) {
            return Ok(url.to_string());
        }
        let mut target = self.resolve_url(url)?;
        if options.cache_bust {
            append_cache_bust(&mut target, chrono::Utc::now().timestamp_millis());
        }
        let send_auth = match options.credentials {
            Credentials::Omit => false,
            Credentials::Include => true,
            Credentials::SameOrigin => self
                .home
                .as_ref()
                .is_some_and(|home| home.origin() == target.origin()),
        };

        tracing::debug!(url = %target, "fetching symbol image");

        let mut request = self
            .http
            .get(target)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        if send_auth && let Some(value) = &self.auth_header {
            request = request.header(AUTHORIZATION, value.clone());
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Fetch {
                url: url.to_string(),
                status: status.to_string(),
            });
        }

        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(FALLBACK_MIME)
            .to_string();
        let bytes = response.bytes().await?;
        Ok(blob_to_data_url(&Blob::new(mime, bytes)))
    }

    /// Returns `src` if it already is a data URL, otherwise loads and converts it.
    ///
    /// Absolute `http(s)` URLs are fetched, `file:` URLs and plain paths are
    /// read from disk, and relative references are fetched from the asset
    /// base when one is configured.
    pub async fn ensure_data_url(&self, src: &str) -> Result<String> {
        if is_data_url(src) {
            return Ok(src.to_string());
        }
        match Url::parse(src) {
            Ok(url) if url.scheme() == "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| ClientError::InvalidUrl(src.to_string()))?;
                file_to_data_url(&path)
            }
            Ok(_) => self.url_to_data_url(src, &FetchOptions::default()).await,
            Err(_) if self.asset_base.is_some() => {
                self.url_to_data_url(src, &FetchOptions::default()).await
            }
            Err(_) => file_to_data_url(Path::new(src)),
        }
    }

    /// Converts every entry concurrently, preserving input order.
    ///
    /// Fails as a whole if any single entry fails.
    pub async fn urls_to_data_urls<S: AsRef<str>>(&self, sources: &[S]) -> Result<Vec<String>> {
        try_join_all(
            sources
                .iter()
                .map(|source| self.ensure_data_url(source.as_ref())),
        )
        .await
    }
}
