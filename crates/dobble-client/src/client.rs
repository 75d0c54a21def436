//! HTTP client for the deck service.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use dobble_model::{GenerateRequest, GenerateResponse, GenerationMode, ValidateResponse};

use crate::config::{ClientConfig, USER_AGENT_VALUE};
use crate::data_url::DataUrlResolver;
use crate::error::{ClientError, Result, detail_from_body};

pub(crate) const VALIDATE_PATH: &str = "dobble/validate";
pub(crate) const GENERATE_PATH: &str = "dobble/generate";
pub(crate) const EXPORT_PDF_PATH: &str = "dobble/export/pdf";

/// Client for the validate, generate and PDF export endpoints.
#[derive(Debug, Clone)]
pub struct DobbleClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ClientConfig,
}

impl DobbleClient {
    /// Creates a client for the service configured in `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Fail early on an unusable base URL rather than on the first call.
        config.endpoint(VALIDATE_PATH)?;
        config.asset_base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Image resolver sharing this client's connection pool.
    pub fn data_urls(&self) -> Result<DataUrlResolver> {
        DataUrlResolver::new(self.http.clone(), &self.config)
    }

    /// Asks the service whether `how_many` is acceptable under `mode`.
    ///
    /// An invalid combination is a successful call with `valid == false`;
    /// only transport and server failures are errors.
    pub async fn validate(&self, mode: GenerationMode, how_many: i64) -> Result<ValidateResponse> {
        let mut url = self.config.endpoint(VALIDATE_PATH)?;
        url.query_pairs_mut()
            .append_pair("mode", mode.as_str())
            .append_pair("how_many", &how_many.to_string());

        tracing::debug!(%url, "validating deck parameters");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;
        let body: ValidateResponse = handle_json(response).await?;

        tracing::debug!(valid = body.valid, n = ?body.n, num_cards = ?body.num_cards, "validation answered");
        Ok(body)
    }

    /// Requests a deck of order `request.n` labelled with `request.symbols`.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = self.config.endpoint(GENERATE_PATH)?;

        tracing::debug!(%url, n = request.n, symbols = request.symbols.len(), "generating deck");

        let response = self
            .http
            .post(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(request)
            .send()
            .await?;
        let body: GenerateResponse = handle_json(response).await?;

        tracing::info!(cards = body.cards.len(), "deck generated");
        Ok(body)
    }
}

/// Checks the status and parses a JSON body.
async fn handle_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = detail_from_body(&body);
        tracing::warn!(status = status.as_u16(), detail = ?detail, "deck service returned an error");
        return Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        });
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
