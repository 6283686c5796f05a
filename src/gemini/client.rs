//! Core `GenerationClient` trait and the `GeminiClient` implementation.
//!
//! `GeminiClient` POSTs to
//! `{base_url}/v1beta/models/{model}:generateContent`, one HTTP request per
//! call, no retries.  Connection details come from [`GeminiConfig`]; the API
//! key is resolved from the config, then the process environment, at call
//! time.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::GeminiConfig;
use crate::gemini::request::{GenerateContentResponse, GenerationRequest};

// ---------------------------------------------------------------------------
// TransportError
// ---------------------------------------------------------------------------

/// Failures of the network call itself.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The reply body was not the expected `generateContent` JSON.
    #[error("failed to decode service reply: {0}")]
    Decode(String),

    /// No API key in the settings file or the environment.
    #[error("no API key configured")]
    MissingApiKey,
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// GenerationClient trait
// ---------------------------------------------------------------------------

/// Async seam between the tutor gateways and the generation service.
///
/// Implementors return the raw reply text (trimmed, possibly empty).  They
/// must be `Send + Sync` so a single client can be shared behind
/// `Arc<dyn GenerationClient>`.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, TransportError>;
}

// ---------------------------------------------------------------------------
// GeminiClient
// ---------------------------------------------------------------------------

/// Calls the Gemini REST API.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
    env_lookup: fn(&str) -> Option<String>,
}

/// Environment lookup used for API key resolution.
fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl GeminiClient {
    /// Build a `GeminiClient` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default client is used if the builder fails.
    pub fn from_config(config: &GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            env_lookup: process_env,
        }
    }

    /// Full `generateContent` URL for `model`.
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }
}

/// Pull `error.message` out of a Google API error body, else return the body.
fn service_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, TransportError> {
        let api_key = self
            .config
            .resolve_api_key_with(self.env_lookup)
            .ok_or(TransportError::MissingApiKey)?;

        let url = self.endpoint(&request.model);
        let body = request.to_wire();

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: service_error_message(&text),
            });
        }

        let reply: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        if let Some(reason) = reply.block_reason() {
            log::warn!("gemini: prompt blocked ({reason})");
        }

        Ok(reply.text())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
