//! Transport client for the remote formatting service
//!
//! One JSON `POST` per user action, no retries and no client-side timeout.
//! The round trip itself sits behind [`HttpBackend`]; everything around it
//! (validation, encoding, response classification) lives here.

#[cfg(target_arch = "wasm32")]
pub mod fetch;

use futures::future::LocalBoxFuture;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{FormatRequest, FormatResponse};

/// Why a format request produced no html.
///
/// `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Input was empty after trimming; nothing was sent
    #[error("Please enter some Markdown text to format.")]
    Validation,

    /// The request never completed (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with `{ "error": ... }`
    #[error("Error formatting text: {0}")]
    Service(String),

    /// The body was not the documented JSON shape
    #[error("Network error: {0}")]
    MalformedResponse(String),
}

/// A single JSON POST round trip
pub trait HttpBackend {
    /// Send `body` to `url` as `application/json` and resolve to the response
    /// body, whatever the status code. Rejects only on transport failure.
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> LocalBoxFuture<'a, Result<String, String>>;
}

pub struct TransportClient {
    endpoint: String,
    backend: Box<dyn HttpBackend>,
}

impl TransportClient {
    pub fn new(endpoint: impl Into<String>, backend: Box<dyn HttpBackend>) -> Self {
        Self {
            endpoint: endpoint.into(),
            backend,
        }
    }

    /// Validate raw input and submit it.
    ///
    /// Blank input fails with [`TransportError::Validation`] before any
    /// network activity.
    pub async fn submit_format(&self, text: &str) -> Result<FormatResponse, TransportError> {
        let request = FormatRequest::from_input(text).ok_or(TransportError::Validation)?;
        self.submit(&request).await
    }

    /// Submit an already validated request
    pub async fn submit(&self, request: &FormatRequest) -> Result<FormatResponse, TransportError> {
        let body = serde_json::to_string(request)
            .map_err(|e| TransportError::Network(format!("could not encode request: {}", e)))?;

        log::debug!("POST {} ({} bytes)", self.endpoint, body.len());

        let reply = self
            .backend
            .post_json(&self.endpoint, body)
            .await
            .map_err(TransportError::Network)?;

        parse_response(&reply)
    }
}

/// Wire shape of the service reply; either field may be absent or null
#[derive(Deserialize, Debug, Default)]
struct ResponseBody {
    #[serde(default)]
    html: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Classify a response body.
///
/// A non-empty `error` wins over `html`; the service sends
/// `{"html": "", "error": null}` for a successful empty result.
pub fn parse_response(body: &str) -> Result<FormatResponse, TransportError> {
    let parsed: ResponseBody = serde_json::from_str(body)
        .map_err(|e| TransportError::MalformedResponse(format!("unexpected response: {}", e)))?;

    match (parsed.error.filter(|e| !e.is_empty()), parsed.html) {
        (Some(error), _) => Err(TransportError::Service(error)),
        (None, Some(html)) => Ok(FormatResponse { html }),
        (None, None) => Err(TransportError::MalformedResponse(
            "response carried neither html nor error".to_string(),
        )),
    }
}
