//! `reqwest` client for the analytics agent backend.
//!
//! One call, one request:
//! - `POST {endpoint}/ask` with `{ "user_query": ... }`
//!
//! Any transport failure, non-2xx status or undecodable body is returned as a
//! [`TransportError`]. Nothing is retried.
//!
//! # Examples
//!
//! ```no_run
//! use ask_client::{AskBackend, AskClientConfig, AskRequest, HttpAskService};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = HttpAskService::new(AskClientConfig::default())?;
//! let out = svc.ask(&AskRequest::new("average slippage by algo")).await?;
//! println!("{}", out.result);
//! # Ok(()) }
//! ```

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::backend::{AskBackend, AskRequest, AskResponse};
use crate::config::AskClientConfig;
use crate::error_handler::{AskClientError, TransportError, make_snippet};

/// Max chars of an error body kept in [`TransportError::HttpStatus`].
const SNIPPET_CHARS: usize = 240;

/// Thin client for `/ask`.
///
/// Reuses one HTTP client for the lifetime of the service. Clone-free sharing
/// goes through `Arc<HttpAskService>`.
#[derive(Debug)]
pub struct HttpAskService {
    client: reqwest::Client,
    url_ask: String,
}

impl HttpAskService {
    /// Creates a new [`HttpAskService`] from the given config.
    ///
    /// # Errors
    /// - [`AskClientError::Config`] if `cfg.endpoint` is not http/https
    /// - [`AskClientError::ClientBuild`] if the HTTP client cannot be built
    pub fn new(cfg: AskClientConfig) -> Result<Self, AskClientError> {
        cfg.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = cfg.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            url_ask: cfg.ask_url(),
        })
    }

    /// URL every request is sent to.
    pub fn url(&self) -> &str {
        &self.url_ask
    }
}

#[async_trait]
impl AskBackend for HttpAskService {
    /// Sends the query and decodes `{ result: ... }`.
    ///
    /// # Errors
    /// - [`TransportError::Connect`] when no response arrives
    /// - [`TransportError::HttpStatus`] for non-2xx responses
    /// - [`TransportError::Decode`] if the body cannot be read or is not the
    ///   expected JSON
    #[instrument(skip_all, fields(url = %self.url_ask, query_len = request.user_query.len()))]
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse, TransportError> {
        debug!("POST {}", self.url_ask);
        let resp = self
            .client
            .post(&self.url_ask)
            .json(request)
            .send()
            .await
            .map_err(|source| TransportError::Connect {
                url: self.url_ask.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(%status, "backend returned non-success status");
            return Err(TransportError::HttpStatus {
                status,
                url: self.url_ask.clone(),
                snippet: make_snippet(&text, SNIPPET_CHARS),
            });
        }

        // A response arrived, so a broken body is a parsing failure, not a
        // connection failure.
        let body = resp.bytes().await.map_err(|e| TransportError::Decode {
            url: self.url_ask.clone(),
            reason: format!("failed to read response body: {e}"),
        })?;

        let out: AskResponse =
            serde_json::from_slice(&body).map_err(|e| TransportError::Decode {
                url: self.url_ask.clone(),
                reason: format!("serde error: {e}; expected `{{ result: ... }}`"),
            })?;

        debug!(%status, bytes = body.len(), "backend answered");
        Ok(out)
    }
}
