//! HTTP collaborator for the analytics agent backend.
//!
//! The crate talks to exactly one endpoint, `POST {endpoint}/ask`, and exposes
//! it through the [`AskBackend`] trait so callers can swap the transport in
//! tests. [`HttpAskService`] is the `reqwest`-based implementation.
//!
//! # Example
//! ```no_run
//! use ask_client::{AskBackend, AskClientConfig, AskRequest, HttpAskService};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = HttpAskService::new(AskClientConfig::default())?;
//! let resp = svc.ask(&AskRequest::new("Show trades above 1000 shares")).await?;
//! println!("{:?}", resp.result);
//! # Ok(()) }
//! ```

pub mod backend;
pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use backend::{AskBackend, AskRequest, AskResponse};
pub use config::{AskClientConfig, DEFAULT_ENDPOINT};
pub use error_handler::{AskClientError, ConfigError, Result, TransportError};
pub use services::http_ask_service::HttpAskService;
