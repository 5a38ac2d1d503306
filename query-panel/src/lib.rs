//! Query panel: one input, one action, three observable outcomes.
//!
//! Public API: [`QueryPanel`]. Edit the query with [`QueryPanel::set_query`],
//! fire [`QueryPanel::submit`], and watch [`QueryState`] through
//! [`QueryPanel::subscribe`]. The network exchange is delegated to any
//! [`ask_client::AskBackend`].
//!
//! # Example
//! ```no_run
//! # use ask_client::{AskClientConfig, HttpAskService};
//! # use query_panel::QueryPanel;
//! # #[tokio::main] async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let panel = QueryPanel::new(HttpAskService::new(AskClientConfig::default())?);
//! panel.set_query("Show trades above 1000 shares");
//! panel.submit()?.settled().await?;
//! println!("{:?}", panel.snapshot().result);
//! # Ok(()) }
//! ```

mod error;
mod panel;
pub mod progress;
mod state;

pub use error::PanelError;
pub use panel::{ERROR_PREFIX, QueryPanel, Settlement, Submission, VALIDATION_MESSAGE};
pub use progress::{NoopProgress, Progress, SpinnerProgress};
pub use state::{Phase, QueryState};
