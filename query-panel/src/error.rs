//! Typed error for the query-panel crate.

use thiserror::Error;

use crate::panel::VALIDATION_MESSAGE;

#[derive(Debug, Error)]
pub enum PanelError {
    /// The query was empty; nothing was sent.
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,

    /// `submit` was called outside a tokio runtime.
    #[error("submit requires a running tokio runtime")]
    NoRuntime,

    /// The settling task was aborted before it could report.
    #[error("submission task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
