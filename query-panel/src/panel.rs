//! The panel and its submit action.
//!
//! State lives in a `watch` channel: every transition is one atomic update,
//! and subscribers observe whole snapshots, never a half-applied settlement.
//!
//! Each valid `submit` bumps `generation` before the request leaves. When a
//! request settles it only writes to state if its generation is still the
//! latest; otherwise it is reported as [`Settlement::Superseded`] and dropped.

use std::sync::Arc;

use ask_client::{AskBackend, AskRequest, AskResponse, TransportError};
use tokio::{runtime::Handle, sync::watch, task::JoinHandle};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    error::PanelError,
    state::{Phase, QueryState},
};

/// Shown when `submit` is called with an empty query.
pub const VALIDATION_MESSAGE: &str = "Please enter your question.";

/// Prepended to every transport failure.
pub const ERROR_PREFIX: &str = "Error contacting backend: ";

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Result applied to state.
    Succeeded,
    /// Error message applied to state.
    Failed { message: String },
    /// A newer submission was started first; state was left untouched.
    Superseded,
}

/// Handle to an in-flight submission.
///
/// Dropping it does not cancel the request; the settlement still lands in state.
#[derive(Debug)]
pub struct Submission {
    generation: u64,
    handle: JoinHandle<Settlement>,
}

impl Submission {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits until the request settles.
    ///
    /// A panicking backend settles as [`Settlement::Failed`].
    ///
    /// # Errors
    /// [`PanelError::Join`] if the settling task itself was aborted.
    pub async fn settled(self) -> Result<Settlement, PanelError> {
        Ok(self.handle.await?)
    }
}

/// Owns [`QueryState`] and talks to an [`AskBackend`].
pub struct QueryPanel<B> {
    backend: Arc<B>,
    state: Arc<watch::Sender<QueryState>>,
}

impl<B> QueryPanel<B>
where
    B: AskBackend + 'static,
{
    pub fn new(backend: B) -> Self {
        Self::with_shared_backend(Arc::new(backend))
    }

    /// Builds a panel around a backend that is also used elsewhere.
    pub fn with_shared_backend(backend: Arc<B>) -> Self {
        let (tx, _rx) = watch::channel(QueryState::default());
        Self {
            backend,
            state: Arc::new(tx),
        }
    }

    /// Input-field binding. Returns the phase to `Idle` unless a request is
    /// in flight; result and error stay as they are.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| {
            s.query_text = text;
            if !s.is_loading {
                s.phase = Phase::Idle;
            }
        });
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> QueryState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.state.subscribe()
    }

    /// Validates the query and, if non-empty, sends it.
    ///
    /// On return the state already reflects the start of the submission
    /// (`is_loading == true`, result and error cleared). The request itself
    /// runs on the current tokio runtime.
    ///
    /// # Errors
    /// - [`PanelError::Validation`] when the query is empty. `error_message`
    ///   is set and no request is made.
    /// - [`PanelError::NoRuntime`] when called outside a tokio runtime. State
    ///   is left untouched.
    #[instrument(skip_all)]
    pub fn submit(&self) -> Result<Submission, PanelError> {
        let runtime = Handle::try_current().map_err(|_| PanelError::NoRuntime)?;

        let mut started: Option<(u64, AskRequest)> = None;
        self.state.send_modify(|s| {
            if s.query_text.is_empty() {
                s.result = None;
                s.error_message = VALIDATION_MESSAGE.to_string();
                if !s.is_loading {
                    s.phase = Phase::Idle;
                }
                return;
            }
            s.generation += 1;
            s.result = None;
            s.error_message.clear();
            s.is_loading = true;
            s.phase = Phase::Submitting;
            started = Some((s.generation, AskRequest::new(s.query_text.clone())));
        });

        let Some((generation, request)) = started else {
            warn!("empty query rejected");
            return Err(PanelError::Validation);
        };
        info!(generation, query_len = request.user_query.len(), "submission started");

        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        let handle = runtime.spawn(async move {
            // The exchange runs in its own task so a panicking backend still
            // settles this generation as a failure.
            let exchange = tokio::spawn(async move { backend.ask(&request).await });
            let outcome = match exchange.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(generation, error = %e, "backend task aborted");
                    Err(TransportError::Unlabelled(e.to_string()))
                }
            };
            settle(&state, generation, outcome)
        });

        Ok(Submission { generation, handle })
    }
}

/// Applies one outcome to state if `generation` is still the latest.
fn settle(
    state: &watch::Sender<QueryState>,
    generation: u64,
    outcome: Result<AskResponse, TransportError>,
) -> Settlement {
    let mut settlement = Settlement::Superseded;
    state.send_if_modified(|s| {
        if s.generation != generation {
            return false;
        }
        s.is_loading = false;
        match outcome {
            Ok(resp) => {
                s.result = resp.into_result();
                s.error_message.clear();
                s.phase = Phase::Succeeded;
                settlement = Settlement::Succeeded;
            }
            Err(err) => {
                let message = failure_message(&err);
                s.result = None;
                s.error_message.clone_from(&message);
                s.phase = Phase::Failed;
                settlement = Settlement::Failed { message };
            }
        }
        true
    });

    match &settlement {
        Settlement::Succeeded => info!(generation, "submission succeeded"),
        Settlement::Failed { message } => warn!(generation, %message, "submission failed"),
        Settlement::Superseded => debug!(generation, "stale settlement discarded"),
    }
    settlement
}

/// `ERROR_PREFIX` + the failure's message, or its string form without one.
fn failure_message(err: &TransportError) -> String {
    let detail = err.message().unwrap_or_else(|| err.to_string());
    format!("{ERROR_PREFIX}{detail}")
}
